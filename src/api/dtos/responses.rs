use serde::Serialize;

#[derive(Serialize)]
pub struct SetupResponse {
    pub user_id: String,
    pub admin_username: String,
    pub admin_secret: String,
}

#[derive(Serialize)]
pub struct CanRegisterResponse {
    pub can_register: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct QrPayloadResponse {
    pub r#type: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "qrToken")]
    pub qr_token: String,
    pub timestamp: i64,
}
