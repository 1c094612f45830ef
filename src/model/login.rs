use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrCodeLoginStatus {
    /// Generated, not scanned yet.
    Ready,
    /// Scanned, waiting for confirmation on the phone.
    Scanned,
    Success,
    Expired,
    Failed,
}

impl QrCodeLoginStatus {
    /// Map a passport status code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Success,
            86038 => Self::Expired,
            86090 => Self::Scanned,
            86101 => Self::Ready,
            _ => Self::Failed,
        }
    }

    /// Polling stops once one of these is reached.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Expired | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeInfo {
    /// URL to encode into the QR image.
    pub image_url: String,
    pub qr_code_key: String,
    pub expire_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeGenerateResult {
    pub success: bool,
    pub qr_code_info: Option<QrCodeInfo>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodePollResult {
    pub status: QrCodeLoginStatus,
    pub status_message: String,
    pub refresh_token: Option<String>,
}
