//! Passport QR login responses.

use serde_json::Value;

use super::json::{envelope_message, field, int_like, non_empty_str, require_object, str_field};
use crate::{
    Error, Result,
    model::{QrCodeGenerateResult, QrCodeInfo, QrCodeLoginStatus, QrCodePollResult},
};

fn envelope_code(root: &Value) -> Result<i64> {
    field(root, "code")
        .and_then(int_like)
        .ok_or_else(|| Error::missing("code"))
}

/// A rejected request is reported in the result, not as an error.
pub fn qr_code_generate(root: &Value) -> Result<QrCodeGenerateResult> {
    if envelope_code(root)? != 0 {
        return Ok(QrCodeGenerateResult {
            success: false,
            qr_code_info: None,
            error_message: Some(envelope_message(root)),
        });
    }

    let data = require_object(root, "data", "data")?;
    let qr_code_key =
        non_empty_str(data, "qrcode_key").ok_or_else(|| Error::missing("data.qrcode_key"))?;
    let image_url = non_empty_str(data, "url").ok_or_else(|| Error::missing("data.url"))?;
    let expire_time = field(root, "ttl")
        .and_then(int_like)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0);

    Ok(QrCodeGenerateResult {
        success: true,
        qr_code_info: Some(QrCodeInfo {
            image_url,
            qr_code_key,
            expire_time,
        }),
        error_message: None,
    })
}

/// The login state lives in `data.code`; the envelope code only says whether
/// the poll itself was accepted.
pub fn qr_code_poll(root: &Value) -> Result<QrCodePollResult> {
    let code = envelope_code(root)?;
    if code != 0 {
        return Ok(QrCodePollResult {
            status: QrCodeLoginStatus::Failed,
            status_message: envelope_message(root),
            refresh_token: None,
        });
    }

    let data = require_object(root, "data", "data")?;
    let status_code = field(data, "code").and_then(int_like).unwrap_or(code);
    let status_message = str_field(data, "message")
        .map(str::to_string)
        .unwrap_or_else(|| envelope_message(root));

    Ok(QrCodePollResult {
        status: QrCodeLoginStatus::from_code(status_code),
        status_message,
        refresh_token: non_empty_str(data, "refresh_token"),
    })
}
