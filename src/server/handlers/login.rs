use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Result,
    model::{QrCodeGenerateResult, QrCodePollResult},
    server::state::AppState,
};

/// Handle GET /api/login/qrcode.
pub async fn handle_qr_generate(State(state): State<AppState>) -> Result<Json<QrCodeGenerateResult>> {
    Ok(Json(state.service.generate_login_qr_code().await?))
}

/// Handle GET /api/login/qrcode/{key}.
pub async fn handle_qr_poll(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<QrCodePollResult>> {
    Ok(Json(state.service.poll_login_qr_code_status(&key).await?))
}
