// src/handlers/telegram.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::webhook::WebhookAuth,
    models::telegram::Update,
};

// POST /api/telegram/webhook
//
// Importante: depois que a assinatura confere, a resposta é SEMPRE 200.
// Se devolvermos erro, a Bot API re-entrega o mesmo update em loop.
#[utoipa::path(
    post,
    path = "/api/telegram/webhook",
    tag = "Telegram",
    responses(
        (status = 200, description = "Update processado (ou ignorado)"),
        (status = 401, description = "Assinatura do webhook inválida")
    )
)]
pub async fn webhook(
    State(app_state): State<AppState>,
    _auth: WebhookAuth,
    Json(update): Json<Update>,
) -> Result<impl IntoResponse, AppError> {
    app_state.bot_service.handle_update(update).await;
    Ok(StatusCode::OK)
}
