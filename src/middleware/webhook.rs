// src/middleware/webhook.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{common::error::AppError, config::AppState};

// O cabeçalho que o Telegram envia quando o webhook é registrado com
// secret_token. Requisição sem ele (ou com valor errado) não é do Telegram.
const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

// O nosso extrator: só existe quando a assinatura confere.
#[derive(Debug, Clone)]
pub struct WebhookAuth;

impl FromRequestParts<AppState> for WebhookAuth {
    // AppError já implementa IntoResponse, então serve de rejeição
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(SECRET_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(value) if value == state.webhook_secret => Ok(WebhookAuth),
            _ => Err(AppError::WebhookUnauthorized),
        }
    }
}
