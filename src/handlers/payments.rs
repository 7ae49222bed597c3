// src/handlers/payments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::payment::Payment};

// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    responses(
        (status = 200, description = "Todos os pagamentos, mais recente primeiro", body = Vec<Payment>)
    )
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state.payment_repo.find_all().await?;
    Ok((StatusCode::OK, Json(payments)))
}

// GET /api/payments/{id}
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 200, body = Payment),
        (status = 404, description = "Pagamento não encontrado")
    )
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state.payment_repo.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(payment)))
}
