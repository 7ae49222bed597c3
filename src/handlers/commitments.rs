// src/handlers/commitments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{commitment::Commitment, payment::Payment},
};

// GET /api/commitments
#[utoipa::path(
    get,
    path = "/api/commitments",
    tag = "Commitments",
    responses(
        (status = 200, description = "Todos os compromissos, ascendente por vencimento", body = Vec<Commitment>)
    )
)]
pub async fn list_commitments(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let commitments = app_state.commitment_repo.find_all().await?;
    Ok((StatusCode::OK, Json(commitments)))
}

// GET /api/commitments/{id}
#[utoipa::path(
    get,
    path = "/api/commitments/{id}",
    tag = "Commitments",
    params(("id" = Uuid, Path, description = "ID do compromisso")),
    responses(
        (status = 200, body = Commitment),
        (status = 404, description = "Compromisso não encontrado")
    )
)]
pub async fn get_commitment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let commitment = app_state.commitment_repo.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(commitment)))
}

// GET /api/commitments/{id}/payments
#[utoipa::path(
    get,
    path = "/api/commitments/{id}/payments",
    tag = "Commitments",
    params(("id" = Uuid, Path, description = "ID do compromisso")),
    responses(
        (status = 200, description = "Pagamentos do compromisso, mais recente primeiro", body = Vec<Payment>)
    )
)]
pub async fn list_commitment_payments(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // 404 se o compromisso não existe, lista (possivelmente vazia) se existe
    app_state.commitment_repo.find_by_id(id).await?;
    let payments = app_state.payment_repo.find_by_commitment(id).await?;
    Ok((StatusCode::OK, Json(payments)))
}
