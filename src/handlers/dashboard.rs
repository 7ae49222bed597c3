// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Datelike;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::summary::DashboardSummary,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo geral dos compromissos e pagamentos", body = DashboardSummary)
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let today = app_state.dashboard_service.today();
    let summary = app_state.dashboard_service.get_summary(today).await?;

    Ok((StatusCode::OK, Json(summary)))
}

#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[validate(range(min = 1, max = 12, message = "mês deve estar entre 1 e 12"))]
    pub month: u32,

    // Ausente = ano atual
    pub year: Option<i32>,
}

// GET /api/dashboard/report?month=&year=
#[utoipa::path(
    get,
    path = "/api/dashboard/report",
    tag = "Dashboard",
    params(ReportQuery),
    responses(
        (status = 200, description = "Resumo de um mês fechado (mesmo objeto do /reporte do bot)", body = DashboardSummary),
        (status = 400, description = "Mês inválido")
    )
)]
pub async fn get_month_report(
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let today = app_state.dashboard_service.today();
    let year = query.year.unwrap_or_else(|| today.year());

    let summary = app_state
        .dashboard_service
        .get_month_summary(year, query.month, today)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}
