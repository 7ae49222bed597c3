// src/handlers/jobs.rs

// Gatilhos manuais dos jobs agendados, úteis para operação e para
// testar as preferências sem esperar a hora do agendador.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::summary::JobOutcome};

// POST /api/jobs/due-alerts
#[utoipa::path(
    post,
    path = "/api/jobs/due-alerts",
    tag = "Jobs",
    responses(
        (status = 200, description = "Alertas de vencimento disparados", body = JobOutcome)
    )
)]
pub async fn run_due_alerts(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let today = app_state.dashboard_service.today();
    let outcome = app_state.notification_service.run_due_alerts(today).await?;
    Ok((StatusCode::OK, Json(outcome)))
}

// POST /api/jobs/daily-report
#[utoipa::path(
    post,
    path = "/api/jobs/daily-report",
    tag = "Jobs",
    responses(
        (status = 200, description = "Relatório diário disparado", body = JobOutcome)
    )
)]
pub async fn run_daily_report(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let today = app_state.dashboard_service.today();
    let outcome = app_state
        .notification_service
        .run_daily_report(today)
        .await?;
    Ok((StatusCode::OK, Json(outcome)))
}
