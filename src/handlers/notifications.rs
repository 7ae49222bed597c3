// src/handlers/notifications.rs

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
    models::user::{Notification, NotificationPreferences, UpdatePreferencesPayload},
};

// GET /api/users/{id}/notifications
#[utoipa::path(
    get,
    path = "/api/users/{id}/notifications",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Notificações do usuário, mais recente primeiro", body = Vec<Notification>)
    )
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_repo.find_by_id(user_id).await?;
    let notifications = app_state.notification_repo.list_for_user(user_id).await?;
    Ok((StatusCode::OK, Json(notifications)))
}

// GET /api/users/{id}/preferences
#[utoipa::path(
    get,
    path = "/api/users/{id}/preferences",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Preferências de notificação (defaults quando nunca salvas)", body = NotificationPreferences),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn get_preferences(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let preferences = app_state.user_repo.get_preferences(user_id).await?;
    Ok((StatusCode::OK, Json(preferences)))
}

// PUT /api/users/{id}/preferences
#[utoipa::path(
    put,
    path = "/api/users/{id}/preferences",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdatePreferencesPayload,
    responses(
        (status = 200, description = "Preferências atualizadas", body = NotificationPreferences),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn update_preferences(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdatePreferencesPayload>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state
        .user_repo
        .update_preferences(user_id, &payload)
        .await?;
    Ok((StatusCode::OK, Json(updated)))
}
