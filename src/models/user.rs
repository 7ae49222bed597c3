// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    #[schema(example = "diego@drgroup.co")]
    pub email: String,

    pub display_name: Option<String>,

    // Preenchido quando o usuário vincula o chat pelo bot
    pub telegram_chat_id: Option<i64>,

    pub created_at: Option<DateTime<Utc>>,
}

// Os quatro portões de entrega. O relatório diário tem opt-in próprio e
// separado dos alertas de vencimento: nunca sai por padrão.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub overdue_alerts: bool,
    pub due_today_alerts: bool,
    pub due_soon_alerts: bool,
    pub daily_report: bool,
}

impl Default for NotificationPreferences {
    // Mesmos defaults da migração: alertas ligados, relatório diário desligado
    fn default() -> Self {
        Self {
            overdue_alerts: true,
            due_today_alerts: true,
            due_soon_alerts: true,
            daily_report: false,
        }
    }
}

// Um usuário junto com suas preferências já resolvidas (defaults aplicados
// quando a linha de preferências ainda não existe)
#[derive(Debug, Clone)]
pub struct Recipient {
    pub user: User,
    pub preferences: NotificationPreferences,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "commitment_overdue")]
    pub kind: String,

    pub title: String,
    pub body: String,

    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,

    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesPayload {
    pub overdue_alerts: Option<bool>,
    pub due_today_alerts: Option<bool>,
    pub due_soon_alerts: Option<bool>,
    pub daily_report: Option<bool>,
}
