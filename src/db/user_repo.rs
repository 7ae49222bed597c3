// src/db/user_repo.rs

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::user::{NotificationPreferences, Recipient, UpdatePreferencesPayload, User},
};

// Linha achatada do LEFT JOIN usuário + preferências. As colunas de
// preferência vêm nulas quando o usuário nunca salvou nada; os defaults
// são aplicados na montagem do `Recipient`.
#[derive(FromRow)]
struct RecipientRow {
    id: Uuid,
    email: String,
    display_name: Option<String>,
    telegram_chat_id: Option<i64>,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
    overdue_alerts: Option<bool>,
    due_today_alerts: Option<bool>,
    due_soon_alerts: Option<bool>,
    daily_report: Option<bool>,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos os usuários com as preferências já resolvidas. É sobre esta
    /// lista que os jobs de notificação fazem o fan-out.
    pub async fn find_all_recipients(&self) -> Result<Vec<Recipient>, AppError> {
        let rows = sqlx::query_as::<_, RecipientRow>(
            r#"
            SELECT u.id, u.email, u.display_name, u.telegram_chat_id, u.created_at,
                   p.overdue_alerts, p.due_today_alerts, p.due_soon_alerts, p.daily_report
            FROM users u
            LEFT JOIN notification_preferences p ON p.user_id = u.id
            ORDER BY u.email ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let defaults = NotificationPreferences::default();
        let recipients = rows
            .into_iter()
            .map(|row| Recipient {
                user: User {
                    id: row.id,
                    email: row.email,
                    display_name: row.display_name,
                    telegram_chat_id: row.telegram_chat_id,
                    created_at: row.created_at,
                },
                preferences: NotificationPreferences {
                    overdue_alerts: row.overdue_alerts.unwrap_or(defaults.overdue_alerts),
                    due_today_alerts: row.due_today_alerts.unwrap_or(defaults.due_today_alerts),
                    due_soon_alerts: row.due_soon_alerts.unwrap_or(defaults.due_soon_alerts),
                    daily_report: row.daily_report.unwrap_or(defaults.daily_report),
                },
            })
            .collect();

        Ok(recipients)
    }

    pub async fn get_preferences(&self, user_id: Uuid) -> Result<NotificationPreferences, AppError> {
        // Garante que o usuário existe antes de responder defaults
        self.find_by_id(user_id).await?;

        let preferences = sqlx::query_as::<_, NotificationPreferences>(
            r#"
            SELECT overdue_alerts, due_today_alerts, due_soon_alerts, daily_report
            FROM notification_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .unwrap_or_default();

        Ok(preferences)
    }

    /// Upsert parcial: campos ausentes no payload preservam o valor atual
    /// (ou caem nos defaults na primeira gravação).
    pub async fn update_preferences(
        &self,
        user_id: Uuid,
        payload: &UpdatePreferencesPayload,
    ) -> Result<NotificationPreferences, AppError> {
        self.find_by_id(user_id).await?;

        let preferences = sqlx::query_as::<_, NotificationPreferences>(
            r#"
            INSERT INTO notification_preferences
                (user_id, overdue_alerts, due_today_alerts, due_soon_alerts, daily_report, updated_at)
            VALUES
                ($1, COALESCE($2, true), COALESCE($3, true), COALESCE($4, true), COALESCE($5, false), now())
            ON CONFLICT (user_id) DO UPDATE SET
                overdue_alerts   = COALESCE($2, notification_preferences.overdue_alerts),
                due_today_alerts = COALESCE($3, notification_preferences.due_today_alerts),
                due_soon_alerts  = COALESCE($4, notification_preferences.due_soon_alerts),
                daily_report     = COALESCE($5, notification_preferences.daily_report),
                updated_at       = now()
            RETURNING overdue_alerts, due_today_alerts, due_soon_alerts, daily_report
            "#,
        )
        .bind(user_id)
        .bind(payload.overdue_alerts)
        .bind(payload.due_today_alerts)
        .bind(payload.due_soon_alerts)
        .bind(payload.daily_report)
        .fetch_one(&self.pool)
        .await?;

        Ok(preferences)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, display_name, telegram_chat_id, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(user)
    }

    /// Vincula um chat do Telegram ao usuário dono do e-mail.
    /// `None` quando o e-mail não existe; o bot responde educadamente.
    pub async fn link_telegram_chat(
        &self,
        email: &str,
        chat_id: i64,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET telegram_chat_id = $2
            WHERE lower(email) = lower($1)
            RETURNING id, email, display_name, telegram_chat_id, created_at
            "#,
        )
        .bind(email)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
