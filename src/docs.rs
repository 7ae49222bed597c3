// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_month_report,

        // --- Commitments ---
        handlers::commitments::list_commitments,
        handlers::commitments::get_commitment,
        handlers::commitments::list_commitment_payments,

        // --- Payments ---
        handlers::payments::list_payments,
        handlers::payments::get_payment,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::get_preferences,
        handlers::notifications::update_preferences,

        // --- Telegram ---
        handlers::telegram::webhook,

        // --- Jobs ---
        handlers::jobs::run_due_alerts,
        handlers::jobs::run_daily_report,
    ),
    components(
        schemas(
            // --- DASHBOARD ---
            models::summary::Bucket,
            models::summary::BucketTotals,
            models::summary::DashboardSummary,
            models::summary::CommitmentCard,
            models::summary::PaymentCard,
            models::summary::ReminderDigest,
            models::summary::JobOutcome,

            // --- FINANCE ---
            models::commitment::Settlement,
            models::commitment::Commitment,
            models::payment::Payment,

            // --- USERS / NOTIFICATIONS ---
            models::user::User,
            models::user::NotificationPreferences,
            models::user::Notification,
            models::user::UpdatePreferencesPayload,

            // --- Payloads ---
            handlers::dashboard::ReportQuery,
        )
    ),
    tags(
        (name = "Dashboard", description = "Resumo e relatórios dos compromissos"),
        (name = "Commitments", description = "Consulta de compromissos"),
        (name = "Payments", description = "Consulta de pagamentos"),
        (name = "Notifications", description = "Notificações e preferências de entrega"),
        (name = "Telegram", description = "Webhook do bot"),
        (name = "Jobs", description = "Gatilhos manuais dos jobs agendados")
    )
)]
pub struct ApiDoc;
