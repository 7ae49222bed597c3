// src/services/notification_service.rs

// Os dois jobs de notificação (alertas de vencimento e relatório diário).
//
// Contrato de entrega: falha com UM destinatário é capturada, logada e
// contada, nunca aborta o lote. O job devolve o agregado {sent, errors}.
// Portões: cada categoria de alerta tem sua flag de preferência, e o
// relatório diário tem opt-in próprio e separado (desligado por padrão).

use chrono::{FixedOffset, NaiveDate};
use serde_json::json;

use crate::{
    common::error::AppError,
    db::{CommitmentRepository, NotificationRepository, UserRepository},
    models::{
        summary::{CommitmentCard, JobOutcome, ReminderDigest},
        user::Recipient,
    },
    services::{
        dashboard_service::DashboardService,
        reminders::compute_reminders,
        telegram::{format_money, format_reminder_message, format_summary_message, TelegramClient},
    },
};

#[derive(Clone)]
pub struct NotificationService {
    commitments: CommitmentRepository,
    users: UserRepository,
    notifications: NotificationRepository,
    dashboard: DashboardService,
    client: TelegramClient,
    offset: FixedOffset,
}

impl NotificationService {
    pub fn new(
        commitments: CommitmentRepository,
        users: UserRepository,
        notifications: NotificationRepository,
        dashboard: DashboardService,
        client: TelegramClient,
        offset: FixedOffset,
    ) -> Self {
        Self {
            commitments,
            users,
            notifications,
            dashboard,
            client,
            offset,
        }
    }

    /// Job 1: alertas de vencimento (vencidos / vencem hoje / vencem em
    /// 3 dias), cada categoria atrás da sua flag de preferência.
    pub async fn run_due_alerts(&self, today: NaiveDate) -> Result<JobOutcome, AppError> {
        // Pré-filtro empurrado para a consulta: o seletor só olha o que
        // ainda consta como pending/overdue
        let commitments = self
            .commitments
            .find_by_statuses(&["pending", "overdue"])
            .await?;
        let digest = compute_reminders(&commitments, today, self.offset);

        if digest.is_empty() {
            tracing::info!("nenhum compromisso para lembrar hoje");
            return Ok(JobOutcome::default());
        }

        let recipients = self.users.find_all_recipients().await?;
        let mut outcome = JobOutcome::default();

        for recipient in &recipients {
            // Recorta o resumo para as categorias que ESTE destinatário ligou
            let filtered = ReminderDigest {
                reference_date: digest.reference_date,
                overdue: gated(&digest.overdue, recipient.preferences.overdue_alerts),
                due_today: gated(&digest.due_today, recipient.preferences.due_today_alerts),
                due_in_3_days: gated(&digest.due_in_3_days, recipient.preferences.due_soon_alerts),
            };
            if filtered.is_empty() {
                continue;
            }

            match self.deliver_due_alerts(recipient, &filtered).await {
                Ok(()) => outcome.sent += 1,
                Err(e) => {
                    outcome.errors += 1;
                    tracing::error!(
                        user = %recipient.user.email,
                        "falha entregando alertas de vencimento: {e}"
                    );
                }
            }
        }

        tracing::info!(
            sent = outcome.sent,
            errors = outcome.errors,
            "job de alertas de vencimento concluído"
        );
        Ok(outcome)
    }

    /// Job 2: relatório diário completo, SÓ para quem ligou o opt-in
    /// separado `daily_report`. Nunca sai por padrão.
    pub async fn run_daily_report(&self, today: NaiveDate) -> Result<JobOutcome, AppError> {
        let summary = self.dashboard.get_summary(today).await?;
        let recipients = self.users.find_all_recipients().await?;

        let mut outcome = JobOutcome::default();

        for recipient in recipients.iter().filter(|r| r.preferences.daily_report) {
            let result = async {
                let body = format!(
                    "{} vencidos · {} vencem hoje · {} pendentes ({})",
                    summary.overdue.count,
                    summary.due_today.count,
                    summary.pending.count,
                    format_money(summary.pending.amount)
                );
                self.notifications
                    .insert(
                        recipient.user.id,
                        "daily_report",
                        "📊 Relatório diário",
                        &body,
                        Some(&json!({ "referenceDate": summary.reference_date })),
                    )
                    .await?;

                if let Some(chat_id) = recipient.user.telegram_chat_id {
                    let message = format_summary_message("📊 Relatório diário", &summary);
                    self.client.send_message(chat_id, &message).await?;
                }
                Ok::<(), AppError>(())
            }
            .await;

            match result {
                Ok(()) => outcome.sent += 1,
                Err(e) => {
                    outcome.errors += 1;
                    tracing::error!(
                        user = %recipient.user.email,
                        "falha entregando relatório diário: {e}"
                    );
                }
            }
        }

        tracing::info!(
            sent = outcome.sent,
            errors = outcome.errors,
            "job de relatório diário concluído"
        );
        Ok(outcome)
    }

    async fn deliver_due_alerts(
        &self,
        recipient: &Recipient,
        digest: &ReminderDigest,
    ) -> Result<(), AppError> {
        // Uma notificação por categoria não-vazia (o sino do cliente web
        // agrupa por tipo), uma única mensagem no Telegram
        let categories = [
            ("commitment_overdue", "🚨 Compromissos vencidos", &digest.overdue),
            ("commitment_due_today", "📅 Compromissos vencem hoje", &digest.due_today),
            ("commitment_due_soon", "⏰ Compromissos vencem em 3 dias", &digest.due_in_3_days),
        ];

        for (kind, title, cards) in categories {
            if cards.is_empty() {
                continue;
            }
            let total: rust_decimal::Decimal = cards.iter().map(|c| c.amount).sum();
            let body = format!(
                "{} compromisso(s) somando {}",
                cards.len(),
                format_money(total)
            );
            let ids: Vec<_> = cards.iter().map(|c| c.id).collect();

            self.notifications
                .insert(
                    recipient.user.id,
                    kind,
                    title,
                    &body,
                    Some(&json!({ "commitmentIds": ids })),
                )
                .await?;
        }

        if let Some(chat_id) = recipient.user.telegram_chat_id {
            let message = format_reminder_message(digest);
            self.client.send_message(chat_id, &message).await?;
        }

        Ok(())
    }
}

fn gated(cards: &[CommitmentCard], enabled: bool) -> Vec<CommitmentCard> {
    if enabled {
        cards.to_vec()
    } else {
        Vec::new()
    }
}
