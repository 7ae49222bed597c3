// src/services/scheduler.rs

// Agendador dos jobs diários. Um loop simples que acorda a cada minuto e
// dispara os dois jobs uma única vez por dia-calendário local, a partir da
// hora configurada (REPORT_HOUR). Se o processo estava fora do ar na hora
// exata, a próxima volta do loop ainda dispara no mesmo dia.

use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, Timelike, Utc};

use crate::services::notification_service::NotificationService;

pub fn spawn(service: NotificationService, offset: FixedOffset, report_hour: u32) {
    tokio::spawn(async move {
        run_loop(service, offset, report_hour).await;
    });
}

async fn run_loop(service: NotificationService, offset: FixedOffset, report_hour: u32) {
    tracing::info!(report_hour, "⏰ Agendador de jobs diários iniciado");

    let mut last_run: Option<NaiveDate> = None;
    let mut ticker = tokio::time::interval(Duration::from_secs(60));

    loop {
        ticker.tick().await;

        let now_local = Utc::now().with_timezone(&offset);
        let today = now_local.date_naive();

        if now_local.hour() < report_hour || last_run == Some(today) {
            continue;
        }
        last_run = Some(today);

        tracing::info!(%today, "executando jobs diários");

        match service.run_due_alerts(today).await {
            Ok(outcome) => {
                tracing::info!(sent = outcome.sent, errors = outcome.errors, "alertas de vencimento")
            }
            Err(e) => tracing::error!("job de alertas de vencimento falhou: {e}"),
        }

        match service.run_daily_report(today).await {
            Ok(outcome) => {
                tracing::info!(sent = outcome.sent, errors = outcome.errors, "relatório diário")
            }
            Err(e) => tracing::error!("job de relatório diário falhou: {e}"),
        }
    }
}
