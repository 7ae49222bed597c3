// src/config.rs

use chrono::FixedOffset;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{CommitmentRepository, NotificationRepository, PaymentRepository, UserRepository},
    services::{BotService, DashboardService, NotificationService, TelegramClient},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    // Segredo que valida o webhook do Telegram
    pub webhook_secret: String,

    // Fuso de avaliação (deslocamento fixo; a operação é na Colômbia,
    // que não tem horário de verão) e hora local dos jobs diários
    pub utc_offset: FixedOffset,
    pub report_hour: u32,

    pub commitment_repo: CommitmentRepository,
    pub payment_repo: PaymentRepository,
    pub user_repo: UserRepository,
    pub notification_repo: NotificationRepository,

    pub dashboard_service: DashboardService,
    pub notification_service: NotificationService,
    pub bot_service: BotService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let bot_token =
            env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN deve ser definido");
        let webhook_secret =
            env::var("TELEGRAM_WEBHOOK_SECRET").expect("TELEGRAM_WEBHOOK_SECRET deve ser definido");

        let offset_hours: i32 = env::var("UTC_OFFSET_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(-5);
        let utc_offset = FixedOffset::east_opt(offset_hours * 3600)
            .ok_or_else(|| anyhow::anyhow!("UTC_OFFSET_HOURS fora do intervalo"))?;

        let report_hour: u32 = env::var("REPORT_HOUR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let commitment_repo = CommitmentRepository::new(db_pool.clone());
        let payment_repo = PaymentRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());

        let telegram = TelegramClient::new(&bot_token);

        let dashboard_service = DashboardService::new(
            commitment_repo.clone(),
            payment_repo.clone(),
            utc_offset,
        );
        let notification_service = NotificationService::new(
            commitment_repo.clone(),
            user_repo.clone(),
            notification_repo.clone(),
            dashboard_service.clone(),
            telegram.clone(),
            utc_offset,
        );
        let bot_service = BotService::new(
            dashboard_service.clone(),
            user_repo.clone(),
            telegram.clone(),
        );

        Ok(Self {
            db_pool,
            webhook_secret,
            utc_offset,
            report_hour,
            commitment_repo,
            payment_repo,
            user_repo,
            notification_repo,
            dashboard_service,
            notification_service,
            bot_service,
        })
    }
}
