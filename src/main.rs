//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Jobs diários (alertas de vencimento + relatório diário)
    services::scheduler::spawn(
        app_state.notification_service.clone(),
        app_state.utc_offset,
        app_state.report_hour,
    );

    // Rotas do dashboard (resumo + relatório mensal)
    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/report", get(handlers::dashboard::get_month_report));

    let commitment_routes = Router::new()
        .route("/", get(handlers::commitments::list_commitments))
        .route("/{id}", get(handlers::commitments::get_commitment))
        .route(
            "/{id}/payments",
            get(handlers::commitments::list_commitment_payments),
        );

    let payment_routes = Router::new()
        .route("/", get(handlers::payments::list_payments))
        .route("/{id}", get(handlers::payments::get_payment));

    let user_routes = Router::new()
        .route(
            "/{id}/notifications",
            get(handlers::notifications::list_notifications),
        )
        .route(
            "/{id}/preferences",
            get(handlers::notifications::get_preferences)
                .put(handlers::notifications::update_preferences),
        );

    // O webhook valida a assinatura via extrator (middleware/webhook.rs)
    let telegram_routes = Router::new().route("/webhook", post(handlers::telegram::webhook));

    let job_routes = Router::new()
        .route("/due-alerts", post(handlers::jobs::run_due_alerts))
        .route("/daily-report", post(handlers::jobs::run_daily_report));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/commitments", commitment_routes)
        .nest("/api/payments", payment_routes)
        .nest("/api/users", user_routes)
        .nest("/api/telegram", telegram_routes)
        .nest("/api/jobs", job_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
