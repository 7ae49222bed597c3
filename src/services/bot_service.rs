// src/services/bot_service.rs

// Despacho dos comandos do bot. O webhook entrega o Update cru aqui e
// SEMPRE responde 200 para o Telegram: qualquer falha é logada e o
// usuário recebe uma mensagem de erro genérica quando possível (a Bot API
// re-entrega updates que falham, o que só amplificaria o problema).

use chrono::Datelike;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::telegram::Update,
    services::{
        dashboard_service::DashboardService,
        telegram::{format_summary_message, parse_command, BotCommand, TelegramClient},
    },
};

const HELP_TEXT: &str = "<b>Comandos disponíveis</b>\n\n\
    /dashboard — resumo geral dos compromissos\n\
    /reporte [mês] [ano] — resumo de um mês (ex.: /reporte fevereiro 2025)\n\
    /vincular &lt;email&gt; — vincula este chat ao seu usuário\n\
    /ayuda — esta mensagem";

const MONTH_NAMES: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

#[derive(Clone)]
pub struct BotService {
    dashboard: DashboardService,
    users: UserRepository,
    client: TelegramClient,
}

impl BotService {
    pub fn new(dashboard: DashboardService, users: UserRepository, client: TelegramClient) -> Self {
        Self {
            dashboard,
            users,
            client,
        }
    }

    pub async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            return; // edits, stickers etc. não interessam
        };
        let Some(text) = message.text.as_deref() else {
            return;
        };
        let Some(command) = parse_command(text) else {
            return; // conversa normal, não é comando
        };

        let chat_id = message.chat.id;
        let reply = match self.reply_for(chat_id, command).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(chat_id, "falha processando comando do bot: {e}");
                "⚠️ Não consegui montar o relatório agora. Tente de novo em instantes.".to_string()
            }
        };

        if let Err(e) = self.client.send_message(chat_id, &reply).await {
            tracing::error!(chat_id, "falha enviando resposta do bot: {e}");
        }
    }

    async fn reply_for(&self, chat_id: i64, command: BotCommand) -> Result<String, AppError> {
        match command {
            BotCommand::Start | BotCommand::Help => Ok(HELP_TEXT.to_string()),

            BotCommand::Link(email) => {
                match self.users.link_telegram_chat(&email, chat_id).await? {
                    Some(user) => Ok(format!(
                        "✅ Chat vinculado a <b>{}</b>. Você vai receber os alertas por aqui.",
                        user.email
                    )),
                    None => Ok(format!(
                        "Não encontrei nenhum usuário com o e-mail <b>{email}</b>."
                    )),
                }
            }

            BotCommand::Dashboard => {
                let today = self.dashboard.today();
                let summary = self.dashboard.get_summary(today).await?;
                Ok(format_summary_message("📊 Resumo geral", &summary))
            }

            BotCommand::Report { month, year } => {
                let today = self.dashboard.today();
                let month = month.unwrap_or(today.month());
                let year = year.unwrap_or(today.year());

                let summary = self.dashboard.get_month_summary(year, month, today).await?;
                let title = format!(
                    "📊 Reporte de {} de {year}",
                    MONTH_NAMES[(month as usize) - 1]
                );
                Ok(format_summary_message(&title, &summary))
            }

            BotCommand::Unknown => Ok(format!("Não reconheci esse comando.\n\n{HELP_TEXT}")),
        }
    }
}
