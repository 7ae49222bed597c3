// src/services/telegram.rs

// Cliente fino da Bot API + o parser de comandos do webhook.
// O token NÃO é estado global: vive na configuração e entra aqui pelo
// construtor, montado uma vez no AppState.

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        summary::{DashboardSummary, ReminderDigest},
        telegram::SendMessage,
    },
};

const API_BASE: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    send_message_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            send_message_url: format!("{API_BASE}/bot{token}/sendMessage"),
        }
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
        let body = SendMessage {
            chat_id,
            text,
            parse_mode: "HTML",
        };

        self.http
            .post(&self.send_message_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

// =========================================================================
//  COMANDOS
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    /// /vincular <email>: amarra o chat ao usuário do dashboard
    Link(String),
    /// /dashboard: resumo de todo o histórico
    Dashboard,
    /// /reporte [mês] [ano]: resumo mensal; sem argumentos usa o mês atual
    Report {
        month: Option<u32>,
        year: Option<i32>,
    },
    Unknown,
}

/// Interpreta o texto de uma mensagem. Aceita o sufixo @NomeDoBot que o
/// Telegram anexa em grupos.
pub fn parse_command(text: &str) -> Option<BotCommand> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next()?;

    if !first.starts_with('/') {
        return None;
    }
    let command = first.split('@').next().unwrap_or(first).to_lowercase();

    let parsed = match command.as_str() {
        "/start" => BotCommand::Start,
        "/ayuda" | "/help" => BotCommand::Help,
        "/vincular" => match tokens.next() {
            Some(email) => BotCommand::Link(email.to_string()),
            None => BotCommand::Unknown,
        },
        "/dashboard" => BotCommand::Dashboard,
        "/reporte" => {
            let month = tokens.next().and_then(parse_month);
            let year = tokens.next().and_then(|t| t.parse::<i32>().ok());
            BotCommand::Report { month, year }
        }
        _ => BotCommand::Unknown,
    };

    Some(parsed)
}

/// Mês por número ("2") ou por nome ("fevereiro").
pub fn parse_month(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }

    let month = match token.to_lowercase().as_str() {
        "janeiro" => 1,
        "fevereiro" => 2,
        "março" | "marco" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => return None,
    };
    Some(month)
}

// =========================================================================
//  TEMPLATES (camada de apresentação: o pipeline garante os números,
//  aqui eles só ganham texto)
// =========================================================================

pub fn format_summary_message(title: &str, summary: &DashboardSummary) -> String {
    let mut message = format!("<b>{title}</b>\n\n");

    message.push_str(&format!(
        "🔴 Vencidos: {} ({})\n",
        summary.overdue.count,
        format_money(summary.overdue.amount)
    ));
    message.push_str(&format!(
        "🟠 Vencem hoje: {} ({})\n",
        summary.due_today.count,
        format_money(summary.due_today.amount)
    ));
    message.push_str(&format!(
        "🟡 Próximos 7 dias: {} ({})\n",
        summary.next7_days.count,
        format_money(summary.next7_days.amount)
    ));
    message.push_str(&format!(
        "🔵 Com abono parcial: {} ({})\n",
        summary.partial_payment.count,
        format_money(summary.partial_payment.amount)
    ));
    message.push_str(&format!(
        "⏳ Pendentes no total: {} ({})\n",
        summary.pending.count,
        format_money(summary.pending.amount)
    ));
    message.push_str(&format!(
        "✅ Quitados: {} ({})\n",
        summary.paid.count,
        format_money(summary.paid.amount)
    ));

    message.push_str(&format!(
        "\n💳 Pagamentos: {} ({})\n",
        summary.total_payments,
        format_money(summary.total_payments_amount)
    ));
    message.push_str(&format!(
        "📅 No mês: {} ({}) · Hoje: {} ({})\n",
        summary.month_payments,
        format_money(summary.month_payments_amount),
        summary.today_payments,
        format_money(summary.today_payments_amount)
    ));

    if summary.missing_due_date > 0 {
        message.push_str(&format!(
            "\n⚠️ {} compromisso(s) sem data de vencimento\n",
            summary.missing_due_date
        ));
    }

    message
}

pub fn format_reminder_message(digest: &ReminderDigest) -> String {
    let mut message = String::from("<b>⏰ Compromissos que precisam de atenção</b>\n");

    let mut section = |title: &str, cards: &[crate::models::summary::CommitmentCard]| {
        if cards.is_empty() {
            return;
        }
        message.push_str(&format!("\n<b>{title}</b>\n"));
        for card in cards {
            let due = card
                .due_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_else(|| "sem data".to_string());
            message.push_str(&format!(
                "• {} — {} ({})\n",
                card.concept,
                format_money(card.amount),
                due
            ));
        }
    };

    section("🔴 Vencidos", &digest.overdue);
    section("🟠 Vencem hoje", &digest.due_today);
    section("🟡 Vencem em 3 dias", &digest.due_in_3_days);

    message
}

/// "$ 1.500.000,00", a convenção de moeda da casa.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let raw = format!("{rounded:.2}");
    let (integer, cents) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("$ {sign}{grouped},{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("/start"), Some(BotCommand::Start));
        assert_eq!(parse_command("/ayuda"), Some(BotCommand::Help));
        assert_eq!(parse_command("/dashboard"), Some(BotCommand::Dashboard));
        assert_eq!(parse_command("hola"), None);
        assert_eq!(parse_command("/outra"), Some(BotCommand::Unknown));
    }

    #[test]
    fn strips_bot_mention_suffix() {
        assert_eq!(
            parse_command("/dashboard@DrGroupBot"),
            Some(BotCommand::Dashboard)
        );
    }

    #[test]
    fn parses_report_arguments() {
        assert_eq!(
            parse_command("/reporte"),
            Some(BotCommand::Report { month: None, year: None })
        );
        assert_eq!(
            parse_command("/reporte fevereiro 2025"),
            Some(BotCommand::Report { month: Some(2), year: Some(2025) })
        );
        assert_eq!(
            parse_command("/reporte 11"),
            Some(BotCommand::Report { month: Some(11), year: None })
        );
    }

    #[test]
    fn parses_link_command() {
        assert_eq!(
            parse_command("/vincular diego@drgroup.co"),
            Some(BotCommand::Link("diego@drgroup.co".to_string()))
        );
        // Sem e-mail não tem o que vincular
        assert_eq!(parse_command("/vincular"), Some(BotCommand::Unknown));
    }

    #[test]
    fn month_names_and_numbers() {
        assert_eq!(parse_month("março"), Some(3));
        assert_eq!(parse_month("Dezembro"), Some(12));
        assert_eq!(parse_month("7"), Some(7));
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("febrero"), None);
    }

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(format_money(Decimal::new(150000000, 2)), "$ 1.500.000,00");
        assert_eq!(format_money(Decimal::new(95050, 2)), "$ 950,50");
        assert_eq!(format_money(Decimal::ZERO), "$ 0,00");
        assert_eq!(format_money(Decimal::new(-123456, 2)), "$ -1.234,56");
    }
}
