// src/models/summary.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Resultado da classificação de um compromisso. Exatamente um balde por
// compromisso por avaliação. `Pending` também funciona como superconjunto
// de relatório: parciais, vence-hoje e próximos-7-dias somam no total
// pendente além do próprio balde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Paid,
    PartialPayment,
    Overdue,
    DueToday,
    Next7Days,
    Pending,
}

// Contagem + soma monetária de um balde
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketTotals {
    pub count: u32,
    pub amount: Decimal,
}

impl BucketTotals {
    pub fn add(&mut self, amount: Decimal) {
        self.count += 1;
        self.amount += amount;
    }
}

// 1. O Resumo (os cards do topo do dashboard, o /dashboard do bot
//    e o relatório diário usam exatamente este mesmo objeto)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    // Dia-calendário usado como "hoje" na avaliação
    pub reference_date: NaiveDate,

    pub total_commitments: u32,

    pub paid: BucketTotals,
    pub partial_payment: BucketTotals,
    pub overdue: BucketTotals,
    pub due_today: BucketTotals,
    pub next7_days: BucketTotals,
    pub pending: BucketTotals,

    // Compromissos sem vencimento válido: caem em `pending` com o valor
    // contado, mas ficam visíveis aqui em vez de sumir dos totais
    pub missing_due_date: u32,

    // Agregados do lado dos pagamentos (4x1000 sempre excluído)
    pub total_payments: u32,
    pub total_payments_amount: Decimal,
    pub month_payments: u32,
    pub month_payments_amount: Decimal,
    pub today_payments: u32,
    pub today_payments_amount: Decimal,

    // Listas prontas para exibição. Contrato de ordenação: compromissos
    // ascendente por vencimento, pagamentos descendente por data.
    pub upcoming_commitments: Vec<CommitmentCard>,
    pub recent_payments: Vec<PaymentCard>,
}

// 2. Um compromisso já classificado, pronto para virar card/linha
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentCard {
    pub id: Uuid,
    pub concept: String,
    pub company_name: Option<String>,
    pub beneficiary_name: Option<String>,
    pub amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub bucket: Bucket,

    // Negativo = vencido há N dias. Ausente quando não há vencimento.
    pub days_until_due: Option<i64>,
}

// 3. Um pagamento pronto para exibição
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCard {
    pub id: Uuid,
    pub commitment_id: Option<Uuid>,
    pub concept: Option<String>,
    pub company_name: Option<String>,
    pub method: Option<String>,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
}

// 4. Saída do seletor de lembretes: três listas DISJUNTAS (política
//    deliberadamente mais crua que a do dashboard: classifica só por
//    status + data, sem olhar pagamentos parciais)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDigest {
    pub reference_date: NaiveDate,
    pub overdue: Vec<CommitmentCard>,
    pub due_today: Vec<CommitmentCard>,
    pub due_in_3_days: Vec<CommitmentCard>,
}

impl ReminderDigest {
    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.due_today.is_empty() && self.due_in_3_days.is_empty()
    }
}

// 5. Resultado agregado de um job de notificação: falha individual de
//    destinatário nunca aborta o lote, só conta aqui
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobOutcome {
    pub sent: u32,
    pub errors: u32,
}
