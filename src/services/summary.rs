// src/services/summary.rs

// Agregador por período. Dobra compromissos classificados + pagamentos num
// resumo único. O mesmo objeto alimenta o endpoint do dashboard, os
// comandos do bot e o relatório diário agendado.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    common::dates::calendar_day_opt,
    models::{
        commitment::Commitment,
        payment::Payment,
        summary::{Bucket, BucketTotals, CommitmentCard, DashboardSummary, PaymentCard},
    },
    services::classification::{classify, commitment_card, counts_as_pending, PaymentIndex},
};

// =========================================================================
//  PERÍODO
// =========================================================================

/// Intervalo de dias-calendário, bordas inclusivas. Sem bordas = todo o
/// histórico (o dashboard); um mês fechado = os comandos mensais do bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Period {
    pub fn all_time() -> Self {
        Self { start: None, end: None }
    }

    /// Mês fechado: [primeiro dia, último dia]. `None` para mês fora de 1-12.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start: Some(start),
            end: Some(next - Duration::days(1)),
        })
    }

    pub fn is_all_time(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start.is_none_or(|s| day >= s) && self.end.is_none_or(|e| day <= e)
    }

    /// Um dia opcional pertence ao período? Registros sem data só entram
    /// no período aberto (não dá para situá-los num mês).
    fn contains_opt(&self, day: Option<NaiveDate>) -> bool {
        match day {
            Some(d) => self.contains(d),
            None => self.is_all_time(),
        }
    }
}

// =========================================================================
//  OPERAÇÕES EXPOSTAS
// =========================================================================

/// Resumo de todo o histórico (o dashboard).
pub fn compute_dashboard_summary(
    commitments: &[Commitment],
    payments: &[Payment],
    today: NaiveDate,
    offset: FixedOffset,
) -> DashboardSummary {
    aggregate(commitments, payments, Period::all_time(), today, offset)
}

/// Resumo de um mês: compromissos filtrados pelo vencimento, pagamentos
/// pela data de pagamento. A classificação dentro do recorte continua
/// relativa a HOJE: um compromisso de mês passado nunca pago segue
/// Overdue, não vira "apenas não pago daquele mês".
pub fn compute_month_summary(
    commitments: &[Commitment],
    payments: &[Payment],
    year: i32,
    month: u32,
    today: NaiveDate,
    offset: FixedOffset,
) -> Option<DashboardSummary> {
    let period = Period::month(year, month)?;
    Some(aggregate(commitments, payments, period, today, offset))
}

// =========================================================================
//  O FOLD
// =========================================================================

fn aggregate(
    commitments: &[Commitment],
    payments: &[Payment],
    period: Period,
    today: NaiveDate,
    offset: FixedOffset,
) -> DashboardSummary {
    // Recorte do escopo de avaliação
    let scoped_commitments: Vec<&Commitment> = commitments
        .iter()
        .filter(|c| period.contains_opt(calendar_day_opt(c.due_date, offset)))
        .collect();
    let scoped_payments: Vec<&Payment> = payments
        .iter()
        .filter(|p| period.contains_opt(calendar_day_opt(p.date, offset)))
        .collect();

    // Uma única passada sobre os pagamentos do escopo; o classificador
    // consulta o índice em O(1) por compromisso
    let index = PaymentIndex::build(scoped_payments.iter().copied());

    let mut paid = BucketTotals::default();
    let mut partial_payment = BucketTotals::default();
    let mut overdue = BucketTotals::default();
    let mut due_today = BucketTotals::default();
    let mut next7_days = BucketTotals::default();
    let mut pending = BucketTotals::default();
    let mut missing_due_date = 0u32;

    let mut cards: Vec<CommitmentCard> = Vec::new();

    for commitment in &scoped_commitments {
        let bucket = classify(commitment, &index, today, offset);

        match bucket {
            Bucket::Paid => paid.add(commitment.amount),
            Bucket::PartialPayment => partial_payment.add(commitment.amount),
            Bucket::Overdue => overdue.add(commitment.amount),
            Bucket::DueToday => due_today.add(commitment.amount),
            Bucket::Next7Days => next7_days.add(commitment.amount),
            Bucket::Pending => {}
        }

        // `pending` é o superconjunto de relatório: parciais, vence-hoje,
        // próximos 7 dias e o resto em aberto somam todos aqui
        if counts_as_pending(bucket) {
            pending.add(commitment.amount);
        }

        if bucket == Bucket::Pending && commitment.due_date.is_none() {
            // Não some dos totais: fica pendente E visível no contador
            missing_due_date += 1;
        }

        if bucket != Bucket::Paid {
            cards.push(commitment_card(commitment, bucket, today, offset));
        }
    }

    // Contrato de ordenação: compromissos ascendente por vencimento
    // (sem vencimento por último)
    cards.sort_by_key(|c| (c.due_date.is_none(), c.due_date));

    // Agregados do lado dos pagamentos. 4x1000 fora, incondicionalmente.
    let mut total_payments = 0u32;
    let mut total_payments_amount = Decimal::ZERO;
    let mut month_payments = 0u32;
    let mut month_payments_amount = Decimal::ZERO;
    let mut today_payments = 0u32;
    let mut today_payments_amount = Decimal::ZERO;

    let current_month = Period::month(today.year(), today.month());

    let mut payment_cards: Vec<PaymentCard> = Vec::new();

    for payment in &scoped_payments {
        if payment.is_4x1000_tax {
            continue;
        }

        total_payments += 1;
        total_payments_amount += payment.amount;

        let day = calendar_day_opt(payment.date, offset);
        if let Some(day) = day {
            if current_month.is_some_and(|m| m.contains(day)) {
                month_payments += 1;
                month_payments_amount += payment.amount;
            }
            if day == today {
                today_payments += 1;
                today_payments_amount += payment.amount;
            }
        }

        payment_cards.push(PaymentCard {
            id: payment.id,
            commitment_id: payment.commitment_id,
            concept: payment.concept.clone(),
            company_name: payment.company_name.clone(),
            method: payment.method.clone(),
            amount: payment.amount,
            date: day,
        });
    }

    // Pagamentos descendente por data (mais recente primeiro)
    payment_cards.sort_by(|a, b| b.date.cmp(&a.date));

    DashboardSummary {
        reference_date: today,
        total_commitments: scoped_commitments.len() as u32,
        paid,
        partial_payment,
        overdue,
        due_today,
        next7_days,
        pending,
        missing_due_date,
        total_payments,
        total_payments_amount,
        month_payments,
        month_payments_amount,
        today_payments,
        today_payments_amount,
        upcoming_commitments: cards,
        recent_payments: payment_cards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn offset() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    fn instant_on(day: NaiveDate) -> chrono::DateTime<Utc> {
        let local = day.and_hms_opt(12, 0, 0).unwrap();
        offset()
            .from_local_datetime(&local)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn due_in(days: i64) -> Option<chrono::DateTime<Utc>> {
        Some(instant_on(today() + Duration::days(days)))
    }

    fn commitment(amount: i64, due: Option<chrono::DateTime<Utc>>) -> Commitment {
        Commitment {
            id: Uuid::new_v4(),
            concept: "Arriendo".to_string(),
            company_name: None,
            beneficiary_name: None,
            observations: None,
            payment_method: None,
            amount: Decimal::new(amount, 0),
            due_date: due,
            status: Some("pending".to_string()),
            paid: None,
            is_paid: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn payment(
        commitment_id: Option<Uuid>,
        amount: i64,
        tax: bool,
        date: Option<chrono::DateTime<Utc>>,
    ) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            commitment_id,
            concept: None,
            company_name: None,
            method: None,
            amount: Decimal::new(amount, 0),
            date,
            is_4x1000_tax: tax,
            created_at: None,
        }
    }

    #[test]
    fn month_period_has_inclusive_borders() {
        let p = Period::month(2025, 2).unwrap();
        assert_eq!(p.start, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(p.end, NaiveDate::from_ymd_opt(2025, 2, 28));
        assert!(p.contains(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert!(p.contains(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));

        assert_eq!(Period::month(2025, 12).unwrap().end, NaiveDate::from_ymd_opt(2025, 12, 31));
        assert!(Period::month(2025, 13).is_none());
        assert!(Period::month(2025, 0).is_none());
    }

    #[test]
    fn unpaid_overdue_commitment_lands_only_in_overdue() {
        // commitments = [{amount: 1000, dueDate: hoje-5, status: pending}], payments = []
        let commitments = vec![commitment(1000, due_in(-5))];
        let summary = compute_dashboard_summary(&commitments, &[], today(), offset());

        assert_eq!(summary.overdue.count, 1);
        assert_eq!(summary.overdue.amount, Decimal::new(1000, 0));
        assert_eq!(summary.pending.count, 0);
        assert_eq!(summary.total_commitments, 1);
    }

    #[test]
    fn partial_payment_counts_in_partial_and_pending_not_overdue() {
        let mut c = commitment(2000, due_in(-5));
        c.id = Uuid::new_v4();
        let payments = vec![payment(Some(c.id), 500, false, due_in(-1))];
        let summary = compute_dashboard_summary(&[c], &payments, today(), offset());

        assert_eq!(summary.partial_payment.count, 1);
        assert_eq!(summary.pending.count, 1);
        assert_eq!(summary.pending.amount, Decimal::new(2000, 0));
        assert_eq!(summary.overdue.count, 0);
    }

    #[test]
    fn tax_only_payment_set_aggregates_to_zero() {
        let payments = vec![
            payment(None, 100, true, due_in(0)),
            payment(None, 200, false, due_in(0)),
        ];
        let summary = compute_dashboard_summary(&[], &payments, today(), offset());

        assert_eq!(summary.total_payments, 1);
        assert_eq!(summary.total_payments_amount, Decimal::new(200, 0));

        let all_tax = vec![payment(None, 100, true, due_in(0))];
        let summary = compute_dashboard_summary(&[], &all_tax, today(), offset());
        assert_eq!(summary.total_payments, 0);
        assert_eq!(summary.total_payments_amount, Decimal::ZERO);
    }

    #[test]
    fn bucket_counts_fold_back_to_the_input_size() {
        let id_partial = Uuid::new_v4();
        let mut partial = commitment(10, due_in(-2));
        partial.id = id_partial;
        let mut settled = commitment(20, due_in(5));
        settled.paid = Some(true);

        let commitments = vec![
            settled,
            partial,
            commitment(30, due_in(-2)), // overdue
            commitment(40, due_in(0)),  // vence hoje
            commitment(50, due_in(6)),  // próximos 7
            commitment(60, due_in(40)), // pendente puro
            commitment(70, None),       // sem vencimento
        ];
        let payments = vec![payment(Some(id_partial), 5, false, due_in(-1))];
        let summary = compute_dashboard_summary(&commitments, &payments, today(), offset());

        // paid + overdue + pending(superconjunto) cobre tudo exatamente uma vez
        assert_eq!(
            summary.paid.count + summary.overdue.count + summary.pending.count,
            summary.total_commitments
        );
        assert_eq!(summary.pending.count, 5);
        assert_eq!(summary.due_today.count, 1);
        assert_eq!(summary.next7_days.count, 1);
        assert_eq!(summary.missing_due_date, 1);
    }

    #[test]
    fn month_filter_still_classifies_relative_to_today() {
        // Vencido em maio, nunca pago: no recorte de maio segue Overdue
        let due_may = instant_on(NaiveDate::from_ymd_opt(2025, 5, 10).unwrap());
        let commitments = vec![commitment(1000, Some(due_may))];

        let summary =
            compute_month_summary(&commitments, &[], 2025, 5, today(), offset()).unwrap();
        assert_eq!(summary.overdue.count, 1);
        assert_eq!(summary.pending.count, 0);

        // E no recorte de junho ele nem aparece
        let summary =
            compute_month_summary(&commitments, &[], 2025, 6, today(), offset()).unwrap();
        assert_eq!(summary.total_commitments, 0);
    }

    #[test]
    fn month_filter_scopes_payments_by_payment_date() {
        let in_may = instant_on(NaiveDate::from_ymd_opt(2025, 5, 3).unwrap());
        let payments = vec![
            payment(None, 100, false, Some(in_may)),
            payment(None, 200, false, due_in(0)), // junho
        ];

        let summary = compute_month_summary(&[], &payments, 2025, 5, today(), offset()).unwrap();
        assert_eq!(summary.total_payments, 1);
        assert_eq!(summary.total_payments_amount, Decimal::new(100, 0));
    }

    #[test]
    fn payment_windows_for_current_month_and_today() {
        let earlier_this_month = instant_on(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        let last_month = instant_on(NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
        let payments = vec![
            payment(None, 100, false, due_in(0)),
            payment(None, 200, false, Some(earlier_this_month)),
            payment(None, 400, false, Some(last_month)),
        ];
        let summary = compute_dashboard_summary(&[], &payments, today(), offset());

        assert_eq!(summary.total_payments, 3);
        assert_eq!(summary.month_payments, 2);
        assert_eq!(summary.month_payments_amount, Decimal::new(300, 0));
        assert_eq!(summary.today_payments, 1);
        assert_eq!(summary.today_payments_amount, Decimal::new(100, 0));
    }

    #[test]
    fn display_lists_honor_the_ordering_contract() {
        let commitments = vec![
            commitment(1, due_in(9)),
            commitment(2, due_in(-3)),
            commitment(3, None),
            commitment(4, due_in(1)),
        ];
        let payments = vec![
            payment(None, 10, false, due_in(-10)),
            payment(None, 20, false, due_in(0)),
            payment(None, 30, false, due_in(-2)),
        ];
        let summary = compute_dashboard_summary(&commitments, &payments, today(), offset());

        let due_days: Vec<Option<i64>> = summary
            .upcoming_commitments
            .iter()
            .map(|c| c.days_until_due)
            .collect();
        assert_eq!(due_days, vec![Some(-3), Some(1), Some(9), None]);

        let dates: Vec<Option<NaiveDate>> =
            summary.recent_payments.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                Some(today()),
                Some(today() - Duration::days(2)),
                Some(today() - Duration::days(10)),
            ]
        );
    }

    #[test]
    fn settled_commitments_stay_out_of_the_display_list() {
        let mut settled = commitment(20, due_in(2));
        settled.paid = Some(true);
        let commitments = vec![settled, commitment(10, due_in(2))];
        let summary = compute_dashboard_summary(&commitments, &[], today(), offset());

        assert_eq!(summary.upcoming_commitments.len(), 1);
        assert_eq!(summary.paid.count, 1);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let commitments = vec![commitment(1000, due_in(-5)), commitment(500, due_in(2))];
        let payments = vec![payment(None, 10, false, due_in(0))];

        let a = compute_dashboard_summary(&commitments, &payments, today(), offset());
        let b = compute_dashboard_summary(&commitments, &payments, today(), offset());
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }
}
