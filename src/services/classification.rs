// src/services/classification.rs

// O coração do pipeline: índice de pagamentos + classificador de
// compromissos. Tudo aqui é puro: entra (compromissos, pagamentos, hoje),
// sai exatamente um balde por compromisso. Quem busca os dados e decide o
// "hoje" são os chamadores (handlers, bot, jobs agendados).

use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::dates::{calendar_day_opt, days_between},
    models::{
        commitment::{Commitment, Settlement},
        payment::Payment,
        summary::{Bucket, CommitmentCard},
    },
};

// =========================================================================
//  ÍNDICE DE PAGAMENTOS
// =========================================================================

// Pagamentos reais (não-4x1000) de um compromisso, com a soma já derivada
#[derive(Debug, Default)]
pub struct IndexedPayments<'a> {
    pub payments: Vec<&'a Payment>,
    pub total_paid: Decimal,
}

/// Índice compromisso → pagamentos reais, construído numa única passada
/// O(P). O classificador roda uma vez por compromisso e consulta aqui em
/// O(1), sem re-varrer a lista inteira de pagamentos.
#[derive(Debug, Default)]
pub struct PaymentIndex<'a> {
    by_commitment: HashMap<Uuid, IndexedPayments<'a>>,
}

impl<'a> PaymentIndex<'a> {
    pub fn build<I>(payments: I) -> Self
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        let mut by_commitment: HashMap<Uuid, IndexedPayments<'a>> = HashMap::new();

        for payment in payments {
            // 4x1000 não entra nem na lista nem na soma: um compromisso
            // que só tem lançamentos de imposto é "sem pagamentos"
            if payment.is_4x1000_tax {
                continue;
            }
            let Some(commitment_id) = payment.commitment_id else {
                continue; // sem vínculo, não atribuível
            };

            let entry = by_commitment.entry(commitment_id).or_default();
            entry.payments.push(payment);
            entry.total_paid += payment.amount;
        }

        Self { by_commitment }
    }

    pub fn get(&self, commitment_id: Uuid) -> Option<&IndexedPayments<'a>> {
        self.by_commitment.get(&commitment_id)
    }

    pub fn total_paid(&self, commitment_id: Uuid) -> Decimal {
        self.get(commitment_id)
            .map(|e| e.total_paid)
            .unwrap_or(Decimal::ZERO)
    }

    /// Tem pelo menos um pagamento real com soma positiva?
    pub fn has_real_payments(&self, commitment_id: Uuid) -> bool {
        self.get(commitment_id)
            .map(|e| !e.payments.is_empty() && e.total_paid > Decimal::ZERO)
            .unwrap_or(false)
    }
}

// =========================================================================
//  CLASSIFICADOR
// =========================================================================

/// Classifica um compromisso em exatamente um balde.
///
/// A ordem das regras é fixa e a primeira que casa ganha:
/// 1. quitação canônica → Paid
/// 2. pagamentos reais → PartialPayment (suprime vencido/vence-em-breve:
///    parcialmente pago continua pendente, mas não vira alerta)
/// 3. venceu antes de hoje → Overdue
/// 4. vence hoje → DueToday
/// 5. vence em até 7 dias (exclusivo hoje, inclusivo dia 7) → Next7Days
/// 6. resto (inclui vencimento ausente) → Pending
pub fn classify(
    commitment: &Commitment,
    index: &PaymentIndex,
    today: NaiveDate,
    offset: FixedOffset,
) -> Bucket {
    if commitment.settlement() == Settlement::Settled {
        return Bucket::Paid;
    }

    if index.has_real_payments(commitment.id) {
        return Bucket::PartialPayment;
    }

    let Some(due) = calendar_day_opt(commitment.due_date, offset) else {
        // Sem vencimento válido ninguém pode dizer que venceu: cai em
        // pendente com o valor contado (o agregador expõe o caso num
        // contador próprio em vez de derrubar o lote)
        return Bucket::Pending;
    };

    match days_between(today, due) {
        d if d < 0 => Bucket::Overdue,
        0 => Bucket::DueToday,
        d if d <= 7 => Bucket::Next7Days,
        _ => Bucket::Pending,
    }
}

/// Regra do superconjunto: além do próprio balde, estes também somam no
/// total pendente do relatório (um parcial/vence-hoje ainda é trabalho em
/// aberto). Paid e Overdue ficam de fora.
pub fn counts_as_pending(bucket: Bucket) -> bool {
    matches!(
        bucket,
        Bucket::PartialPayment | Bucket::DueToday | Bucket::Next7Days | Bucket::Pending
    )
}

/// Monta o card de exibição de um compromisso já classificado.
pub fn commitment_card(
    commitment: &Commitment,
    bucket: Bucket,
    today: NaiveDate,
    offset: FixedOffset,
) -> CommitmentCard {
    let due_date = calendar_day_opt(commitment.due_date, offset);
    CommitmentCard {
        id: commitment.id,
        concept: commitment.concept.clone(),
        company_name: commitment.company_name.clone(),
        beneficiary_name: commitment.beneficiary_name.clone(),
        amount: commitment.amount,
        due_date,
        bucket,
        days_until_due: due_date.map(|d| days_between(today, d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn offset() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    // Meio-dia local no dia pedido, em UTC
    fn due_in(days: i64) -> Option<chrono::DateTime<Utc>> {
        let day = today() + Duration::days(days);
        let local = day.and_hms_opt(12, 0, 0).unwrap();
        Some(
            offset()
                .from_local_datetime(&local)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn commitment(id: Uuid, amount: i64, due: Option<chrono::DateTime<Utc>>) -> Commitment {
        Commitment {
            id,
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

    fn payment(commitment_id: Option<Uuid>, amount: i64, tax: bool) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            commitment_id,
            concept: None,
            company_name: None,
            method: None,
            amount: Decimal::new(amount, 0),
            date: due_in(0),
            is_4x1000_tax: tax,
            created_at: None,
        }
    }

    #[test]
    fn index_skips_tax_and_unlinked_payments() {
        let id = Uuid::new_v4();
        let payments = vec![
            payment(Some(id), 100, true),  // imposto: fora
            payment(None, 300, false),     // sem vínculo: fora
            payment(Some(id), 200, false), // real: entra
        ];

        let index = PaymentIndex::build(&payments);
        assert_eq!(index.total_paid(id), Decimal::new(200, 0));
        assert_eq!(index.get(id).unwrap().payments.len(), 1);
    }

    #[test]
    fn commitment_with_only_tax_entries_has_no_payments() {
        let id = Uuid::new_v4();
        let payments = vec![payment(Some(id), 100, true), payment(Some(id), 50, true)];

        let index = PaymentIndex::build(&payments);
        assert!(!index.has_real_payments(id));
        assert_eq!(index.total_paid(id), Decimal::ZERO);
    }

    #[test]
    fn settled_hint_wins_over_everything() {
        let mut c = commitment(Uuid::new_v4(), 1000, due_in(-30));
        c.status = Some("paid".to_string());

        let index = PaymentIndex::default();
        assert_eq!(classify(&c, &index, today(), offset()), Bucket::Paid);
    }

    #[test]
    fn partial_payment_suppresses_overdue() {
        // Vencido ontem, mas com um abono real: nunca Overdue
        let id = Uuid::new_v4();
        let c = commitment(id, 2000, due_in(-1));
        let payments = vec![payment(Some(id), 500, false)];
        let index = PaymentIndex::build(&payments);

        assert_eq!(classify(&c, &index, today(), offset()), Bucket::PartialPayment);
    }

    #[test]
    fn overdue_when_unpaid_and_past_due() {
        let c = commitment(Uuid::new_v4(), 1000, due_in(-5));
        let index = PaymentIndex::default();
        assert_eq!(classify(&c, &index, today(), offset()), Bucket::Overdue);
    }

    #[test]
    fn due_today_boundary() {
        let c = commitment(Uuid::new_v4(), 1000, due_in(0));
        let index = PaymentIndex::default();
        assert_eq!(classify(&c, &index, today(), offset()), Bucket::DueToday);
    }

    #[test]
    fn seven_day_window_is_inclusive_at_seven_exclusive_at_eight() {
        let index = PaymentIndex::default();

        let c = commitment(Uuid::new_v4(), 1000, due_in(1));
        assert_eq!(classify(&c, &index, today(), offset()), Bucket::Next7Days);

        let c = commitment(Uuid::new_v4(), 1000, due_in(7));
        assert_eq!(classify(&c, &index, today(), offset()), Bucket::Next7Days);

        let c = commitment(Uuid::new_v4(), 1000, due_in(8));
        assert_eq!(classify(&c, &index, today(), offset()), Bucket::Pending);
    }

    #[test]
    fn missing_due_date_defaults_to_pending() {
        let c = commitment(Uuid::new_v4(), 1000, None);
        let index = PaymentIndex::default();
        assert_eq!(classify(&c, &index, today(), offset()), Bucket::Pending);
    }

    #[test]
    fn classification_is_idempotent() {
        let id = Uuid::new_v4();
        let c = commitment(id, 2000, due_in(-1));
        let payments = vec![payment(Some(id), 500, false)];
        let index = PaymentIndex::build(&payments);

        let first = classify(&c, &index, today(), offset());
        let second = classify(&c, &index, today(), offset());
        assert_eq!(first, second);
    }

    #[test]
    fn every_bucket_is_reachable_and_exclusive() {
        let id_partial = Uuid::new_v4();
        let payments = vec![payment(Some(id_partial), 10, false)];
        let index = PaymentIndex::build(&payments);

        let mut settled = commitment(Uuid::new_v4(), 1, due_in(3));
        settled.is_paid = Some(true);

        let cases = vec![
            (settled, Bucket::Paid),
            (commitment(id_partial, 1, due_in(-2)), Bucket::PartialPayment),
            (commitment(Uuid::new_v4(), 1, due_in(-2)), Bucket::Overdue),
            (commitment(Uuid::new_v4(), 1, due_in(0)), Bucket::DueToday),
            (commitment(Uuid::new_v4(), 1, due_in(4)), Bucket::Next7Days),
            (commitment(Uuid::new_v4(), 1, due_in(30)), Bucket::Pending),
        ];

        for (c, expected) in cases {
            assert_eq!(classify(&c, &index, today(), offset()), expected);
        }
    }

    #[test]
    fn superset_rule_covers_partial_due_today_and_next7() {
        assert!(counts_as_pending(Bucket::PartialPayment));
        assert!(counts_as_pending(Bucket::DueToday));
        assert!(counts_as_pending(Bucket::Next7Days));
        assert!(counts_as_pending(Bucket::Pending));
        assert!(!counts_as_pending(Bucket::Paid));
        assert!(!counts_as_pending(Bucket::Overdue));
    }

    #[test]
    fn card_reports_negative_days_for_overdue() {
        let c = commitment(Uuid::new_v4(), 1000, due_in(-3));
        let card = commitment_card(&c, Bucket::Overdue, today(), offset());
        assert_eq!(card.days_until_due, Some(-3));
        assert_eq!(card.bucket, Bucket::Overdue);
    }
}
