// src/services/reminders.rs

// Seletor de lembretes do job proativo. Política deliberadamente mais
// crua que a do dashboard: classifica SÓ por status + data, sem consultar
// o índice de pagamentos: um compromisso com abono parcial ainda gera
// alerta aqui. As duas políticas coexistem de propósito; não unificar.

use chrono::{FixedOffset, NaiveDate};

use crate::{
    common::dates::{calendar_day_opt, days_between},
    models::{
        commitment::Commitment,
        summary::{Bucket, ReminderDigest},
    },
    services::classification::commitment_card,
};

// Dias de antecedência do aviso "vence em breve": casamento EXATO, não
// intervalo. Avisa no dia D-3 e só nele.
const DUE_SOON_DAYS: i64 = 3;

/// Separa o conjunto pré-filtrado (status pending/overdue, filtro empurrado
/// para a camada de consulta) em três listas DISJUNTAS:
/// vencidos / vencem hoje / vencem em exatamente 3 dias.
pub fn compute_reminders(
    commitments: &[Commitment],
    today: NaiveDate,
    offset: FixedOffset,
) -> ReminderDigest {
    let mut overdue = Vec::new();
    let mut due_today = Vec::new();
    let mut due_in_3_days = Vec::new();

    for commitment in commitments {
        let Some(due) = calendar_day_opt(commitment.due_date, offset) else {
            // Sem vencimento não há o que lembrar
            tracing::warn!(
                commitment_id = %commitment.id,
                "compromisso sem vencimento ignorado pelo seletor de lembretes"
            );
            continue;
        };

        match days_between(today, due) {
            d if d < 0 => overdue.push(commitment_card(commitment, Bucket::Overdue, today, offset)),
            0 => due_today.push(commitment_card(commitment, Bucket::DueToday, today, offset)),
            DUE_SOON_DAYS => {
                due_in_3_days.push(commitment_card(commitment, Bucket::Next7Days, today, offset))
            }
            _ => {}
        }
    }

    // Mais urgente primeiro dentro de cada lista
    overdue.sort_by_key(|c| c.due_date);
    due_today.sort_by_key(|c| c.due_date);
    due_in_3_days.sort_by_key(|c| c.due_date);

    ReminderDigest {
        reference_date: today,
        overdue,
        due_today,
        due_in_3_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn offset() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    fn due_in(days: i64) -> Option<chrono::DateTime<Utc>> {
        let day = today() + Duration::days(days);
        let local = day.and_hms_opt(9, 0, 0).unwrap();
        Some(
            offset()
                .from_local_datetime(&local)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn commitment(due: Option<chrono::DateTime<Utc>>) -> Commitment {
        Commitment {
            id: Uuid::new_v4(),
            concept: "Parafiscales".to_string(),
            company_name: None,
            beneficiary_name: None,
            observations: None,
            payment_method: None,
            amount: Decimal::new(100, 0),
            due_date: due,
            status: Some("pending".to_string()),
            paid: None,
            is_paid: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn lists_are_disjoint_and_exact() {
        let commitments = vec![
            commitment(due_in(-10)), // vencido
            commitment(due_in(-1)),  // vencido
            commitment(due_in(0)),   // hoje
            commitment(due_in(2)),   // nada (não é D-3)
            commitment(due_in(3)),   // D-3 exato
            commitment(due_in(4)),   // nada
            commitment(due_in(7)),   // nada
        ];

        let digest = compute_reminders(&commitments, today(), offset());
        assert_eq!(digest.overdue.len(), 2);
        assert_eq!(digest.due_today.len(), 1);
        assert_eq!(digest.due_in_3_days.len(), 1);
    }

    #[test]
    fn selector_ignores_partial_payments() {
        // Diferente do classificador do dashboard, aqui só valem status e
        // data. O chamador já pré-filtrou por status, então um vencido
        // entra na lista mesmo que exista abono parcial em outro lugar
        let c = commitment(due_in(-1));
        let digest = compute_reminders(&[c], today(), offset());
        assert_eq!(digest.overdue.len(), 1);
    }

    #[test]
    fn missing_due_date_is_skipped() {
        let digest = compute_reminders(&[commitment(None)], today(), offset());
        assert!(digest.is_empty());
    }

    #[test]
    fn overdue_list_is_sorted_oldest_first() {
        let commitments = vec![commitment(due_in(-1)), commitment(due_in(-9))];
        let digest = compute_reminders(&commitments, today(), offset());

        let days: Vec<Option<i64>> = digest.overdue.iter().map(|c| c.days_until_due).collect();
        assert_eq!(days, vec![Some(-9), Some(-1)]);
    }
}
