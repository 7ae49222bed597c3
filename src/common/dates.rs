// src/common/dates.rs

// Normalização de datas para a avaliação.
//
// Toda comparação do pipeline acontece entre dias-calendário já
// normalizados (`NaiveDate`), nunca entre instantes. A base antiga dividia
// diferença de milissegundos por um dia constante, o que desloca um dia
// perto de transições de horário. Aqui a distância é sempre contada em
// dias inteiros entre dois dias-calendário.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Converte um instante UTC para o dia-calendário no fuso de avaliação.
pub fn calendar_day(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Dia-calendário opcional: vencimentos ausentes seguem ausentes e a
/// classificação decide o que fazer registro a registro.
pub fn calendar_day_opt(instant: Option<DateTime<Utc>>, offset: FixedOffset) -> Option<NaiveDate> {
    instant.map(|i| calendar_day(i, offset))
}

/// Distância em dias inteiros entre dois dias-calendário.
/// Negativo = `date` já passou em relação a `today`.
pub fn days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bogota() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    #[test]
    fn calendar_day_shifts_into_the_evaluation_offset() {
        // 03:00 UTC ainda é o dia anterior às 22:00 em UTC-5
        let instant = Utc.with_ymd_and_hms(2025, 3, 10, 3, 0, 0).unwrap();
        assert_eq!(
            calendar_day(instant, bogota()),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );

        // 12:00 UTC é o mesmo dia às 07:00 em UTC-5
        let instant = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(
            calendar_day(instant, bogota()),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
    }

    #[test]
    fn days_between_counts_whole_days() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        assert_eq!(days_between(today, today), 0);
        assert_eq!(
            days_between(today, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap()),
            7
        );
        assert_eq!(
            days_between(today, NaiveDate::from_ymd_opt(2025, 3, 18).unwrap()),
            8
        );
        assert_eq!(
            days_between(today, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()),
            -5
        );
    }

    #[test]
    fn days_between_crosses_month_boundaries() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 26).unwrap();
        assert_eq!(
            days_between(today, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()),
            7
        );
    }
}
