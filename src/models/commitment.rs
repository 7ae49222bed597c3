// src/models/commitment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

// Quitação canônica, resolvida UMA vez na ingestão.
// A base antiga espalha a mesma informação por três campos consultivos
// (status texto, paid, is_paid); ninguém além de `Commitment::settlement`
// deve olhar para eles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Settlement {
    Settled, // Quitado
    Open,    // Em aberto
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Arriendo Sala Principal")]
    pub concept: String,

    #[schema(example = "DR Group SAS")]
    pub company_name: Option<String>,

    pub beneficiary_name: Option<String>,
    pub observations: Option<String>,

    #[schema(example = "transfer")]
    pub payment_method: Option<String>,

    #[schema(example = "1500000.00")]
    pub amount: Decimal,

    // Vencimento. Registros legados podem não ter; a classificação
    // trata o caso sem derrubar o lote inteiro.
    pub due_date: Option<DateTime<Utc>>,

    // Campos consultivos (ver `Settlement`)
    #[schema(example = "pending")]
    pub status: Option<String>,
    pub paid: Option<bool>,
    pub is_paid: Option<bool>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Commitment {
    /// Resolve os três campos consultivos num único valor canônico.
    /// Qualquer um deles marcando quitação vence sobre os demais.
    pub fn settlement(&self) -> Settlement {
        if self.paid == Some(true) || self.is_paid == Some(true) {
            return Settlement::Settled;
        }

        if let Some(status) = self.status.as_deref() {
            // A base antiga gravou o mesmo estado com grafias variadas
            match status.trim().to_lowercase().as_str() {
                "paid" | "completed" | "pagado" | "quitado" => return Settlement::Settled,
                _ => {}
            }
        }

        Settlement::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn base() -> Commitment {
        Commitment {
            id: Uuid::new_v4(),
            concept: "Arriendo".to_string(),
            company_name: None,
            beneficiary_name: None,
            observations: None,
            payment_method: None,
            amount: Decimal::new(1000, 0),
            due_date: None,
            status: None,
            paid: None,
            is_paid: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn settlement_resolves_boolean_hints() {
        let mut c = base();
        assert_eq!(c.settlement(), Settlement::Open);

        c.paid = Some(true);
        assert_eq!(c.settlement(), Settlement::Settled);

        c.paid = None;
        c.is_paid = Some(true);
        assert_eq!(c.settlement(), Settlement::Settled);
    }

    #[test]
    fn settlement_resolves_status_variants() {
        for status in ["paid", "completed", "Pagado", "PAGADO", " pagado "] {
            let mut c = base();
            c.status = Some(status.to_string());
            assert_eq!(c.settlement(), Settlement::Settled, "status {status:?}");
        }

        let mut c = base();
        c.status = Some("pending".to_string());
        assert_eq!(c.settlement(), Settlement::Open);
    }

    #[test]
    fn boolean_hint_wins_over_contradictory_status() {
        let mut c = base();
        c.status = Some("overdue".to_string());
        c.paid = Some(true);
        assert_eq!(c.settlement(), Settlement::Settled);
    }
}
