// src/models/payment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    // Sem vínculo, o pagamento não é atribuível a nenhum compromisso
    pub commitment_id: Option<Uuid>,

    #[schema(example = "Abono arriendo febrero")]
    pub concept: Option<String>,

    pub company_name: Option<String>,

    #[schema(example = "transfer")]
    pub method: Option<String>,

    #[schema(example = "500000.00")]
    pub amount: Decimal,

    pub date: Option<DateTime<Utc>>,

    // Lançamento do imposto bancário 4x1000. Quando true, o registro não é
    // uma quitação real: fica fora de todo agregado e da detecção de
    // "tem pagamentos".
    #[serde(rename = "is4x1000Tax")]
    #[schema(example = false)]
    pub is_4x1000_tax: bool,

    pub created_at: Option<DateTime<Utc>>,
}
