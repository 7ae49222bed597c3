// src/db/payment_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::payment::Payment};

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, commitment_id, concept, company_name, method,
                   amount, date, is_4x1000_tax, created_at
            FROM payments
            ORDER BY date DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, commitment_id, concept, company_name, method,
                   amount, date, is_4x1000_tax, created_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(payment)
    }

    /// Todos os pagamentos de um compromisso, mais recente primeiro.
    /// Inclui lançamentos 4x1000: a exibição do detalhe mostra tudo;
    /// quem agrega é o pipeline, e lá eles ficam de fora.
    pub async fn find_by_commitment(&self, commitment_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, commitment_id, concept, company_name, method,
                   amount, date, is_4x1000_tax, created_at
            FROM payments
            WHERE commitment_id = $1
            ORDER BY date DESC NULLS LAST
            "#,
        )
        .bind(commitment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
