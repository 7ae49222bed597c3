// src/db/commitment_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::commitment::Commitment};

#[derive(Clone)]
pub struct CommitmentRepository {
    pool: PgPool,
}

impl CommitmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Leitura em bloco: o pipeline classifica tudo em memória, então a
    /// consulta não filtra nada além da ordenação de exibição.
    pub async fn find_all(&self) -> Result<Vec<Commitment>, AppError> {
        let commitments = sqlx::query_as::<_, Commitment>(
            r#"
            SELECT id, concept, company_name, beneficiary_name, observations,
                   payment_method, amount, due_date, status, paid, is_paid,
                   created_at, updated_at
            FROM commitments
            ORDER BY due_date ASC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(commitments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Commitment, AppError> {
        let commitment = sqlx::query_as::<_, Commitment>(
            r#"
            SELECT id, concept, company_name, beneficiary_name, observations,
                   payment_method, amount, due_date, status, paid, is_paid,
                   created_at, updated_at
            FROM commitments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(commitment)
    }

    /// Pré-filtro do job de lembretes, empurrado para a consulta: só
    /// interessam os compromissos ainda marcados como pending/overdue.
    pub async fn find_by_statuses(&self, statuses: &[&str]) -> Result<Vec<Commitment>, AppError> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();

        let commitments = sqlx::query_as::<_, Commitment>(
            r#"
            SELECT id, concept, company_name, beneficiary_name, observations,
                   payment_method, amount, due_date, status, paid, is_paid,
                   created_at, updated_at
            FROM commitments
            WHERE status = ANY($1)
            ORDER BY due_date ASC NULLS LAST
            "#,
        )
        .bind(&statuses)
        .fetch_all(&self.pool)
        .await?;

        Ok(commitments)
    }
}
