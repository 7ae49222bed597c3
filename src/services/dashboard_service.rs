// src/services/dashboard_service.rs

// Orquestração fina: busca em bloco nos repositórios e entrega os arrays
// para o pipeline puro. Falha de leitura do banco sobe direto para o
// chamador; o núcleo não tenta de novo.

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::{
    common::{dates::calendar_day, error::AppError},
    db::{CommitmentRepository, PaymentRepository},
    models::summary::DashboardSummary,
    services::summary::{compute_dashboard_summary, compute_month_summary},
};

#[derive(Clone)]
pub struct DashboardService {
    commitments: CommitmentRepository,
    payments: PaymentRepository,
    offset: FixedOffset,
}

impl DashboardService {
    pub fn new(
        commitments: CommitmentRepository,
        payments: PaymentRepository,
        offset: FixedOffset,
    ) -> Self {
        Self {
            commitments,
            payments,
            offset,
        }
    }

    /// O "hoje" da avaliação, no fuso configurado.
    pub fn today(&self) -> NaiveDate {
        calendar_day(Utc::now(), self.offset)
    }

    /// Resumo de todo o histórico (cards do dashboard, /dashboard do bot,
    /// relatório diário).
    pub async fn get_summary(&self, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        let commitments = self.commitments.find_all().await?;
        let payments = self.payments.find_all().await?;

        Ok(compute_dashboard_summary(
            &commitments,
            &payments,
            today,
            self.offset,
        ))
    }

    /// Resumo de um mês fechado (/reporte do bot e o endpoint de relatório).
    pub async fn get_month_summary(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<DashboardSummary, AppError> {
        let commitments = self.commitments.find_all().await?;
        let payments = self.payments.find_all().await?;

        compute_month_summary(&commitments, &payments, year, month, today, self.offset)
            .ok_or(AppError::InvalidMonth(month))
    }
}
