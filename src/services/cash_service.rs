use chrono::Utc;

use crate::{
    common::error::AppError,
    db::CashRepository,
    models::cash::{CashRegisterLog, CloseLogPayload, OpenLogPayload, check_counted_amount},
};

#[derive(Clone)]
pub struct CashService {
    repo: CashRepository,
}

impl CashService {
    pub fn new(repo: CashRepository) -> Self {
        Self { repo }
    }

    /// Abre o caixa. Um caixa com log aberto não pode ser aberto de novo.
    pub async fn open_log(
        &self,
        register_id: i32,
        user_id: i32,
        p: &OpenLogPayload,
    ) -> Result<CashRegisterLog, AppError> {
        check_counted_amount(p.opening_amount).map_err(AppError::UnprocessableEntity)?;
        self.repo.find_register(register_id).await?;

        if self.repo.find_open_log(register_id).await?.is_some() {
            return Err(AppError::Conflict("O caixa já está aberto.".into()));
        }

        let log_date = p.log_date.unwrap_or_else(|| Utc::now().date_naive());

        self.repo
            .open_log(register_id, log_date, p.opening_amount, user_id)
            .await
    }

    pub async fn close_log(
        &self,
        register_id: i32,
        user_id: i32,
        p: &CloseLogPayload,
    ) -> Result<CashRegisterLog, AppError> {
        check_counted_amount(p.closing_amount).map_err(AppError::UnprocessableEntity)?;
        self.repo.find_register(register_id).await?;

        let open = self
            .repo
            .find_open_log(register_id)
            .await?
            .ok_or_else(|| AppError::Conflict("O caixa não está aberto.".into()))?;

        self.repo.close_log(open.id, p.closing_amount, user_id).await
    }
}
