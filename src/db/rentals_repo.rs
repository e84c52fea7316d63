use sqlx::PgPool;

use crate::{
    common::{
        error::AppError,
        pagination::{ListParams, Page},
    },
    models::rentals::{
        Court, CourtPayload, Plan, PlanPayload, Rental, RentalPayload, Subscription,
        SubscriptionPayload,
    },
};

#[derive(Clone)]
pub struct RentalsRepository {
    pool: PgPool,
}

impl RentalsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CANCHAS
    // =========================================================================

    pub async fn list_courts(&self, params: &ListParams) -> Result<Page<Court>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1)";
        let order = params.order_clause(&["id", "name", "hourly_rate"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Court>(&format!(
            "SELECT * FROM courts WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM courts WHERE {filter}"))
            .bind(&search)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_court(&self, p: &CourtPayload) -> Result<Court, AppError> {
        let court = sqlx::query_as::<_, Court>(
            r#"
            INSERT INTO courts (local_id, name, hourly_rate, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(p.local_id)
        .bind(&p.name)
        .bind(p.hourly_rate)
        .bind(p.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(court)
    }

    pub async fn update_court(&self, id: i32, p: &CourtPayload) -> Result<Court, AppError> {
        sqlx::query_as::<_, Court>(
            r#"
            UPDATE courts
            SET local_id = $1, name = $2, hourly_rate = $3, is_active = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(p.local_id)
        .bind(&p.name)
        .bind(p.hourly_rate)
        .bind(p.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Cancha"))
    }

    pub async fn delete_court(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cancha"));
        }
        Ok(())
    }

    // =========================================================================
    //  ALUGUEIS
    // =========================================================================

    pub async fn list_rentals(&self, params: &ListParams) -> Result<Page<Rental>, AppError> {
        let filter = r#"(
            $1::text IS NULL
            OR client_id IN (SELECT id FROM clients WHERE full_name ILIKE $1)
            OR court_id IN (SELECT id FROM courts WHERE name ILIKE $1)
        )"#;
        let order = params.order_clause(&["id", "rental_date", "start_time", "amount"], "id");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Rental>(&format!(
            "SELECT * FROM rentals WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM rentals WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_rental(&self, p: &RentalPayload) -> Result<Rental, AppError> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (court_id, client_id, rental_date, start_time, end_time, amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(p.court_id)
        .bind(p.client_id)
        .bind(p.rental_date)
        .bind(p.start_time)
        .bind(p.end_time)
        .bind(p.amount)
        .bind(p.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(rental)
    }

    pub async fn update_rental(&self, id: i32, p: &RentalPayload) -> Result<Rental, AppError> {
        sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET court_id = $1, client_id = $2, rental_date = $3,
                start_time = $4, end_time = $5, amount = $6, status = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(p.court_id)
        .bind(p.client_id)
        .bind(p.rental_date)
        .bind(p.start_time)
        .bind(p.end_time)
        .bind(p.amount)
        .bind(p.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Aluguel"))
    }

    pub async fn delete_rental(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Aluguel"));
        }
        Ok(())
    }

    // =========================================================================
    //  PLANOS
    // =========================================================================

    pub async fn list_plans(&self, params: &ListParams) -> Result<Page<Plan>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)";
        let order = params.order_clause(&["id", "name", "price"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Plan>(&format!(
            "SELECT * FROM plans WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM plans WHERE {filter}"))
            .bind(&search)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_plan(&self, p: &PlanPayload) -> Result<Plan, AppError> {
        let plan = sqlx::query_as::<_, Plan>(
            "INSERT INTO plans (name, description, price) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&p.name)
        .bind(&p.description)
        .bind(p.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(plan)
    }

    pub async fn update_plan(&self, id: i32, p: &PlanPayload) -> Result<Plan, AppError> {
        sqlx::query_as::<_, Plan>(
            "UPDATE plans SET name = $1, description = $2, price = $3 WHERE id = $4 RETURNING *",
        )
        .bind(&p.name)
        .bind(&p.description)
        .bind(p.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Plano"))
    }

    pub async fn delete_plan(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Plano"));
        }
        Ok(())
    }

    // =========================================================================
    //  SUSCRIPCIONES
    // =========================================================================

    pub async fn list_subscriptions(
        &self,
        params: &ListParams,
    ) -> Result<Page<Subscription>, AppError> {
        let filter = r#"(
            $1::text IS NULL
            OR client_id IN (SELECT id FROM clients WHERE full_name ILIKE $1)
            OR plan_id IN (SELECT id FROM plans WHERE name ILIKE $1)
        )"#;
        let order = params.order_clause(&["id", "starts_on", "ends_on", "status"], "id");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Subscription>(&format!(
            "SELECT * FROM subscriptions WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM subscriptions WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_subscription(&self, p: &SubscriptionPayload) -> Result<Subscription, AppError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (client_id, plan_id, starts_on, ends_on, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(p.client_id)
        .bind(p.plan_id)
        .bind(p.starts_on)
        .bind(p.ends_on)
        .bind(p.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    pub async fn update_subscription(
        &self,
        id: i32,
        p: &SubscriptionPayload,
    ) -> Result<Subscription, AppError> {
        sqlx::query_as::<_, Subscription>(
            r#"
            UPDATE subscriptions
            SET client_id = $1, plan_id = $2, starts_on = $3, ends_on = $4, status = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(p.client_id)
        .bind(p.plan_id)
        .bind(p.starts_on)
        .bind(p.ends_on)
        .bind(p.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Assinatura"))
    }

    pub async fn delete_subscription(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Assinatura"));
        }
        Ok(())
    }
}
