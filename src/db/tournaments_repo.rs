use sqlx::PgPool;

use crate::{
    common::{
        error::{AppError, map_unique_violation},
        pagination::{ListParams, Page},
    },
    models::tournaments::{
        Competition, CompetitionPayload, Ranking, RankingPayload, Tournament, TournamentPayload,
    },
};

#[derive(Clone)]
pub struct TournamentsRepository {
    pool: PgPool,
}

impl TournamentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  COMPETÊNCIAS
    // =========================================================================

    pub async fn list_competitions(
        &self,
        params: &ListParams,
    ) -> Result<Page<Competition>, AppError> {
        let filter = "($1::text IS NULL OR name ILIKE $1 OR category ILIKE $1)";
        let order = params.order_clause(&["id", "name", "starts_on"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Competition>(&format!(
            "SELECT * FROM competitions WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM competitions WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_competition(&self, p: &CompetitionPayload) -> Result<Competition, AppError> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            INSERT INTO competitions (name, category, starts_on, ends_on)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.category)
        .bind(p.starts_on)
        .bind(p.ends_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(competition)
    }

    pub async fn update_competition(
        &self,
        id: i32,
        p: &CompetitionPayload,
    ) -> Result<Competition, AppError> {
        sqlx::query_as::<_, Competition>(
            r#"
            UPDATE competitions
            SET name = $1, category = $2, starts_on = $3, ends_on = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&p.name)
        .bind(&p.category)
        .bind(p.starts_on)
        .bind(p.ends_on)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Competência"))
    }

    pub async fn delete_competition(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Competência"));
        }
        Ok(())
    }

    // =========================================================================
    //  TORNEIOS
    // =========================================================================

    pub async fn list_tournaments(&self, params: &ListParams) -> Result<Page<Tournament>, AppError> {
        let filter = r#"(
            $1::text IS NULL
            OR name ILIKE $1
            OR competition_id IN (SELECT id FROM competitions WHERE name ILIKE $1)
        )"#;
        let order = params.order_clause(&["id", "name", "starts_on", "entry_fee", "status"], "name");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Tournament>(&format!(
            "SELECT * FROM tournaments WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM tournaments WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_tournament(&self, p: &TournamentPayload) -> Result<Tournament, AppError> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            INSERT INTO tournaments (competition_id, name, starts_on, ends_on, entry_fee, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(p.competition_id)
        .bind(&p.name)
        .bind(p.starts_on)
        .bind(p.ends_on)
        .bind(p.entry_fee)
        .bind(p.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(tournament)
    }

    pub async fn update_tournament(
        &self,
        id: i32,
        p: &TournamentPayload,
    ) -> Result<Tournament, AppError> {
        sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments
            SET competition_id = $1, name = $2, starts_on = $3,
                ends_on = $4, entry_fee = $5, status = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(p.competition_id)
        .bind(&p.name)
        .bind(p.starts_on)
        .bind(p.ends_on)
        .bind(p.entry_fee)
        .bind(p.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Torneio"))
    }

    pub async fn delete_tournament(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Torneio"));
        }
        Ok(())
    }

    // =========================================================================
    //  RANKINGS
    // =========================================================================

    pub async fn list_rankings(&self, params: &ListParams) -> Result<Page<Ranking>, AppError> {
        let filter = r#"(
            $1::text IS NULL
            OR client_id IN (SELECT id FROM clients WHERE full_name ILIKE $1)
            OR competition_id IN (SELECT id FROM competitions WHERE name ILIKE $1)
        )"#;
        let order = params.order_clause(&["id", "points", "position"], "position");
        let search = params.search_term();

        let rows = sqlx::query_as::<_, Ranking>(&format!(
            "SELECT * FROM rankings WHERE {filter} {order} LIMIT $2 OFFSET $3"
        ))
        .bind(&search)
        .bind(params.page_size())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM rankings WHERE {filter}"))
                .bind(&search)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(rows, total, params))
    }

    pub async fn create_ranking(&self, p: &RankingPayload) -> Result<Ranking, AppError> {
        sqlx::query_as::<_, Ranking>(
            r#"
            INSERT INTO rankings (competition_id, client_id, points, position)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(p.competition_id)
        .bind(p.client_id)
        .bind(p.points)
        .bind(p.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "O cliente já está nesse ranking."))
    }

    pub async fn update_ranking(&self, id: i32, p: &RankingPayload) -> Result<Ranking, AppError> {
        sqlx::query_as::<_, Ranking>(
            r#"
            UPDATE rankings
            SET competition_id = $1, client_id = $2, points = $3, position = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(p.competition_id)
        .bind(p.client_id)
        .bind(p.points)
        .bind(p.position)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "O cliente já está nesse ranking."))?
        .ok_or(AppError::NotFound("Ranking"))
    }

    pub async fn delete_ranking(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rankings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ranking"));
        }
        Ok(())
    }
}
