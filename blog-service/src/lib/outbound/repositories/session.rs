use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::UserId;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    session_id: Uuid,
    user_id: Uuid,
    token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(r: SessionRow) -> Self {
        Session {
            id: r.id,
            session_id: SessionId(r.session_id),
            user_id: UserId(r.user_id),
            token: r.token,
            created_at: r.created_at,
            updated_at: r.updated_at,
            expires_at: r.expires_at,
        }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: Session) -> Result<Session, SessionError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (id, session_id, user_id, token, created_at, updated_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, session_id, user_id, token, created_at, updated_at, expires_at
            "#,
        )
        .bind(session.id)
        .bind(session.session_id.0)
        .bind(session.user_id.0)
        .bind(&session.token)
        .bind(session.created_at)
        .bind(session.updated_at)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_session_id(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Session>, SessionError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, session_id, user_id, token, created_at, updated_at, expires_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(row.map(Session::from))
    }

    async fn update(&self, session: Session) -> Result<Session, SessionError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET token = $2, expires_at = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(session.id)
        .bind(&session.token)
        .bind(session.expires_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SessionError::NotFound(session.session_id.to_string()));
        }

        Ok(session)
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), SessionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            tracing::warn!(session_id = %session_id, "No session found to delete");
        } else {
            tracing::debug!(session_id = %session_id, "Session deleted");
        }

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
