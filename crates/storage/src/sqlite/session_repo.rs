use async_trait::async_trait;
use prep_core::model::{InterviewSession, UserId};

use super::{
    SqliteRepository,
    mapping::{answers_to_json, map_session_row, scores_to_json},
};
use crate::repository::{SessionRepository, StorageError};

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn append_session(
        &self,
        owner: UserId,
        session: &InterviewSession,
    ) -> Result<(), StorageError> {
        let report = session.report();

        sqlx::query(
            r"
                INSERT INTO sessions (
                    session_id, user_id, completed_at, domain,
                    specialization, overall_feedback, scores, answers
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(session.id().value().to_string())
        .bind(owner.value().to_string())
        .bind(session.completed_at())
        .bind(session.domain())
        .bind(session.specialization())
        .bind(report.overall_feedback())
        .bind(scores_to_json(report.scores())?)
        .bind(answers_to_json(report.answers())?)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_sessions(&self, owner: UserId) -> Result<Vec<InterviewSession>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT session_id, completed_at, domain, specialization,
                       overall_feedback, scores, answers
                FROM sessions
                WHERE user_id = ?1
                ORDER BY id ASC
            ",
        )
        .bind(owner.value().to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_session_row(&row)?);
        }

        Ok(out)
    }
}
