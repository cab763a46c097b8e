use prep_core::model::{
    AnalysisReport, AnswerRecord, InterviewSession, Score, SessionId, UserId,
};
use sqlx::Row;
use uuid::Uuid;

use crate::repository::{StorageError, UserRecord};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn user_id_from_text(raw: &str) -> Result<UserId, StorageError> {
    Uuid::parse_str(raw)
        .map(UserId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid user id: {raw}")))
}

pub(crate) fn session_id_from_text(raw: &str) -> Result<SessionId, StorageError> {
    Uuid::parse_str(raw)
        .map(SessionId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid session id: {raw}")))
}

pub(crate) fn map_user_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserRecord, StorageError> {
    let id_text: String = row.try_get("id").map_err(ser)?;
    Ok(UserRecord {
        id: user_id_from_text(&id_text)?,
        email: row.try_get("email").map_err(ser)?,
        name: row.try_get("name").map_err(ser)?,
        password: row.try_get("password").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}

pub(crate) fn map_session_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<InterviewSession, StorageError> {
    let session_id_text: String = row.try_get("session_id").map_err(ser)?;
    let scores_json: String = row.try_get("scores").map_err(ser)?;
    let answers_json: String = row.try_get("answers").map_err(ser)?;

    let scores: Vec<Score> = serde_json::from_str(&scores_json).map_err(ser)?;
    let answers: Vec<AnswerRecord> = serde_json::from_str(&answers_json).map_err(ser)?;

    let report = AnalysisReport::new(
        row.try_get::<String, _>("overall_feedback").map_err(ser)?,
        scores,
        answers,
    )
    .map_err(ser)?;

    Ok(InterviewSession::new(
        session_id_from_text(&session_id_text)?,
        row.try_get("completed_at").map_err(ser)?,
        row.try_get::<String, _>("domain").map_err(ser)?,
        row.try_get::<String, _>("specialization").map_err(ser)?,
        report,
    ))
}

pub(crate) fn scores_to_json(scores: &[Score]) -> Result<String, StorageError> {
    serde_json::to_string(scores).map_err(ser)
}

pub(crate) fn answers_to_json(answers: &[AnswerRecord]) -> Result<String, StorageError> {
    serde_json::to_string(answers).map_err(ser)
}
