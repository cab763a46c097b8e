use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use prep_core::model::{AnswerRecord, Score};

use super::{AnalysisOutcome, AnalysisSource, QuestionSource};
use crate::error::CoachError;

/// Connection settings for the question/analysis backend.
#[derive(Clone, Debug)]
pub struct CoachConfig {
    pub base_url: String,
}

impl CoachConfig {
    /// Local proxy default, matching the development setup.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3001/api";

    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("PREP_API_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.into());
        Self { base_url }
    }
}

/// HTTP client for both coach endpoints.
///
/// No auth token is attached; the backend is a local proxy in front of the
/// language model.
#[derive(Clone)]
pub struct CoachClient {
    client: Client,
    config: CoachConfig,
}

impl CoachClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(CoachConfig::from_env())
    }

    #[must_use]
    pub fn new(config: CoachConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Map a non-2xx response to an error, preferring the backend's own
    /// `{ "error": ... }` body over the bare status code.
    async fn reject(response: reqwest::Response) -> CoachError {
        let status = response.status();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => CoachError::Api(body.error),
            Err(_) => CoachError::Status(status),
        }
    }
}

#[async_trait]
impl QuestionSource for CoachClient {
    async fn generate_questions(
        &self,
        domain: &str,
        specialization: &str,
    ) -> Result<Vec<String>, CoachError> {
        let response = self
            .client
            .post(self.endpoint("questions"))
            .json(&QuestionsRequest {
                domain,
                specialization,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let body: QuestionsResponse = response.json().await?;
        debug!(count = body.questions.len(), "received generated questions");
        Ok(body.questions)
    }
}

#[async_trait]
impl AnalysisSource for CoachClient {
    async fn analyze_answers(
        &self,
        answers: &[AnswerRecord],
    ) -> Result<AnalysisOutcome, CoachError> {
        let response = self
            .client
            .post(self.endpoint("analyze"))
            .json(&AnalyzeRequest { answers })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let body: AnalyzeResponse = response.json().await?;
        debug!(scores = body.scores.len(), "received analysis");
        Ok(AnalysisOutcome {
            overall_feedback: body.overall_feedback,
            scores: body.scores,
        })
    }
}

#[derive(Debug, Serialize)]
struct QuestionsRequest<'a> {
    domain: &'a str,
    specialization: &'a str,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    questions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    answers: &'a [AnswerRecord],
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(rename = "overallFeedback")]
    overall_feedback: String,
    scores: Vec<Score>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}
