use std::sync::Arc;

use async_trait::async_trait;
use prep_core::model::{AnswerRecord, STANDARD_METRICS, Score};
use prep_core::time::fixed_clock;
use services::{
    Advance, AnalysisOutcome, AnalysisSource, AuthService, CoachError, DEFAULT_QUESTION_COUNT,
    HistoryError, InterviewLoopService, QuestionSource, SessionHistoryService, SignUp,
    WorkflowError,
};
use storage::repository::InMemoryRepository;

struct FixedQuestions(Vec<String>);

#[async_trait]
impl QuestionSource for FixedQuestions {
    async fn generate_questions(
        &self,
        _domain: &str,
        _specialization: &str,
    ) -> Result<Vec<String>, CoachError> {
        Ok(self.0.clone())
    }
}

struct CannedAnalysis;

#[async_trait]
impl AnalysisSource for CannedAnalysis {
    async fn analyze_answers(
        &self,
        _answers: &[AnswerRecord],
    ) -> Result<AnalysisOutcome, CoachError> {
        Ok(AnalysisOutcome {
            overall_feedback: "strong session".into(),
            scores: vec![
                Score::new("Fluency", 8, "smooth delivery"),
                Score::new("Tone", 7, "confident"),
            ],
        })
    }
}

/// Stands in for an unreachable coach backend.
struct OfflineBackend;

#[async_trait]
impl QuestionSource for OfflineBackend {
    async fn generate_questions(
        &self,
        _domain: &str,
        _specialization: &str,
    ) -> Result<Vec<String>, CoachError> {
        Err(CoachError::Api("model offline".into()))
    }
}

#[async_trait]
impl AnalysisSource for OfflineBackend {
    async fn analyze_answers(
        &self,
        _answers: &[AnswerRecord],
    ) -> Result<AnalysisOutcome, CoachError> {
        Err(CoachError::Api("model offline".into()))
    }
}

fn build_loop(
    repo: &InMemoryRepository,
    questions: Arc<dyn QuestionSource>,
    analysis: Arc<dyn AnalysisSource>,
) -> InterviewLoopService {
    let history = SessionHistoryService::new(fixed_clock(), Arc::new(repo.clone()));
    InterviewLoopService::new(fixed_clock(), questions, analysis, history)
}

async fn sign_up_ada(repo: &InMemoryRepository) -> services::AuthSession {
    let auth = AuthService::new(fixed_clock(), Arc::new(repo.clone()));
    auth.sign_up(SignUp {
        name: "Ada".into(),
        email: "ada@x.com".into(),
        password: "secret1".into(),
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn full_run_persists_a_session() {
    let repo = InMemoryRepository::new();
    let session_ctx = sign_up_ada(&repo).await;
    let questions = vec![
        "Why Rust?".to_string(),
        "Describe a hard bug.".to_string(),
        "How do you review code?".to_string(),
    ];
    let loop_svc = build_loop(
        &repo,
        Arc::new(FixedQuestions(questions)),
        Arc::new(CannedAnalysis),
    );

    let mut flow = loop_svc
        .begin("Tech & Engineering", "Backend Developer")
        .await
        .unwrap();
    let mut step = Advance::Next;
    let mut i = 0;
    while step != Advance::Finished {
        flow.set_draft(format!("answer {i}"));
        step = flow.advance(fixed_clock().now()).unwrap();
        i += 1;
    }

    let stored = loop_svc
        .finish(
            &flow,
            "Tech & Engineering",
            "Backend Developer",
            Some(&session_ctx),
        )
        .await
        .unwrap();

    assert_eq!(stored.domain(), "Tech & Engineering");
    assert_eq!(stored.report().answers(), flow.answers());
    assert_eq!(stored.report().overall_feedback(), "strong session");

    let history = SessionHistoryService::new(fixed_clock(), Arc::new(repo));
    let listed = history.sessions(Some(&session_ctx)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], stored);
}

#[tokio::test]
async fn question_failure_falls_back_to_the_default_list() {
    let repo = InMemoryRepository::new();
    let loop_svc = build_loop(&repo, Arc::new(OfflineBackend), Arc::new(CannedAnalysis));

    let flow = loop_svc
        .begin("Tech & Engineering", "Data Scientist")
        .await
        .unwrap();

    assert_eq!(flow.questions().len(), DEFAULT_QUESTION_COUNT);
    assert!(flow.questions()[0].contains("Data Scientist"));
}

#[tokio::test]
async fn empty_question_list_also_falls_back() {
    let repo = InMemoryRepository::new();
    let loop_svc = build_loop(
        &repo,
        Arc::new(FixedQuestions(Vec::new())),
        Arc::new(CannedAnalysis),
    );

    let flow = loop_svc
        .begin("Business & Management", "Product Manager")
        .await
        .unwrap();
    assert_eq!(flow.questions().len(), DEFAULT_QUESTION_COUNT);
}

#[tokio::test]
async fn analysis_failure_degrades_to_the_neutral_report() {
    let repo = InMemoryRepository::new();
    let session_ctx = sign_up_ada(&repo).await;
    let loop_svc = build_loop(
        &repo,
        Arc::new(FixedQuestions(vec!["Only question?".into()])),
        Arc::new(OfflineBackend),
    );

    let mut flow = loop_svc
        .begin("Tech & Engineering", "Backend Developer")
        .await
        .unwrap();
    flow.set_draft("my answer");
    assert_eq!(flow.advance(fixed_clock().now()).unwrap(), Advance::Finished);

    let stored = loop_svc
        .finish(
            &flow,
            "Tech & Engineering",
            "Backend Developer",
            Some(&session_ctx),
        )
        .await
        .unwrap();

    let report = stored.report();
    assert_eq!(report.scores().len(), STANDARD_METRICS.len());
    assert!(report.scores().iter().all(|s| s.score == 0));
    // The user's answers still travel with the degraded report.
    assert_eq!(report.answers().len(), 1);
    assert_eq!(report.answers()[0].answer, "my answer");
}

#[tokio::test]
async fn finish_rejects_an_unfinished_flow() {
    let repo = InMemoryRepository::new();
    let session_ctx = sign_up_ada(&repo).await;
    let loop_svc = build_loop(
        &repo,
        Arc::new(FixedQuestions(vec!["One?".into(), "Two?".into()])),
        Arc::new(CannedAnalysis),
    );

    let flow = loop_svc
        .begin("Tech & Engineering", "Backend Developer")
        .await
        .unwrap();
    let err = loop_svc
        .finish(
            &flow,
            "Tech & Engineering",
            "Backend Developer",
            Some(&session_ctx),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFinished));
}

#[tokio::test]
async fn finish_requires_authentication() {
    let repo = InMemoryRepository::new();
    let loop_svc = build_loop(
        &repo,
        Arc::new(FixedQuestions(vec!["One?".into()])),
        Arc::new(CannedAnalysis),
    );

    let mut flow = loop_svc
        .begin("Tech & Engineering", "Backend Developer")
        .await
        .unwrap();
    flow.advance(fixed_clock().now()).unwrap();

    let err = loop_svc
        .finish(&flow, "Tech & Engineering", "Backend Developer", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::History(HistoryError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn selections_outside_the_catalog_are_rejected() {
    let repo = InMemoryRepository::new();
    let loop_svc = build_loop(
        &repo,
        Arc::new(FixedQuestions(vec!["One?".into()])),
        Arc::new(CannedAnalysis),
    );

    let err = loop_svc
        .begin("Quantum Gardening", "Topiary Lead")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnknownSelection { .. }));
}
