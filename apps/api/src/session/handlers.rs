//! HTTP handlers for the screening session. Each handler locks the
//! single-occupant session, delivers exactly one event into the state
//! machine, and returns the refreshed view. No workflow logic lives here.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::screening::results::{summarize, ResultsSummary};
use crate::session::{apply, Session, SessionEvent, Stage};
use crate::state::AppState;
use crate::store::{snapshot, sql, SessionRecord};

/// What the UI needs to render the current stage. Derived from the
/// session, never stored.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub stage: Stage,
    pub total_questions: usize,
    pub current_index: Option<usize>,
    pub current_question: Option<String>,
    pub current_answer: String,
    pub results: Option<ResultsSummary>,
}

impl SessionView {
    fn from_session(session: &Session) -> Self {
        let answering = session.stage == Stage::Answering;
        Self {
            stage: session.stage,
            total_questions: session.questions.len(),
            current_index: answering.then_some(session.current_index),
            current_question: answering
                .then(|| session.questions.get(session.current_index).cloned())
                .flatten(),
            current_answer: if answering {
                session
                    .answers
                    .get(&session.current_index)
                    .cloned()
                    .unwrap_or_default()
            } else {
                String::new()
            },
            results: (session.stage == Stage::Results).then(|| summarize(session)),
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct IntakeRequest {
    pub job_description: String,
    pub resume_text: String,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub answer: String,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub saved_to: String,
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

async fn deliver(state: &AppState, event: SessionEvent) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    apply(&mut session, event, &state.engine, state.credentials.as_ref()).await?;
    Ok(Json(SessionView::from_session(&session)))
}

/// GET /api/v1/session
pub async fn handle_view(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from_session(&session))
}

/// POST /api/v1/session/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionView>, AppError> {
    deliver(
        &state,
        SessionEvent::Authenticate {
            password: req.password,
        },
    )
    .await
}

/// POST /api/v1/session/intake
pub async fn handle_intake(
    State(state): State<AppState>,
    Json(req): Json<IntakeRequest>,
) -> Result<Json<SessionView>, AppError> {
    deliver(
        &state,
        SessionEvent::SubmitIntake {
            job_description: req.job_description,
            resume_text: req.resume_text,
        },
    )
    .await
}

/// POST /api/v1/session/previous
pub async fn handle_previous(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    deliver(
        &state,
        SessionEvent::Previous {
            draft_answer: req.answer,
        },
    )
    .await
}

/// POST /api/v1/session/next
pub async fn handle_next(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    deliver(
        &state,
        SessionEvent::Next {
            draft_answer: req.answer,
        },
    )
    .await
}

/// POST /api/v1/session/finish
pub async fn handle_finish(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    deliver(
        &state,
        SessionEvent::Finish {
            draft_answer: req.answer,
        },
    )
    .await
}

/// Builds the persistence record, refusing unless the session is complete.
async fn completed_record(state: &AppState) -> Result<SessionRecord, AppError> {
    let session = state.session.lock().await;
    if session.stage != Stage::Results {
        return Err(AppError::Validation(
            "No completed interview to save".to_string(),
        ));
    }
    Ok(SessionRecord::from_session(&session))
}

/// POST /api/v1/session/save/snapshot
pub async fn handle_save_snapshot(
    State(state): State<AppState>,
) -> Result<Json<SaveResponse>, AppError> {
    let record = completed_record(&state).await?;
    let filename = snapshot::save(&state.config.data_dir, &record)?;
    Ok(Json(SaveResponse { saved_to: filename }))
}

/// POST /api/v1/session/save/sql
pub async fn handle_save_sql(
    State(state): State<AppState>,
) -> Result<Json<SaveResponse>, AppError> {
    let record = completed_record(&state).await?;
    sql::ensure_schema(&state.db).await?;
    sql::insert_result(&state.db, &record).await?;
    Ok(Json(SaveResponse {
        saved_to: "interview_results".to_string(),
    }))
}

/// POST /api/v1/extract
/// Multipart upload of a job description or resume document; returns the
/// extracted plain text for the client to place into the intake form.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
            let text = extract_text(&filename, &bytes)?;
            return Ok(Json(ExtractResponse { text }));
        }
    }

    Err(AppError::Validation(
        "Missing 'file' field in multipart upload".to_string(),
    ))
}
