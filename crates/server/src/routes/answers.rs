//! Prior-authorization answers endpoint

use axum::{Json, response::IntoResponse};
use priorauth_core::{AnswerInput, AnswerOutput};

use crate::error::AppError;

/// POST /answers - Generate answers to prior-authorization questions
/// based on patient data.
///
/// Accepts patient information and a question set, and will use the
/// patient's medical history, current medications, and visit notes to
/// answer each question.
pub async fn create(Json(body): Json<AnswerInput>) -> Result<impl IntoResponse, AppError> {
    if body.question_set.questions.is_empty() {
        return Err(AppError::BadRequest(
            "question_set.questions must not be empty".to_string(),
        ));
    }

    tracing::info!(
        patient_first_name = &body.patient.first_name,
        patient_last_name = &body.patient.last_name,
        question_set = &body.question_set.name,
        questions = body.question_set.questions.len(),
        "Answer generation requested"
    );

    // TODO: answer the questionnaire from the patient's visit notes via
    // a completion call; see the synthesizer in priorauth-datagen for
    // the client to reuse.
    Ok(Json(AnswerOutput { answers: vec![] }))
}
