//! Domain models for patients, prescriptions, and questionnaires

use std::fmt;

use serde::{Deserialize, Serialize};

/// Patient gender, serialized as "Male"/"Female"
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// A prescribed medication with its dosing parameters.
///
/// `dosage` must be one of the catalog dosages for `medication`;
/// `frequency` and `duration` are copied verbatim from the catalog
/// entry. Immutable once created, owned by exactly one [`Patient`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prescription {
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

/// A complete patient record.
///
/// `visit_notes` is non-empty and ordered oldest to newest by
/// construction. Constructed in one shot by the assembler and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub first_name: String,
    pub last_name: String,
    /// ISO date string, YYYY-MM-DD
    pub date_of_birth: String,
    pub gender: Gender,
    pub prescription: Prescription,
    pub visit_notes: Vec<String>,
}

/// Kind of answer a questionnaire question expects
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Boolean,
}

/// One prior-authorization questionnaire question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub key: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<String>,
}

/// A named set of questionnaire questions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionSet {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Answer value: free text or a boolean, depending on the question type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Boolean(bool),
}

/// One answered questionnaire question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub question: Question,
    pub value: AnswerValue,
}

/// Request body for the answers endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerInput {
    pub patient: Patient,
    pub question_set: QuestionSet,
}

/// Response body for the answers endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOutput {
    pub answers: Vec<Answer>,
}
