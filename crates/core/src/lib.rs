//! priorauth-core: Shared prior-authorization domain types
//!
//! This crate provides the types used across the prior-authorization
//! service and the synthetic data generator: Patient, Prescription, the
//! questionnaire models, the medication catalog, and the
//! demographic/prescription sampler.

pub mod catalog;
pub mod error;
pub mod model;
pub mod sampler;

// Re-export our types
pub use catalog::{MEDICATIONS, MedicationInfo};
pub use error::GenerateError;
pub use model::{
    Answer, AnswerInput, AnswerOutput, AnswerValue, Gender, Patient, Prescription, Question,
    QuestionSet, QuestionType,
};
pub use sampler::{PatientShell, sample_patient_shell};
