//! priorauth-datagen: synthetic patient data generation
//!
//! Generates fake patient records (demographics, prescriptions, and
//! AI-written clinical visit notes) for testing the prior-authorization
//! service. The `generate-patients` binary in `main.rs` is the CLI
//! surface; `generate_patient_data` is the library entry point.

pub mod batch;
pub mod client;
pub mod notes;
pub mod patient;
pub mod store;

use std::path::{Path, PathBuf};

use priorauth_core::{GenerateError, Patient};

pub use batch::{generate_batch, generate_batch_with};
pub use client::{OpenAiClient, TextGenerator};
pub use notes::{VisitNoteRequest, generate_visit_notes};
pub use patient::assemble_patient;
pub use store::save_patients;

/// Batch size used when no count is given to the library entry point.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Where the batch lands when no output path is given.
pub const DEFAULT_OUTPUT_PATH: &str = "sample_data/patient_data.json";

/// Generate `n` patients and save them as a JSON file.
///
/// The batch is generated concurrently and written only when every
/// patient succeeded; a failed batch leaves no output file behind.
/// With `output` unset the file lands at [`DEFAULT_OUTPUT_PATH`].
pub async fn generate_patient_data<G>(
    generator: &G,
    n: usize,
    output: Option<&Path>,
) -> Result<Vec<Patient>, GenerateError>
where
    G: TextGenerator + Clone + 'static,
{
    tracing::info!(count = n, "Starting patient generation");

    let patients = batch::generate_batch(generator, n).await?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    store::save_patients(&patients, &path)?;

    tracing::info!(
        count = patients.len(),
        path = %path.display(),
        "Saved generated patients"
    );
    Ok(patients)
}
