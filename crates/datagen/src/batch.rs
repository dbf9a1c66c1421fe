//! Concurrent batch generation
//!
//! Spawns one task per patient so every patient's remote calls can be
//! in flight at once, then joins the tasks in spawn order. The batch
//! is all-or-nothing: one failed patient fails the whole batch, so
//! callers never have to reason about partially generated output files.

use priorauth_core::{GenerateError, Patient};
use tokio::task::JoinHandle;

use crate::client::TextGenerator;
use crate::patient::assemble_patient;

/// Generate `n` patients concurrently.
///
/// Returns patients in task-issue order regardless of which patient's
/// remote calls complete first. `n == 0` is an empty success. On the
/// first failure the batch aborts and still-running sibling tasks are
/// cancelled rather than left to spend completion calls on a result
/// that will be discarded.
pub async fn generate_batch<G>(generator: &G, n: usize) -> Result<Vec<Patient>, GenerateError>
where
    G: TextGenerator + Clone + 'static,
{
    generate_batch_with(n, |index| {
        let generator = generator.clone();
        async move {
            let patient = assemble_patient(&generator)
                .await
                .map_err(|e| e.for_patient(index))?;
            tracing::info!(
                index,
                name = %format!("{} {}", patient.first_name, patient.last_name),
                "Generated patient"
            );
            Ok(patient)
        }
    })
    .await
}

/// Run `n` generation tasks concurrently and join them in issue order.
///
/// Split out from [`generate_batch`] so the ordering and fail-fast
/// behavior can be exercised with deterministic tasks instead of the
/// full sampling pipeline.
pub async fn generate_batch_with<F, Fut>(n: usize, mut task: F) -> Result<Vec<Patient>, GenerateError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Patient, GenerateError>> + Send + 'static,
{
    let handles: Vec<JoinHandle<Result<Patient, GenerateError>>> =
        (0..n).map(|index| tokio::spawn(task(index))).collect();

    let mut patients = Vec::with_capacity(n);
    let mut failure: Option<GenerateError> = None;

    for (index, handle) in handles.into_iter().enumerate() {
        if failure.is_some() {
            handle.abort();
            continue;
        }
        match handle.await {
            Ok(Ok(patient)) => patients.push(patient),
            Ok(Err(e)) => failure = Some(e),
            // A panicked or cancelled task still names the patient slot.
            Err(join_err) => {
                failure = Some(
                    GenerateError::Completion(format!("generation task failed: {}", join_err))
                        .for_patient(index),
                );
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(patients),
    }
}
