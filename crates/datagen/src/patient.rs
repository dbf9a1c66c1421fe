//! Patient assembly: sampler shell + synthesized visit notes

use priorauth_core::{GenerateError, Patient, sample_patient_shell};

use crate::client::TextGenerator;
use crate::notes::{VisitNoteRequest, generate_visit_notes};

/// Assemble one complete patient record.
///
/// Samples demographics and a prescription locally, then synthesizes
/// the visit notes through the generation capability. The sampled
/// shell is consumed whole; the record is never mutated afterwards.
pub async fn assemble_patient<G: TextGenerator>(generator: &G) -> Result<Patient, GenerateError> {
    // Sampling is synchronous and local; the RNG never crosses an await.
    let shell = {
        let mut rng = rand::thread_rng();
        sample_patient_shell(&mut rng)
    };

    let request = VisitNoteRequest::from(&shell);
    let visit_notes = generate_visit_notes(generator, &request).await?;

    Ok(Patient {
        first_name: shell.first_name,
        last_name: shell.last_name,
        date_of_birth: shell.date_of_birth,
        gender: shell.gender,
        prescription: shell.prescription,
        visit_notes,
    })
}
