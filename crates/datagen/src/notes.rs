//! AI visit-note synthesis
//!
//! Produces 2-4 chronologically ordered clinical visit notes for one
//! patient. All of a patient's notes share the same continuation state
//! so the narrative stays consistent across visits.

use chrono::{Duration, Local, NaiveDate};
use priorauth_core::{GenerateError, PatientShell};
use rand::Rng;

use crate::client::TextGenerator;

const MIN_VISITS: u32 = 2;
const MAX_VISITS: u32 = 4;
const DAYS_BETWEEN_VISITS: u32 = 30;

const SYSTEM_PROMPT: &str = "\
You are a medical professional writing detailed visit notes for patients being prescribed weight management or autoimmune medications.

Generate realistic doctor's visit notes that include:
1. Patient vital signs (weight, height, BMI)
2. Chief complaint and reason for visit
3. Medical history relevant to the prescription
4. Physical examination findings
5. Assessment covering the key criteria for the medication (e.g., BMI requirements, comorbidities, previous weight management attempts)
6. Plan including medication dosing and follow-up

Make the notes sound natural and medical, including:
- Specific measurements and dates
- Medical terminology where appropriate
- References to prior visits if it's a continuation
- Mention of lifestyle interventions (diet, exercise)
- Any relevant comorbidities (hypertension, diabetes, dyslipidemia)
- Side effect discussions
- Patient adherence and response to treatment

The notes should naturally incorporate answers to medication authorization questions without being a direct Q&A format.";

/// Everything the synthesizer needs to ground a generated note in
/// patient identity, prescription, visit index, and continuation
/// state. Transient: lives only for one generation call chain.
#[derive(Debug, Clone)]
pub struct VisitNoteRequest {
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    pub patient_date_of_birth: String,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub is_continuation: bool,
    pub months_on_medication: Option<u32>,
}

impl From<&PatientShell> for VisitNoteRequest {
    fn from(shell: &PatientShell) -> Self {
        VisitNoteRequest {
            patient_first_name: shell.first_name.clone(),
            patient_last_name: shell.last_name.clone(),
            patient_age: shell.age,
            patient_gender: shell.gender.to_string(),
            patient_date_of_birth: shell.date_of_birth.clone(),
            medication: shell.prescription.medication.clone(),
            dosage: shell.prescription.dosage.clone(),
            frequency: shell.prescription.frequency.clone(),
            duration: shell.prescription.duration.clone(),
            is_continuation: shell.is_continuation,
            months_on_medication: shell.months_on_medication,
        }
    }
}

/// Generate realistic medical visit notes for a patient.
///
/// Returns 2-4 notes ordered oldest to newest. If any single note
/// fails to generate, the whole synthesis fails with the 1-based visit
/// number attached; partial results for a patient are never returned.
pub async fn generate_visit_notes<G: TextGenerator>(
    generator: &G,
    request: &VisitNoteRequest,
) -> Result<Vec<String>, GenerateError> {
    // Dates are decided up front: the RNG is not held across awaits.
    let dates = {
        let mut rng = rand::thread_rng();
        visit_dates(&mut rng)
    };
    let total = dates.len();

    let mut notes = Vec::with_capacity(total);
    for (index, date) in dates.iter().enumerate() {
        let visit_number = index + 1;
        let prompt = visit_prompt(request, *date, visit_number, total);

        let note = generator
            .completion(SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| e.for_visit(visit_number))?;

        tracing::debug!(visit = visit_number, total, "Generated visit note");
        notes.push(note);
    }

    Ok(notes)
}

/// Pick the visit count and compute one date per visit, oldest first.
///
/// Visit slots are spaced roughly 30 days apart with jitter: the slot
/// closest to today draws a days-ago value from [0, 30], the next from
/// [30, 60], and so on, which keeps the sequence ordered even when the
/// jitter lands on a shared boundary.
fn visit_dates<R: Rng + ?Sized>(rng: &mut R) -> Vec<NaiveDate> {
    let count = rng.gen_range(MIN_VISITS..=MAX_VISITS);
    let today = Local::now().date_naive();

    let mut dates: Vec<NaiveDate> = (0..count)
        .map(|slot| {
            let days_ago =
                rng.gen_range(DAYS_BETWEEN_VISITS * slot..=DAYS_BETWEEN_VISITS * (slot + 1));
            today - Duration::days(i64::from(days_ago))
        })
        .collect();

    // Sampled most-recent-first; notes are written oldest-first.
    dates.reverse();
    dates
}

/// Build the prompt for one visit note.
fn visit_prompt(
    request: &VisitNoteRequest,
    visit_date: NaiveDate,
    visit_number: usize,
    total_visits: usize,
) -> String {
    let visit_type = if visit_number == 1 && !request.is_continuation {
        "This is the initial consultation for starting the medication."
    } else {
        "This is a follow-up visit."
    };

    let months_on_medication = match request.months_on_medication {
        Some(months) if request.is_continuation => months.to_string(),
        _ => "N/A".to_string(),
    };

    format!(
        "Generate a realistic doctor's visit note for this patient. Ensure the patient's details are included in the notes. Do not redact anything:\n\
         - Patient Name: {first_name} {last_name}\n\
         - Date of Birth: {date_of_birth}\n\
         - Age: {age} years old\n\
         - Gender: {gender}\n\
         - Medication: {medication} {dosage}\n\
         - Frequency: {frequency}\n\
         - Duration: {duration}\n\
         - Visit Date: {visit_date}\n\
         - Visit Number: {visit_number} of {total_visits}\n\
         - Is Continuation: {is_continuation}\n\
         - Months on Medication: {months_on_medication}\n\
         \n\
         This is visit {visit_number}. {visit_type}",
        first_name = request.patient_first_name,
        last_name = request.patient_last_name,
        date_of_birth = request.patient_date_of_birth,
        age = request.patient_age,
        gender = request.patient_gender,
        medication = request.medication,
        dosage = request.dosage,
        frequency = request.frequency,
        duration = request.duration,
        visit_date = visit_date.format("%Y-%m-%d"),
        visit_number = visit_number,
        total_visits = total_visits,
        is_continuation = request.is_continuation,
        months_on_medication = months_on_medication,
        visit_type = visit_type,
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn request(is_continuation: bool) -> VisitNoteRequest {
        VisitNoteRequest {
            patient_first_name: "Maria".to_string(),
            patient_last_name: "Keller".to_string(),
            patient_age: 52,
            patient_gender: "Female".to_string(),
            patient_date_of_birth: "1974-03-02".to_string(),
            medication: "Wegovy".to_string(),
            dosage: "1 mg".to_string(),
            frequency: "once weekly".to_string(),
            duration: "ongoing".to_string(),
            is_continuation,
            months_on_medication: is_continuation.then_some(6),
        }
    }

    #[test]
    fn visit_dates_are_bounded_and_oldest_first() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let dates = visit_dates(&mut rng);
            assert!((2..=4).contains(&dates.len()));
            for pair in dates.windows(2) {
                assert!(pair[0] <= pair[1], "dates must be oldest to newest");
            }
        }
    }

    #[test]
    fn first_visit_of_a_new_start_is_an_initial_consultation() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let prompt = visit_prompt(&request(false), date, 1, 3);
        assert!(prompt.contains("initial consultation"));
        assert!(prompt.contains("- Months on Medication: N/A"));
        assert!(prompt.contains("- Visit Date: 2026-05-04"));
        assert!(prompt.contains("- Visit Number: 1 of 3"));
    }

    #[test]
    fn continuation_visits_are_always_follow_ups() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let first = visit_prompt(&request(true), date, 1, 2);
        assert!(first.contains("follow-up visit"));
        assert!(first.contains("- Months on Medication: 6"));

        let later = visit_prompt(&request(false), date, 2, 2);
        assert!(later.contains("follow-up visit"));
    }
}
