//! Pipeline tests for the synthetic patient data generator.
//!
//! These exercise the assembler, the concurrent batch driver, and the
//! persistence layer against a fake text generator with controllable
//! latency and injected failures. No network access anywhere.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use priorauth_core::{Gender, GenerateError, Patient, Prescription, catalog};
use priorauth_datagen::{
    TextGenerator, VisitNoteRequest, assemble_patient, generate_batch, generate_batch_with,
    generate_patient_data, generate_visit_notes,
};

/// Fake generation capability: records prompts, sleeps a configurable
/// amount per call, and can fail on an exact call number.
#[derive(Clone, Default)]
struct FakeGenerator {
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
    fail_on_call: Option<usize>,
    latencies_ms: Vec<u64>,
}

impl FakeGenerator {
    fn failing_on(call: usize) -> Self {
        FakeGenerator {
            fail_on_call: Some(call),
            ..FakeGenerator::default()
        }
    }

    fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.prompts.lock().unwrap().clear();
    }
}

impl TextGenerator for FakeGenerator {
    async fn completion(&self, _system: &str, prompt: &str) -> Result<String, GenerateError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        if !self.latencies_ms.is_empty() {
            let delay = self.latencies_ms[(call - 1) % self.latencies_ms.len()];
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.fail_on_call == Some(call) {
            return Err(GenerateError::Completion("injected failure".to_string()));
        }
        Ok(format!("Synthetic visit note for call {}.", call))
    }
}

fn note_request() -> VisitNoteRequest {
    VisitNoteRequest {
        patient_first_name: "Elena".to_string(),
        patient_last_name: "Fischer".to_string(),
        patient_age: 44,
        patient_gender: "Female".to_string(),
        patient_date_of_birth: "1982-07-19".to_string(),
        medication: "Zepbound".to_string(),
        dosage: "5 mg".to_string(),
        frequency: "once weekly".to_string(),
        duration: "ongoing".to_string(),
        is_continuation: false,
        months_on_medication: None,
    }
}

fn patient_stub(first_name: &str) -> Patient {
    Patient {
        first_name: first_name.to_string(),
        last_name: "Ordered".to_string(),
        date_of_birth: "1970-01-01".to_string(),
        gender: Gender::Male,
        prescription: Prescription {
            medication: "Wegovy".to_string(),
            dosage: "0.5 mg".to_string(),
            frequency: "once weekly".to_string(),
            duration: "ongoing".to_string(),
        },
        visit_notes: vec!["note".to_string()],
    }
}

/// Pull the `- Visit Date: YYYY-MM-DD` line out of a generated prompt.
fn visit_date_of(prompt: &str) -> NaiveDate {
    let line = prompt
        .lines()
        .find_map(|l| l.trim().strip_prefix("- Visit Date: "))
        .expect("prompt must embed a visit date");
    NaiveDate::parse_from_str(line, "%Y-%m-%d").expect("visit date must be ISO formatted")
}

#[tokio::test]
async fn visit_notes_are_bounded_and_prompt_dates_are_chronological() {
    let fake = FakeGenerator::default();
    let request = note_request();

    for _ in 0..20 {
        fake.clear();
        let notes = generate_visit_notes(&fake, &request).await.unwrap();
        assert!((2..=4).contains(&notes.len()));

        let prompts = fake.recorded_prompts();
        assert_eq!(prompts.len(), notes.len());
        let dates: Vec<NaiveDate> = prompts.iter().map(|p| visit_date_of(p)).collect();
        for pair in dates.windows(2) {
            assert!(pair[0] <= pair[1], "visit dates must be oldest to newest");
        }
        assert!(prompts[0].contains("initial consultation"));
    }
}

#[tokio::test]
async fn assembled_patients_are_catalog_consistent() {
    let fake = FakeGenerator::default();

    for _ in 0..20 {
        let patient = assemble_patient(&fake).await.unwrap();
        assert!((2..=4).contains(&patient.visit_notes.len()));

        let entry = catalog::lookup(&patient.prescription.medication)
            .expect("assembled medication must be in the catalog");
        assert!(entry.dosages.contains(&patient.prescription.dosage.as_str()));
        assert_eq!(patient.prescription.frequency, entry.frequency);
        assert_eq!(patient.prescription.duration, entry.duration);
    }
}

#[tokio::test]
async fn batch_preserves_task_order_under_shuffled_latency() {
    let patients = generate_batch_with(5, |index| async move {
        // Later tasks finish first; the result order must not care.
        let delay = [50u64, 5, 35, 1, 20][index];
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(patient_stub(&format!("Patient{}", index)))
    })
    .await
    .unwrap();

    assert_eq!(patients.len(), 5);
    for (index, patient) in patients.iter().enumerate() {
        assert_eq!(patient.first_name, format!("Patient{}", index));
    }
}

#[tokio::test]
async fn batch_failure_carries_the_patient_index() {
    let err = generate_batch_with(3, |index| async move {
        if index == 1 {
            Err(GenerateError::Completion("boom".to_string()).for_patient(index))
        } else {
            Ok(patient_stub("ok"))
        }
    })
    .await
    .unwrap_err();

    match err {
        GenerateError::Patient { index, .. } => assert_eq!(index, 1),
        other => panic!("expected a patient-level error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_batch_is_an_empty_success() {
    let fake = FakeGenerator::default();
    let patients = generate_batch(&fake, 0).await.unwrap();
    assert!(patients.is_empty());
}

#[tokio::test]
async fn failed_batch_writes_no_output_file() {
    // The second completion call fails, so the single patient's second
    // visit note fails, so the batch fails.
    let fake = FakeGenerator::failing_on(2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_data").join("patients.json");

    let err = generate_patient_data(&fake, 1, Some(&path))
        .await
        .unwrap_err();

    match err {
        GenerateError::Patient { index, source } => {
            assert_eq!(index, 0);
            match *source {
                GenerateError::Note { visit, .. } => assert_eq!(visit, 2),
                other => panic!("expected a note-level cause, got {:?}", other),
            }
        }
        other => panic!("expected a patient-level error, got {:?}", other),
    }

    assert!(!path.exists(), "no partial output file may be written");
}

#[tokio::test]
async fn saved_batch_round_trips_field_for_field() {
    let fake = FakeGenerator::default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patients.json");

    let patients = generate_patient_data(&fake, 3, Some(&path)).await.unwrap();
    assert_eq!(patients.len(), 3);

    let raw = std::fs::read_to_string(&path).unwrap();
    let restored: Vec<Patient> = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, patients);
}
