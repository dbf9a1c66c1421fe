//! Demographic and prescription sampling
//!
//! Pure local computation: no network, no shared mutable state. Each
//! caller passes its own RNG, so concurrent generation tasks never
//! contend on a global generator.

use chrono::{Duration, Local};
use fake::Fake;
use fake::faker::name::en::LastName;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{MEDICATIONS, MedicationInfo};
use crate::model::{Gender, Prescription};

const MIN_PATIENT_AGE: u32 = 18;
const MAX_PATIENT_AGE: u32 = 75;
const MAX_MONTHS_ON_MEDICATION: u32 = 24;

// Gender-matched first-name pools. Entirely fictional sample data.
const FIRST_NAMES_MALE: &[&str] = &[
    "James", "Michael", "Robert", "David", "Carlos", "Ahmed", "Wei", "Daniel", "Luis", "Marcus",
    "Thomas", "Rajesh", "Peter", "Samuel", "Victor", "Andre",
];
const FIRST_NAMES_FEMALE: &[&str] = &[
    "Maria", "Jennifer", "Linda", "Aisha", "Mei", "Patricia", "Elena", "Sofia", "Grace", "Priya",
    "Hannah", "Camille", "Rosa", "Nadia", "Karen", "Ingrid",
];

/// Everything the sampler decides about a patient before any visit
/// notes exist: demographics, prescription, and continuation state.
///
/// The continuation state is computed once here and threaded through
/// every visit-note request for the patient, so all of a patient's
/// notes describe the same treatment history.
#[derive(Debug, Clone)]
pub struct PatientShell {
    pub gender: Gender,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    /// ISO date string, YYYY-MM-DD
    pub date_of_birth: String,
    pub prescription: Prescription,
    pub is_continuation: bool,
    pub months_on_medication: Option<u32>,
}

/// Sample a complete demographic/prescription shell for one patient.
pub fn sample_patient_shell<R: Rng + ?Sized>(rng: &mut R) -> PatientShell {
    let gender = if rng.gen_bool(0.5) {
        Gender::Male
    } else {
        Gender::Female
    };
    let first_name = first_name_for(gender, rng);
    let last_name: String = LastName().fake_with_rng(rng);

    let age = rng.gen_range(MIN_PATIENT_AGE..=MAX_PATIENT_AGE);
    let date_of_birth = date_of_birth_for_age(age, rng);

    let (info, prescription) = sample_prescription(rng);

    // Induction-dosed medications always start fresh; everything else
    // is a coin flip.
    let is_continuation = info.continuation_eligible && rng.gen_bool(0.5);
    let months_on_medication = if is_continuation {
        Some(rng.gen_range(1..=MAX_MONTHS_ON_MEDICATION))
    } else {
        None
    };

    PatientShell {
        gender,
        first_name,
        last_name,
        age,
        date_of_birth,
        prescription,
        is_continuation,
        months_on_medication,
    }
}

fn first_name_for<R: Rng + ?Sized>(gender: Gender, rng: &mut R) -> String {
    let pool = match gender {
        Gender::Male => FIRST_NAMES_MALE,
        Gender::Female => FIRST_NAMES_FEMALE,
    };
    (*pool.choose(rng).expect("name pool is non-empty")).to_string()
}

/// Compute a date of birth consistent with the given age.
///
/// Uses age*365 plus up to 364 jitter days, which ignores leap years.
/// Close enough for synthetic data; not suitable for real
/// age-sensitive logic.
fn date_of_birth_for_age<R: Rng + ?Sized>(age: u32, rng: &mut R) -> String {
    let days_old = i64::from(age) * 365 + rng.gen_range(0..=364);
    let birth_date = Local::now().date_naive() - Duration::days(days_old);
    birth_date.format("%Y-%m-%d").to_string()
}

fn sample_prescription<R: Rng + ?Sized>(rng: &mut R) -> (&'static MedicationInfo, Prescription) {
    let info = MEDICATIONS
        .choose(rng)
        .expect("medication catalog is non-empty");
    let dosage = info
        .dosages
        .choose(rng)
        .expect("catalog entries have at least one dosage");

    let prescription = Prescription {
        medication: info.name.to_string(),
        dosage: (*dosage).to_string(),
        frequency: info.frequency.to_string(),
        duration: info.duration.to_string(),
    };

    (info, prescription)
}
