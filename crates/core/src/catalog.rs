//! Medication catalog: the fixed reference table of supported medications

/// Reference data for one supported medication.
///
/// Every medication referenced anywhere in the system must resolve to an
/// entry in [`MEDICATIONS`].
#[derive(Debug, Clone, Copy)]
pub struct MedicationInfo {
    /// Medication brand name
    pub name: &'static str,
    /// Available dosage strengths
    pub dosages: &'static [&'static str],
    /// Dosing frequency
    pub frequency: &'static str,
    /// Treatment duration
    pub duration: &'static str,
    /// Whether therapy may be sampled as a continuation of an existing
    /// course. Induction-dosed medications always start fresh.
    pub continuation_eligible: bool,
}

/// The supported medication catalog, loaded once at compile time.
pub const MEDICATIONS: &[MedicationInfo] = &[
    MedicationInfo {
        name: "Zepbound",
        dosages: &["2.5 mg", "5 mg", "7.5 mg", "10 mg", "12.5 mg", "15 mg"],
        frequency: "once weekly",
        duration: "ongoing",
        continuation_eligible: true,
    },
    MedicationInfo {
        name: "Wegovy",
        dosages: &["0.25 mg", "0.5 mg", "1 mg", "1.7 mg", "2.4 mg"],
        frequency: "once weekly",
        duration: "ongoing",
        continuation_eligible: true,
    },
    MedicationInfo {
        name: "Skyrizi",
        dosages: &["150 mg", "600 mg"],
        frequency: "every 12 weeks after initial loading doses",
        duration: "ongoing",
        continuation_eligible: false,
    },
];

/// Look up a medication by name.
pub fn lookup(name: &str) -> Option<&'static MedicationInfo> {
    MEDICATIONS.iter().find(|m| m.name == name)
}
