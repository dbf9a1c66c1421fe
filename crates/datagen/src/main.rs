//! generate-patients: CLI entrypoint for the synthetic data generator.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use priorauth_core::Patient;
use priorauth_datagen::{OpenAiClient, generate_patient_data};

const VISIT_NOTE_PREVIEW_LENGTH: usize = 500;

/// Generate realistic patient data for medical prescription authorization
#[derive(Parser)]
#[command(name = "generate-patients")]
struct Args {
    /// Number of patients to generate
    #[arg(
        short,
        long,
        default_value_t = 2,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    number: u32,

    /// Output file path (default: sample_data/patient_data.json)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Invalid counts (< 1) are rejected here, before any generation work.
    let args = Args::parse();

    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key = match std::env::var("OPENAI_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            tracing::error!("OPENAI_API_KEY is not set");
            return ExitCode::FAILURE;
        }
    };
    let client = OpenAiClient::new(api_key);

    tracing::info!(count = args.number, "Generating patients");
    match generate_patient_data(&client, args.number as usize, args.output.as_deref()).await {
        Ok(patients) => {
            if let Some(first) = patients.first() {
                log_patient_summary(first);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Patient generation failed");
            let mut source = std::error::Error::source(&e);
            while let Some(inner) = source {
                tracing::error!("caused by: {}", inner);
                source = inner.source();
            }
            ExitCode::FAILURE
        }
    }
}

/// Log a human-readable summary of one generated patient.
fn log_patient_summary(patient: &Patient) {
    tracing::info!("Patient Summary:");
    tracing::info!("  Name: {} {}", patient.first_name, patient.last_name);
    tracing::info!("  DOB: {}", patient.date_of_birth);
    tracing::info!("  Gender: {}", patient.gender);
    tracing::info!(
        "  Prescription: {} {}",
        patient.prescription.medication,
        patient.prescription.dosage
    );
    tracing::info!("  Frequency: {}", patient.prescription.frequency);
    tracing::info!("  Number of visit notes: {}", patient.visit_notes.len());

    if let Some(first_note) = patient.visit_notes.first() {
        let mut preview: String = first_note.chars().take(VISIT_NOTE_PREVIEW_LENGTH).collect();
        if first_note.chars().count() > VISIT_NOTE_PREVIEW_LENGTH {
            preview.push_str("...");
        }
        tracing::info!("First visit note preview:\n{}", preview);
    }
}
