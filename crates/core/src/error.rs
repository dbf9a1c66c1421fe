use std::path::PathBuf;

use thiserror::Error;

/// Patient generation error types
///
/// Every failure in the generation pipeline is wrapped with enough
/// context to diagnose it (visit number, patient index, target path)
/// and re-raised to the caller. Nothing below the CLI swallows errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The remote completion call for one visit note failed.
    /// Carries the 1-based visit number that failed.
    #[error("could not generate visit note {visit}")]
    Note {
        visit: usize,
        #[source]
        source: Box<GenerateError>,
    },

    /// One patient's assembly failed. Carries the zero-based index of
    /// the patient within the batch.
    #[error("could not generate patient {index}")]
    Patient {
        index: usize,
        #[source]
        source: Box<GenerateError>,
    },

    /// The text-completion API call failed (transport, HTTP status, or
    /// an empty response). Treated as non-retriable.
    #[error("completion request failed: {0}")]
    Completion(String),

    /// The output directory could not be created or the file could not
    /// be written.
    #[error("could not write {}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Wrap this error with the batch index of the patient it belongs to.
    pub fn for_patient(self, index: usize) -> Self {
        GenerateError::Patient {
            index,
            source: Box::new(self),
        }
    }

    /// Wrap this error with the 1-based visit number that failed.
    pub fn for_visit(self, visit: usize) -> Self {
        GenerateError::Note {
            visit,
            source: Box::new(self),
        }
    }
}
