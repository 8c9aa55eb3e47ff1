//! Errors surfaced to the caller of the pipeline.
//!
//! Malformed records and filtered-empty windows are not errors; they are
//! counted or yield empty payloads.

/// Fatal conditions for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Zero publication records were supplied
    EmptyInput,
    /// Records were supplied but none survived normalization
    NoUsableRecords { skipped: usize },
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no publication records to process"),
            Self::NoUsableRecords { skipped } => write!(
                f,
                "none of the {skipped} publication records had a date and a named author"
            ),
        }
    }
}

impl std::error::Error for PipelineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_input() {
        assert_eq!(
            PipelineError::EmptyInput.to_string(),
            "no publication records to process"
        );
    }

    #[test]
    fn display_no_usable_records() {
        let msg = PipelineError::NoUsableRecords { skipped: 7 }.to_string();
        assert!(msg.contains("7"));
    }

    #[test]
    fn converts_into_anyhow() {
        let err: anyhow::Error = PipelineError::EmptyInput.into();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::EmptyInput)
        );
    }
}
