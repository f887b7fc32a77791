use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Missing prompt")]
    EmptyPrompt,
    #[error("samples directory missing: {}", .0.display())]
    SamplesDirMissing(PathBuf),
    #[error("samples directory unreadable: {}: {source}", .path.display())]
    SamplesDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no sample audio files in {}", .0.display())]
    NoSamples(PathBuf),
}

impl StudioError {
    /// Validation failures are the caller's fault; everything else is a server fault
    pub fn is_validation(&self) -> bool {
        matches!(self, StudioError::EmptyPrompt)
    }

    /// Missing or unreadable sample directory
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StudioError::SamplesDirMissing(_) | StudioError::SamplesDirUnreadable { .. }
        )
    }
}
