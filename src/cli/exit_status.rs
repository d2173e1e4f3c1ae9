use std::process::ExitCode;

/// Exit status of the checker.
///
/// - `Success` (0): all files OK, or errors ignored by request
/// - `FilesWithErrors(n)` (1..=255): number of files with errors
/// - `Fatal` (1): configuration error before any file was checked
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    FilesWithErrors(u8),
    Fatal,
}

impl ExitStatus {
    /// Status for a run that found errors in `files_with_errors` files,
    /// capped at 255.
    pub fn from_error_count(files_with_errors: usize) -> ExitStatus {
        match files_with_errors {
            0 => ExitStatus::Success,
            n => ExitStatus::FilesWithErrors(n.min(255) as u8),
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::FilesWithErrors(n) => ExitCode::from(n),
            ExitStatus::Fatal => ExitCode::from(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_count() {
        assert_eq!(ExitStatus::from_error_count(0), ExitStatus::Success);
        assert_eq!(ExitStatus::from_error_count(3), ExitStatus::FilesWithErrors(3));
        assert_eq!(
            ExitStatus::from_error_count(1000),
            ExitStatus::FilesWithErrors(255)
        );
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::FilesWithErrors(7)), ExitCode::from(7));
        assert_eq!(ExitCode::from(ExitStatus::Fatal), ExitCode::from(1));
    }
}
