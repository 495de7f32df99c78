use std::process::ExitCode;

/// Exit status of a `locsync` run.
///
/// - `Success` (0): every target file was reconciled and written
/// - `Error` (2): the run was aborted (missing directory or file, invalid JSON, bad config)
///
/// Per-key translation failures and unreadable source files do not change the
/// exit status; they are reported and the run continues.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
