// # nfsn-cli
//
// Thin integration layer for the `dyndns` and `nfsn-dns` binaries:
// argument parsing, logging setup, exit codes and client construction.
// All DNS logic lives in nfsn-core and nfsn-client.

pub mod args;
pub mod logging;

use nfsn_client::NfsnClient;
use nfsn_core::ReconcileOutcome;
use std::path::Path;
use std::process::ExitCode;

/// Exit codes for different termination scenarios
///
/// - 0: Success
/// - 1: Configuration or startup error
/// - 2: Runtime error (API, network, IP lookup)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliExitCode {
    /// Completed normally
    Success = 0,
    /// Bad flags, unreadable credential file, or startup failure
    ConfigError = 1,
    /// A remote call failed
    RuntimeError = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Build the API client from `path`, or from the default credential file
pub fn load_client(path: Option<&Path>) -> nfsn_core::Result<NfsnClient> {
    match path {
        Some(path) => NfsnClient::from_config_file(path),
        None => NfsnClient::from_default_config(),
    }
}

/// Build a single-threaded runtime; each invocation is one logical task
pub fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))
}

/// Print a clap parse error; `--help`/`--version` count as success
pub fn report_parse_error(err: clap::Error) -> CliExitCode {
    // Printing to a closed stdout/stderr is not worth failing over.
    let _ = err.print();
    if err.use_stderr() {
        CliExitCode::ConfigError
    } else {
        CliExitCode::Success
    }
}

/// One-line summary of a dyndns run; dry runs say what would have happened
pub fn describe_outcome(outcome: &ReconcileOutcome, dry_run: bool) -> String {
    match outcome {
        ReconcileOutcome::Unchanged { record } => format!("Nothing to do: {} is current", record),
        ReconcileOutcome::Replaced { previous, current } if dry_run => {
            format!("[DRY-RUN] Would replace {} with {}", previous, current)
        }
        ReconcileOutcome::Replaced { previous, current } => {
            format!("Replaced {} with {}", previous, current)
        }
        ReconcileOutcome::Created { current } if dry_run => {
            format!("[DRY-RUN] Would create {}", current)
        }
        ReconcileOutcome::Created { current } => format!("Created {}", current),
    }
}
