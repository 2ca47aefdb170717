use console::style;
use pvsadm::cloud::UnavailableClient;
use pvsadm::{Auditor, DEFAULT_AUDIT_FILE, credentials};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    // Bound before parsing; --audit-file does not move it
    let auditor = Arc::new(Auditor::new(DEFAULT_AUDIT_FILE));

    let result = pvsadm::run(
        std::env::args_os(),
        auditor,
        Arc::new(UnavailableClient),
        credentials::process_env,
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast::<clap::Error>() {
            Ok(parse_error) => parse_error.exit(),
            Err(err) => {
                // Printed directly so a silenced log filter cannot hide it
                eprintln!("{} {err:#}", style("Error:").for_stderr().red().bold());
                ExitCode::FAILURE
            }
        },
    }
}
