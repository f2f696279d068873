//! Setup command handler.

use readaloud_runtime::prepare_current_engine;

use crate::error::CliError;

/// Prepare the bundled engine directory and report what changed.
pub fn execute() -> Result<(), CliError> {
    let report = prepare_current_engine()?;

    if report.made_executable {
        println!("Marked the synthesis engine executable.");
    }
    for link in &report.fixed_links {
        println!("Repaired library link {link}.");
    }
    for (link, reason) in &report.failed_links {
        eprintln!("Could not repair library link {link}: {reason}");
    }
    if report.is_clean() {
        println!("Engine ready.");
    }
    Ok(())
}
