use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Ask nitrogen to re-apply wallpapers from the updated directory.
///
/// Fire-and-forget: output is discarded and a failure to launch only logs,
/// since the run has already produced its files either way.
pub fn apply_wallpapers() {
    info!("Running nitrogen --restore");
    let result = Command::new("nitrogen")
        .arg("--restore")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(status) => info!("Ran nitrogen --restore ({status})"),
        Err(e) => warn!("Could not run nitrogen --restore: {e}"),
    }
}
