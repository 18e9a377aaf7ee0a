//! Graceful shutdown handling.

use console::Term;
use starwatch::sync::CancelToken;

/// Install the Ctrl+C handler.
///
/// First Ctrl+C cancels the in-flight pass (units finish their current
/// whole-record write, pending units never start) and ends the watch loop;
/// second Ctrl+C force quits.
pub fn setup_shutdown_handler(cancel: CancelToken) {
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        let is_tty = Term::stdout().is_term();
        if is_tty {
            eprintln!("\nShutdown requested, finishing current operations...");
            eprintln!("Press Ctrl+C again to force quit.");
        } else {
            tracing::warn!("Shutdown requested, finishing current operations");
        }

        cancel.cancel();

        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install second Ctrl+C handler");

        if is_tty {
            eprintln!("Force quit!");
        }
        std::process::exit(130);
    });
}
