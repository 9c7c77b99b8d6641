use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};

static RECEIVED_CTRL_C: AtomicBool = AtomicBool::new(false);

/// Installs a handler for SIGINT/SIGTERM. Long-running solvers poll [`received_ctrl_c`] between
/// steps and return their best tour so far.
pub fn initialize() {
    let result = ctrlc::set_handler(|| {
        info!("Received termination signal; stopping after current step");
        RECEIVED_CTRL_C.store(true, Ordering::SeqCst);
    });

    if let Err(e) = result {
        warn!("Cannot install signal handler: {e}");
    }
}

pub fn received_ctrl_c() -> bool {
    RECEIVED_CTRL_C.load(Ordering::Relaxed)
}
