//! Progress output gated by verbosity

use probcond_common::Verbosity;

/// Whether a message needing `required` prints at the `current` level.
pub fn permits(current: Verbosity, required: Verbosity) -> bool {
    match current {
        Verbosity::Quiet => false,
        Verbosity::Normal => required == Verbosity::Normal,
        Verbosity::Verbose => true,
    }
}

/// Log a message if the current level permits it
pub fn log(current: Verbosity, required: Verbosity, msg: &str) {
    if permits(current, required) {
        println!("{msg}");
    }
}
