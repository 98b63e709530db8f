//! Console logging using env_logger
//!
//! Logs go to stderr so the statistics rows printed on stdout stay clean.
//! The level defaults to `info` and can be changed with `RUST_LOG`.

use env_logger::Env;

/// Initialize the global logger
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
