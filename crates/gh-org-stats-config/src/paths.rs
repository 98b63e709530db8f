//! Output file locations

use std::path::PathBuf;

/// Default location of the statistics output log, relative to the CWD
pub const DEFAULT_OUTPUT_FILE: &str = "./out/github_organization_statistics.txt";

/// Get the default path of the statistics output log
pub fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}
