//! Tab-separated statistics log
//!
//! The log is append-only: a header row followed by one row per completed
//! repository. Its first column is also the resume state; repositories
//! already listed there are skipped by later runs.

use crate::statistics::RepoStatistics;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Statistics output file
#[derive(Debug, Clone)]
pub struct OutputLog {
    path: PathBuf,
}

impl OutputLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Repositories that already have a row in the log
    ///
    /// Returns an empty set if the log doesn't exist yet.
    pub fn finished_repositories(&self) -> Result<HashSet<String>> {
        if !self.path.exists() {
            debug!("No output log at {}, starting fresh", self.path.display());
            return Ok(HashSet::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read output log {}", self.path.display()))?;
        let finished = parse_finished(&content);

        info!(
            "Loaded {} finished repositories from {}",
            finished.len(),
            self.path.display()
        );
        Ok(finished)
    }

    /// Append one repository's row, writing the header first if the log is new
    pub fn append(&self, stats: &RepoStatistics) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let len = fs::metadata(&self.path).map(|meta| meta.len()).unwrap_or(0);

        let mut lines = String::new();
        if len == 0 {
            lines.push_str(RepoStatistics::HEADER);
            lines.push('\n');
        } else if !self.ends_with_newline()? {
            // Last row was cut short; keep the new row on its own line
            warn!("Output log {} has an unterminated last line", self.path.display());
            lines.push('\n');
        }
        lines.push_str(&stats.to_string());
        lines.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open output log {}", self.path.display()))?;
        file.write_all(lines.as_bytes())
            .and_then(|_| file.flush())
            .with_context(|| format!("Failed to write output log {}", self.path.display()))?;

        debug!("Recorded statistics for {}", stats.repo);
        Ok(())
    }

    fn ends_with_newline(&self) -> Result<bool> {
        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open output log {}", self.path.display()))?;
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))
            .and_then(|_| file.read_exact(&mut last))
            .with_context(|| format!("Failed to read output log {}", self.path.display()))?;
        Ok(last[0] == b'\n')
    }
}

/// First column of every row below the header
fn parse_finished(content: &str) -> HashSet<String> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| line.split('\t').next())
        .map(str::trim)
        .filter(|repo| !repo.is_empty())
        .map(str::to_string)
        .collect()
}

/// Repositories still to be processed, in listing order
pub fn pending(all: &[String], finished: &HashSet<String>) -> Vec<String> {
    all.iter()
        .filter(|repo| !finished.contains(*repo))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stats(repo: &str, pulls: u64) -> RepoStatistics {
        RepoStatistics {
            repo: repo.to_string(),
            pull_count: pulls,
            commit_total: pulls * 2,
            addition_total: pulls * 10,
            deletion_total: pulls * 3,
        }
    }

    #[test]
    fn test_missing_log_has_no_finished_repositories() {
        let dir = TempDir::new().unwrap();
        let log = OutputLog::new(dir.path().join("stats.txt"));

        assert!(log.finished_repositories().unwrap().is_empty());
    }

    #[test]
    fn test_parse_finished_skips_header_and_blank_lines() {
        let content = "repo\t#pulls\t#commits\t#additions\t#deletions\n\
                       api\t1\t2\t3\t4\n\
                       \n\
                       web\t0\t0\t0\t0\n";

        let finished = parse_finished(content);

        assert_eq!(finished.len(), 2);
        assert!(finished.contains("api"));
        assert!(finished.contains("web"));
        assert!(!finished.contains("repo"));
    }

    #[test]
    fn test_parse_finished_handles_crlf() {
        let finished = parse_finished("repo\t#pulls\r\napi\t1\t2\t3\t4\r\n");
        assert_eq!(finished, HashSet::from(["api".to_string()]));
    }

    #[test]
    fn test_append_creates_directory_and_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("stats.txt");
        let log = OutputLog::new(&path);

        log.append(&stats("api", 1)).unwrap();
        log.append(&stats("web", 2)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "repo\t#pulls\t#commits\t#additions\t#deletions\n\
             api\t1\t2\t10\t3\n\
             web\t2\t4\t20\t6\n"
        );
    }

    #[test]
    fn test_append_keeps_existing_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.txt");
        let existing = format!("{}\nold\t5\t5\t5\t5\n", RepoStatistics::HEADER);
        fs::write(&path, &existing).unwrap();
        let log = OutputLog::new(&path);

        log.append(&stats("new", 1)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&existing));
        assert_eq!(content.matches(RepoStatistics::HEADER).count(), 1);
        assert!(content.ends_with("new\t1\t2\t10\t3\n"));
    }

    #[test]
    fn test_append_after_unterminated_last_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.txt");
        fs::write(&path, format!("{}\nA\t1\t1\t1\t1", RepoStatistics::HEADER)).unwrap();
        let log = OutputLog::new(&path);

        log.append(&stats("B", 1)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("{}\nA\t1\t1\t1\t1\nB\t1\t2\t10\t3\n", RepoStatistics::HEADER)
        );
        assert_eq!(
            log.finished_repositories().unwrap(),
            HashSet::from(["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn test_appended_rows_are_finished() {
        let dir = TempDir::new().unwrap();
        let log = OutputLog::new(dir.path().join("stats.txt"));

        log.append(&stats("api", 1)).unwrap();

        let finished = log.finished_repositories().unwrap();
        assert_eq!(finished, HashSet::from(["api".to_string()]));
    }

    #[test]
    fn test_pending_preserves_listing_order() {
        let all: Vec<String> = ["c", "a", "b", "d"].iter().map(|s| s.to_string()).collect();
        let finished = HashSet::from(["a".to_string(), "d".to_string()]);

        assert_eq!(pending(&all, &finished), vec!["c", "b"]);
    }
}
