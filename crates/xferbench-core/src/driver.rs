// Dweve XferBench - File Transfer Benchmark Reporting
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Report driver: load, group, analyze, render, export.

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::ingest::{load_results, LoadedResults};
use crate::reporters::{
    build_report, build_summary, export_summary, render_markdown, render_terminal, Report,
};
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Everything one report run produced.
#[derive(Debug)]
pub struct ReportOutput {
    /// Analyzed report.
    pub report: Report,
    /// Terminal rendering.
    pub terminal: String,
    /// Markdown rendering, unless disabled.
    pub markdown: Option<String>,
    /// Where `summary.json` was written, unless disabled.
    pub summary_path: Option<PathBuf>,
}

/// Fails on the two "nothing to report" conditions.
///
/// # Errors
///
/// [`ReportError::NoResults`] when no file matched a result naming
/// convention, [`ReportError::NothingParsed`] when some did but none parsed.
pub fn check_loaded(dir: &Path, loaded: &LoadedResults) -> Result<()> {
    if loaded.recognized == 0 {
        return Err(ReportError::NoResults {
            path: dir.to_path_buf(),
        });
    }
    if loaded.parsed() == 0 {
        return Err(ReportError::NothingParsed {
            path: dir.to_path_buf(),
            failed: loaded.failures.len(),
        });
    }
    Ok(())
}

/// Checks that the summary file name stays inside the results directory.
///
/// # Errors
///
/// [`ReportError::InvalidSummaryFile`] unless `name` is a single normal
/// path component.
pub fn check_summary_file(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ReportError::InvalidSummaryFile {
            name: name.to_string(),
        }),
    }
}

/// Runs the whole pipeline over a results directory.
///
/// Nothing is written when the run fails.
///
/// # Errors
///
/// An invalid summary file name (see [`check_summary_file`]),
/// directory-level problems from [`load_results`], the conditions of
/// [`check_loaded`], and failures writing the summary.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use xferbench_core::{run, ReportConfig};
///
/// let output = run(Path::new("results"), &ReportConfig::default())?;
/// print!("{}", output.terminal);
/// # Ok::<(), xferbench_core::ReportError>(())
/// ```
pub fn run(dir: &Path, config: &ReportConfig) -> Result<ReportOutput> {
    if config.write_summary {
        check_summary_file(&config.summary_file)?;
    }
    let loaded = load_results(dir, config)?;
    check_loaded(dir, &loaded)?;

    let report = build_report(&loaded, config);
    let terminal = render_terminal(&report);
    let markdown = config.markdown.then(|| render_markdown(&report));

    let summary_path = if config.write_summary {
        let path = dir.join(&config.summary_file);
        export_summary(&build_summary(&loaded.store, loaded.network_ceiling_mbps), &path)?;
        info!(path = %path.display(), "summary written");
        Some(path)
    } else {
        None
    };

    Ok(ReportOutput {
        report,
        terminal,
        markdown,
        summary_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_results_writes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();

        let err = run(dir.path(), &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::NoResults { .. }));
        assert!(!dir.path().join("summary.json").exists());
    }

    #[test]
    fn test_nothing_parsed_is_distinct() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tool_a.json"), "{oops").unwrap();
        fs::write(dir.path().join("tool_b.json"), "[1, 2]").unwrap();

        let err = run(dir.path(), &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ReportError::NothingParsed { failed: 2, .. }));
        assert!(!dir.path().join("summary.json").exists());
    }

    #[test]
    fn test_partial_failures_still_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tool_a.json"), "{oops").unwrap();
        fs::write(
            dir.path().join("tool_b.json"),
            r#"{"duration_seconds": 3.0, "throughput_mbps": 100}"#,
        )
        .unwrap();

        let output = run(dir.path(), &ReportConfig::default()).unwrap();
        assert_eq!(output.report.totals.skipped, 1);
        assert!(output.terminal.contains("b "));
        assert!(output.markdown.is_some());
        assert!(output.summary_path.unwrap().exists());
    }

    #[test]
    fn test_summary_file_name_checks() {
        assert!(check_summary_file("summary.json").is_ok());
        assert!(check_summary_file("bench-2025.json").is_ok());
        for bad in ["../x.json", "sub/summary.json", "/tmp/x.json", "..", ".", ""] {
            assert!(
                matches!(
                    check_summary_file(bad),
                    Err(ReportError::InvalidSummaryFile { .. })
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_summary_outside_dir_is_rejected() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("results");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("tool_b.json"), r#"{"duration_seconds": 3.0}"#).unwrap();

        let config = ReportConfig::default().with_summary_file("../escaped.json");
        let err = run(&dir, &config).unwrap_err();
        assert!(matches!(err, ReportError::InvalidSummaryFile { .. }));
        assert!(!root.path().join("escaped.json").exists());
    }

    #[test]
    fn test_outputs_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tool_b.json"), r#"{"duration_seconds": 3.0}"#).unwrap();

        let config = ReportConfig::default()
            .with_write_summary(false)
            .with_markdown(false);
        let output = run(dir.path(), &config).unwrap();
        assert!(output.markdown.is_none());
        assert!(output.summary_path.is_none());
        assert!(!dir.path().join("summary.json").exists());
    }
}
