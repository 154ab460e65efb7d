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

//! Report configuration.
//!
//! Holds the knobs for a report run: where the summary is written, whether
//! subdirectories are scanned, how close two durations must be to share the
//! "fastest" label, and the per-file size limit.

/// Default name of the machine-readable summary written into the results directory.
pub const DEFAULT_SUMMARY_FILE: &str = "summary.json";

/// Default tolerance (percent) within which two entries are both "fastest".
pub const DEFAULT_TIE_TOLERANCE_PCT: f64 = 1.0;

/// Default maximum result-file size (100 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Environment variable overriding the maximum result-file size (bytes).
pub const MAX_FILE_SIZE_ENV: &str = "XFERBENCH_MAX_FILE_SIZE";

/// Returns the maximum result-file size.
///
/// Reads [`MAX_FILE_SIZE_ENV`]; unset or unparsable values fall back to
/// [`DEFAULT_MAX_FILE_SIZE`].
pub fn max_file_size_from_env() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Configuration for one report run.
///
/// # Example
///
/// ```no_run
/// use xferbench_core::config::ReportConfig;
///
/// let config = ReportConfig::default()
///     .with_summary_file("bench-summary.json")
///     .with_tie_tolerance_pct(2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// File name of the summary written into the results directory.
    pub summary_file: String,
    /// Whether to write the summary at all.
    pub write_summary: bool,
    /// Whether to render the markdown report.
    pub markdown: bool,
    /// Whether subdirectories are scanned.
    pub recursive: bool,
    /// Tie tolerance for the "fastest" annotation, in percent.
    pub tie_tolerance_pct: f64,
    /// Files larger than this are skipped.
    pub max_file_size: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary_file: DEFAULT_SUMMARY_FILE.to_string(),
            write_summary: true,
            markdown: true,
            recursive: true,
            tie_tolerance_pct: DEFAULT_TIE_TOLERANCE_PCT,
            max_file_size: max_file_size_from_env(),
        }
    }
}

impl ReportConfig {
    /// Sets the summary file name.
    pub fn with_summary_file(mut self, name: impl Into<String>) -> Self {
        self.summary_file = name.into();
        self
    }

    /// Enables or disables writing the summary.
    pub fn with_write_summary(mut self, enabled: bool) -> Self {
        self.write_summary = enabled;
        self
    }

    /// Enables or disables the markdown report.
    pub fn with_markdown(mut self, enabled: bool) -> Self {
        self.markdown = enabled;
        self
    }

    /// Enables or disables recursive scanning.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the tie tolerance. Negative values are clamped to zero.
    pub fn with_tie_tolerance_pct(mut self, pct: f64) -> Self {
        self.tie_tolerance_pct = pct.max(0.0);
        self
    }

    /// Sets the maximum result-file size in bytes.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.summary_file, "summary.json");
        assert!(config.write_summary);
        assert!(config.markdown);
        assert!(config.recursive);
        assert_eq!(config.tie_tolerance_pct, 1.0);
    }

    #[test]
    fn test_builder() {
        let config = ReportConfig::default()
            .with_summary_file("out.json")
            .with_write_summary(false)
            .with_markdown(false)
            .with_recursive(false)
            .with_tie_tolerance_pct(-3.0)
            .with_max_file_size(1024);

        assert_eq!(config.summary_file, "out.json");
        assert!(!config.write_summary);
        assert!(!config.markdown);
        assert!(!config.recursive);
        assert_eq!(config.tie_tolerance_pct, 0.0);
        assert_eq!(config.max_file_size, 1024);
    }
}
