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

//! Structured error types for result ingestion and report generation.
//!
//! Errors are split by blast radius:
//!
//! - [`AdaptError`]: one result file could not be turned into a record. The
//!   file is skipped and the batch continues.
//! - [`StatsError`]: a statistic was requested over no samples. Degrades one
//!   report section.
//! - [`ReportError`]: the whole run cannot proceed (missing directory, no
//!   results, summary not writable).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for driver-level operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Fatal errors for a report run.
#[derive(Error, Debug, Clone)]
pub enum ReportError {
    /// The results directory does not exist.
    #[error("Results directory '{path}' not found")]
    DirectoryNotFound {
        /// The directory that was requested
        path: PathBuf,
    },

    /// The results path exists but is not a directory.
    #[error("Results path '{path}' is not a directory")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// The scan finished without a single recognised result file.
    #[error("No benchmark results found in '{path}'")]
    NoResults {
        /// The scanned directory
        path: PathBuf,
    },

    /// Result files were recognised but none of them could be parsed.
    #[error("No benchmark results could be parsed in '{path}' ({failed} file(s) skipped)")]
    NothingParsed {
        /// The scanned directory
        path: PathBuf,
        /// Number of recognised files that failed to parse
        failed: usize,
    },

    /// The summary file name is not a plain file name.
    #[error("Invalid summary file name '{name}': expected a file name without directories")]
    InvalidSummaryFile {
        /// The rejected name
        name: String,
    },

    /// I/O operation failed while writing report artifacts.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Summary serialization failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },
}

impl ReportError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

/// Recoverable per-file ingestion failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdaptError {
    /// The file could not be read.
    #[error("Could not read '{path}': {message}")]
    Read {
        /// The file path
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// The file path
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// The file is not valid JSON.
    #[error("Could not parse '{path}': {message}")]
    MalformedJson {
        /// The file path
        path: PathBuf,
        /// The parser message
        message: String,
    },

    /// The JSON is valid but does not fit the schema its name announces.
    #[error("Unexpected shape in '{path}': {message}")]
    Schema {
        /// The file path
        path: PathBuf,
        /// What did not fit
        message: String,
    },
}

impl AdaptError {
    /// Create a read error with file path context.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Returns the path of the file that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            AdaptError::Read { path, .. }
            | AdaptError::FileTooLarge { path, .. }
            | AdaptError::MalformedJson { path, .. }
            | AdaptError::Schema { path, .. } => path,
        }
    }
}

/// Statistics contract violations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// `summarize` was called with no samples.
    #[error("cannot summarize {metric}: no samples")]
    EmptyInput {
        /// Name of the metric being summarized
        metric: &'static str,
    },
}
