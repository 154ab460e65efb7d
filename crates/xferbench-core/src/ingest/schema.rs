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

//! Known result-file shapes and the filename dispatch table.
//!
//! Every generation of the benchmark harness writes a JSON object; the
//! fields overlap but their types drifted (numbers written as strings,
//! durations as either a flat number or a `{mean, stdev, cv_percent}`
//! object). [`RawResult`] is the superset of all of them and accepts every
//! variant; coercion into the canonical model happens in the adapter.

use crate::model::SchemaKind;
use serde::Deserialize;
use serde_json::Value;

/// Reserved file carrying host information.
pub const SYSTEM_INFO_FILE: &str = "system_info.json";

/// Reserved `_stats.json` file carrying the measured network ceiling.
pub const NETWORK_CEILING_FILE: &str = "network_ceiling_stats.json";

/// What a file name announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A benchmark result of the given schema.
    Result(SchemaKind),
    /// Host information, side-loaded into report headers.
    SystemInfo,
    /// Network ceiling, side-loaded into report headers and the summary.
    NetworkCeiling,
    /// Not a benchmark file.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Exact(&'static str),
    Suffix(&'static str),
    Prefix(&'static str),
}

impl Pattern {
    fn matches(&self, file_name: &str) -> bool {
        match self {
            Pattern::Exact(name) => file_name == *name,
            Pattern::Suffix(suffix) => file_name.len() > suffix.len() && file_name.ends_with(suffix),
            Pattern::Prefix(prefix) => {
                file_name.starts_with(prefix)
                    && file_name.ends_with(".json")
                    && file_name.len() > prefix.len() + ".json".len()
            }
        }
    }
}

/// Dispatch table, first match wins.
const DISPATCH: &[(Pattern, FileKind)] = &[
    (Pattern::Exact(SYSTEM_INFO_FILE), FileKind::SystemInfo),
    (Pattern::Exact(NETWORK_CEILING_FILE), FileKind::NetworkCeiling),
    (Pattern::Suffix("_stats.json"), FileKind::Result(SchemaKind::SuiteStats)),
    (Pattern::Prefix("tool_"), FileKind::Result(SchemaKind::ToolComparison)),
    (Pattern::Prefix("parallel_"), FileKind::Result(SchemaKind::Parallel)),
    (Pattern::Prefix("resume_"), FileKind::Result(SchemaKind::Resume)),
];

/// Classifies a file by its name.
pub fn classify(file_name: &str) -> FileKind {
    DISPATCH
        .iter()
        .find(|(pattern, _)| pattern.matches(file_name))
        .map(|(_, kind)| *kind)
        .unwrap_or(FileKind::Ignored)
}

/// A number as written by some harness generation: a JSON number, a string,
/// or anything else (kept so it can be reported verbatim).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A JSON number.
    Number(f64),
    /// A JSON string.
    Text(String),
    /// Any other JSON value.
    Other(Value),
}

/// A boolean as written by some harness generation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    /// A JSON boolean.
    Bool(bool),
    /// A JSON number (non-zero is true).
    Number(f64),
    /// A JSON string (`true`, `yes`, `1`, ...).
    Text(String),
    /// Any other JSON value.
    Other(Value),
}

/// Nested duration statistics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDurationSummary {
    /// Mean seconds.
    pub mean: RawNumber,
    /// Standard deviation.
    #[serde(default)]
    pub stdev: Option<RawNumber>,
    /// Coefficient of variation (percent).
    #[serde(default)]
    pub cv_percent: Option<RawNumber>,
    /// Median seconds.
    #[serde(default)]
    pub median: Option<RawNumber>,
    /// Minimum seconds.
    #[serde(default)]
    pub min: Option<RawNumber>,
    /// Maximum seconds.
    #[serde(default)]
    pub max: Option<RawNumber>,
}

/// `duration_seconds` in either supported shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    /// `{mean, stdev, cv_percent}` object.
    Summary(RawDurationSummary),
    /// Flat seconds.
    Flat(RawNumber),
}

/// Superset of every known result-file shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawResult {
    /// Embedded benchmark name.
    pub benchmark: Option<String>,
    /// Resume test name.
    pub test: Option<String>,
    /// Data profile.
    pub profile: Option<String>,
    /// Data profile (older name).
    pub data_profile: Option<String>,
    /// Resume phase tag.
    pub phase: Option<String>,
    /// Parallelism level.
    pub parallelism: Option<RawNumber>,
    /// Duration, flat or nested.
    pub duration_seconds: Option<RawDuration>,
    /// Throughput in Mbps.
    pub throughput_mbps: Option<RawNumber>,
    /// Source bytes.
    pub src_bytes: Option<RawNumber>,
    /// File size (resume tests).
    pub file_size_bytes: Option<RawNumber>,
    /// Bytes transferred.
    pub bytes_transferred: Option<RawNumber>,
    /// Runs aggregated into the file.
    pub runs: Option<RawNumber>,
    /// Runs attempted.
    pub total_runs: Option<RawNumber>,
    /// Runs that passed validation.
    pub valid_runs: Option<RawNumber>,
    /// Parallel stream count.
    pub streams: Option<RawNumber>,
    /// All runs verified.
    pub all_verified: Option<RawFlag>,
    /// Single run verified.
    pub verified: Option<RawFlag>,
    /// Run succeeded.
    pub success: Option<RawFlag>,
    /// Process exit code.
    pub exit_code: Option<RawNumber>,
    /// Seconds before interruption.
    pub partial_duration_seconds: Option<RawNumber>,
    /// Seconds after restart.
    pub resume_duration_seconds: Option<RawNumber>,
    /// End-to-end seconds.
    pub total_duration_seconds: Option<RawNumber>,
}

/// `network_ceiling_stats.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawNetworkCeiling {
    /// Measured ceiling in Mbps.
    pub throughput_mbps: Option<RawNumber>,
    /// Measured ceiling in Mbps (alternate name).
    pub ceiling_mbps: Option<RawNumber>,
}
