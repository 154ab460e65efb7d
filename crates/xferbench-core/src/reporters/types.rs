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

//! Report types and structures.
//!
//! The [`Report`] is built once from the result store and holds every
//! figure a renderer prints. Renderers only format; they never recompute a
//! statistic or re-read a result file.

use crate::error::StatsError;
use crate::ingest::SystemInfo;
use crate::model::RunStatus;
use crate::stats::{Rank, Ratio, StatSummary};

/// A report section, or the statistics error that aborted it.
pub type Section<T> = std::result::Result<Vec<T>, StatsError>;

/// A metric as shown in one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    /// Summarized numeric samples.
    Summary(StatSummary),
    /// No numeric sample, but a file carried this text.
    Verbatim(String),
    /// Nothing recorded.
    Missing,
}

impl Reading {
    /// The summary, if the metric had numeric samples.
    pub fn summary(&self) -> Option<&StatSummary> {
        match self {
            Reading::Summary(s) => Some(s),
            _ => None,
        }
    }

    /// Median of the samples.
    pub fn median(&self) -> Option<f64> {
        self.summary().map(|s| s.median)
    }

    /// Returns `true` if there is a numeric summary.
    pub fn has_data(&self) -> bool {
        matches!(self, Reading::Summary(_))
    }
}

/// Scan totals shown in the report headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanTotals {
    /// JSON files seen.
    pub json_files: usize,
    /// Files matching a result naming convention.
    pub recognized: usize,
    /// Files that produced a record.
    pub parsed: usize,
    /// Recognised files that were skipped.
    pub skipped: usize,
    /// Distinct benchmark identities.
    pub groups: usize,
}

/// One row of a tool comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteRow {
    /// Identity key, e.g. `rsync_default`.
    pub name: String,
    /// Duration in seconds.
    pub duration: Reading,
    /// Median throughput in Mbps.
    pub throughput_mbps: Option<f64>,
    /// Runs behind the figures.
    pub runs: u32,
    /// Source bytes.
    pub bytes: Option<u64>,
    /// Combined verification status.
    pub status: RunStatus,
    /// Throughput relative to the first (fastest) row.
    pub speedup: Ratio,
    /// Placement against the fastest row.
    pub rank: Rank,
    /// Median throughput as a percentage of the network ceiling.
    pub ceiling_pct: Ratio,
}

/// Tool comparison for one data profile, fastest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteTable {
    /// Profile label.
    pub profile: String,
    /// Rows in ascending median duration; rows without data last.
    pub rows: Vec<SuiteRow>,
}

impl SuiteTable {
    /// Names of the rows ranked fastest.
    pub fn fastest(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.rank == Rank::Fastest)
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// One parallelism level of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelRow {
    /// Identity key, e.g. `rsync_p4`.
    pub name: String,
    /// Parallelism level.
    pub parallelism: Option<u32>,
    /// Duration in seconds.
    pub duration: Reading,
    /// Median throughput in Mbps.
    pub throughput_mbps: Option<f64>,
    /// Stream count.
    pub streams: Option<u32>,
    /// Runs behind the figures.
    pub runs: u32,
    /// Throughput relative to the lowest parallelism level.
    pub speedup: Ratio,
    /// `speedup / parallelism`, in percent.
    pub efficiency: Ratio,
}

/// Scaling of one tool family within one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelTable {
    /// Profile label.
    pub profile: String,
    /// Tool family, e.g. `rsync`.
    pub tool: String,
    /// Rows in ascending parallelism.
    pub rows: Vec<ParallelRow>,
}

/// One interrupted/resumed transfer test.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeRow {
    /// Identity key, e.g. `resume_rsync`.
    pub name: String,
    /// Profile label.
    pub profile: String,
    /// Time before the interruption.
    pub partial: Reading,
    /// Time after the restart.
    pub resume: Reading,
    /// End-to-end time.
    pub total: Reading,
    /// File size.
    pub bytes: Option<u64>,
    /// Extra time versus the uninterrupted run of the same tool, in percent.
    pub overhead: Ratio,
}

/// Fastest identity by median throughput.
#[derive(Debug, Clone, PartialEq)]
pub struct FastestEntry {
    /// Identity key.
    pub name: String,
    /// Profile label.
    pub profile: String,
    /// Median throughput in Mbps.
    pub throughput_mbps: f64,
}

/// Key findings for the closing summary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Findings {
    /// Distinct benchmark identities.
    pub total_benchmarks: usize,
    /// Runs across all identities.
    pub total_runs: u32,
    /// Highest median throughput.
    pub fastest: Option<FastestEntry>,
    /// Suite identities using compression.
    pub compression_variants: usize,
    /// Parallel identities.
    pub parallel_configs: usize,
}

/// Complete analysis of one results directory.
#[derive(Debug, Clone)]
pub struct Report {
    /// Report title.
    pub title: String,
    /// Generation time (RFC 3339).
    pub timestamp: String,
    /// Scan totals.
    pub totals: ScanTotals,
    /// Host information.
    pub system: Option<SystemInfo>,
    /// Network ceiling in Mbps.
    pub network_ceiling_mbps: Option<f64>,
    /// Tool comparison, one table per profile.
    pub suite: Section<SuiteTable>,
    /// Parallel scaling, one table per profile and tool family.
    pub parallel: Section<ParallelTable>,
    /// Resume tests in lexicographic order.
    pub resume: Section<ResumeRow>,
    /// Closing summary.
    pub findings: Findings,
}

impl Report {
    /// Creates an empty report stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            totals: ScanTotals::default(),
            system: None,
            network_ceiling_mbps: None,
            suite: Ok(Vec::new()),
            parallel: Ok(Vec::new()),
            resume: Ok(Vec::new()),
            findings: Findings::default(),
        }
    }

    /// Fastest rows per suite profile, as `(profile, names)`.
    pub fn fastest_by_profile(&self) -> Vec<(&str, Vec<&str>)> {
        match &self.suite {
            Ok(tables) => tables
                .iter()
                .map(|t| (t.profile.as_str(), t.fastest()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}
