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

//! Canonical run records.
//!
//! A [`RunRecord`] is one observed execution, built once by the schema
//! adapter and only ever handed out by shared reference afterwards. Every
//! optional field has a fixed absence policy:
//!
//! | Field            | Absent means                                         |
//! |------------------|------------------------------------------------------|
//! | `duration`       | no duration sample; group may render "no data"       |
//! | `throughput_mbps`| ratios involving this run are N/A                    |
//! | `bytes`          | size columns show `-`                                |
//! | `status`         | [`RunStatus::Unknown`]                               |
//! | `runs`           | treated as one run                                   |
//! | `streams`        | column shows `-`, summary writes `null`              |
//! | `phases`         | resume columns show `-`, overhead is N/A             |

use std::path::PathBuf;

/// Which file schema a record was read from. Resolved once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// `*_stats.json` suite output.
    SuiteStats,
    /// `tool_*.json` tool-comparison output.
    ToolComparison,
    /// `parallel_*.json` output.
    Parallel,
    /// `resume_*.json` output.
    Resume,
}

impl SchemaKind {
    /// Returns the schema name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::SuiteStats => "suite",
            SchemaKind::ToolComparison => "tool",
            SchemaKind::Parallel => "parallel",
            SchemaKind::Resume => "resume",
        }
    }
}

/// A numeric field as found in a result file.
///
/// Numbers and numeric-looking strings become [`Numeric::Value`]; anything
/// else is kept verbatim so renderers can show it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    /// A usable number.
    Value(f64),
    /// A value that could not be coerced.
    Verbatim(String),
}

impl Numeric {
    /// Returns the number, if there is one.
    pub fn value(&self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(*v),
            Numeric::Verbatim(_) => None,
        }
    }
}

/// Duration statistics reported by the benchmark harness itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedSummary {
    /// Mean duration in seconds.
    pub mean: f64,
    /// Standard deviation, if reported.
    pub stdev: Option<f64>,
    /// Coefficient of variation in percent, if reported.
    pub cv_percent: Option<f64>,
    /// Median, if reported.
    pub median: Option<f64>,
    /// Minimum, if reported.
    pub min: Option<f64>,
    /// Maximum, if reported.
    pub max: Option<f64>,
}

/// A duration in one of the two supported shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationReading {
    /// A flat number of seconds.
    Flat(Numeric),
    /// A `{mean, stdev, cv_percent}` object.
    Summary(ReportedSummary),
}

impl DurationReading {
    /// Representative duration: the flat value, or the reported mean.
    pub fn point(&self) -> Option<f64> {
        match self {
            DurationReading::Flat(n) => n.value(),
            DurationReading::Summary(s) => Some(s.mean),
        }
    }

    /// The raw text of a non-numeric flat value.
    pub fn verbatim(&self) -> Option<&str> {
        match self {
            DurationReading::Flat(Numeric::Verbatim(s)) => Some(s),
            _ => None,
        }
    }
}

/// Exit/verification outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The run succeeded and, where checked, verified.
    Success,
    /// The run failed or verification failed.
    Failure,
    /// The file did not say.
    Unknown,
}

impl RunStatus {
    /// Maps to the summary's `verified` flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RunStatus::Success => Some(true),
            RunStatus::Failure => Some(false),
            RunStatus::Unknown => None,
        }
    }

    /// Combines the statuses of several runs: any failure wins, then any unknown.
    pub fn combine(statuses: impl IntoIterator<Item = RunStatus>) -> RunStatus {
        let mut combined = None;
        for status in statuses {
            combined = Some(match (combined, status) {
                (_, RunStatus::Failure) | (Some(RunStatus::Failure), _) => RunStatus::Failure,
                (_, RunStatus::Unknown) | (Some(RunStatus::Unknown), _) => RunStatus::Unknown,
                _ => RunStatus::Success,
            });
        }
        combined.unwrap_or(RunStatus::Unknown)
    }
}

/// Sub-durations of an interrupted/resumed transfer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseDurations {
    /// Time spent before the interruption.
    pub partial: Option<Numeric>,
    /// Time spent finishing after the restart.
    pub resume: Option<Numeric>,
    /// End-to-end time, if reported.
    pub total: Option<Numeric>,
}

impl PhaseDurations {
    /// Total time: the reported total, else partial + resume when both are numbers.
    pub fn total_seconds(&self) -> Option<f64> {
        if let Some(total) = self.total.as_ref().and_then(Numeric::value) {
            return Some(total);
        }
        let partial = self.partial.as_ref().and_then(Numeric::value)?;
        let resume = self.resume.as_ref().and_then(Numeric::value)?;
        Some(partial + resume)
    }
}

/// A metric tracked per comparison group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Transfer duration (seconds).
    Duration,
    /// Throughput (Mbps).
    Throughput,
    /// Duration before interruption (seconds).
    PartialDuration,
    /// Duration after restart (seconds).
    ResumeDuration,
    /// End-to-end duration of an interrupted transfer (seconds).
    TotalDuration,
}

impl Metric {
    /// Number of tracked metrics.
    pub const COUNT: usize = 5;

    /// Returns the metric name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Duration => "duration",
            Metric::Throughput => "throughput",
            Metric::PartialDuration => "partial duration",
            Metric::ResumeDuration => "resume duration",
            Metric::TotalDuration => "total duration",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Metric::Duration => 0,
            Metric::Throughput => 1,
            Metric::PartialDuration => 2,
            Metric::ResumeDuration => 3,
            Metric::TotalDuration => 4,
        }
    }
}

/// One observed execution, normalized from any supported file schema.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// File the record was read from.
    pub source: PathBuf,
    /// Schema the file matched.
    pub schema: SchemaKind,
    /// Transfer duration.
    pub duration: Option<DurationReading>,
    /// Throughput in Mbps, reported or derived.
    pub throughput_mbps: Option<Numeric>,
    /// Whether the throughput was derived from bytes and duration.
    pub throughput_derived: bool,
    /// Bytes transferred (source size).
    pub bytes: Option<u64>,
    /// Exit/verification status.
    pub status: RunStatus,
    /// Number of runs the file aggregates.
    pub runs: Option<u32>,
    /// Number of runs the harness considered valid.
    pub valid_runs: Option<u32>,
    /// Parallel stream count.
    pub streams: Option<u32>,
    /// Resume sub-durations.
    pub phases: Option<PhaseDurations>,
}

impl RunRecord {
    /// Creates a record with only its origin set.
    pub fn new(source: impl Into<PathBuf>, schema: SchemaKind) -> Self {
        Self {
            source: source.into(),
            schema,
            duration: None,
            throughput_mbps: None,
            throughput_derived: false,
            bytes: None,
            status: RunStatus::Unknown,
            runs: None,
            valid_runs: None,
            streams: None,
            phases: None,
        }
    }

    /// Sets a flat duration in seconds.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(DurationReading::Flat(Numeric::Value(seconds)));
        self
    }

    /// Sets the throughput in Mbps.
    pub fn with_throughput(mut self, mbps: f64) -> Self {
        self.throughput_mbps = Some(Numeric::Value(mbps));
        self
    }

    /// Numeric sample for a metric, if this record has one.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        let phases = self.phases.as_ref();
        match metric {
            Metric::Duration => self.duration.as_ref().and_then(DurationReading::point),
            Metric::Throughput => self.throughput_mbps.as_ref().and_then(Numeric::value),
            Metric::PartialDuration => phases
                .and_then(|p| p.partial.as_ref())
                .and_then(Numeric::value),
            Metric::ResumeDuration => phases
                .and_then(|p| p.resume.as_ref())
                .and_then(Numeric::value),
            Metric::TotalDuration => phases.and_then(PhaseDurations::total_seconds),
        }
    }

    /// Raw text of a non-numeric value for a metric.
    pub fn verbatim(&self, metric: Metric) -> Option<&str> {
        let field = match metric {
            Metric::Duration => {
                return self.duration.as_ref().and_then(DurationReading::verbatim);
            }
            Metric::Throughput => self.throughput_mbps.as_ref(),
            Metric::PartialDuration => self.phases.as_ref().and_then(|p| p.partial.as_ref()),
            Metric::ResumeDuration => self.phases.as_ref().and_then(|p| p.resume.as_ref()),
            Metric::TotalDuration => self.phases.as_ref().and_then(|p| p.total.as_ref()),
        };
        match field {
            Some(Numeric::Verbatim(s)) => Some(s),
            _ => None,
        }
    }

    /// Number of runs this record stands for (at least one).
    pub fn run_count(&self) -> u32 {
        self.runs.unwrap_or(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_point() {
        let flat = DurationReading::Flat(Numeric::Value(3.5));
        assert_eq!(flat.point(), Some(3.5));

        let nested = DurationReading::Summary(ReportedSummary {
            mean: 10.0,
            stdev: Some(0.2),
            cv_percent: Some(2.0),
            median: None,
            min: None,
            max: None,
        });
        assert_eq!(nested.point(), Some(10.0));

        let text = DurationReading::Flat(Numeric::Verbatim("timeout".into()));
        assert_eq!(text.point(), None);
        assert_eq!(text.verbatim(), Some("timeout"));
    }

    #[test]
    fn test_status_combine() {
        use RunStatus::*;
        assert_eq!(RunStatus::combine([Success, Success]), Success);
        assert_eq!(RunStatus::combine([Success, Unknown]), Unknown);
        assert_eq!(RunStatus::combine([Unknown, Failure, Success]), Failure);
        assert_eq!(RunStatus::combine([]), Unknown);
    }

    #[test]
    fn test_total_falls_back_to_sum() {
        let phases = PhaseDurations {
            partial: Some(Numeric::Value(4.0)),
            resume: Some(Numeric::Value(6.5)),
            total: None,
        };
        assert_eq!(phases.total_seconds(), Some(10.5));

        let reported = PhaseDurations {
            total: Some(Numeric::Value(11.0)),
            ..phases
        };
        assert_eq!(reported.total_seconds(), Some(11.0));
    }

    #[test]
    fn test_metric_lookup() {
        let record = RunRecord::new("r/x_stats.json", SchemaKind::SuiteStats)
            .with_duration(12.0)
            .with_throughput(640.0);
        assert_eq!(record.metric(Metric::Duration), Some(12.0));
        assert_eq!(record.metric(Metric::Throughput), Some(640.0));
        assert_eq!(record.metric(Metric::TotalDuration), None);
        assert_eq!(record.run_count(), 1);
    }
}
