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

//! JSON summary export.
//!
//! `summary.json` is the only file the tool writes. Entries are sorted by
//! (profile, median duration, name) and field order is fixed, so identical
//! inputs give byte-identical output.

use crate::error::{ReportError, Result};
use crate::model::{Category, Metric};
use crate::stats::cmp_optional;
use crate::store::{ComparisonGroup, ResultStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One comparison group in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Identity key.
    pub name: String,
    /// Report category.
    pub category: String,
    /// Profile label.
    pub profile: String,
    /// Median duration in seconds (total duration for resume tests).
    pub median_s: Option<f64>,
    /// Standard deviation of the duration.
    pub stdev_s: Option<f64>,
    /// Coefficient of variation of the duration, in percent.
    pub cv_pct: Option<f64>,
    /// Median throughput in Mbps.
    pub throughput_mbps: Option<f64>,
    /// Source bytes.
    pub src_bytes: Option<u64>,
    /// Whether every run verified; `null` when unknown.
    pub verified: Option<bool>,
    /// Stream count.
    pub streams: Option<u32>,
    /// Parallelism level, for parallel runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<u32>,
    /// Runs behind the figures.
    pub runs: u32,
}

/// Contents of `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Network ceiling in Mbps.
    pub network_ceiling_mbps: Option<f64>,
    /// One entry per group.
    pub benchmarks: Vec<SummaryEntry>,
}

impl SummaryEntry {
    /// Builds the entry for one group from its cached statistics.
    pub fn from_group(group: &ComparisonGroup) -> Self {
        let identity = group.identity();
        let metric = match identity.category {
            Category::Resume => Metric::TotalDuration,
            _ => Metric::Duration,
        };
        let duration = group.summary(metric).ok();

        Self {
            name: group.name(),
            category: identity.category.as_str().to_string(),
            profile: identity.profile_label().to_string(),
            median_s: duration.map(|s| s.median),
            stdev_s: duration.map(|s| s.stdev),
            cv_pct: duration.map(|s| s.cv_percent),
            throughput_mbps: group.median(Metric::Throughput),
            src_bytes: group.bytes(),
            verified: group.status().as_bool(),
            streams: group.streams(),
            parallelism: identity.parallelism,
            runs: group.total_runs(),
        }
    }
}

/// Builds the summary for every group in the store.
pub fn build_summary(store: &ResultStore, network_ceiling_mbps: Option<f64>) -> Summary {
    let mut benchmarks: Vec<SummaryEntry> =
        store.all().iter().map(SummaryEntry::from_group).collect();

    benchmarks.sort_by(|a, b| {
        a.profile
            .cmp(&b.profile)
            .then_with(|| cmp_optional(a.median_s, b.median_s))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.category.cmp(&b.category))
    });

    Summary {
        network_ceiling_mbps,
        benchmarks,
    }
}

/// Writes the summary as pretty-printed JSON, replacing any existing file.
///
/// # Errors
///
/// [`ReportError::JsonFormat`] if serialization fails, [`ReportError::Io`]
/// if the file cannot be written.
pub fn export_summary(summary: &Summary, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(summary)?;
    json.push('\n');
    fs::write(path, json).map_err(|e| ReportError::io_error(path, e))
}

/// Reads a previously written summary.
///
/// # Errors
///
/// [`ReportError::Io`] or [`ReportError::JsonFormat`].
pub fn read_summary(path: &Path) -> Result<Summary> {
    let content = fs::read_to_string(path).map_err(|e| ReportError::io_error(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BenchmarkIdentity, RunRecord, RunStatus, SchemaKind};
    use tempfile::TempDir;

    fn store() -> ResultStore {
        let mut store = ResultStore::new();
        for (name, duration, profile) in [
            ("tar_plain", 20.0, None),
            ("rsync_default", 10.0, None),
            ("rsync_default", 12.0, Some("logs")),
        ] {
            let mut record = RunRecord::new("x_stats.json", SchemaKind::SuiteStats)
                .with_duration(duration)
                .with_throughput(8000.0 / duration);
            record.status = RunStatus::Success;
            store.add(
                BenchmarkIdentity::suite(name).with_profile(profile.map(String::from)),
                record,
            );
        }
        store.add(
            BenchmarkIdentity::parallel("rsync", 4),
            RunRecord::new("parallel_rsync_p4.json", SchemaKind::Parallel),
        );
        store
    }

    #[test]
    fn test_summary_order() {
        let summary = build_summary(&store(), Some(9400.0));
        let order: Vec<_> = summary
            .benchmarks
            .iter()
            .map(|e| (e.profile.as_str(), e.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("default", "rsync_default"),
                ("default", "tar_plain"),
                ("default", "rsync_p4"),
                ("logs", "rsync_default"),
            ]
        );
        assert_eq!(summary.benchmarks[0].verified, Some(true));
        assert_eq!(summary.benchmarks[2].median_s, None);
        assert_eq!(summary.benchmarks[2].parallelism, Some(4));
    }

    #[test]
    fn test_export_is_deterministic_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        fs::write(&path, "stale content that is longer than nothing").unwrap();

        let summary = build_summary(&store(), None);
        export_summary(&summary, &path).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        export_summary(&build_summary(&store(), None), &path).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.contains("\"network_ceiling_mbps\": null"));
        assert!(!first.contains("stale"));
        let reread = read_summary(&path).unwrap();
        let names: Vec<_> = reread.benchmarks.iter().map(|e| e.name.clone()).collect();
        let expected: Vec<_> = summary.benchmarks.iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_parallelism_omitted_for_suite_entries() {
        let summary = build_summary(&store(), None);
        let value = serde_json::to_value(&summary.benchmarks[0]).unwrap();
        assert!(value.get("parallelism").is_none());
        assert!(value.get("streams").unwrap().is_null());
    }
}
