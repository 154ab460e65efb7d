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

//! Result store: groups run records by benchmark identity.
//!
//! The store is write-once per process: records are added during ingestion
//! and never removed. Group statistics are computed lazily on first access
//! and always from the full record list; adding a record drops the cache.

use crate::error::StatsError;
use crate::model::{BenchmarkIdentity, Category, DurationReading, Metric, RunRecord, RunStatus};
use crate::stats::{summarize_named, StatSummary};
use std::cell::OnceCell;
use std::collections::HashMap;

/// All runs sharing one identity, plus their statistics.
#[derive(Debug, Clone)]
pub struct ComparisonGroup {
    identity: BenchmarkIdentity,
    records: Vec<RunRecord>,
    summaries: [OnceCell<Result<StatSummary, StatsError>>; Metric::COUNT],
}

impl ComparisonGroup {
    fn new(identity: BenchmarkIdentity) -> Self {
        Self {
            identity,
            records: Vec::new(),
            summaries: Default::default(),
        }
    }

    fn push(&mut self, record: RunRecord) {
        self.records.push(record);
        self.summaries = Default::default();
    }

    /// The group's identity.
    pub fn identity(&self) -> &BenchmarkIdentity {
        &self.identity
    }

    /// Display key of the identity.
    pub fn name(&self) -> String {
        self.identity.key()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Number of records (files) in the group.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the group has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total runs across records; a record without a run count counts once.
    /// Saturates at `u32::MAX`.
    pub fn total_runs(&self) -> u32 {
        self.records
            .iter()
            .map(RunRecord::run_count)
            .fold(0, u32::saturating_add)
    }

    /// Numeric samples for a metric, one per record that has one.
    pub fn samples(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.metric(metric)).collect()
    }

    /// Returns `true` if at least one record has a numeric sample for the metric.
    pub fn has_samples(&self, metric: Metric) -> bool {
        self.records.iter().any(|r| r.metric(metric).is_some())
    }

    /// Summary of a metric over the group.
    ///
    /// A group made of a single file that carries its own duration statistics
    /// keeps those statistics instead of collapsing to one sample.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptyInput`] if no record has a sample for the metric.
    pub fn summary(&self, metric: Metric) -> Result<StatSummary, StatsError> {
        *self.summaries[metric.index()].get_or_init(|| self.compute(metric))
    }

    /// Median of a metric, if it can be summarized.
    pub fn median(&self, metric: Metric) -> Option<f64> {
        self.summary(metric).ok().map(|s| s.median)
    }

    fn compute(&self, metric: Metric) -> Result<StatSummary, StatsError> {
        if metric == Metric::Duration {
            if let [record] = self.records.as_slice() {
                if let Some(DurationReading::Summary(reported)) = &record.duration {
                    return Ok(StatSummary::from_reported(reported, record.run_count()));
                }
            }
        }
        summarize_named(metric.as_str(), &self.samples(metric))
    }

    /// Largest byte count reported by any record.
    pub fn bytes(&self) -> Option<u64> {
        self.records.iter().filter_map(|r| r.bytes).max()
    }

    /// Largest stream count reported by any record.
    pub fn streams(&self) -> Option<u32> {
        self.records.iter().filter_map(|r| r.streams).max()
    }

    /// Combined status of all records.
    pub fn status(&self) -> RunStatus {
        RunStatus::combine(self.records.iter().map(|r| r.status))
    }

    /// First non-numeric value of a metric, for groups with no usable samples.
    pub fn verbatim(&self, metric: Metric) -> Option<&str> {
        self.records.iter().find_map(|r| r.verbatim(metric))
    }
}

/// In-memory mapping from identity to comparison group.
#[derive(Debug, Default)]
pub struct ResultStore {
    index: HashMap<BenchmarkIdentity, usize>,
    groups: Vec<ComparisonGroup>,
}

impl ResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to the group for `identity`, creating the group if needed.
    pub fn add(&mut self, identity: BenchmarkIdentity, record: RunRecord) {
        let slot = match self.index.get(&identity) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.index.insert(identity.clone(), slot);
                self.groups.push(ComparisonGroup::new(identity));
                slot
            }
        };
        self.groups[slot].push(record);
    }

    /// Looks up a group by identity.
    pub fn get(&self, identity: &BenchmarkIdentity) -> Option<&ComparisonGroup> {
        self.index.get(identity).map(|&slot| &self.groups[slot])
    }

    /// All groups in first-seen order.
    pub fn all(&self) -> &[ComparisonGroup] {
        &self.groups
    }

    /// Groups satisfying a predicate, in first-seen order.
    pub fn groups_matching<F>(&self, predicate: F) -> Vec<&ComparisonGroup>
    where
        F: Fn(&ComparisonGroup) -> bool,
    {
        self.groups.iter().filter(|&g| predicate(g)).collect()
    }

    /// Groups of one report category.
    pub fn category(&self, category: Category) -> Vec<&ComparisonGroup> {
        self.groups_matching(|g| g.identity.category == category)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no record was added.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(ComparisonGroup::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Numeric, ReportedSummary, SchemaKind};

    fn suite_record(path: &str, duration: f64) -> RunRecord {
        RunRecord::new(path, SchemaKind::SuiteStats).with_duration(duration)
    }

    #[test]
    fn test_add_groups_by_identity() {
        let mut store = ResultStore::new();
        store.add(BenchmarkIdentity::suite("rsync_default"), suite_record("a", 10.0));
        store.add(BenchmarkIdentity::suite("tar_zstd"), suite_record("b", 8.0));
        store.add(BenchmarkIdentity::suite("rsync_default"), suite_record("c", 10.2));

        assert_eq!(store.len(), 2);
        assert_eq!(store.record_count(), 3);
        let group = store.get(&BenchmarkIdentity::suite("rsync_default")).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.records()[0].source.to_str(), Some("a"));
    }

    #[test]
    fn test_groups_matching() {
        let mut store = ResultStore::new();
        store.add(BenchmarkIdentity::resume("rsync"), suite_record("a", 1.0));
        store.add(BenchmarkIdentity::suite("rsync_default"), suite_record("b", 1.0));
        store.add(BenchmarkIdentity::parallel("rsync", 2), suite_record("c", 1.0));

        let resumes = store.groups_matching(|g| g.name().starts_with("resume_"));
        assert_eq!(resumes.len(), 1);
        assert_eq!(store.category(Category::Parallel).len(), 1);
        assert_eq!(store.all().len(), 3);
    }

    #[test]
    fn test_summary_recomputed_after_add() {
        let mut store = ResultStore::new();
        let id = BenchmarkIdentity::suite("rsync_default");
        store.add(id.clone(), suite_record("a", 10.0));
        assert_eq!(store.get(&id).unwrap().summary(Metric::Duration).unwrap().mean, 10.0);

        store.add(id.clone(), suite_record("b", 20.0));
        let summary = store.get(&id).unwrap().summary(Metric::Duration).unwrap();
        assert_eq!(summary.mean, 15.0);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_empty_metric_is_error() {
        let mut store = ResultStore::new();
        let id = BenchmarkIdentity::suite("x");
        store.add(id.clone(), suite_record("a", 1.0));
        let group = store.get(&id).unwrap();
        assert!(matches!(
            group.summary(Metric::Throughput),
            Err(StatsError::EmptyInput { .. })
        ));
        assert!(!group.has_samples(Metric::Throughput));
    }

    #[test]
    fn test_single_reported_summary_is_kept() {
        let mut record = RunRecord::new("a", SchemaKind::SuiteStats);
        record.duration = Some(DurationReading::Summary(ReportedSummary {
            mean: 30.0,
            stdev: Some(1.5),
            cv_percent: Some(5.0),
            median: None,
            min: None,
            max: None,
        }));
        record.runs = Some(3);

        let mut store = ResultStore::new();
        let id = BenchmarkIdentity::suite("rsync_checksum");
        store.add(id.clone(), record);
        let summary = store.get(&id).unwrap().summary(Metric::Duration).unwrap();
        assert_eq!(summary.stdev, 1.5);
        assert_eq!(summary.cv_percent, 5.0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_total_runs_saturates() {
        let mut huge = suite_record("rsync_default_stats.json", 10.0);
        huge.runs = Some(u32::MAX);
        let mut small = suite_record("tool_rsync_default.json", 10.0);
        small.runs = Some(2);

        let mut store = ResultStore::new();
        let id = BenchmarkIdentity::suite("rsync_default");
        store.add(id.clone(), huge);
        store.add(id.clone(), small);
        assert_eq!(store.get(&id).unwrap().total_runs(), u32::MAX);
    }

    #[test]
    fn test_verbatim_duration() {
        let mut record = RunRecord::new("a", SchemaKind::Parallel);
        record.duration = Some(DurationReading::Flat(Numeric::Verbatim("n/a".into())));
        let mut store = ResultStore::new();
        let id = BenchmarkIdentity::parallel("rsync", 8);
        store.add(id.clone(), record);
        let group = store.get(&id).unwrap();
        assert_eq!(group.verbatim(Metric::Duration), Some("n/a"));
        assert!(group.summary(Metric::Duration).is_err());
    }
}
