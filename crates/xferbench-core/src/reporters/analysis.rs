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

//! Builds the [`Report`] from a loaded result store.
//!
//! Each section is computed once here. A statistics error inside a section
//! aborts that section only; the other sections are still built.

use crate::config::ReportConfig;
use crate::error::StatsError;
use crate::ingest::LoadedResults;
use crate::model::identity::DEFAULT_PROFILE;
use crate::model::{BenchmarkIdentity, Category, Metric};
use crate::reporters::types::{
    FastestEntry, Findings, ParallelRow, ParallelTable, Reading, Report, ResumeRow, ScanTotals,
    Section, SuiteRow, SuiteTable,
};
use crate::stats::{
    cmp_optional, parallel_efficiency, rank_by_duration, relative_speedups, resume_overhead,
    Rank, Ratio, SamplePoint,
};
use crate::store::{ComparisonGroup, ResultStore};
use std::collections::BTreeMap;
use tracing::warn;

/// Title used for every generated report.
pub const REPORT_TITLE: &str = "File Transfer Benchmark Results";

/// Name fragments that mark a compression variant.
const COMPRESSION_MARKERS: [&str; 3] = ["compress", "gzip", "zstd"];

/// Analyzes loaded results into a report.
pub fn build_report(loaded: &LoadedResults, config: &ReportConfig) -> Report {
    let store = &loaded.store;
    let ceiling = loaded.network_ceiling_mbps;

    let mut report = Report::new(REPORT_TITLE);
    report.totals = ScanTotals {
        json_files: loaded.json_files,
        recognized: loaded.recognized,
        parsed: loaded.parsed(),
        skipped: loaded.failures.len(),
        groups: store.len(),
    };
    report.system = loaded.system.clone();
    report.network_ceiling_mbps = ceiling;
    report.suite = logged("suite", suite_section(store, ceiling, config.tie_tolerance_pct));
    report.parallel = logged("parallel", parallel_section(store));
    report.resume = logged("resume", resume_section(store));
    report.findings = findings(store);
    report
}

fn logged<T>(section: &str, result: Section<T>) -> Section<T> {
    if let Err(e) = &result {
        warn!(section, error = %e, "section aborted");
    }
    result
}

/// Reads one metric of a group for display.
///
/// Only summarizes when the group has samples; a group without any yields
/// the file's verbatim text or [`Reading::Missing`].
pub fn reading(group: &ComparisonGroup, metric: Metric) -> Result<Reading, StatsError> {
    if group.has_samples(metric) {
        return group.summary(metric).map(Reading::Summary);
    }
    Ok(match group.verbatim(metric) {
        Some(text) => Reading::Verbatim(text.to_string()),
        None => Reading::Missing,
    })
}

/// Groups by profile, profile-less groups first.
fn by_profile<'a>(
    groups: Vec<&'a ComparisonGroup>,
) -> BTreeMap<Option<String>, Vec<&'a ComparisonGroup>> {
    let mut profiles: BTreeMap<Option<String>, Vec<&ComparisonGroup>> = BTreeMap::new();
    for group in groups {
        profiles
            .entry(group.identity().profile.clone())
            .or_default()
            .push(group);
    }
    profiles
}

fn profile_label(profile: &Option<String>) -> String {
    profile.as_deref().unwrap_or(DEFAULT_PROFILE).to_string()
}

/// Tool comparison tables, one per profile, fastest first.
pub fn suite_section(
    store: &ResultStore,
    ceiling_mbps: Option<f64>,
    tie_tolerance_pct: f64,
) -> Section<SuiteTable> {
    let mut tables = Vec::new();

    for (profile, groups) in by_profile(store.category(Category::Suite)) {
        let mut rows = groups
            .into_iter()
            .map(|group| -> Result<SuiteRow, StatsError> {
                let duration = reading(group, Metric::Duration)?;
                let throughput_mbps = reading(group, Metric::Throughput)?.median();
                Ok(SuiteRow {
                    name: group.name(),
                    duration,
                    throughput_mbps,
                    runs: group.total_runs(),
                    bytes: group.bytes(),
                    status: group.status(),
                    speedup: Ratio::NotApplicable,
                    rank: Rank::Unranked,
                    ceiling_pct: percent_of(throughput_mbps, ceiling_mbps),
                })
            })
            .collect::<Result<Vec<_>, StatsError>>()?;

        rows.sort_by(|a, b| {
            cmp_optional(a.duration.median(), b.duration.median()).then_with(|| a.name.cmp(&b.name))
        });

        let points: Vec<SamplePoint> = rows
            .iter()
            .map(|r| SamplePoint {
                duration: r.duration.median(),
                throughput: r.throughput_mbps,
            })
            .collect();
        let durations: Vec<Option<f64>> = points.iter().map(|p| p.duration).collect();
        let speedups = relative_speedups(&points);
        let ranks = rank_by_duration(&durations, tie_tolerance_pct);

        for ((row, speedup), rank) in rows.iter_mut().zip(speedups).zip(ranks) {
            row.speedup = speedup;
            row.rank = rank;
        }

        tables.push(SuiteTable {
            profile: profile_label(&profile),
            rows,
        });
    }

    Ok(tables)
}

fn percent_of(value: Option<f64>, whole: Option<f64>) -> Ratio {
    match Ratio::divide(value, whole) {
        Ratio::Value(r) => Ratio::Value(r * 100.0),
        Ratio::NotApplicable => Ratio::NotApplicable,
    }
}

/// Scaling tables, one per (profile, tool family), lowest parallelism first.
pub fn parallel_section(store: &ResultStore) -> Section<ParallelTable> {
    let mut families: BTreeMap<(Option<String>, String), Vec<&ComparisonGroup>> = BTreeMap::new();
    for group in store.category(Category::Parallel) {
        let identity = group.identity();
        families
            .entry((identity.profile.clone(), identity.name.clone()))
            .or_default()
            .push(group);
    }

    let mut tables = Vec::new();
    for ((profile, tool), mut groups) in families {
        groups.sort_by(|a, b| {
            let (pa, pb) = (a.identity().parallelism, b.identity().parallelism);
            cmp_optional(pa.map(f64::from), pb.map(f64::from))
                .then_with(|| a.identity().cmp(b.identity()))
        });

        let mut rows = groups
            .into_iter()
            .map(|group| -> Result<ParallelRow, StatsError> {
                Ok(ParallelRow {
                    name: group.name(),
                    parallelism: group.identity().parallelism,
                    duration: reading(group, Metric::Duration)?,
                    throughput_mbps: reading(group, Metric::Throughput)?.median(),
                    streams: group.streams(),
                    runs: group.total_runs(),
                    speedup: Ratio::NotApplicable,
                    efficiency: Ratio::NotApplicable,
                })
            })
            .collect::<Result<Vec<_>, StatsError>>()?;

        let points: Vec<SamplePoint> = rows
            .iter()
            .map(|r| SamplePoint {
                duration: r.duration.median(),
                throughput: r.throughput_mbps,
            })
            .collect();

        for (row, speedup) in rows.iter_mut().zip(relative_speedups(&points)) {
            row.speedup = speedup;
            row.efficiency = match row.parallelism {
                Some(p) => parallel_efficiency(speedup, p),
                None => Ratio::NotApplicable,
            };
        }

        tables.push(ParallelTable {
            profile: profile_label(&profile),
            tool,
            rows,
        });
    }

    Ok(tables)
}

/// Resume tests in lexicographic order of test name.
pub fn resume_section(store: &ResultStore) -> Section<ResumeRow> {
    let mut groups = store.category(Category::Resume);
    groups.sort_by(|a, b| a.identity().cmp(b.identity()));

    groups
        .into_iter()
        .map(|group| -> Result<ResumeRow, StatsError> {
            let identity = group.identity();
            let total = reading(group, Metric::TotalDuration)?;
            let uninterrupted =
                BenchmarkIdentity::suite(identity.name.clone()).with_profile(identity.profile.clone());
            let reference = store
                .get(&uninterrupted)
                .and_then(|g| g.median(Metric::Duration));

            Ok(ResumeRow {
                name: group.name(),
                profile: profile_label(&identity.profile),
                partial: reading(group, Metric::PartialDuration)?,
                resume: reading(group, Metric::ResumeDuration)?,
                overhead: resume_overhead(total.median(), reference),
                total,
                bytes: group.bytes(),
            })
        })
        .collect()
}

/// Closing summary over every group.
pub fn findings(store: &ResultStore) -> Findings {
    let fastest = store
        .all()
        .iter()
        .filter_map(|g| g.median(Metric::Throughput).map(|t| (g, t)))
        .fold(None::<(&ComparisonGroup, f64)>, |best, (g, t)| match best {
            Some((_, bt)) if bt >= t => best,
            _ => Some((g, t)),
        })
        .map(|(g, t)| FastestEntry {
            name: g.name(),
            profile: g.identity().profile_label().to_string(),
            throughput_mbps: t,
        });

    let compression_variants = store
        .category(Category::Suite)
        .iter()
        .filter(|g| {
            let name = g.identity().name.to_ascii_lowercase();
            COMPRESSION_MARKERS.iter().any(|m| name.contains(m))
        })
        .count();

    Findings {
        total_benchmarks: store.len(),
        total_runs: store
            .all()
            .iter()
            .map(ComparisonGroup::total_runs)
            .fold(0, u32::saturating_add),
        fastest,
        compression_variants,
        parallel_configs: store.category(Category::Parallel).len(),
    }
}
