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

//! Console reporter for benchmark results.
//!
//! Renders a [`Report`] as fixed-width text, one section per benchmark
//! category. A category without groups prints a single "No ... results
//! found." line instead of an empty table.

use crate::reporters::types::{
    ParallelTable, Reading, Report, ResumeRow, Section, SuiteRow, SuiteTable,
};
use crate::stats::Rank;
use crate::units::{
    format_duration, format_overhead, format_percent, format_speedup, opt_bytes,
    opt_throughput, MISSING,
};

const WIDTH: usize = 100;

/// Renders the full terminal report.
pub fn render_terminal(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out.push_str(&format!("{}\n", report.title.to_uppercase()));
    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out.push_str(&format!("Generated: {}\n", report.timestamp));

    let totals = &report.totals;
    out.push_str(&format!(
        "Files: {} JSON, {} recognized, {} parsed, {} skipped\n",
        totals.json_files, totals.recognized, totals.parsed, totals.skipped
    ));
    out.push_str(&format!("Benchmarks: {} unique\n", totals.groups));
    if let Some(ceiling) = report.network_ceiling_mbps {
        out.push_str(&format!("Network ceiling: {}\n", opt_throughput(Some(ceiling))));
    }

    section_header(&mut out, "BENCHMARK SUITE RESULTS");
    render_section(&mut out, &report.suite, "suite", |out, tables| {
        for table in tables {
            suite_table(out, table);
        }
    });

    section_header(&mut out, "PARALLEL TRANSFER RESULTS");
    render_section(&mut out, &report.parallel, "parallel", |out, tables| {
        for table in tables {
            parallel_table(out, table);
        }
    });

    section_header(&mut out, "RESUME/PARTIAL TRANSFER RESULTS");
    render_section(&mut out, &report.resume, "resume", resume_table);

    out.push_str(&format!("\n{}\n", "=".repeat(WIDTH)));
    out
}

fn section_header(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n", "-".repeat(WIDTH)));
    out.push_str(&format!("{}\n", title));
    out.push_str(&format!("{}\n", "-".repeat(WIDTH)));
}

fn render_section<T>(
    out: &mut String,
    section: &Section<T>,
    category: &str,
    render: impl FnOnce(&mut String, &[T]),
) {
    match section {
        Ok(items) if items.is_empty() => {
            out.push_str(&format!("No {} results found.\n", category));
        }
        Ok(items) => render(out, items),
        Err(e) => {
            out.push_str(&format!("ERROR: {} section unavailable: {}\n", category, e));
        }
    }
}

/// Mean, or the placeholder for a group without numeric samples.
fn mean_cell(reading: &Reading) -> String {
    match reading {
        Reading::Summary(s) => format_duration(s.mean),
        Reading::Verbatim(text) => text.clone(),
        Reading::Missing => "no data".to_string(),
    }
}

fn median_cell(reading: &Reading) -> String {
    match reading {
        Reading::Summary(s) => format_duration(s.median),
        Reading::Verbatim(text) => text.clone(),
        Reading::Missing => MISSING.to_string(),
    }
}

fn suite_table(out: &mut String, table: &SuiteTable) {
    out.push_str(&format!("\nProfile: {}\n", table.profile));
    out.push_str(&format!(
        "{:<28} {:>9} {:>9} {:>7} {:>12} {:>8} {:>5} {:>9}\n",
        "Benchmark", "Mean", "±Stdev", "CV%", "Throughput", "Speedup", "Runs", "Ceiling"
    ));
    out.push_str(&format!("{}\n", "-".repeat(WIDTH)));

    for row in &table.rows {
        suite_row(out, row);
    }
}

fn suite_row(out: &mut String, row: &SuiteRow) {
    let (stdev, cv) = match row.duration.summary() {
        Some(s) => (format_duration(s.stdev), format!("{:.1}%", s.cv_percent)),
        None => (MISSING.to_string(), MISSING.to_string()),
    };
    let marker = if row.rank == Rank::Fastest { "  *fastest*" } else { "" };
    let ceiling = if row.ceiling_pct.is_na() {
        MISSING.to_string()
    } else {
        format_percent(row.ceiling_pct)
    };

    out.push_str(&format!(
        "{:<28} {:>9} {:>9} {:>7} {:>12} {:>8} {:>5} {:>9}{}\n",
        row.name,
        mean_cell(&row.duration),
        stdev,
        cv,
        opt_throughput(row.throughput_mbps),
        format_speedup(row.speedup),
        row.runs,
        ceiling,
        marker
    ));
}

fn parallel_table(out: &mut String, table: &ParallelTable) {
    out.push_str(&format!("\nProfile: {}  Tool: {}\n", table.profile, table.tool));
    out.push_str(&format!(
        "{:<28} {:>8} {:>9} {:>12} {:>8} {:>10} {:>5}\n",
        "Configuration", "Streams", "Median", "Throughput", "Speedup", "Efficiency", "Runs"
    ));
    out.push_str(&format!("{}\n", "-".repeat(WIDTH)));

    for row in &table.rows {
        let streams = row
            .streams
            .map(|s| s.to_string())
            .unwrap_or_else(|| MISSING.to_string());
        let median = match &row.duration {
            Reading::Missing => "no data".to_string(),
            other => median_cell(other),
        };
        out.push_str(&format!(
            "{:<28} {:>8} {:>9} {:>12} {:>8} {:>10} {:>5}\n",
            row.name,
            streams,
            median,
            opt_throughput(row.throughput_mbps),
            format_speedup(row.speedup),
            format_percent(row.efficiency),
            row.runs
        ));
    }
}

fn resume_table(out: &mut String, rows: &[ResumeRow]) {
    out.push_str(&format!(
        "{:<28} {:<12} {:>9} {:>9} {:>9} {:>10} {:>9}\n",
        "Test", "Profile", "Partial", "Resume", "Total", "Size", "Overhead"
    ));
    out.push_str(&format!("{}\n", "-".repeat(WIDTH)));

    for row in rows {
        out.push_str(&format!(
            "{:<28} {:<12} {:>9} {:>9} {:>9} {:>10} {:>9}\n",
            row.name,
            row.profile,
            median_cell(&row.partial),
            median_cell(&row.resume),
            median_cell(&row.total),
            opt_bytes(row.bytes),
            format_overhead(row.overhead)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::model::RunStatus;
    use crate::stats::{summarize, Ratio};

    fn row(name: &str, durations: &[f64], rank: Rank) -> SuiteRow {
        SuiteRow {
            name: name.to_string(),
            duration: Reading::Summary(summarize(durations).unwrap()),
            throughput_mbps: Some(800.0),
            runs: durations.len() as u32,
            bytes: None,
            status: RunStatus::Success,
            speedup: Ratio::Value(1.0),
            rank,
            ceiling_pct: Ratio::NotApplicable,
        }
    }

    #[test]
    fn test_empty_sections_print_no_results() {
        let report = Report::new("Test");
        let text = render_terminal(&report);
        assert!(text.contains("No suite results found."));
        assert!(text.contains("No parallel results found."));
        assert!(text.contains("No resume results found."));
    }

    #[test]
    fn test_suite_row_formatting() {
        let mut report = Report::new("Test");
        report.suite = Ok(vec![SuiteTable {
            profile: "default".into(),
            rows: vec![row("rsync_default", &[10.0, 10.2, 9.8], Rank::Fastest)],
        }]);

        let text = render_terminal(&report);
        let line = text
            .lines()
            .find(|l| l.starts_with("rsync_default"))
            .unwrap();
        assert!(line.contains("10.0s"));
        assert!(line.contains("0.2s"));
        assert!(line.contains("2.0%"));
        assert!(line.contains("800.0 Mbps"));
        assert!(line.contains("1.0x"));
        assert!(line.ends_with("*fastest*"));
    }

    #[test]
    fn test_no_data_row() {
        let mut report = Report::new("Test");
        let mut empty = row("tar_zstd", &[1.0], Rank::Unranked);
        empty.duration = Reading::Missing;
        report.suite = Ok(vec![SuiteTable {
            profile: "default".into(),
            rows: vec![empty],
        }]);

        let text = render_terminal(&report);
        let line = text.lines().find(|l| l.starts_with("tar_zstd")).unwrap();
        assert!(line.contains("no data"));
        assert!(!line.contains("fastest"));
    }

    #[test]
    fn test_section_error_row() {
        let mut report = Report::new("Test");
        report.resume = Err(StatsError::EmptyInput {
            metric: "total duration",
        });
        let text = render_terminal(&report);
        assert!(text.contains("ERROR: resume section unavailable"));
        assert!(text.contains("No suite results found."));
    }
}
