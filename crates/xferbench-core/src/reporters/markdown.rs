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

//! Markdown export for benchmark reports.
//!
//! Produces a document ready to paste into a write-up: one tool comparison
//! table per data profile with human-readable labels, then parallel
//! scaling, resume performance and a short summary.

use crate::ingest::SystemInfo;
use crate::reporters::labels::{tool_label, tool_note};
use crate::reporters::types::{
    Findings, ParallelTable, Reading, Report, ResumeRow, Section, SuiteTable,
};
use crate::units::{
    format_duration, format_overhead, format_percent, format_rank, format_speedup,
    format_throughput, opt_bytes, opt_throughput, MISSING,
};

/// Renders the report as Markdown.
pub fn render_markdown(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.title));
    md.push_str(&format!("**Generated:** {}\n\n", report.timestamp));
    if let Some(ceiling) = report.network_ceiling_mbps {
        md.push_str(&format!("**Network ceiling:** {}\n\n", format_throughput(ceiling)));
    }

    if let Some(system) = &report.system {
        system_block(&mut md, system);
    }

    md.push_str("## Transfer Tools Comparison\n\n");
    section(&mut md, &report.suite, "suite", |md, tables| {
        for table in tables {
            suite_table(md, table);
        }
    });

    md.push_str("## Parallel Transfer Scaling\n\n");
    section(&mut md, &report.parallel, "parallel", |md, tables| {
        for table in tables {
            parallel_table(md, table);
        }
    });

    md.push_str("## Resume/Partial Transfer Performance\n\n");
    section(&mut md, &report.resume, "resume", resume_table);

    summary_block(&mut md, &report.findings);
    md
}

fn section<T>(
    md: &mut String,
    section: &Section<T>,
    category: &str,
    render: impl FnOnce(&mut String, &[T]),
) {
    match section {
        Ok(items) if items.is_empty() => {
            md.push_str(&format!("_No {} results found._\n\n", category));
        }
        Ok(items) => render(md, items),
        Err(e) => {
            md.push_str("| Error |\n|-------|\n");
            md.push_str(&format!("| {} section unavailable: {} |\n\n", category, e));
        }
    }
}

fn system_block(md: &mut String, system: &SystemInfo) {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "Unknown".to_string());

    md.push_str("## System Configuration\n\n");
    md.push_str(&format!("- **CPU:** {}\n", field(&system.cpu_model)));
    md.push_str(&format!("- **Cores:** {}\n", field(&system.cpu_cores)));
    let memory = system
        .memory_gb
        .as_ref()
        .map(|m| format!("{} GB", m))
        .unwrap_or_else(|| "Unknown".to_string());
    md.push_str(&format!("- **Memory:** {}\n", memory));
    md.push_str(&format!("- **Kernel:** {}\n", field(&system.kernel)));
    md.push_str(&format!("- **Filesystem:** {}\n", field(&system.filesystem)));
    md.push_str(&format!("- **rsync:** {}\n\n", field(&system.rsync_version)));
}

/// `mean ± stdev`, verbatim text, or "no data".
fn duration_cell(reading: &Reading) -> String {
    match reading {
        Reading::Summary(s) => {
            format!("{} ± {}", format_duration(s.mean), format_duration(s.stdev))
        }
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

fn suite_table(md: &mut String, table: &SuiteTable) {
    md.push_str(&format!("### Profile: {}\n\n", table.profile));
    md.push_str("| Tool | Duration | Throughput | CV% | Runs | Ranking | Notes |\n");
    md.push_str("|------|----------|------------|-----|------|---------|-------|\n");

    for row in &table.rows {
        let cv = row
            .duration
            .summary()
            .map(|s| format!("{:.1}%", s.cv_percent))
            .unwrap_or_else(|| MISSING.to_string());

        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            tool_label(&row.name),
            duration_cell(&row.duration),
            opt_throughput(row.throughput_mbps),
            cv,
            row.runs,
            format_rank(row.rank),
            tool_note(&row.name, row.throughput_mbps.is_some())
        ));
    }
    md.push('\n');
}

fn parallel_table(md: &mut String, table: &ParallelTable) {
    md.push_str(&format!("### {} ({})\n\n", table.tool, table.profile));
    md.push_str("| Configuration | Streams | Median | Throughput | Speedup | Efficiency |\n");
    md.push_str("|---------------|---------|--------|------------|---------|------------|\n");

    for row in &table.rows {
        let streams = row
            .streams
            .map(|s| s.to_string())
            .unwrap_or_else(|| MISSING.to_string());
        let median = match &row.duration {
            Reading::Missing => "no data".to_string(),
            other => median_cell(other),
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            row.name,
            streams,
            median,
            opt_throughput(row.throughput_mbps),
            format_speedup(row.speedup),
            format_percent(row.efficiency)
        ));
    }
    md.push('\n');
}

fn resume_table(md: &mut String, rows: &[ResumeRow]) {
    md.push_str("| Test | Profile | Partial | Resume | Total | File Size | Overhead |\n");
    md.push_str("|------|---------|---------|--------|-------|-----------|----------|\n");

    for row in rows {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            row.name,
            row.profile,
            median_cell(&row.partial),
            median_cell(&row.resume),
            median_cell(&row.total),
            opt_bytes(row.bytes),
            format_overhead(row.overhead)
        ));
    }
    md.push('\n');
}

fn summary_block(md: &mut String, findings: &Findings) {
    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Total benchmarks:** {}\n", findings.total_benchmarks));
    md.push_str(&format!("- **Total runs:** {}\n", findings.total_runs));
    if let Some(fastest) = &findings.fastest {
        md.push_str(&format!(
            "- **Fastest:** {} ({}, profile {})\n",
            fastest.name,
            format_throughput(fastest.throughput_mbps),
            fastest.profile
        ));
    }
    if findings.compression_variants > 0 {
        md.push_str(&format!(
            "- **Compression variants tested:** {}\n",
            findings.compression_variants
        ));
    }
    if findings.parallel_configs > 0 {
        md.push_str(&format!(
            "- **Parallel configurations tested:** {}\n",
            findings.parallel_configs
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunStatus;
    use crate::reporters::types::SuiteRow;
    use crate::stats::{summarize, Rank, Ratio};

    fn row(name: &str, duration: f64, rank: Rank) -> SuiteRow {
        SuiteRow {
            name: name.to_string(),
            duration: Reading::Summary(summarize(&[duration]).unwrap()),
            throughput_mbps: Some(500.0),
            runs: 1,
            bytes: None,
            status: RunStatus::Unknown,
            speedup: Ratio::Value(1.0),
            rank,
            ceiling_pct: Ratio::NotApplicable,
        }
    }

    #[test]
    fn test_labels_and_ranking() {
        let mut report = Report::new("Test");
        report.suite = Ok(vec![SuiteTable {
            profile: "mixed".into(),
            rows: vec![
                row("tar_zstd", 8.0, Rank::Fastest),
                row("rclone_copy", 20.0, Rank::Slower(2.5)),
            ],
        }]);

        let md = render_markdown(&report);
        assert!(md.contains("### Profile: mixed"));
        assert!(md.contains(r"| tar --zstd \| ssh (zstd) | 8.0s ± 0.0s |"));
        assert!(md.contains("| fastest | Good for compressible data |"));
        assert!(md.contains("| `rclone_copy` |"));
        assert!(md.contains("| 2.5x slower |"));
    }

    #[test]
    fn test_system_block_unknown_fields() {
        let mut report = Report::new("Test");
        report.system = Some(SystemInfo {
            cpu_model: Some("c6i.4xlarge".into()),
            ..SystemInfo::default()
        });

        let md = render_markdown(&report);
        assert!(md.contains("## System Configuration"));
        assert!(md.contains("- **CPU:** c6i.4xlarge"));
        assert!(md.contains("- **Kernel:** Unknown"));
    }

    #[test]
    fn test_empty_report() {
        let md = render_markdown(&Report::new("Test"));
        assert!(md.starts_with("# Test\n"));
        assert!(md.contains("_No suite results found._"));
        assert!(md.contains("- **Total benchmarks:** 0"));
        assert!(!md.contains("System Configuration"));
    }
}
