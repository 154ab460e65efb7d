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

//! XferBench command line interface

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use xferbench_core::config::{DEFAULT_SUMMARY_FILE, DEFAULT_TIE_TOLERANCE_PCT};
use xferbench_core::{run, ReportConfig};

const DEFAULT_LOG_FILTER: &str = "xferbench=info,xferbench_core=info";

/// XferBench - file transfer benchmark report generator
///
/// Reads the JSON result files in a results directory, prints a terminal
/// report followed by a Markdown report, and writes a `summary.json` into
/// the directory.
///
/// # Examples
///
/// ```bash
/// # Full report
/// xferbench results/
///
/// # Terminal report only, nothing written
/// xferbench results/ --no-markdown --no-summary
///
/// # More detail on skipped files
/// RUST_LOG=xferbench_core=debug xferbench results/
/// ```
#[derive(Parser)]
#[command(name = "xferbench")]
#[command(author, version, about = "XferBench - file transfer benchmark report generator", long_about = None)]
struct Cli {
    /// Directory containing benchmark result files
    #[arg(value_name = "RESULTS_DIR")]
    results_dir: PathBuf,

    /// Do not write the summary file
    #[arg(long)]
    no_summary: bool,

    /// Do not print the Markdown report
    #[arg(long)]
    no_markdown: bool,

    /// Do not descend into subdirectories
    #[arg(long)]
    no_recursive: bool,

    /// Summary file name (no directories), written into the results directory
    #[arg(long, value_name = "NAME", default_value = DEFAULT_SUMMARY_FILE)]
    summary_file: String,

    /// Entries within this percentage of the fastest are also "fastest"
    #[arg(long, value_name = "PCT", default_value_t = DEFAULT_TIE_TOLERANCE_PCT)]
    tie_tolerance: f64,
}

impl Cli {
    fn config(&self) -> ReportConfig {
        ReportConfig::default()
            .with_summary_file(self.summary_file.clone())
            .with_write_summary(!self.no_summary)
            .with_markdown(!self.no_markdown)
            .with_recursive(!self.no_recursive)
            .with_tie_tolerance_pct(self.tie_tolerance)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli.results_dir, &cli.config()) {
        Ok(output) => {
            print!("{}", output.terminal);
            if let Some(markdown) = &output.markdown {
                println!();
                print!("{}", markdown);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
