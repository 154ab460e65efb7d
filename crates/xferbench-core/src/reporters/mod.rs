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

//! Report model and renderers.
//!
//! The report is analyzed once from the result store; the renderers only
//! format what it holds.
//!
//! # Modules
//!
//! - `types`: Report data structures
//! - `analysis`: Builds the report from the result store
//! - `labels`: Human-readable tool labels and notes
//! - `console`: Terminal output
//! - `markdown`: Markdown export
//! - `json`: `summary.json` export

pub mod analysis;
pub mod console;
pub mod json;
pub mod labels;
pub mod markdown;
pub mod types;

pub use analysis::{build_report, findings, parallel_section, resume_section, suite_section};
pub use console::render_terminal;
pub use json::{build_summary, export_summary, read_summary, Summary, SummaryEntry};
pub use labels::{tool_label, tool_note};
pub use markdown::render_markdown;
pub use types::{
    FastestEntry, Findings, ParallelRow, ParallelTable, Reading, Report, ResumeRow, ScanTotals,
    Section, SuiteRow, SuiteTable,
};
