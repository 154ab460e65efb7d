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

//! XferBench Report Core
//!
//! Turns a directory of file-transfer benchmark results into comparison
//! tables and a machine-readable summary.
//!
//! ## Pipeline
//!
//! - **Ingestion** (`ingest`): filename dispatch, tolerant parsing of every
//!   known result schema, directory scan
//! - **Store** (`store`): runs grouped by benchmark identity
//! - **Statistics** (`stats`): summaries, speedup, efficiency, resume overhead
//! - **Reporters** (`reporters`): terminal, Markdown and `summary.json`
//! - **Driver** (`driver`): runs the stages in order
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use xferbench_core::{run, ReportConfig};
//!
//! let output = run(Path::new("results"), &ReportConfig::default())?;
//! print!("{}", output.terminal);
//! if let Some(markdown) = &output.markdown {
//!     print!("{}", markdown);
//! }
//! # Ok::<(), xferbench_core::ReportError>(())
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod ingest;
pub mod model;
pub mod reporters;
pub mod stats;
pub mod store;
pub mod units;

pub use config::ReportConfig;
pub use driver::{check_loaded, check_summary_file, run, ReportOutput};
pub use error::{AdaptError, ReportError, Result, StatsError};
pub use ingest::{load_results, LoadedResults};
pub use model::{BenchmarkIdentity, Category, Metric, RunRecord};
pub use reporters::Report;
pub use stats::{summarize, Ratio, StatSummary};
pub use store::{ComparisonGroup, ResultStore};
