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

//! Result ingestion.
//!
//! - `schema`: filename dispatch table and the raw shapes written by each harness generation
//! - `adapter`: coercion of one file into a canonical record
//! - `loader`: directory scan feeding the result store

pub mod adapter;
pub mod loader;
pub mod schema;

pub use adapter::{adapt, adapt_file, derive_name, Adapted, SystemInfo};
pub use loader::{ensure_results_dir, load_results, LoadedResults};
pub use schema::{classify, FileKind, NETWORK_CEILING_FILE, SYSTEM_INFO_FILE};
