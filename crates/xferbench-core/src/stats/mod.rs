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

//! Statistics engine.
//!
//! - `summary`: descriptive statistics over per-run samples
//! - `compare`: speedup, efficiency, resume overhead and ranking

pub mod compare;
pub mod summary;

pub use compare::{
    cmp_optional, parallel_efficiency, rank_by_duration, relative_speedups, resume_overhead,
    Rank, Ratio, SamplePoint,
};
pub use summary::{coefficient_of_variation, summarize, summarize_named, StatSummary};
