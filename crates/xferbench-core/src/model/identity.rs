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

//! Benchmark identity: the composite key that decides which runs are compared together.

use serde::Serialize;
use std::fmt;

/// Label of runs that do not name a data profile.
pub const DEFAULT_PROFILE: &str = "default";

/// Report category a benchmark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Single-configuration tool runs (`*_stats.json`, `tool_*.json`).
    Suite,
    /// Parallel-stream runs (`parallel_*.json`).
    Parallel,
    /// Interrupted and resumed transfers (`resume_*.json`).
    Resume,
}

impl Category {
    /// Returns the category as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Suite => "suite",
            Category::Parallel => "parallel",
            Category::Resume => "resume",
        }
    }
}

/// Test phase of an interrupted transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// The transfer that was cut off.
    Partial,
    /// The transfer that picked up where the partial one stopped.
    Resume,
    /// Any other tag found in a result file.
    Other(String),
}

impl Phase {
    /// Parses a phase tag. Matching is case-insensitive.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "partial" => Phase::Partial,
            "resume" => Phase::Resume,
            other => Phase::Other(other.to_string()),
        }
    }

    /// Returns the phase tag.
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Partial => "partial",
            Phase::Resume => "resume",
            Phase::Other(tag) => tag,
        }
    }
}

/// Composite key identifying one logical configuration under comparison.
///
/// Two records with equal identities belong to the same comparison group,
/// no matter which file naming convention produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BenchmarkIdentity {
    /// Report category.
    pub category: Category,
    /// Tool/configuration name (`rsync_default`, `rsync`, resume test name).
    pub name: String,
    /// Data profile the run was measured against.
    pub profile: Option<String>,
    /// Parallelism level for parallel runs.
    pub parallelism: Option<u32>,
    /// Test phase for interrupted transfers.
    pub phase: Option<Phase>,
}

impl BenchmarkIdentity {
    /// Identity for a suite or tool-comparison run.
    pub fn suite(name: impl Into<String>) -> Self {
        Self {
            category: Category::Suite,
            name: name.into(),
            profile: None,
            parallelism: None,
            phase: None,
        }
    }

    /// Identity for a parallel run at the given parallelism level.
    pub fn parallel(name: impl Into<String>, parallelism: u32) -> Self {
        Self {
            category: Category::Parallel,
            name: name.into(),
            profile: None,
            parallelism: Some(parallelism),
            phase: None,
        }
    }

    /// Identity for an interrupted/resumed transfer test.
    pub fn resume(test: impl Into<String>) -> Self {
        Self {
            category: Category::Resume,
            name: test.into(),
            profile: None,
            parallelism: None,
            phase: None,
        }
    }

    /// Sets the data profile.
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the parallelism level.
    pub fn with_parallelism(mut self, parallelism: Option<u32>) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Sets the test phase.
    pub fn with_phase(mut self, phase: Option<Phase>) -> Self {
        self.phase = phase;
        self
    }

    /// Display key, e.g. `rsync_default`, `rsync_p4`, `resume_rsync`.
    pub fn key(&self) -> String {
        match self.category {
            Category::Suite => self.name.clone(),
            Category::Parallel => match self.parallelism {
                Some(p) => format!("{}_p{}", self.name, p),
                None => self.name.clone(),
            },
            Category::Resume => match &self.phase {
                Some(phase) => format!("resume_{}_{}", self.name, phase.as_str()),
                None => format!("resume_{}", self.name),
            },
        }
    }

    /// Profile name for display; runs without one belong to `default`.
    pub fn profile_label(&self) -> &str {
        self.profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }
}

impl fmt::Display for BenchmarkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(BenchmarkIdentity::suite("rsync_default").key(), "rsync_default");
        assert_eq!(BenchmarkIdentity::parallel("rsync", 4).key(), "rsync_p4");
        assert_eq!(BenchmarkIdentity::resume("rsync").key(), "resume_rsync");
        assert_eq!(
            BenchmarkIdentity::resume("rsync")
                .with_phase(Some(Phase::Partial))
                .key(),
            "resume_rsync_partial"
        );
    }

    #[test]
    fn test_profile_is_part_of_identity() {
        let a = BenchmarkIdentity::suite("tar_zstd").with_profile(Some("logs".into()));
        let b = BenchmarkIdentity::suite("tar_zstd").with_profile(Some("media".into()));
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
        assert_eq!(BenchmarkIdentity::suite("x").profile_label(), "default");
    }

    #[test]
    fn test_phase_parse() {
        assert_eq!(Phase::parse("Partial"), Phase::Partial);
        assert_eq!(Phase::parse(" resume "), Phase::Resume);
        assert_eq!(Phase::parse("verify"), Phase::Other("verify".into()));
    }
}
