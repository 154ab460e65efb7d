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

//! Derived comparisons between groups: speedup, efficiency, overhead, ranking.
//!
//! Every ratio is a [`Ratio`]; an undefined ratio is [`Ratio::NotApplicable`],
//! never zero or infinity.

use std::cmp::Ordering;
use std::fmt;

/// A derived ratio that may be undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// A defined value.
    Value(f64),
    /// Inputs were missing or the denominator was zero.
    NotApplicable,
}

impl Ratio {
    /// Returns the value, if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            Ratio::NotApplicable => None,
        }
    }

    /// Returns `true` if the ratio is undefined.
    pub fn is_na(&self) -> bool {
        matches!(self, Ratio::NotApplicable)
    }

    /// Divides, yielding N/A unless both inputs exist and the denominator is positive.
    pub fn divide(numerator: Option<f64>, denominator: Option<f64>) -> Ratio {
        match (numerator, denominator) {
            (Some(n), Some(d)) if d > 0.0 && n.is_finite() => Ratio::Value(n / d),
            _ => Ratio::NotApplicable,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Value(v) => write!(f, "{:.2}", v),
            Ratio::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Duration and throughput of one entry in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SamplePoint {
    /// Representative duration (seconds).
    pub duration: Option<f64>,
    /// Representative throughput (Mbps).
    pub throughput: Option<f64>,
}

impl SamplePoint {
    /// Throughput usable for a speedup: requires a duration as well.
    fn comparable_throughput(&self) -> Option<f64> {
        self.duration.and(self.throughput)
    }
}

/// Relative speedup of each point against the first one.
///
/// `points` must already be in parameter-sorted order (parallelism level,
/// or duration for tool comparisons). The first entry is the baseline; if
/// it lacks a positive throughput every speedup is N/A.
pub fn relative_speedups(points: &[SamplePoint]) -> Vec<Ratio> {
    let baseline = points
        .first()
        .and_then(SamplePoint::comparable_throughput)
        .filter(|t| *t > 0.0);

    points
        .iter()
        .map(|p| Ratio::divide(p.comparable_throughput(), baseline))
        .collect()
}

/// Parallel efficiency in percent: `speedup / parallelism * 100`.
pub fn parallel_efficiency(speedup: Ratio, parallelism: u32) -> Ratio {
    match speedup {
        Ratio::Value(s) if parallelism > 0 => Ratio::Value(s / f64::from(parallelism) * 100.0),
        _ => Ratio::NotApplicable,
    }
}

/// Extra time an interrupted transfer took versus an uninterrupted reference, in percent.
pub fn resume_overhead(total: Option<f64>, reference: Option<f64>) -> Ratio {
    match Ratio::divide(total, reference) {
        Ratio::Value(r) => Ratio::Value((r - 1.0) * 100.0),
        Ratio::NotApplicable => Ratio::NotApplicable,
    }
}

/// Placement of an entry relative to the fastest entry of its table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rank {
    /// Fastest, or within the tie tolerance of it.
    Fastest,
    /// Slower by this factor.
    Slower(f64),
    /// No duration, or the comparison is undefined.
    Unranked,
}

/// Ranks durations against the smallest one.
///
/// Entries within `tie_tolerance_pct` percent of the fastest are all
/// [`Rank::Fastest`].
pub fn rank_by_duration(durations: &[Option<f64>], tie_tolerance_pct: f64) -> Vec<Rank> {
    let fastest = durations
        .iter()
        .flatten()
        .copied()
        .min_by(f64::total_cmp);

    durations
        .iter()
        .map(|d| match (d, fastest) {
            (Some(d), Some(f)) if f > 0.0 => {
                if *d <= f * (1.0 + tie_tolerance_pct / 100.0) {
                    Rank::Fastest
                } else {
                    Rank::Slower(d / f)
                }
            }
            (Some(d), Some(f)) if *d == f => Rank::Fastest,
            _ => Rank::Unranked,
        })
        .collect()
}

/// Orders optional values ascending with missing values last.
pub fn cmp_optional(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
