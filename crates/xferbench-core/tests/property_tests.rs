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

//! Property-based tests for the statistics engine and result grouping.
//!
//! - Summary invariants: stdev >= 0, min <= mean <= max, CV zero exactly
//!   when stdev or mean is zero
//! - Empty input always fails
//! - Grouping does not depend on file name or discovery order
//! - Speedup agrees with throughput ordering

use proptest::prelude::*;
use xferbench_core::model::{BenchmarkIdentity, RunRecord, SchemaKind};
use xferbench_core::stats::{relative_speedups, SamplePoint};
use xferbench_core::{summarize, Ratio, ResultStore, StatsError};

// ===== Generators =====

/// Non-negative sample values, with an occasional exact zero.
fn sample() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        8 => 0.0f64..10_000.0,
    ]
}

fn samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(sample(), 1..50)
}

// ===== Summary Properties =====

proptest! {
    #[test]
    fn prop_summary_bounds(values in samples()) {
        let s = summarize(&values).unwrap();
        prop_assert!(s.stdev >= 0.0);
        prop_assert!(s.min <= s.mean && s.mean <= s.max);
        prop_assert!(s.min <= s.median && s.median <= s.max);
        prop_assert_eq!(s.count, values.len());
    }

    #[test]
    fn prop_cv_zero_iff_degenerate(values in samples()) {
        let s = summarize(&values).unwrap();
        let degenerate = s.stdev == 0.0 || s.mean == 0.0;
        prop_assert_eq!(s.cv_percent == 0.0, degenerate);
        prop_assert!(s.cv_percent.is_finite());
    }

    #[test]
    fn prop_identical_values_have_no_spread(value in sample(), n in 1usize..20) {
        let s = summarize(&vec![value; n]).unwrap();
        prop_assert_eq!(s.stdev, 0.0);
        prop_assert_eq!(s.cv_percent, 0.0);
        prop_assert_eq!(s.mean, value);
    }

    #[test]
    fn prop_grouping_ignores_order(
        levels in prop::collection::vec(1u32..16, 1..30),
        seed in any::<u64>(),
    ) {
        let records: Vec<(BenchmarkIdentity, RunRecord)> = levels
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let file = format!("run{}/parallel_rsync_p{}.json", i, p);
                (
                    BenchmarkIdentity::parallel("rsync", p),
                    RunRecord::new(file, SchemaKind::Parallel).with_duration(i as f64),
                )
            })
            .collect();

        let mut forward = ResultStore::new();
        for (identity, record) in records.iter().cloned() {
            forward.add(identity, record);
        }

        let mut shuffled = records.clone();
        let len = shuffled.len();
        shuffled.rotate_left((seed % len as u64) as usize);
        shuffled.reverse();
        let mut backward = ResultStore::new();
        for (identity, record) in shuffled {
            backward.add(identity, record);
        }

        prop_assert_eq!(forward.len(), backward.len());
        for group in forward.all() {
            let other = backward.get(group.identity()).unwrap();
            prop_assert_eq!(group.len(), other.len());
            prop_assert_eq!(group.name(), format!("rsync_p{}", group.identity().parallelism.unwrap()));
        }
    }

    #[test]
    fn prop_speedup_follows_throughput(
        baseline in 1.0f64..5_000.0,
        others in prop::collection::vec(0.0f64..10_000.0, 1..10),
    ) {
        let mut points = vec![SamplePoint { duration: Some(1.0), throughput: Some(baseline) }];
        points.extend(others.iter().map(|&t| SamplePoint { duration: Some(1.0), throughput: Some(t) }));

        let speedups = relative_speedups(&points);
        prop_assert_eq!(speedups[0], Ratio::Value(1.0));
        for (t, speedup) in others.iter().zip(&speedups[1..]) {
            let v = speedup.value().unwrap();
            if *t > baseline {
                prop_assert!(v > 1.0);
            } else if *t < baseline {
                prop_assert!(v < 1.0);
            }
        }
    }

    #[test]
    fn prop_zero_baseline_is_na(others in prop::collection::vec(0.0f64..10_000.0, 0..10)) {
        let mut points = vec![SamplePoint { duration: Some(1.0), throughput: Some(0.0) }];
        points.extend(others.iter().map(|&t| SamplePoint { duration: Some(1.0), throughput: Some(t) }));

        prop_assert!(relative_speedups(&points).iter().all(Ratio::is_na));
    }
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(
        summarize(&[]),
        Err(StatsError::EmptyInput { .. })
    ));
}

#[test]
fn test_speedup_needs_duration() {
    let points = [
        SamplePoint {
            duration: Some(2.0),
            throughput: Some(100.0),
        },
        SamplePoint {
            duration: None,
            throughput: Some(300.0),
        },
    ];
    let speedups = relative_speedups(&points);
    assert_eq!(speedups[0], Ratio::Value(1.0));
    assert!(speedups[1].is_na());
}
