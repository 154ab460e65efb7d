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

//! Descriptive statistics over per-run samples.

use crate::error::StatsError;
use crate::model::ReportedSummary;
use serde::Serialize;

/// Statistical summary of one metric over a comparison group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1); zero for a single sample.
    pub stdev: f64,
    /// `stdev / mean * 100`, or zero when the mean is zero.
    pub cv_percent: f64,
    /// Median (mean of the two middle values for even counts).
    pub median: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

impl StatSummary {
    /// Builds a summary from statistics the benchmark harness already computed.
    ///
    /// A missing stdev is recovered from the reported CV when there is one.
    /// Missing spread figures are otherwise zero, and missing order statistics
    /// fall back to the mean. The CV is always recomputed from mean and stdev,
    /// so it is zero exactly when either of them is.
    pub fn from_reported(reported: &ReportedSummary, runs: u32) -> Self {
        let mean = reported.mean;
        let stdev = reported
            .stdev
            .or_else(|| reported.cv_percent.map(|cv| cv * mean / 100.0))
            .unwrap_or(0.0)
            .max(0.0);
        let cv_percent = coefficient_of_variation(mean, stdev);
        let min = reported.min.unwrap_or(mean);
        let max = reported.max.unwrap_or(mean);
        Self {
            count: runs.max(1) as usize,
            mean,
            stdev,
            cv_percent,
            median: reported.median.unwrap_or(mean),
            min: min.min(mean),
            max: max.max(mean),
        }
    }
}

/// Coefficient of variation in percent. Defined as zero when the mean is zero.
pub fn coefficient_of_variation(mean: f64, stdev: f64) -> f64 {
    if mean > 0.0 {
        stdev / mean * 100.0
    } else {
        0.0
    }
}

/// Summarizes a non-empty list of samples.
///
/// # Errors
///
/// Returns [`StatsError::EmptyInput`] for an empty slice. Callers render a
/// "no data" row instead of calling this on an empty group.
///
/// # Example
///
/// ```
/// use xferbench_core::stats::summarize;
///
/// let s = summarize(&[10.0, 10.2, 9.8]).unwrap();
/// assert!((s.mean - 10.0).abs() < 1e-9);
/// assert!((s.stdev - 0.2).abs() < 1e-9);
/// ```
pub fn summarize(values: &[f64]) -> Result<StatSummary, StatsError> {
    summarize_named("values", values)
}

/// Like [`summarize`], naming the metric in the error.
pub fn summarize_named(metric: &'static str, values: &[f64]) -> Result<StatSummary, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput { metric });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let min = sorted[0];
    let max = sorted[count - 1];

    // Identical samples have no spread; skip the arithmetic so rounding
    // cannot invent one.
    if min == max {
        return Ok(StatSummary {
            count,
            mean: min,
            stdev: 0.0,
            cv_percent: 0.0,
            median: min,
            min,
            max,
        });
    }

    let mean = (sorted.iter().sum::<f64>() / count as f64).clamp(min, max);

    let stdev = if count > 1 {
        let variance = sorted
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    Ok(StatSummary {
        count,
        mean,
        stdev,
        cv_percent: coefficient_of_variation(mean, stdev),
        median,
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_three_runs() {
        let s = summarize(&[10.0, 10.2, 9.8]).unwrap();
        assert_eq!(s.count, 3);
        assert!((s.mean - 10.0).abs() < 1e-9);
        assert!((s.stdev - 0.2).abs() < 1e-9);
        assert!((s.cv_percent - 2.0).abs() < 1e-6);
        assert_eq!(s.median, 10.0);
        assert_eq!(s.min, 9.8);
        assert_eq!(s.max, 10.2);
    }

    #[test]
    fn test_summarize_empty_fails() {
        assert_eq!(
            summarize(&[]),
            Err(StatsError::EmptyInput { metric: "values" })
        );
        assert_eq!(
            summarize_named("throughput", &[]),
            Err(StatsError::EmptyInput {
                metric: "throughput"
            })
        );
    }

    #[test]
    fn test_single_sample() {
        let s = summarize(&[4.2]).unwrap();
        assert_eq!(s.stdev, 0.0);
        assert_eq!(s.cv_percent, 0.0);
        assert_eq!(s.median, 4.2);
    }

    #[test]
    fn test_zero_mean_has_zero_cv() {
        let s = summarize(&[0.0, 0.0]).unwrap();
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.cv_percent, 0.0);
        assert!(!s.cv_percent.is_nan());
    }

    #[test]
    fn test_even_median() {
        let s = summarize(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.median, 2.5);
    }

    #[test]
    fn test_from_reported() {
        let reported = ReportedSummary {
            mean: 20.0,
            stdev: Some(1.0),
            cv_percent: None,
            median: None,
            min: None,
            max: Some(22.0),
        };
        let s = StatSummary::from_reported(&reported, 3);
        assert_eq!(s.count, 3);
        assert_eq!(s.cv_percent, 5.0);
        assert_eq!(s.median, 20.0);
        assert_eq!(s.min, 20.0);
        assert_eq!(s.max, 22.0);
    }

    #[test]
    fn test_from_reported_zero_mean_has_zero_cv() {
        let reported = ReportedSummary {
            mean: 0.0,
            stdev: Some(0.0),
            cv_percent: Some(5.0),
            median: None,
            min: None,
            max: None,
        };
        let s = StatSummary::from_reported(&reported, 1);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.cv_percent, 0.0);
    }

    #[test]
    fn test_from_reported_cv_follows_stdev() {
        let reported = ReportedSummary {
            mean: 10.0,
            stdev: Some(0.0),
            cv_percent: Some(3.0),
            median: None,
            min: None,
            max: None,
        };
        assert_eq!(StatSummary::from_reported(&reported, 3).cv_percent, 0.0);
    }

    #[test]
    fn test_from_reported_stdev_from_cv() {
        let reported = ReportedSummary {
            mean: 20.0,
            stdev: None,
            cv_percent: Some(5.0),
            median: None,
            min: None,
            max: None,
        };
        let s = StatSummary::from_reported(&reported, 3);
        assert!((s.stdev - 1.0).abs() < 1e-9);
        assert!((s.cv_percent - 5.0).abs() < 1e-9);
    }
}
