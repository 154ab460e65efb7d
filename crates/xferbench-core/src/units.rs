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

//! Human-readable unit formatting.
//!
//! Thresholds: durations switch to minutes at 60 s and hours at 3600 s;
//! byte sizes are 1024-based; bit-rates are 1000-based (Mbps to Gbps at 1000).

use crate::stats::{Rank, Ratio};

/// Placeholder for an absent value.
pub const MISSING: &str = "-";

/// Formats seconds as `12.3s`, `4.5m` or `1.2h`.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else {
        format!("{:.1}h", seconds / 3600.0)
    }
}

/// Formats a byte count with 1024-based units.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{}B", bytes)
    } else if bytes < MB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1}GB", bytes as f64 / GB as f64)
    }
}

/// Formats a bit-rate given in Mbps, switching to Gbps at 1000.
pub fn format_throughput(mbps: f64) -> String {
    if mbps >= 1000.0 {
        format!("{:.2} Gbps", mbps / 1000.0)
    } else {
        format!("{:.1} Mbps", mbps)
    }
}

/// Formats an optional byte count, `-` when absent.
pub fn opt_bytes(bytes: Option<u64>) -> String {
    bytes.map(format_bytes).unwrap_or_else(|| MISSING.to_string())
}

/// Formats an optional throughput, `-` when absent.
pub fn opt_throughput(mbps: Option<f64>) -> String {
    mbps.map(format_throughput).unwrap_or_else(|| MISSING.to_string())
}

/// Formats a speedup as `3.0x`, or `N/A`.
pub fn format_speedup(ratio: Ratio) -> String {
    match ratio {
        Ratio::Value(v) => format!("{:.1}x", v),
        Ratio::NotApplicable => "N/A".to_string(),
    }
}

/// Formats a percentage ratio as `75%`, or `N/A`.
pub fn format_percent(ratio: Ratio) -> String {
    match ratio {
        Ratio::Value(v) => format!("{:.0}%", v),
        Ratio::NotApplicable => "N/A".to_string(),
    }
}

/// Formats a signed overhead percentage as `+12.5%`, or `N/A`.
pub fn format_overhead(ratio: Ratio) -> String {
    match ratio {
        Ratio::Value(v) => format!("{:+.1}%", v),
        Ratio::NotApplicable => "N/A".to_string(),
    }
}

/// Formats a rank as `fastest`, `2.5x slower`, or `-`.
pub fn format_rank(rank: Rank) -> String {
    match rank {
        Rank::Fastest => "fastest".to_string(),
        Rank::Slower(factor) => format!("{:.1}x slower", factor),
        Rank::Unranked => MISSING.to_string(),
    }
}
