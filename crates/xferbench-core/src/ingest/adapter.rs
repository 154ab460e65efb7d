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

//! Schema adapter: turns one result file into a canonical record.
//!
//! Files are matched by name (see [`classify`]), read, parsed, and coerced.
//! Anything that goes wrong for a single file is an [`AdaptError`]; the
//! caller logs it and moves on.

use crate::error::AdaptError;
use crate::ingest::schema::{
    classify, FileKind, RawDuration, RawFlag, RawNetworkCeiling, RawNumber, RawResult,
};
use crate::model::identity::DEFAULT_PROFILE;
use crate::model::{
    BenchmarkIdentity, DurationReading, Numeric, Phase, PhaseDurations, ReportedSummary,
    RunRecord, RunStatus, SchemaKind,
};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Host information from `system_info.json`. Values are kept as display text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemInfo {
    /// CPU model or instance type.
    pub cpu_model: Option<String>,
    /// CPU core count.
    pub cpu_cores: Option<String>,
    /// Memory in GB.
    pub memory_gb: Option<String>,
    /// Kernel version.
    pub kernel: Option<String>,
    /// Filesystem under test.
    pub filesystem: Option<String>,
    /// rsync version.
    pub rsync_version: Option<String>,
    /// Network ceiling in Mbps, if the host file records one.
    pub network_ceiling_mbps: Option<f64>,
}

/// Outcome of adapting one recognised file.
#[derive(Debug, Clone, PartialEq)]
pub enum Adapted {
    /// A benchmark run.
    Record {
        /// Group the run belongs to.
        identity: BenchmarkIdentity,
        /// The run itself.
        record: RunRecord,
    },
    /// Side-loaded host information.
    SystemInfo(SystemInfo),
    /// Side-loaded network ceiling (Mbps).
    NetworkCeiling(f64),
}

/// Reads and adapts a file. Returns `Ok(None)` for files the dispatch table ignores.
///
/// # Errors
///
/// Returns an [`AdaptError`] if the file is unreadable, too large, not JSON,
/// or not shaped like the schema its name announces.
pub fn adapt_file(path: &Path, max_file_size: u64) -> Result<Option<Adapted>, AdaptError> {
    let kind = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => classify(name),
        None => FileKind::Ignored,
    };
    if kind == FileKind::Ignored {
        return Ok(None);
    }

    let metadata = fs::metadata(path).map_err(|e| AdaptError::read(path, e))?;
    if metadata.len() > max_file_size {
        return Err(AdaptError::FileTooLarge {
            path: path.to_path_buf(),
            actual: metadata.len(),
            max: max_file_size,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| AdaptError::read(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| AdaptError::MalformedJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let adapted = match kind {
        FileKind::Result(schema) => {
            let (identity, record) = adapt(path, schema, value)?;
            Adapted::Record { identity, record }
        }
        FileKind::SystemInfo => Adapted::SystemInfo(adapt_system_info(path, value)?),
        FileKind::NetworkCeiling => Adapted::NetworkCeiling(adapt_network_ceiling(path, value)?),
        FileKind::Ignored => return Ok(None),
    };
    Ok(Some(adapted))
}

/// Adapts parsed JSON of a known result schema.
///
/// # Errors
///
/// [`AdaptError::Schema`] if the document is not an object or a field has a
/// type no harness generation ever wrote.
pub fn adapt(
    path: &Path,
    schema: SchemaKind,
    value: Value,
) -> Result<(BenchmarkIdentity, RunRecord), AdaptError> {
    if !value.is_object() {
        return Err(schema_error(path, "expected a JSON object"));
    }
    let raw: RawResult =
        serde_json::from_value(value).map_err(|e| schema_error(path, e.to_string()))?;

    let coerce = Coercer { path };
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let profile = raw
        .profile
        .clone()
        .or_else(|| raw.data_profile.clone())
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case(DEFAULT_PROFILE));

    let identity = match schema {
        SchemaKind::SuiteStats | SchemaKind::ToolComparison => {
            let name = non_empty(raw.benchmark.as_deref())
                .unwrap_or_else(|| derive_name(stem, schema));
            BenchmarkIdentity::suite(name)
        }
        SchemaKind::Parallel => {
            let derived = derive_name(stem, schema);
            let (derived_name, derived_level) = split_parallelism(&derived);
            let name = non_empty(raw.benchmark.as_deref()).unwrap_or(derived_name);
            let level = coerce
                .count("parallelism", raw.parallelism.as_ref())
                .or(derived_level);
            BenchmarkIdentity::parallel(name, 0).with_parallelism(level.map(saturate_u32))
        }
        SchemaKind::Resume => {
            let test = non_empty(raw.test.as_deref())
                .or_else(|| non_empty(raw.benchmark.as_deref()))
                .unwrap_or_else(|| derive_name(stem, schema));
            let phase = non_empty(raw.phase.as_deref()).map(|p| Phase::parse(&p));
            BenchmarkIdentity::resume(test).with_phase(phase)
        }
    }
    .with_profile(profile);

    let mut record = RunRecord::new(path, schema);
    record.duration = raw
        .duration_seconds
        .as_ref()
        .map(|d| coerce.duration("duration_seconds", d));
    record.bytes = coerce
        .count("src_bytes", raw.src_bytes.as_ref())
        .or_else(|| coerce.count("file_size_bytes", raw.file_size_bytes.as_ref()))
        .or_else(|| coerce.count("bytes_transferred", raw.bytes_transferred.as_ref()));
    record.throughput_mbps = raw
        .throughput_mbps
        .as_ref()
        .map(|t| coerce.seconds_or_rate("throughput_mbps", t));
    if record.throughput_mbps.is_none() {
        let seconds = record.duration.as_ref().and_then(DurationReading::point);
        if let (Some(bytes), Some(seconds)) = (record.bytes, seconds) {
            if seconds > 0.0 {
                record.throughput_mbps = Some(Numeric::Value(bytes as f64 * 8.0 / seconds / 1e6));
                record.throughput_derived = true;
            }
        }
    }
    record.runs = coerce
        .count("runs", raw.runs.as_ref())
        .or_else(|| coerce.count("total_runs", raw.total_runs.as_ref()))
        .map(saturate_u32);
    record.valid_runs = coerce.count("valid_runs", raw.valid_runs.as_ref()).map(saturate_u32);
    record.streams = coerce.count("streams", raw.streams.as_ref()).map(saturate_u32);
    record.status = coerce.status(&raw);

    if schema == SchemaKind::Resume
        || raw.partial_duration_seconds.is_some()
        || raw.resume_duration_seconds.is_some()
        || raw.total_duration_seconds.is_some()
    {
        record.phases = Some(PhaseDurations {
            partial: raw
                .partial_duration_seconds
                .as_ref()
                .map(|v| coerce.seconds_or_rate("partial_duration_seconds", v)),
            resume: raw
                .resume_duration_seconds
                .as_ref()
                .map(|v| coerce.seconds_or_rate("resume_duration_seconds", v)),
            total: raw
                .total_duration_seconds
                .as_ref()
                .map(|v| coerce.seconds_or_rate("total_duration_seconds", v)),
        });
    }

    Ok((identity, record))
}

fn adapt_system_info(path: &Path, value: Value) -> Result<SystemInfo, AdaptError> {
    let Value::Object(map) = value else {
        return Err(schema_error(path, "expected a JSON object"));
    };
    let text = |key: &str| map.get(key).and_then(display_text);
    let coerce = Coercer { path };
    let ceiling = map
        .get("network_ceiling_mbps")
        .and_then(|v| serde_json::from_value::<RawNumber>(v.clone()).ok())
        .and_then(|n| coerce.seconds_or_rate("network_ceiling_mbps", &n).value());

    Ok(SystemInfo {
        cpu_model: text("cpu_model"),
        cpu_cores: text("cpu_cores"),
        memory_gb: text("memory_gb"),
        kernel: text("kernel"),
        filesystem: text("filesystem"),
        rsync_version: text("rsync_version"),
        network_ceiling_mbps: ceiling,
    })
}

fn adapt_network_ceiling(path: &Path, value: Value) -> Result<f64, AdaptError> {
    if !value.is_object() {
        return Err(schema_error(path, "expected a JSON object"));
    }
    let raw: RawNetworkCeiling =
        serde_json::from_value(value).map_err(|e| schema_error(path, e.to_string()))?;
    let coerce = Coercer { path };
    raw.throughput_mbps
        .as_ref()
        .map(|n| coerce.seconds_or_rate("throughput_mbps", n))
        .or_else(|| {
            raw.ceiling_mbps
                .as_ref()
                .map(|n| coerce.seconds_or_rate("ceiling_mbps", n))
        })
        .and_then(|n| n.value())
        .ok_or_else(|| schema_error(path, "no numeric throughput_mbps or ceiling_mbps"))
}

/// Derives a benchmark name from a file stem by stripping the naming
/// convention's prefix/suffix and any `_run<N>` repetition marker.
///
/// `rsync_default_stats`, `tool_rsync_default` and `tool_rsync_default_run2`
/// all become `rsync_default`.
pub fn derive_name(stem: &str, schema: SchemaKind) -> String {
    let base = match schema {
        SchemaKind::SuiteStats => stem.strip_suffix("_stats").unwrap_or(stem),
        SchemaKind::ToolComparison => stem.strip_prefix("tool_").unwrap_or(stem),
        SchemaKind::Parallel => stem.strip_prefix("parallel_").unwrap_or(stem),
        SchemaKind::Resume => stem.strip_prefix("resume_").unwrap_or(stem),
    };
    strip_numbered_suffix(base, "_run")
        .map(|(name, _)| name)
        .unwrap_or(base)
        .to_string()
}

/// Splits `rsync_p4` into (`rsync`, Some(4)).
fn split_parallelism(name: &str) -> (String, Option<u64>) {
    match strip_numbered_suffix(name, "_p") {
        Some((base, level)) => (base.to_string(), Some(level)),
        None => (name.to_string(), None),
    }
}

fn strip_numbered_suffix<'a>(name: &'a str, marker: &str) -> Option<(&'a str, u64)> {
    let idx = name.rfind(marker)?;
    let digits = &name[idx + marker.len()..];
    if idx == 0 || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n = digits.parse().ok()?;
    Some((&name[..idx], n))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn saturate_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn schema_error(path: &Path, message: impl Into<String>) -> AdaptError {
    AdaptError::Schema {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Field coercion with per-file warnings.
struct Coercer<'a> {
    path: &'a Path,
}

impl Coercer<'_> {
    fn warn_verbatim(&self, field: &str, shown: &str) {
        warn!(
            file = %self.path.display(),
            field,
            value = shown,
            "non-numeric value kept verbatim"
        );
    }

    /// Non-negative measurement (seconds or Mbps). Anything else is kept verbatim.
    fn seconds_or_rate(&self, field: &str, raw: &RawNumber) -> Numeric {
        let shown = match raw {
            RawNumber::Number(n) if *n >= 0.0 && n.is_finite() => return Numeric::Value(*n),
            RawNumber::Number(n) => n.to_string(),
            RawNumber::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n >= 0.0 && n.is_finite() => return Numeric::Value(n),
                _ => s.clone(),
            },
            RawNumber::Other(v) => v.to_string(),
        };
        self.warn_verbatim(field, &shown);
        Numeric::Verbatim(shown)
    }

    /// Non-negative integer. Non-coercible values are dropped with a warning.
    fn count(&self, field: &str, raw: Option<&RawNumber>) -> Option<u64> {
        let n = match self.seconds_or_rate(field, raw?) {
            Numeric::Value(n) => n,
            Numeric::Verbatim(_) => return None,
        };
        if n.fract() != 0.0 || n > u64::MAX as f64 {
            warn!(file = %self.path.display(), field, value = n, "expected a whole number, ignoring");
            return None;
        }
        Some(n as u64)
    }

    fn duration(&self, field: &str, raw: &RawDuration) -> DurationReading {
        match raw {
            RawDuration::Flat(n) => DurationReading::Flat(self.seconds_or_rate(field, n)),
            RawDuration::Summary(s) => {
                let mean = match self.seconds_or_rate("duration_seconds.mean", &s.mean) {
                    Numeric::Value(mean) => mean,
                    verbatim => return DurationReading::Flat(verbatim),
                };
                let part = |name: &str, v: &Option<RawNumber>| {
                    v.as_ref().and_then(|v| self.seconds_or_rate(name, v).value())
                };
                DurationReading::Summary(ReportedSummary {
                    mean,
                    stdev: part("duration_seconds.stdev", &s.stdev),
                    cv_percent: part("duration_seconds.cv_percent", &s.cv_percent),
                    median: part("duration_seconds.median", &s.median),
                    min: part("duration_seconds.min", &s.min),
                    max: part("duration_seconds.max", &s.max),
                })
            }
        }
    }

    fn flag(&self, field: &str, raw: &RawFlag) -> Option<bool> {
        let parsed = match raw {
            RawFlag::Bool(b) => Some(*b),
            RawFlag::Number(n) => Some(*n != 0.0),
            RawFlag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" | "ok" | "pass" | "passed" => Some(true),
                "false" | "no" | "0" | "fail" | "failed" => Some(false),
                _ => None,
            },
            RawFlag::Other(_) => None,
        };
        if parsed.is_none() {
            warn!(file = %self.path.display(), field, "unrecognised boolean, status unknown");
        }
        parsed
    }

    /// Signed process exit code; signal kills are reported as negative codes.
    fn exit_code(&self, raw: &RawNumber) -> Option<i64> {
        let parsed = match raw {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(s) => s.trim().parse::<f64>().ok(),
            RawNumber::Other(_) => None,
        };
        let code = parsed
            .filter(|n| n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64);
        if code.is_none() {
            warn!(
                file = %self.path.display(),
                field = "exit_code",
                "unrecognised exit code, status unknown"
            );
        }
        code.map(|n| n as i64)
    }

    fn status(&self, raw: &RawResult) -> RunStatus {
        let flag = [
            ("all_verified", &raw.all_verified),
            ("verified", &raw.verified),
            ("success", &raw.success),
        ]
        .into_iter()
        .find_map(|(field, value)| value.as_ref().map(|v| self.flag(field, v)));

        let ok = match flag {
            Some(parsed) => parsed,
            None => raw
                .exit_code
                .as_ref()
                .and_then(|code| self.exit_code(code))
                .map(|code| code == 0),
        };
        match ok {
            Some(true) => RunStatus::Success,
            Some(false) => RunStatus::Failure,
            None => RunStatus::Unknown,
        }
    }
}
