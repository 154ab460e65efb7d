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

//! Directory scan: feeds every recognised file through the adapter into a [`ResultStore`].

use crate::config::ReportConfig;
use crate::error::{AdaptError, ReportError, Result};
use crate::ingest::adapter::{adapt_file, Adapted, SystemInfo};
use crate::ingest::schema::{classify, FileKind};
use crate::store::ResultStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Everything read from a results directory.
#[derive(Debug, Default)]
pub struct LoadedResults {
    /// Records grouped by identity.
    pub store: ResultStore,
    /// Host information, if `system_info.json` was present and readable.
    pub system: Option<SystemInfo>,
    /// Network ceiling in Mbps from the reserved ceiling file or the host file.
    pub network_ceiling_mbps: Option<f64>,
    /// JSON files seen during the scan.
    pub json_files: usize,
    /// Files whose names matched a benchmark result convention.
    pub recognized: usize,
    /// Recognised files that were skipped.
    pub failures: Vec<AdaptError>,
}

impl LoadedResults {
    /// Number of result files that produced a record.
    pub fn parsed(&self) -> usize {
        self.store.record_count()
    }
}

/// Checks that `dir` exists and is a directory.
///
/// # Errors
///
/// [`ReportError::DirectoryNotFound`] or [`ReportError::NotADirectory`].
pub fn ensure_results_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(ReportError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(ReportError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Lists candidate files in deterministic (file-name sorted) walk order.
fn collect_json_files(dir: &Path, config: &ReportConfig) -> Vec<PathBuf> {
    let walker = if config.recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    walker
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect()
}

/// Scans `dir` and adapts every recognised file.
///
/// Per-file failures are logged and collected in
/// [`LoadedResults::failures`]; they never abort the scan. The summary file
/// a previous run wrote into the directory is skipped.
///
/// # Errors
///
/// Only directory-level problems are errors; see [`ensure_results_dir`].
pub fn load_results(dir: &Path, config: &ReportConfig) -> Result<LoadedResults> {
    ensure_results_dir(dir)?;

    let summary_path = dir.join(&config.summary_file);
    let mut loaded = LoadedResults::default();
    let mut host_ceiling = None;

    for path in collect_json_files(dir, config) {
        if path == summary_path {
            continue;
        }
        loaded.json_files += 1;

        let is_result = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| matches!(classify(n), FileKind::Result(_)))
            .unwrap_or(false);
        if is_result {
            loaded.recognized += 1;
        }

        match adapt_file(&path, config.max_file_size) {
            Ok(Some(Adapted::Record { identity, record })) => {
                debug!(
                    file = %path.display(),
                    benchmark = %identity,
                    schema = record.schema.as_str(),
                    "loaded"
                );
                loaded.store.add(identity, record);
            }
            Ok(Some(Adapted::SystemInfo(system))) => {
                host_ceiling = system.network_ceiling_mbps;
                loaded.system = Some(system);
            }
            Ok(Some(Adapted::NetworkCeiling(mbps))) => {
                loaded.network_ceiling_mbps = Some(mbps);
            }
            Ok(None) => {
                debug!(file = %path.display(), "not a benchmark result, ignored");
            }
            Err(e) => {
                warn!("{}", e);
                loaded.failures.push(e);
            }
        }
    }

    loaded.network_ceiling_mbps = loaded.network_ceiling_mbps.or(host_ceiling);

    info!(
        files = loaded.json_files,
        recognized = loaded.recognized,
        parsed = loaded.parsed(),
        skipped = loaded.failures.len(),
        groups = loaded.store.len(),
        "scan complete"
    );

    Ok(loaded)
}
