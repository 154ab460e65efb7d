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

//! Human-readable labels for tool configurations.
//!
//! Labels are markdown table cells, so pipes are escaped.

use std::borrow::Cow;

/// Known configuration keys and their labels.
const TOOL_LABELS: &[(&str, &str)] = &[
    ("rsync_default", "rsync -a"),
    ("rsync_compress", "rsync -az (compressed)"),
    ("rsync_checksum", "rsync -a --checksum"),
    ("tar_plain", r"tar \| ssh (no compression)"),
    ("tar_gzip", r"tar -cz \| ssh (gzip)"),
    ("tar_zstd", r"tar --zstd \| ssh (zstd)"),
];

/// Label for a configuration key. Unknown keys are quoted verbatim.
pub fn tool_label(key: &str) -> Cow<'static, str> {
    TOOL_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| Cow::Borrowed(*label))
        .unwrap_or_else(|| Cow::Owned(format!("`{}`", key)))
}

/// Notes column for a configuration.
pub fn tool_note(key: &str, has_throughput: bool) -> &'static str {
    let key = key.to_ascii_lowercase();
    if key.contains("checksum") {
        "CPU-intensive verification"
    } else if has_throughput && ["compress", "gzip", "zstd"].iter().any(|m| key.contains(m)) {
        "Good for compressible data"
    } else {
        ""
    }
}
