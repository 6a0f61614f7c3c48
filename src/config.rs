// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use chrono::Local;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::Fallible;

/// Quiz pool size when the caller leaves it unset or non-positive.
pub const DEFAULT_QUIZ_POOL_CAP: i64 = 5;

/// Largest permitted quiz pool.
pub const MAX_QUIZ_POOL_CAP: i64 = 50;

/// Largest permitted due threshold, in days.
pub const MAX_DUE_THRESHOLD_DAYS: i64 = 30;

/// Name of the optional per-vault configuration file.
pub const VAULT_CONFIG_FILE: &str = "memoscan.toml";

/// Configuration for one snapshot build. Out-of-range values are coerced to
/// the nearest bound when read, never rejected.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotConfig {
    /// The date "today" is measured against.
    pub reference_date: NaiveDate,
    /// A token this many days out still counts as due.
    pub due_threshold_days: i64,
    /// Upper bound on the quiz pool size.
    pub quiz_pool_cap: i64,
}

impl SnapshotConfig {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            due_threshold_days: 0,
            quiz_pool_cap: DEFAULT_QUIZ_POOL_CAP,
        }
    }

    pub fn effective_due_threshold(&self) -> i64 {
        self.due_threshold_days.clamp(0, MAX_DUE_THRESHOLD_DAYS)
    }

    pub fn effective_quiz_cap(&self) -> usize {
        let cap = if self.quiz_pool_cap <= 0 {
            DEFAULT_QUIZ_POOL_CAP
        } else {
            self.quiz_pool_cap
        };
        cap.clamp(1, MAX_QUIZ_POOL_CAP) as usize
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

/// Optional per-vault settings, read from `memoscan.toml` in the vault root.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct VaultConfigFile {
    pub due_threshold_days: Option<i64>,
    pub quiz_pool_cap: Option<i64>,
}

/// Loads the vault configuration file if one exists. A missing file is not
/// an error; a malformed one is.
pub fn load_vault_config(directory: &Path) -> Fallible<VaultConfigFile> {
    let path = directory.join(VAULT_CONFIG_FILE);
    if !path.exists() {
        return Ok(VaultConfigFile::default());
    }
    let content = read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}
