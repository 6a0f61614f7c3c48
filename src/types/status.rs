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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

/// Categorical health label for the whole vault.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckStatus {
    Empty,
    Backlog,
    Struggling,
    Mastered,
    Healthy,
}

impl DeckStatus {
    /// The status ladder, evaluated strictly in this order: no cards at all,
    /// then a deep due backlog, then low mastery, then high mastery.
    pub fn grade(total: usize, due: usize, mastery_percent: u32) -> Self {
        if total == 0 {
            DeckStatus::Empty
        } else if due > 50 {
            DeckStatus::Backlog
        } else if mastery_percent < 70 {
            DeckStatus::Struggling
        } else if mastery_percent > 90 {
            DeckStatus::Mastered
        } else {
            DeckStatus::Healthy
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeckStatus::Empty => "empty",
            DeckStatus::Backlog => "backlog",
            DeckStatus::Struggling => "struggling",
            DeckStatus::Mastered => "mastered",
            DeckStatus::Healthy => "healthy",
        }
    }
}

impl Display for DeckStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
