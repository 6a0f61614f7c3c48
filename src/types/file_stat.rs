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

use serde::Serialize;

/// Per-note rollup, computed once per snapshot build and discarded after.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStat {
    pub name: String,
    pub path: String,
    pub folder: String,
    /// All classified cards in this note.
    pub card_count: usize,
    /// Due scheduling tokens in this note. Counted per token, so a note of
    /// reverse cards can report up to twice its card count.
    pub due_count: usize,
    /// Mean ease over the note's parseable scheduling tokens, or the
    /// neutral default when none parse.
    pub average_ease: u32,
}
