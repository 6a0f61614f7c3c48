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

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Basic,
    Cloze,
    Multiline,
}

impl QuizKind {
    pub fn as_str(&self) -> &str {
        match self {
            QuizKind::Basic => "basic",
            QuizKind::Cloze => "cloze",
            QuizKind::Multiline => "multiline",
        }
    }
}

impl Display for QuizKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One displayable question drawn from a note.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    /// The display text, with cloze deletions replaced by a placeholder.
    pub question: String,
    /// The answer; multiple cloze blanks are joined into one string.
    pub answer: String,
    /// The unmodified source line or block, when distinct from the question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_source: Option<String>,
    /// The name of the note this item came from.
    pub source_name: String,
    /// The path of the note this item came from.
    pub source_path: String,
    pub kind: QuizKind,
    /// Best-effort 1-indexed location in the original note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}
