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

/// One candidate note, as supplied by the enumerating caller.
#[derive(Clone, Debug)]
pub struct NoteDocument {
    /// The vault-relative path to the note.
    pub path: String,
    /// The note's display name (usually the file stem).
    pub name: String,
    /// The folder the note lives in, empty for the vault root.
    pub folder: String,
    /// The raw text of the note.
    pub content: String,
}

impl NoteDocument {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        folder: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            folder: folder.into(),
            content: content.into(),
        }
    }
}
