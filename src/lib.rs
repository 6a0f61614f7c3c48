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

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod preprocess;
pub mod quiz;
pub mod scan;
pub mod schedule;
pub mod snapshot;
pub mod types;

pub use config::SnapshotConfig;
pub use snapshot::MemorySnapshot;
pub use snapshot::build_snapshot;
pub use types::document::NoteDocument;
