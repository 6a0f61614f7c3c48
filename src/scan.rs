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
use std::time::Instant;

use walkdir::DirEntry;
use walkdir::WalkDir;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::document::NoteDocument;

/// Walks a vault directory and reads every Markdown note into memory.
/// Hidden directories (a host application's own state, usually) are
/// skipped. Entries are visited in file-name order so snapshot tie-breaks
/// are stable across runs.
pub fn scan_vault(directory: &Path) -> Fallible<Vec<NoteDocument>> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    log::debug!("Scanning vault...");
    let start = Instant::now();
    let mut documents = Vec::new();
    let walker = WalkDir::new(directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            let content = read_to_string(path)?;
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string();
            let relative = path.strip_prefix(directory).unwrap_or(path);
            let folder = relative
                .parent()
                .map(|parent| parent.display().to_string())
                .unwrap_or_default();
            documents.push(NoteDocument::new(
                relative.display().to_string(),
                name,
                folder,
                content,
            ));
        }
    }
    let duration = start.elapsed().as_millis();
    log::debug!("Scanned {} notes in {duration}ms.", documents.len());
    Ok(documents)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;
    use std::fs::write;

    use super::*;

    #[test]
    fn test_scan_missing_directory() {
        let result = scan_vault(Path::new("/does/not/exist"));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_reads_markdown_only() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path().join("alpha.md"), "First note::content\n")?;
        write(dir.path().join("notes.txt"), "not a note\n")?;
        let documents = scan_vault(dir.path())?;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].name, "alpha");
        assert_eq!(documents[0].path, "alpha.md");
        assert_eq!(documents[0].folder, "");
        Ok(())
    }

    #[test]
    fn test_scan_records_folder() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        create_dir_all(dir.path().join("trading"))?;
        write(dir.path().join("trading/journal.md"), "entry\n")?;
        let documents = scan_vault(dir.path())?;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].folder, "trading");
        assert_eq!(documents[0].path, "trading/journal.md");
        Ok(())
    }

    #[test]
    fn test_scan_skips_hidden_directories() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        create_dir_all(dir.path().join(".host"))?;
        write(dir.path().join(".host/state.md"), "internal\n")?;
        write(dir.path().join("visible.md"), "note\n")?;
        let documents = scan_vault(dir.path())?;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].name, "visible");
        Ok(())
    }

    #[test]
    fn test_scan_order_is_stable() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path().join("b.md"), "b\n")?;
        write(dir.path().join("a.md"), "a\n")?;
        write(dir.path().join("c.md"), "c\n")?;
        let names: Vec<String> = scan_vault(dir.path())?
            .into_iter()
            .map(|document| document.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        Ok(())
    }
}
