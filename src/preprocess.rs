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

use std::sync::LazyLock;

use regex::Regex;

/// A front matter block at the very start of the note: a `---` line, the
/// metadata, and a closing `---` line.
static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A---[ \t]*\r?\n.*?^---[ \t]*(\r?\n|\z)").expect("valid regex literal")
});

/// A fenced code block, including the backtick lines.
static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex literal"));

/// An inline code span. Confined to a single line so that a stray backtick
/// cannot swallow surrounding text.
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`\n]+`").expect("valid regex literal"));

/// Strips the regions of a note that never carry cards: the front matter
/// block, fenced code blocks, and inline code spans. An unterminated fence
/// is left in place rather than risking deleting content after it.
pub fn clean(content: &str) -> String {
    let text = FRONT_MATTER.replace(content, "");
    let text = FENCED_CODE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_front_matter() {
        let content = "---\ndate: 2026-01-01\ntags: [notes]\n---\nQ1::A1\n";
        assert_eq!(clean(content), "Q1::A1\n");
    }

    #[test]
    fn test_front_matter_only_at_start() {
        let content = "First line.\n---\ndate: x\n---\n";
        assert_eq!(clean(content), content);
    }

    #[test]
    fn test_unterminated_front_matter_kept() {
        let content = "---\ndate: x\nQ1::A1\n";
        assert_eq!(clean(content), content);
    }

    #[test]
    fn test_strip_fenced_code() {
        let content = "before\n```rust\nlet x = 1;\n```\nafter\n";
        assert_eq!(clean(content), "before\n\nafter\n");
    }

    #[test]
    fn test_unterminated_fence_kept() {
        let content = "before\n```\ncode without end\n";
        assert_eq!(clean(content), content);
    }

    #[test]
    fn test_strip_inline_code() {
        let content = "the `foo::bar` function\n";
        assert_eq!(clean(content), "the  function\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean(""), "");
    }
}
