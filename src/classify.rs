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

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Mutually-exclusive card counts for one note.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardKindCounts {
    pub single_normal: usize,
    pub single_reverse: usize,
    pub multiline_normal: usize,
    pub multiline_reverse: usize,
    pub cloze: usize,
}

impl CardKindCounts {
    /// Total retrievable cards in the note. Reverse cards are reviewed in
    /// both directions and count twice.
    pub fn total(&self) -> usize {
        self.single_normal
            + self.multiline_normal
            + self.cloze
            + 2 * self.multiline_reverse
            + 2 * self.single_reverse
    }

    pub fn add(&mut self, other: &CardKindCounts) {
        self.single_normal += other.single_normal;
        self.single_reverse += other.single_reverse;
        self.multiline_normal += other.multiline_normal;
        self.multiline_reverse += other.multiline_reverse;
        self.cloze += other.cloze;
    }

    fn slot(&mut self, kind: StageKind) -> &mut usize {
        match kind {
            StageKind::BasicLine | StageKind::InlineBasic => &mut self.single_normal,
            StageKind::MultilineReverse => &mut self.multiline_reverse,
            StageKind::MultilineNormal => &mut self.multiline_normal,
            StageKind::SingleReverse => &mut self.single_reverse,
            StageKind::ClozeLine => &mut self.cloze,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum StageKind {
    BasicLine,
    MultilineReverse,
    MultilineNormal,
    SingleReverse,
    InlineBasic,
    ClozeLine,
}

/// One classification stage: a matcher plus the counter it feeds.
struct Stage {
    kind: StageKind,
    matcher: fn(&str) -> Vec<Range<usize>>,
}

/// The stages, in priority order. Each stage counts its matches and deletes
/// them from the working buffer, so a span claimed by an earlier stage can
/// never be re-counted by a later one.
const STAGES: [Stage; 6] = [
    Stage {
        kind: StageKind::BasicLine,
        matcher: match_basic_lines,
    },
    Stage {
        kind: StageKind::MultilineReverse,
        matcher: match_multiline_reverse,
    },
    Stage {
        kind: StageKind::MultilineNormal,
        matcher: match_multiline_normal,
    },
    Stage {
        kind: StageKind::SingleReverse,
        matcher: match_single_reverse,
    },
    Stage {
        kind: StageKind::InlineBasic,
        matcher: match_inline_basic,
    },
    Stage {
        kind: StageKind::ClozeLine,
        matcher: match_cloze_lines,
    },
];

/// Classifies the cards in a cleaned note. The input is copied into a
/// private working buffer; the caller's text is never mutated.
pub fn classify(cleaned: &str) -> CardKindCounts {
    let mut buffer = cleaned.to_string();
    let mut counts = CardKindCounts::default();
    for stage in &STAGES {
        let spans = (stage.matcher)(&buffer);
        if spans.is_empty() {
            continue;
        }
        *counts.slot(stage.kind) += spans.len();
        buffer = remove_spans(&buffer, &spans);
    }
    counts
}

/// A line containing only `??`, optionally inside a blockquote.
static MULTILINE_REVERSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:>[ \t]*)?\?\?[ \t]*$").expect("valid regex literal")
});

/// A line containing only `?`, optionally inside a blockquote.
static MULTILINE_NORMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:>[ \t]*)?\?[ \t]*$").expect("valid regex literal")
});

/// A highlighted span within a line.
static CLOZE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"==[^=\n]+==").expect("valid regex literal"));

fn match_basic_lines(buffer: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    for (offset, line) in line_spans(buffer) {
        if split_basic_line(line).is_some() {
            spans.push(offset..offset + line.len());
        }
    }
    spans
}

fn match_multiline_reverse(buffer: &str) -> Vec<Range<usize>> {
    MULTILINE_REVERSE
        .find_iter(buffer)
        .map(|m| m.range())
        .collect()
}

fn match_multiline_normal(buffer: &str) -> Vec<Range<usize>> {
    MULTILINE_NORMAL
        .find_iter(buffer)
        .map(|m| m.range())
        .collect()
}

fn match_single_reverse(buffer: &str) -> Vec<Range<usize>> {
    colon_run_spans(buffer, 3)
}

fn match_inline_basic(buffer: &str) -> Vec<Range<usize>> {
    colon_run_spans(buffer, 2)
}

/// Cloze matches are counted per line, not per span: a line with several
/// highlights is still one card.
fn match_cloze_lines(buffer: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    for (offset, line) in line_spans(buffer) {
        if CLOZE_SPAN.is_match(line) {
            spans.push(offset..offset + line.len());
        }
    }
    spans
}

/// Splits a `question::answer` line on a colon run of exactly two. A longer
/// run (`:::` and beyond) does not qualify, which leaves reverse separators
/// for the later stages.
pub(crate) fn split_basic_line(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b':' {
            let start = index;
            while index < bytes.len() && bytes[index] == b':' {
                index += 1;
            }
            if index - start == 2 {
                let question = &line[..start];
                let answer = &line[index..];
                if !question.trim().is_empty() && !answer.trim().is_empty() {
                    return Some((question, answer));
                }
            }
        } else {
            index += 1;
        }
    }
    None
}

/// Maximal colon runs of exactly the given length. Run-length classification
/// is equivalent to the "no adjacent extra colons" rule.
fn colon_run_spans(buffer: &str, length: usize) -> Vec<Range<usize>> {
    let bytes = buffer.as_bytes();
    let mut spans = Vec::new();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b':' {
            let start = index;
            while index < bytes.len() && bytes[index] == b':' {
                index += 1;
            }
            if index - start == length {
                spans.push(start..index);
            }
        } else {
            index += 1;
        }
    }
    spans
}

/// Lines of the buffer with their byte offsets.
fn line_spans(buffer: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (index, byte) in buffer.bytes().enumerate() {
        if byte == b'\n' {
            lines.push((start, &buffer[start..index]));
            start = index + 1;
        }
    }
    if start < buffer.len() {
        lines.push((start, &buffer[start..]));
    }
    lines
}

/// Deletes a sorted, non-overlapping set of spans from the buffer.
fn remove_spans(buffer: &str, spans: &[Range<usize>]) -> String {
    let mut result = String::with_capacity(buffer.len());
    let mut cursor = 0;
    for span in spans {
        result.push_str(&buffer[cursor..span.start]);
        cursor = span.end;
    }
    result.push_str(&buffer[cursor..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let counts = classify("What is the capital of France?::Paris\n");
        assert_eq!(counts.single_normal, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_multiline_markers() {
        let counts = classify("Question\n?\nAnswer\n\nQuestion\n??\nAnswer\n");
        assert_eq!(counts.multiline_normal, 1);
        assert_eq!(counts.multiline_reverse, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_blockquoted_markers() {
        let counts = classify("> Question\n> ?\n> Answer\n");
        assert_eq!(counts.multiline_normal, 1);
    }

    #[test]
    fn test_reverse_card_weighting() {
        let counts = classify("Question\n??\nAnswer\n\nFront:::Back\n");
        assert_eq!(counts.multiline_reverse, 1);
        assert_eq!(counts.single_reverse, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_single_reverse_not_claimed_by_basic() {
        let counts = classify("Front:::Back\n");
        assert_eq!(counts.single_normal, 0);
        assert_eq!(counts.single_reverse, 1);
    }

    #[test]
    fn test_inline_basic_not_anchored() {
        let counts = classify("::answer only\n");
        assert_eq!(counts.single_normal, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_four_colons_ignored() {
        let counts = classify("a::::b\n");
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_cloze_line_counted_once() {
        let counts = classify("The ==mitochondria== is the ==powerhouse== of the cell\n");
        assert_eq!(counts.cloze, 1);
    }

    #[test]
    fn test_cloze_two_lines() {
        let counts = classify("==one== blank here\nand ==another== there\n");
        assert_eq!(counts.cloze, 2);
    }

    #[test]
    fn test_no_double_counting() {
        // A basic line carrying a highlight is claimed entirely by the
        // basic stage; the cloze stage must not see it again.
        let counts = classify("What is ==this==?::A highlight\n");
        assert_eq!(counts.single_normal, 1);
        assert_eq!(counts.cloze, 0);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_marker_line_inside_basic_not_recounted() {
        let counts = classify("Q::A\n?\n");
        assert_eq!(counts.single_normal, 1);
        assert_eq!(counts.multiline_normal, 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_empty_input() {
        let counts = classify("");
        assert_eq!(counts, CardKindCounts::default());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_split_basic_line() {
        assert_eq!(split_basic_line("a::b"), Some(("a", "b")));
        assert_eq!(split_basic_line("a:::b"), None);
        assert_eq!(split_basic_line("::b"), None);
        assert_eq!(split_basic_line("a::"), None);
        assert_eq!(split_basic_line("a::b::c"), Some(("a", "b::c")));
    }
}
