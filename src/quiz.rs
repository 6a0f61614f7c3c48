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

use crate::classify::split_basic_line;
use crate::types::quiz_item::QuizItem;
use crate::types::quiz_item::QuizKind;

/// Placeholder shown in place of a cloze blank.
const BLANK_PLACEHOLDER: &str = "[...]";

/// Separator between answers when a line has several blanks.
const ANSWER_SEPARATOR: &str = ", ";

/// Minimum trimmed length for a multiline question line.
const MIN_MULTILINE_QUESTION_CHARS: usize = 4;

/// Minimum trimmed length for a cloze display question. The placeholder
/// alone is five characters, so a line that is nothing but a blank can
/// never pass.
const MIN_CLOZE_QUESTION_CHARS: usize = 6;

/// Common authoring-tool template variables that look like cloze blanks.
const TEMPLATE_VARS: [&str; 9] = [
    "date",
    "time",
    "title",
    "today",
    "tomorrow",
    "yesterday",
    "now",
    "datetime",
    "timestamp",
];

/// A cloze blank: a highlighted span, an Anki-style deletion, or a
/// double-brace span. Alternation order gives the Anki form priority over
/// the generic brace form.
static CLOZE_BLANK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"==([^=\n]+)==|\{\{c\d+::([^{}]+)\}\}|\{\{([^{}]+)\}\}")
        .expect("valid regex literal")
});

static HORIZONTAL_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$").expect("valid regex literal")
});

static NUMBERED_LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)][ \t]").expect("valid regex literal"));

/// Extracts displayable quiz items from a cleaned note. The cleaned text is
/// scanned as-is; the original text is only consulted for line-number
/// resolution.
pub fn extract_quiz_items(
    cleaned: &str,
    original: &str,
    source_name: &str,
    source_path: &str,
) -> Vec<QuizItem> {
    let mut extractor = Extractor {
        original,
        source_name,
        source_path,
        items: Vec::new(),
    };
    extractor.extract_basic(cleaned);
    extractor.extract_multiline(cleaned);
    extractor.extract_cloze(cleaned);
    extractor.items
}

struct Extractor<'a> {
    original: &'a str,
    source_name: &'a str,
    source_path: &'a str,
    items: Vec<QuizItem>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Marker {
    Single,
    Double,
}

impl Extractor<'_> {
    fn extract_basic(&mut self, cleaned: &str) {
        for line in cleaned.lines() {
            if let Some((question, answer)) = split_basic_line(line) {
                self.push(
                    QuizKind::Basic,
                    question.trim(),
                    answer.trim(),
                    Some(line.trim().to_string()),
                    question,
                );
            }
        }
    }

    fn extract_multiline(&mut self, cleaned: &str) {
        let lines: Vec<&str> = cleaned.lines().collect();
        for index in 0..lines.len() {
            let marker = match marker_kind(lines[index]) {
                Some(marker) => marker,
                None => continue,
            };
            if index == 0 {
                continue;
            }
            let question = lines[index - 1].trim();
            if question.chars().count() < MIN_MULTILINE_QUESTION_CHARS {
                continue;
            }
            let mut start = index + 1;
            // The double marker tolerates one blank line before the answer.
            if marker == Marker::Double && start < lines.len() && lines[start].trim().is_empty() {
                start += 1;
            }
            let mut end = start;
            while end < lines.len() {
                if HORIZONTAL_RULE.is_match(lines[end]) {
                    break;
                }
                // Only the single marker treats a blank line as the end of
                // the answer; the double marker runs to the next rule.
                if marker == Marker::Single && lines[end].trim().is_empty() {
                    break;
                }
                end += 1;
            }
            let answer = lines[start..end].join("\n").trim().to_string();
            if marker == Marker::Double && answer.is_empty() {
                continue;
            }
            let block = lines[index - 1..end].join("\n");
            self.push(
                QuizKind::Multiline,
                question,
                &answer,
                Some(block),
                question,
            );
        }
    }

    fn extract_cloze(&mut self, cleaned: &str) {
        for line in cleaned.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_heading(trimmed) || is_list_item(trimmed) {
                continue;
            }
            let mut question = String::new();
            let mut answers: Vec<String> = Vec::new();
            let mut cursor = 0;
            for caps in CLOZE_BLANK.captures_iter(line) {
                let whole = caps.get(0).unwrap();
                let answer = if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
                    Some(m.as_str())
                } else if let Some(m) = caps.get(3) {
                    let standalone = trimmed == whole.as_str();
                    if is_template_placeholder(m.as_str().trim(), standalone) {
                        None
                    } else {
                        Some(m.as_str())
                    }
                } else {
                    None
                };
                question.push_str(&line[cursor..whole.start()]);
                match answer {
                    Some(text) => {
                        answers.push(text.trim().to_string());
                        question.push_str(BLANK_PLACEHOLDER);
                    }
                    None => question.push_str(whole.as_str()),
                }
                cursor = whole.end();
            }
            question.push_str(&line[cursor..]);
            if answers.is_empty() {
                continue;
            }
            let question = question.trim();
            if question.chars().count() < MIN_CLOZE_QUESTION_CHARS {
                continue;
            }
            self.push(
                QuizKind::Cloze,
                question,
                &answers.join(ANSWER_SEPARATOR),
                Some(trimmed.to_string()),
                line,
            );
        }
    }

    fn push(
        &mut self,
        kind: QuizKind,
        question: &str,
        answer: &str,
        raw_source: Option<String>,
        search_key: &str,
    ) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }
        let raw_source = raw_source.filter(|raw| raw.trim() != question);
        self.items.push(QuizItem {
            question: question.to_string(),
            answer: answer.trim().to_string(),
            raw_source,
            source_name: self.source_name.to_string(),
            source_path: self.source_path.to_string(),
            kind,
            line_number: find_line_number(self.original, search_key),
        });
    }
}

fn marker_kind(line: &str) -> Option<Marker> {
    let trimmed = line.trim();
    let trimmed = match trimmed.strip_prefix('>') {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    };
    match trimmed {
        "?" => Some(Marker::Single),
        "??" => Some(Marker::Double),
        _ => None,
    }
}

fn is_heading(trimmed: &str) -> bool {
    trimmed.starts_with('#')
}

fn is_list_item(trimmed: &str) -> bool {
    trimmed.starts_with("- ")
        || trimmed.starts_with("* ")
        || trimmed.starts_with("+ ")
        || NUMBERED_LIST_ITEM.is_match(trimmed)
}

fn is_template_placeholder(content: &str, standalone: bool) -> bool {
    let lowered = content.to_ascii_lowercase();
    if TEMPLATE_VARS.contains(&lowered.as_str()) {
        return true;
    }
    // A colon inside a generic brace span is template syntax, not a blank.
    if content.contains(':') {
        return true;
    }
    // A bare lowercase word standing alone on its line is a placeholder.
    standalone
        && !content.is_empty()
        && content.len() <= 10
        && content.chars().all(|c| c.is_ascii_lowercase())
}

/// Resolves the 1-indexed line of the first line of `search` within the
/// original note. Keys shorter than three trimmed characters are too
/// ambiguous to look up.
fn find_line_number(original: &str, search: &str) -> Option<usize> {
    let needle = search.lines().next().unwrap_or("").trim();
    if needle.chars().count() < 3 {
        return None;
    }
    let position = original.find(needle)?;
    Some(1 + original[..position].matches('\n').count())
}
