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

use chrono::Duration;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::classify;
use crate::classify::CardKindCounts;
use crate::config::SnapshotConfig;
use crate::preprocess;
use crate::quiz;
use crate::schedule;
use crate::schedule::FORECAST_DAYS;
use crate::schedule::NEUTRAL_EASE;
use crate::types::document::NoteDocument;
use crate::types::file_stat::FileStat;
use crate::types::quiz_item::QuizItem;
use crate::types::status::DeckStatus;

/// One day of the review-load forecast.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBucket {
    pub date_label: String,
    pub count: usize,
}

/// The consolidated memory report for a whole vault. A plain value: the
/// builder retains nothing between calls.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    /// Sum of card counts across all notes.
    pub total: usize,
    /// Sum of due scheduling tokens across all notes. Counted per raw
    /// token, not derived from `total`.
    pub due: usize,
    pub mastery_percent: u32,
    /// Mean ease over every parseable token in the vault.
    pub average_ease: u32,
    /// Always exactly seven buckets, index 0 being today.
    pub load_next7: Vec<LoadBucket>,
    pub total_upcoming_load: usize,
    pub counts_by_kind: CardKindCounts,
    pub status_label: DeckStatus,
    pub quiz_pool: Vec<QuizItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_document: Option<FileStat>,
}

/// Builds a memory snapshot from a set of notes. Pure except for the quiz
/// pool shuffle, which draws from the injected generator.
pub fn build_snapshot<R: Rng>(
    documents: &[NoteDocument],
    config: &SnapshotConfig,
    rng: &mut R,
) -> MemorySnapshot {
    let today = config.reference_date;
    let threshold = config.effective_due_threshold();

    let mut counts_by_kind = CardKindCounts::default();
    let mut total = 0;
    let mut due = 0;
    let mut buckets = [0usize; FORECAST_DAYS];
    let mut ease_sum = 0.0;
    let mut ease_samples = 0;
    let mut stats: Vec<FileStat> = Vec::new();
    let mut pool: Vec<QuizItem> = Vec::new();

    for document in documents {
        let cleaned = preprocess::clean(&document.content);
        let counts = classify::classify(&cleaned);
        let items = quiz::extract_quiz_items(
            &cleaned,
            &document.content,
            &document.name,
            &document.path,
        );
        let scan = schedule::scan_schedule(&document.content, today, threshold);

        counts_by_kind.add(&counts);
        total += counts.total();
        due += scan.due;
        for (bucket, count) in buckets.iter_mut().zip(scan.buckets) {
            *bucket += count;
        }
        ease_sum += scan.ease_sum;
        ease_samples += scan.ease_samples;

        stats.push(FileStat {
            name: document.name.clone(),
            path: document.path.clone(),
            folder: document.folder.clone(),
            card_count: counts.total(),
            due_count: scan.due,
            average_ease: scan.average_ease(),
        });
        pool.extend(items);
    }

    let mastery_percent = mastery_percent(total, due);
    let status_label = DeckStatus::grade(total, due, mastery_percent);
    let focus_document = select_focus(&stats);

    pool.shuffle(rng);
    pool.truncate(config.effective_quiz_cap());

    let load_next7: Vec<LoadBucket> = buckets
        .iter()
        .enumerate()
        .map(|(day, &count)| LoadBucket {
            date_label: (today + Duration::days(day as i64))
                .format("%b %d")
                .to_string(),
            count,
        })
        .collect();
    let total_upcoming_load = buckets.iter().sum();

    let average_ease = if ease_samples == 0 {
        NEUTRAL_EASE
    } else {
        (ease_sum / ease_samples as f64).round() as u32
    };

    MemorySnapshot {
        total,
        due,
        mastery_percent,
        average_ease,
        load_next7,
        total_upcoming_load,
        counts_by_kind,
        status_label,
        quiz_pool: pool,
        focus_document,
    }
}

/// The share of cards not currently due. `due` counts raw tokens while
/// `total` weighs reverse cards double; the two units differ, so the ratio
/// is clamped into [0, 100].
fn mastery_percent(total: usize, due: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = 100.0 * (total as f64 - due as f64) / total as f64;
    percent.round().clamp(0.0, 100.0) as u32
}

/// The note to review next: the hardest-feeling note with due material, or
/// failing that the hardest-feeling note with any cards at all.
fn select_focus(stats: &[FileStat]) -> Option<FileStat> {
    lowest_ease(stats.iter().filter(|stat| stat.due_count > 0))
        .or_else(|| lowest_ease(stats.iter().filter(|stat| stat.card_count > 0)))
        .cloned()
}

/// Minimum by average ease. Ties keep the earliest note.
fn lowest_ease<'a>(stats: impl Iterator<Item = &'a FileStat>) -> Option<&'a FileStat> {
    let mut best: Option<&FileStat> = None;
    for stat in stats {
        let replace = match best {
            None => true,
            Some(current) => stat.average_ease < current.average_ease,
        };
        if replace {
            best = Some(stat);
        }
    }
    best
}
