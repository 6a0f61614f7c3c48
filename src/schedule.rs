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

use chrono::Duration;
use chrono::NaiveDate;
use regex::Regex;

/// Neutral ease used when a note has no parseable ease values. Matches the
/// starting ease of common scheduling engines.
pub const NEUTRAL_EASE: u32 = 250;

/// Number of days covered by the review-load forecast.
pub const FORECAST_DAYS: usize = 7;

/// A review-history token: `!date,interval,ease`.
static REVIEW_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!(\d{4}-\d{2}-\d{2}),(\d+),(\d+(?:\.\d+)?)").expect("valid regex literal")
});

/// Scheduling results for one note. Scanned from the raw text, front matter
/// included, since review tokens often live next to it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScheduleScan {
    /// Number of review tokens found, parseable or not.
    pub reviewed: usize,
    /// Tokens whose date falls on or before the due threshold.
    pub due: usize,
    /// Forecast buckets: index 0 is today and absorbs all overdue load,
    /// indices 1 through 6 are the next six calendar days.
    pub buckets: [usize; FORECAST_DAYS],
    pub ease_sum: f64,
    pub ease_samples: usize,
}

impl ScheduleScan {
    /// Mean ease of the note's tokens, or the neutral default.
    pub fn average_ease(&self) -> u32 {
        if self.ease_samples == 0 {
            NEUTRAL_EASE
        } else {
            (self.ease_sum / self.ease_samples as f64).round() as u32
        }
    }
}

/// Scans the raw text of a note for review tokens. Malformed dates and ease
/// values are skipped, never an error.
pub fn scan_schedule(raw: &str, today: NaiveDate, threshold_days: i64) -> ScheduleScan {
    let mut scan = ScheduleScan::default();
    let due_limit = today + Duration::days(threshold_days);
    for caps in REVIEW_TOKEN.captures_iter(raw) {
        scan.reviewed += 1;
        let ease: Option<f64> = caps[3].parse().ok().filter(|e: &f64| e.is_finite());
        if let Some(ease) = ease {
            scan.ease_sum += ease;
            scan.ease_samples += 1;
        }
        let date = match NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => continue,
        };
        if date <= due_limit {
            scan.due += 1;
        }
        let diff_days = (date - today).num_days();
        if diff_days <= 0 {
            scan.buckets[0] += 1;
        } else if diff_days < FORECAST_DAYS as i64 {
            scan.buckets[diff_days as usize] += 1;
        }
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_token_parsing() {
        let today = day(2026, 1, 20);
        let scan = scan_schedule("<!--SR:!2026-01-20,4,230-->", today, 0);
        assert_eq!(scan.reviewed, 1);
        assert_eq!(scan.due, 1);
        assert_eq!(scan.buckets[0], 1);
        assert_eq!(scan.average_ease(), 230);
    }

    #[test]
    fn test_overdue_absorbed_into_today() {
        let today = day(2026, 1, 20);
        let scan = scan_schedule("!2026-01-10,4,230 !2026-01-20,2,250", today, 0);
        assert_eq!(scan.buckets[0], 2);
        assert_eq!(scan.due, 2);
    }

    #[test]
    fn test_future_buckets() {
        let today = day(2026, 1, 20);
        let content = "!2026-01-21,1,230 !2026-01-26,1,230 !2026-01-27,1,230";
        let scan = scan_schedule(content, today, 0);
        assert_eq!(scan.buckets[1], 1);
        assert_eq!(scan.buckets[6], 1);
        // The 27th is past the forecast window.
        assert_eq!(scan.buckets.iter().sum::<usize>(), 2);
        assert_eq!(scan.due, 0);
        assert_eq!(scan.reviewed, 3);
    }

    #[test]
    fn test_due_threshold() {
        let today = day(2026, 1, 20);
        let scan = scan_schedule("!2026-01-23,1,230", today, 3);
        assert_eq!(scan.due, 1);
        let scan = scan_schedule("!2026-01-24,1,230", today, 3);
        assert_eq!(scan.due, 0);
    }

    #[test]
    fn test_malformed_date_counts_as_reviewed_only() {
        let today = day(2026, 1, 20);
        let scan = scan_schedule("!2026-13-40,1,230", today, 0);
        assert_eq!(scan.reviewed, 1);
        assert_eq!(scan.due, 0);
        assert_eq!(scan.buckets.iter().sum::<usize>(), 0);
        // Ease still contributes.
        assert_eq!(scan.average_ease(), 230);
    }

    #[test]
    fn test_average_ease_default() {
        let today = day(2026, 1, 20);
        let scan = scan_schedule("no tokens here", today, 0);
        assert_eq!(scan.average_ease(), NEUTRAL_EASE);
    }

    #[test]
    fn test_average_ease_rounds() {
        let today = day(2026, 1, 20);
        let scan = scan_schedule("!2026-01-20,1,230 !2026-01-20,1,235", today, 0);
        assert_eq!(scan.average_ease(), 233);
    }

    #[test]
    fn test_fractional_ease() {
        let today = day(2026, 1, 20);
        let scan = scan_schedule("!2026-01-20,1,232.5", today, 0);
        assert_eq!(scan.average_ease(), 233);
    }

    #[test]
    fn test_tokens_in_front_matter_counted() {
        let today = day(2026, 1, 20);
        let content = "---\nsr: \"!2026-01-20,4,230\"\n---\nbody\n";
        let scan = scan_schedule(content, today, 0);
        assert_eq!(scan.reviewed, 1);
    }
}
