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

use std::path::PathBuf;

use chrono::Local;
use chrono::NaiveDate;
use clap::Parser;
use rand::thread_rng;

use crate::config::SnapshotConfig;
use crate::config::load_vault_config;
use crate::error::Fallible;
use crate::scan::scan_vault;
use crate::snapshot::build_snapshot;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Scan a vault and print its memory snapshot as JSON.
    Scan {
        /// Optional path to the vault directory.
        directory: Option<String>,
        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// How many days ahead a card still counts as due.
        #[arg(long)]
        due_threshold: Option<i64>,
        /// Upper bound on the quiz pool size.
        #[arg(long)]
        quiz_cap: Option<i64>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Scan {
            directory,
            date,
            due_threshold,
            quiz_cap,
        } => {
            let directory: PathBuf = match directory {
                Some(dir) => PathBuf::from(dir),
                None => std::env::current_dir()?,
            };
            let reference_date = match date {
                Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")?,
                None => Local::now().date_naive(),
            };
            let vault_config = load_vault_config(&directory)?;
            let mut config = SnapshotConfig::new(reference_date);
            // Command-line flags win over the vault file.
            if let Some(days) = due_threshold.or(vault_config.due_threshold_days) {
                config.due_threshold_days = days;
            }
            if let Some(cap) = quiz_cap.or(vault_config.quiz_pool_cap) {
                config.quiz_pool_cap = cap;
            }
            let documents = scan_vault(&directory)?;
            let snapshot = build_snapshot(&documents, &config, &mut thread_rng());
            let json = serde_json::to_string_pretty(&snapshot)?;
            println!("{json}");
            Ok(())
        }
    }
}
