use anyhow::Result;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;

use crate::aggregate::StatsSnapshot;
use crate::constants::*;
use crate::record::Record;

/// Quick views over an ordered export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RecordFilter {
    #[default]
    All,
    /// Full access and save mode both set
    Prime,
    FullAccess,
    SaveMode,
}

impl RecordFilter {
    pub fn matches(self, record: &Record) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::Prime => record.prime_candidate,
            RecordFilter::FullAccess => record.full_access.is_yes(),
            RecordFilter::SaveMode => record.save_mode.is_yes(),
        }
    }
}

/// Keep the records passing `filter` with at least `min_currency`, preserving order.
pub fn select<'a>(
    records: &[&'a Record],
    filter: RecordFilter,
    min_currency: u64,
) -> Vec<&'a Record> {
    records
        .iter()
        .copied()
        .filter(|record| filter.matches(record) && record.currency >= min_currency)
        .collect()
}

pub fn format_record_line(record: &Record) -> String {
    let items = if record.item_names.is_empty() {
        NO_ITEMS_LABEL.to_string()
    } else {
        record.item_names.join(", ")
    };

    let mut line = format!(
        "{}:{} | V-Bucks: {} | Skins: {} ({}) | FA: {} | STW: {}",
        record.identity,
        record.secret,
        record.currency,
        record.item_count,
        items,
        record.full_access,
        record.save_mode,
    );

    if record.level > 0 {
        let _ = write!(line, " | Level: {}", record.level);
    }
    if record.last_played != UNKNOWN_LABEL {
        let _ = write!(line, " | Last Played: {}", record.last_played);
    }

    line
}

pub fn render_report(records: &[&Record], generated_at: NaiveDateTime) -> String {
    let mut report = String::new();
    let _ = writeln!(
        report,
        "Generated by {} - {}",
        APP_NAME,
        generated_at.format(REPORT_TIMESTAMP_FORMAT)
    );
    let _ = writeln!(report, "{}", "=".repeat(REPORT_DIVIDER_WIDTH));
    report.push('\n');

    for record in records {
        report.push_str(&format_record_line(record));
        report.push('\n');
    }

    report
}

#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub generated_at: NaiveDateTime,
    pub stats: StatsSnapshot,
    pub records: Vec<&'a Record>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(
        records: Vec<&'a Record>,
        stats: StatsSnapshot,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            generated_at,
            stats,
            records,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
