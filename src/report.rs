//! Per-run bookkeeping and its plain-text rendering.

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Loaded {
        rows_read: usize,
        clients: usize,
        campaigns: usize,
        economics: usize,
        invalid_dates: usize,
        missing_campaign_column: Option<&'static str>,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    pub name: String,
    pub status: SourceStatus,
}

impl SourceOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, SourceStatus::Loaded { .. })
    }
}

/// What a run read, skipped, and wrote. Row counts are after deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sources: Vec<SourceOutcome>,
    pub client_rows: usize,
    pub campaign_rows: usize,
    pub economics_rows: usize,
}

impl RunReport {
    pub fn skipped(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.sources.iter().filter(|outcome| !outcome.is_loaded())
    }
}

const SUMMARY_HEADERS: [&str; 7] = [
    "source", "rows", "client", "campaign", "economics", "bad_dates", "note",
];

pub fn render_summary(report: &RunReport) -> String {
    let mut rows: Vec<Vec<String>> = report
        .sources
        .iter()
        .map(|outcome| match &outcome.status {
            SourceStatus::Loaded {
                rows_read,
                clients,
                campaigns,
                economics,
                invalid_dates,
                missing_campaign_column,
            } => vec![
                outcome.name.clone(),
                rows_read.to_string(),
                clients.to_string(),
                campaigns.to_string(),
                economics.to_string(),
                invalid_dates.to_string(),
                missing_campaign_column
                    .map(|column| format!("no {column} column"))
                    .unwrap_or_default(),
            ],
            SourceStatus::Skipped { reason } => vec![
                outcome.name.clone(),
                "-".into(),
                "-".into(),
                "-".into(),
                "-".into(),
                "-".into(),
                format!("skipped: {reason}"),
            ],
        })
        .collect();
    rows.push(vec![
        "total (deduplicated)".into(),
        String::new(),
        report.client_rows.to_string(),
        report.campaign_rows.to_string(),
        report.economics_rows.to_string(),
        String::new(),
        String::new(),
    ]);
    render_table(&SUMMARY_HEADERS, &rows)
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let header_cells = headers.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&header_cells, &widths));
    let separator = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator, &widths));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let sanitized = value.replace(['\n', '\r', '\t'], " ");
            let padding = width.saturating_sub(sanitized.chars().count());
            format!("{sanitized}{}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}
