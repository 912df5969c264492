//! Cross-source accumulation and client-level deduplication.
//!
//! An [`Aggregator`] is created at the start of a run, absorbs each source's
//! partial tables in processing order, and is consumed by [`Aggregator::finish`]
//! which performs the single deduplication pass.

use std::collections::HashMap;

use itertools::Itertools;
use log::{info, warn};

use crate::{
    cli::DedupeStrategy,
    error::SplitError,
    records::{CampaignRecord, ClientRecord, EconomicsRecord, Keyed},
    report::{RunReport, SourceOutcome, SourceStatus},
    transform::TransformedSource,
};

/// Append-only buffer of one record type.
#[derive(Debug, Clone)]
pub struct Accumulator<T> {
    rows: Vec<T>,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Keyed> Accumulator<T> {
    pub fn append(&mut self, rows: Vec<T>) {
        self.rows.extend(rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Leaves exactly one record per client, compared by
    /// [`Keyed::dedupe_key`]. Survivors keep the position of the occurrence
    /// that was kept.
    pub fn finalize(self, strategy: DedupeStrategy) -> Vec<T> {
        match strategy {
            DedupeStrategy::First => self
                .rows
                .into_iter()
                .unique_by(|row| row.dedupe_key().into_owned())
                .collect(),
            DedupeStrategy::Last => {
                let last_seen: HashMap<String, usize> = self
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(idx, row)| (row.dedupe_key().into_owned(), idx))
                    .collect();
                self.rows
                    .into_iter()
                    .enumerate()
                    .filter(|(idx, row)| last_seen.get(row.dedupe_key().as_ref()) == Some(idx))
                    .map(|(_, row)| row)
                    .collect()
            }
        }
    }
}

/// The three finished tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitTables {
    pub clients: Vec<ClientRecord>,
    pub campaigns: Vec<CampaignRecord>,
    pub economics: Vec<EconomicsRecord>,
}

#[derive(Debug, Default)]
pub struct Aggregator {
    clients: Accumulator<ClientRecord>,
    campaigns: Accumulator<CampaignRecord>,
    economics: Accumulator<EconomicsRecord>,
    outcomes: Vec<SourceOutcome>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in one source's result. A failed source contributes no rows and
    /// is recorded as skipped.
    pub fn absorb(&mut self, name: &str, result: Result<TransformedSource, SplitError>) {
        match result {
            Ok(part) => self.append(part),
            Err(SplitError::MalformedSource { reason, .. }) => self.skip(name, reason),
            Err(err) => self.skip(name, err.to_string()),
        }
    }

    pub fn append(&mut self, part: TransformedSource) {
        let status = SourceStatus::Loaded {
            rows_read: part.rows_read,
            clients: part.clients.len(),
            campaigns: part.campaigns.len(),
            economics: part.economics.len(),
            invalid_dates: part.invalid_dates,
            missing_campaign_column: part.missing_campaign_column,
        };
        self.clients.append(part.clients);
        self.campaigns.append(part.campaigns);
        self.economics.append(part.economics);
        self.outcomes.push(SourceOutcome {
            name: part.name,
            status,
        });
    }

    pub fn skip(&mut self, name: &str, reason: String) {
        warn!("Skipping '{name}': {reason}");
        self.outcomes.push(SourceOutcome {
            name: name.to_string(),
            status: SourceStatus::Skipped { reason },
        });
    }

    pub fn loaded_sources(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn finish(self, strategy: DedupeStrategy) -> (SplitTables, RunReport) {
        let appended = (
            self.clients.len(),
            self.campaigns.len(),
            self.economics.len(),
        );
        let tables = SplitTables {
            clients: self.clients.finalize(strategy),
            campaigns: self.campaigns.finalize(strategy),
            economics: self.economics.finalize(strategy),
        };
        info!(
            "Deduplicated clients {} -> {}, campaign {} -> {}, economics {} -> {}",
            appended.0,
            tables.clients.len(),
            appended.1,
            tables.campaigns.len(),
            appended.2,
            tables.economics.len()
        );
        let report = RunReport {
            sources: self.outcomes,
            client_rows: tables.clients.len(),
            campaign_rows: tables.campaigns.len(),
            economics_rows: tables.economics.len(),
        };
        (tables, report)
    }
}
