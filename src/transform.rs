//! Derivation of the client, campaign, and economics facets from one source.

use log::{debug, info};

use crate::{
    clean,
    columns::Field,
    error::SplitError,
    records::{CampaignRecord, ClientRecord, EconomicsRecord},
    source::SourceTable,
};

/// Columns the campaign facet cannot be built without.
pub const CAMPAIGN_REQUIRED: &[Field] = &[Field::Day, Field::Month];

/// The three partial tables contributed by one source, in source-row order.
#[derive(Debug, Clone, Default)]
pub struct TransformedSource {
    pub name: String,
    pub rows_read: usize,
    pub clients: Vec<ClientRecord>,
    pub campaigns: Vec<CampaignRecord>,
    pub economics: Vec<EconomicsRecord>,
    /// First campaign column absent from the source, when the facet was skipped.
    pub missing_campaign_column: Option<&'static str>,
    /// Campaign rows dropped because their contact date was unusable.
    pub invalid_dates: usize,
    /// Rows dropped from every facet for lacking a client id.
    pub rows_without_id: usize,
}

pub fn transform(table: &SourceTable) -> Result<TransformedSource, SplitError> {
    let columns = &table.columns;
    if !columns.contains(Field::ClientId) {
        return Err(SplitError::MissingRequiredColumn {
            source_name: table.name.clone(),
            column: Field::ClientId.canonical_name(),
        });
    }

    let missing_campaign_column = columns
        .missing(CAMPAIGN_REQUIRED)
        .next()
        .map(Field::canonical_name);
    if let Some(column) = missing_campaign_column {
        info!(
            "'{}' has no '{}' column; skipping its campaign rows",
            table.name, column
        );
    }

    let mut out = TransformedSource {
        name: table.name.clone(),
        rows_read: table.row_count(),
        missing_campaign_column,
        ..TransformedSource::default()
    };
    out.clients.reserve(table.row_count());
    out.economics.reserve(table.row_count());

    for (row_idx, row) in table.rows.iter().enumerate() {
        let Some(client_id) = columns
            .get(row, Field::ClientId)
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            out.rows_without_id += 1;
            continue;
        };
        let text = |field: Field| columns.get(row, field).map(str::to_string);

        out.clients.push(ClientRecord {
            client_id: client_id.to_string(),
            age: text(Field::Age),
            job: clean::clean_job(columns.get(row, Field::Job)),
            marital: text(Field::Marital),
            education: clean::clean_education(columns.get(row, Field::Education)),
            credit_default: clean::yes_flag(columns.get(row, Field::CreditDefault)),
            mortgage: clean::yes_flag(columns.get(row, Field::Mortgage)),
        });

        if missing_campaign_column.is_none() {
            match clean::contact_date(
                columns.get(row, Field::Month),
                columns.get(row, Field::Day),
            ) {
                Ok(last_contact_day) => out.campaigns.push(CampaignRecord {
                    client_id: client_id.to_string(),
                    number_contacts: text(Field::NumberContacts),
                    contact_duration: text(Field::ContactDuration),
                    previous_campaign_contacts: text(Field::PreviousCampaignContacts),
                    previous_outcome: clean::success_flag(
                        columns.get(row, Field::PreviousOutcome),
                    ),
                    campaign_outcome: clean::yes_flag(columns.get(row, Field::CampaignOutcome)),
                    last_contact_day,
                }),
                Err(err) => {
                    debug!("'{}' row {}: {err}", table.name, row_idx + 2);
                    out.invalid_dates += 1;
                }
            }
        }

        out.economics.push(EconomicsRecord {
            client_id: client_id.to_string(),
            cons_price_idx: text(Field::ConsPriceIdx),
            euribor_three_months: text(Field::EuriborThreeMonths),
        });
    }

    if out.invalid_dates > 0 {
        info!(
            "Dropped {} campaign row(s) with unusable dates from '{}'",
            out.invalid_dates, table.name
        );
    }
    Ok(out)
}
