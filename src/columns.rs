//! Column aliasing for campaign source files.
//!
//! Exports from the campaign system disagree on a handful of column names
//! (`mortgage` vs `mortage`, `cons_price_idx` vs `const_price_idx`, ...).
//! Each [`Field`] lists every spelling it accepts; a [`ColumnMap`] resolves
//! them against a header row once, so the transformer only ever deals in
//! canonical fields.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ClientId,
    Age,
    Job,
    Marital,
    Education,
    CreditDefault,
    Mortgage,
    NumberContacts,
    ContactDuration,
    PreviousCampaignContacts,
    PreviousOutcome,
    CampaignOutcome,
    Day,
    Month,
    ConsPriceIdx,
    EuriborThreeMonths,
}

impl Field {
    pub const COUNT: usize = 16;

    pub const ALL: [Field; Field::COUNT] = [
        Field::ClientId,
        Field::Age,
        Field::Job,
        Field::Marital,
        Field::Education,
        Field::CreditDefault,
        Field::Mortgage,
        Field::NumberContacts,
        Field::ContactDuration,
        Field::PreviousCampaignContacts,
        Field::PreviousOutcome,
        Field::CampaignOutcome,
        Field::Day,
        Field::Month,
        Field::ConsPriceIdx,
        Field::EuriborThreeMonths,
    ];

    pub fn canonical_name(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted header spellings, preferred spelling first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::ClientId => &["client_id"],
            Field::Age => &["age"],
            Field::Job => &["job"],
            Field::Marital => &["marital"],
            Field::Education => &["education"],
            Field::CreditDefault => &["credit_default"],
            Field::Mortgage => &["mortgage", "mortage"],
            Field::NumberContacts => &["number_contacts"],
            Field::ContactDuration => &["contact_duration"],
            Field::PreviousCampaignContacts => {
                &["previous_campaign_contacts", "previous_campaing_contacts"]
            }
            Field::PreviousOutcome => &["previous_outcome"],
            Field::CampaignOutcome => &["campaign_outcome"],
            Field::Day => &["day"],
            Field::Month => &["month"],
            Field::ConsPriceIdx => &["cons_price_idx", "const_price_idx"],
            Field::EuriborThreeMonths => &["euribor_three_months", "eurobor_three_months"],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Positions of each canonical field within one source's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [Option<usize>; Field::COUNT],
}

impl ColumnMap {
    /// Resolves every field against `headers`. When a header appears twice the
    /// left-most copy is used; when several spellings of one field are present
    /// the preferred spelling wins.
    pub fn resolve(headers: &[String]) -> Self {
        let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            by_name.entry(header.as_str()).or_insert(idx);
        }
        let mut positions = [None; Field::COUNT];
        for field in Field::ALL {
            positions[field.slot()] = field
                .aliases()
                .iter()
                .find_map(|alias| by_name.get(alias).copied());
        }
        ColumnMap { positions }
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions[field.slot()]
    }

    pub fn contains(&self, field: Field) -> bool {
        self.position(field).is_some()
    }

    /// Value of `field` in `row`; absent columns and empty cells both read as `None`.
    pub fn get<'a>(&self, row: &'a [String], field: Field) -> Option<&'a str> {
        self.position(field)
            .and_then(|idx| row.get(idx))
            .map(|value| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn missing<'a>(&self, fields: &'a [Field]) -> impl Iterator<Item = Field> + 'a {
        let positions = self.positions;
        fields
            .iter()
            .copied()
            .filter(move |field| positions[field.slot()].is_none())
    }
}
