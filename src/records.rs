//! Output record shapes for the three split tables.
//!
//! Field order in each struct is the column order of the written file, and
//! serde renames carry the historical output spellings (`mortage`,
//! `previous_campaing_contacts`, ...). Passthrough values stay as the source
//! text; `None` is written as an empty field.

use std::borrow::Cow;

use serde::Serialize;

/// Anything that can be deduplicated by client.
pub trait Keyed {
    fn client_id(&self) -> &str;

    /// Identity used for deduplication; see [`client_key`].
    fn dedupe_key(&self) -> Cow<'_, str> {
        client_key(self.client_id())
    }
}

/// Integer ids compare by value, so `42`, ` 42` and `042` are one client.
/// Anything else compares by its trimmed text.
pub fn client_key(id: &str) -> Cow<'_, str> {
    let trimmed = id.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value.to_string() != trimmed => Cow::Owned(value.to_string()),
        _ => Cow::Borrowed(trimmed),
    }
}

/// A record type that owns one output file.
pub trait OutputTable: Keyed + Serialize {
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    pub client_id: String,
    pub age: Option<String>,
    pub job: Option<String>,
    pub marital: Option<String>,
    pub education: Option<String>,
    pub credit_default: u8,
    #[serde(rename = "mortage")]
    pub mortgage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignRecord {
    pub client_id: String,
    pub number_contacts: Option<String>,
    pub contact_duration: Option<String>,
    #[serde(rename = "previous_campaing_contacts")]
    pub previous_campaign_contacts: Option<String>,
    pub previous_outcome: u8,
    pub campaign_outcome: u8,
    pub last_contact_day: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EconomicsRecord {
    pub client_id: String,
    #[serde(rename = "const_price_idx")]
    pub cons_price_idx: Option<String>,
    #[serde(rename = "eurobor_three_months")]
    pub euribor_three_months: Option<String>,
}

impl Keyed for ClientRecord {
    fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl Keyed for CampaignRecord {
    fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl Keyed for EconomicsRecord {
    fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl OutputTable for ClientRecord {
    const FILE_NAME: &'static str = "client.csv";
    const HEADERS: &'static [&'static str] = &[
        "client_id",
        "age",
        "job",
        "marital",
        "education",
        "credit_default",
        "mortage",
    ];
}

impl OutputTable for CampaignRecord {
    const FILE_NAME: &'static str = "campaign.csv";
    const HEADERS: &'static [&'static str] = &[
        "client_id",
        "number_contacts",
        "contact_duration",
        "previous_campaing_contacts",
        "previous_outcome",
        "campaign_outcome",
        "last_contact_day",
    ];
}

impl OutputTable for EconomicsRecord {
    const FILE_NAME: &'static str = "economics.csv";
    const HEADERS: &'static [&'static str] =
        &["client_id", "const_price_idx", "eurobor_three_months"];
}
