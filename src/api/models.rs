use serde::Serialize;

use crate::store::Entity;

/// Placeholder shown for missing or empty values.
pub const PLACEHOLDER: &str = "N/A";

/// One label/value row of a country card or detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoItem {
    pub label: &'static str,
    pub value: String,
}

impl InfoItem {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Flag image references.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Flags {
    pub png: String,
    pub svg: String,
    pub alt: Option<String>,
}

/// List entry for a country, keyed by its common name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySummary {
    pub name: String,
    pub flags: Flags,
    /// Lowercased region, used for filtering.
    pub region: String,
    /// Population, Region, Capital.
    pub info: Vec<InfoItem>,
}

impl CountrySummary {
    /// Look up an info value by label.
    pub fn info_value(&self, label: &str) -> Option<&str> {
        find_info(&self.info, label)
    }
}

impl Entity for CountrySummary {
    fn id(&self) -> &str {
        &self.name
    }
}

/// Full record for a single country page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryDetail {
    /// Official name.
    pub name: String,
    pub flags: Flags,
    /// cca3 codes of neighbouring countries.
    pub borders: Vec<String>,
    /// Native Name, Population, Region, Sub Region, Capital,
    /// Top Level Domain, Currencies, Languages.
    pub info: Vec<InfoItem>,
}

impl CountryDetail {
    pub fn info_value(&self, label: &str) -> Option<&str> {
        find_info(&self.info, label)
    }
}

fn find_info<'a>(info: &'a [InfoItem], label: &str) -> Option<&'a str> {
    info.iter()
        .find(|item| item.label == label)
        .map(|item| item.value.as_str())
}
