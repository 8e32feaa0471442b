//! Raw record → view record mapping.

use crate::api::endpoint::Endpoint;
use crate::api::error::ApiError;
use crate::api::models::{CountryDetail, CountrySummary, Flags, InfoItem, PLACEHOLDER};
use crate::api::raw::{RawCountry, RawFlags, RawNameOnly};
use crate::store::EntityStore;

/// Format a population with `,` thousands separators; zero or missing is `N/A`.
pub fn format_population(population: Option<u64>) -> String {
    match population {
        None | Some(0) => PLACEHOLDER.to_string(),
        Some(n) => {
            let digits = n.to_string();
            let mut out = String::with_capacity(digits.len() + digits.len() / 3);
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(ch);
            }
            out
        }
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Join with ", "; only an empty result becomes the placeholder.
fn join_or_placeholder<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values.collect::<Vec<_>>().join(", ");
    or_placeholder(Some(&joined))
}

fn flags(raw: RawFlags) -> Flags {
    Flags {
        png: raw.png,
        svg: raw.svg,
        alt: raw.alt,
    }
}

/// Map one `/all` record into a summary.
pub fn to_summary(raw: RawCountry) -> CountrySummary {
    let region = raw.region.as_deref().unwrap_or_default();
    let info = vec![
        InfoItem::new("Population", format_population(raw.population)),
        InfoItem::new("Region", or_placeholder(Some(region))),
        InfoItem::new(
            "Capital",
            join_or_placeholder(raw.capital.iter().flatten().map(String::as_str)),
        ),
    ];

    CountrySummary {
        region: region.to_lowercase(),
        name: raw.name.common,
        flags: flags(raw.flags),
        info,
    }
}

/// Map the single record of a full-text `/name` lookup into a detail view.
pub fn to_detail(raw: RawCountry) -> CountryDetail {
    let native_name = raw
        .name
        .native_name
        .as_ref()
        .and_then(|names| names.first())
        .and_then(|n| n.official.as_deref());

    let info = vec![
        InfoItem::new("Native Name", or_placeholder(native_name)),
        InfoItem::new("Population", format_population(raw.population)),
        InfoItem::new("Region", or_placeholder(raw.region.as_deref())),
        InfoItem::new("Sub Region", or_placeholder(raw.subregion.as_deref())),
        InfoItem::new(
            "Capital",
            join_or_placeholder(raw.capital.iter().flatten().map(String::as_str)),
        ),
        InfoItem::new(
            "Top Level Domain",
            join_or_placeholder(raw.tld.iter().flatten().map(String::as_str)),
        ),
        InfoItem::new(
            "Currencies",
            join_or_placeholder(
                raw.currencies
                    .iter()
                    .flat_map(|c| c.values())
                    .filter_map(|c| c.name.as_deref()),
            ),
        ),
        InfoItem::new(
            "Languages",
            join_or_placeholder(raw.languages.iter().flat_map(|l| l.values()).map(String::as_str)),
        ),
    ];

    CountryDetail {
        name: raw.name.official.unwrap_or(raw.name.common),
        flags: flags(raw.flags),
        borders: raw.borders.unwrap_or_default(),
        info,
    }
}

fn decode<T: serde::de::DeserializeOwned>(endpoint: Endpoint, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode { endpoint, source })
}

/// Decode an `/all` body and load it into a fresh normalized store.
pub fn countries_response(body: &[u8]) -> Result<EntityStore<CountrySummary>, ApiError> {
    let raw: Vec<RawCountry> = decode(Endpoint::GetCountries, body)?;
    Ok(EntityStore::from_records(raw.into_iter().map(to_summary)))
}

/// Decode a full-text `/name` body; the first record wins.
pub fn country_response(body: &[u8]) -> Result<CountryDetail, ApiError> {
    let raw: Vec<RawCountry> = decode(Endpoint::GetCountry, body)?;
    raw.into_iter()
        .next()
        .map(to_detail)
        .ok_or(ApiError::EmptyResponse {
            endpoint: Endpoint::GetCountry,
        })
}

/// Decode a name-only body (`/alpha`, `/name/{q}?fields=name`) into common names.
pub fn names_response(endpoint: Endpoint, body: &[u8]) -> Result<Vec<String>, ApiError> {
    let raw: Vec<RawNameOnly> = decode(endpoint, body)?;
    Ok(raw.into_iter().map(|r| r.name.common).collect())
}
