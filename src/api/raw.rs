//! Wire records as returned by the REST Countries API.
//!
//! Only `name` and `flags` are required. Everything else may be absent or
//! `null` and is defaulted during the transform.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    pub name: RawName,
    pub flags: RawFlags,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub tld: Option<Vec<String>>,
    #[serde(default)]
    pub currencies: Option<Ordered<RawCurrency>>,
    #[serde(default)]
    pub languages: Option<Ordered<String>>,
    #[serde(default)]
    pub borders: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawName {
    pub common: String,
    #[serde(default)]
    pub official: Option<String>,
    #[serde(default, rename = "nativeName")]
    pub native_name: Option<Ordered<RawNativeName>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNativeName {
    #[serde(default)]
    pub official: Option<String>,
    #[serde(default)]
    pub common: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFlags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrency {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Record shape of the name-only endpoints (`/alpha`, `/name/{q}?fields=name`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawNameOnly {
    pub name: RawName,
}

/// A JSON object decoded as key/value pairs in document order.
///
/// `nativeName`, `currencies` and `languages` are objects keyed by ISO codes;
/// their first entry matters, so the order the server wrote them in is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordered<T>(pub Vec<(String, T)>);

impl<T> Ordered<T> {
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<&T> {
        self.0.first().map(|(_, v)| v)
    }
}

impl<T> Default for Ordered<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Ordered<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedVisitor<T> {
            type Value = Ordered<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}
