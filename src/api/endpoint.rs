//! Endpoint definitions and cache keys.

use std::fmt;

const SUMMARY_FIELDS: &str = "name,flags,population,capital,region";
const DETAIL_FIELDS: &str =
    "name,flags,population,capital,region,subregion,tld,currencies,languages,borders";

/// Named queries against the remote countries API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetCountries,
    GetCountry,
    GetBorderCountries,
    SearchCountry,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::GetCountries => "getCountries",
            Endpoint::GetCountry => "getCountry",
            Endpoint::GetBorderCountries => "getBorderCountries",
            Endpoint::SearchCountry => "searchCountry",
        }
    }

    /// Path and query string relative to the API base URL.
    ///
    /// `arg` is percent-encoded; for [`Endpoint::GetBorderCountries`] it is a
    /// comma-joined code list and each code is encoded separately.
    pub fn path(&self, arg: &str) -> String {
        match self {
            Endpoint::GetCountries => format!("/all?fields={}", SUMMARY_FIELDS),
            Endpoint::GetCountry => format!(
                "/name/{}?fields={}&fullText=true",
                urlencoding::encode(arg),
                DETAIL_FIELDS
            ),
            Endpoint::GetBorderCountries => {
                let codes: Vec<_> = split_codes(arg)
                    .map(|code| urlencoding::encode(code).into_owned())
                    .collect();
                format!("/alpha?codes={}&fields=name", codes.join(","))
            }
            Endpoint::SearchCountry => {
                format!("/name/{}?fields=name", urlencoding::encode(arg))
            }
        }
    }

    /// Whether the endpoint runs under the long-running loading policy.
    pub fn uses_loading_policy(&self) -> bool {
        !matches!(self, Endpoint::GetBorderCountries)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cache key: endpoint plus its (already normalized) argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub endpoint: Endpoint,
    pub arg: String,
}

impl QueryKey {
    pub fn countries() -> Self {
        Self {
            endpoint: Endpoint::GetCountries,
            arg: String::new(),
        }
    }

    pub fn country(id: &str) -> Self {
        Self {
            endpoint: Endpoint::GetCountry,
            arg: id.trim().to_string(),
        }
    }

    /// Border codes are comma-joined in the order given.
    pub fn border_countries<S: AsRef<str>>(codes: &[S]) -> Self {
        let joined: Vec<&str> = codes
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            endpoint: Endpoint::GetBorderCountries,
            arg: joined.join(","),
        }
    }

    pub fn search(fragment: &str) -> Self {
        Self {
            endpoint: Endpoint::SearchCountry,
            arg: fragment.trim().to_string(),
        }
    }

    pub fn path(&self) -> String {
        self.endpoint.path(&self.arg)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.endpoint, self.arg)
    }
}

fn split_codes(arg: &str) -> impl Iterator<Item = &str> {
    arg.split(',').map(str::trim).filter(|c| !c.is_empty())
}
