//! Command-line front end: plain-text rendering of the query layer.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::api::{CountryDetail, InfoItem};
use crate::config::{Config, ConfigStore};
use crate::pagination::Page;
use crate::query::{CountriesApi, QueryResult};
use crate::selectors::RegionSelector;

#[derive(Debug, Parser)]
#[command(name = "countries-explorer", version, about = "Browse country data from the REST Countries API")]
pub struct Cli {
    /// Path to config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List countries, optionally filtered by region and search
    List(ListArgs),
    /// Show the detail page for one country
    Show {
        /// Country name (exact match)
        name: String,
    },
    /// Resolve cca3 codes to country names
    Borders {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Search countries by name fragment
    Search { fragment: String },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Region to list (e.g. europe); all regions when omitted
    #[arg(long)]
    pub region: Option<String>,

    /// Name fragment; results keep the API's relevance order
    #[arg(long)]
    pub search: Option<String>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Items per page (defaults to config)
    #[arg(long)]
    pub per_page: Option<usize>,
}

/// Load config, apply CLI overrides and return the store.
pub fn load_config(cli: &Cli) -> anyhow::Result<ConfigStore> {
    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&path)?;
    let store = ConfigStore::new(config, path);

    if let Some(base_url) = &cli.base_url {
        store.update(|c| c.api.base_url = base_url.clone())?;
    }
    Ok(store)
}

/// Run one command and return the text to print.
pub async fn run(cli: &Cli, config: &Config) -> anyhow::Result<String> {
    let api = CountriesApi::from_config(config)?;
    tracing::debug!(command = ?cli.command, base_url = %api.client().base_url(), "Running command");

    match &cli.command {
        Command::List(args) => list(&api, config, args, cli.json).await,
        Command::Show { name } => {
            let result = api.country(name).settled().await;
            let detail = require(result, &format!("country '{}'", name))?;
            if cli.json {
                return Ok(serde_json::to_string_pretty(&*detail)?);
            }
            let borders = if detail.borders.is_empty() {
                Vec::new()
            } else {
                let result = api.border_countries(&detail.borders).settled().await;
                require(result, "border countries")?.to_vec()
            };
            Ok(render_detail(&detail, &borders)?)
        }
        Command::Borders { codes } => {
            let result = api.border_countries(codes).settled().await;
            let names = require(result, "border countries")?;
            render_names(&names, cli.json)
        }
        Command::Search { fragment } => {
            let mut search = api.lazy_search_country();
            let result = search.trigger_and_wait(fragment).await;
            let names = require(result, &format!("search results for '{}'", fragment))?;
            render_names(&names, cli.json)
        }
    }
}

async fn list(
    api: &CountriesApi,
    config: &Config,
    args: &ListArgs,
    json: bool,
) -> anyhow::Result<String> {
    let countries = api.countries();
    let store = require(countries.settled().await, "countries")?;

    let search_results = match &args.search {
        Some(fragment) => {
            let result = api.search_country(fragment).settled().await;
            Some(require(result, &format!("search results for '{}'", fragment))?)
        }
        None => None,
    };

    let names: Vec<String> = match &args.region {
        Some(region) => RegionSelector::new()
            .select(&store, search_results.as_deref().map(Vec::as_slice), region)
            .to_vec(),
        None => match &search_results {
            Some(found) => found
                .iter()
                .filter(|n| store.select_by_id(n).is_some())
                .cloned()
                .collect(),
            None => store.select_ids().to_vec(),
        },
    };

    let per_page = args.per_page.unwrap_or(config.pagination.items_per_page);
    let page = Page::new(args.page, names.len(), per_page);
    let rows: Vec<_> = page
        .slice(&names)
        .iter()
        .filter_map(|name| store.select_by_id(name))
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut out = String::new();
    for country in &rows {
        writeln!(out, "{}", country.name)?;
        write_info(&mut out, &country.info)?;
        out.push('\n');
    }
    match page.summary() {
        Some(summary) => writeln!(out, "{}", summary)?,
        None => writeln!(out, "No countries found")?,
    }
    writeln!(
        out,
        "[{}] Previous  [{}] Next",
        if page.is_prev_disabled() { " " } else { "<" },
        if page.is_next_disabled() { " " } else { ">" },
    )?;
    Ok(out)
}

fn require<T>(result: QueryResult<T>, what: &str) -> anyhow::Result<std::sync::Arc<T>> {
    match result.data {
        Some(data) if !result.is_error => Ok(data),
        _ => Err(anyhow::anyhow!(
            "Failed to load {}: {}",
            what,
            result.error.unwrap_or_else(|| "no data".to_string())
        )),
    }
}

fn write_info(out: &mut String, info: &[InfoItem]) -> std::fmt::Result {
    for item in info {
        writeln!(out, "  {}: {}", item.label, item.value)?;
    }
    Ok(())
}

pub fn render_detail(
    detail: &CountryDetail,
    border_names: &[String],
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", detail.name)?;
    write_info(&mut out, &detail.info)?;
    if !border_names.is_empty() {
        writeln!(out, "  Border Countries: {}", border_names.join(", "))?;
    }
    Ok(out)
}

fn render_names(names: &[String], json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(names)?);
    }
    Ok(names.iter().map(|n| format!("{}\n", n)).collect())
}
