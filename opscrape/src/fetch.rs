use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::io::Write;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::cache::{CacheDir, Mnemonic};
use crate::error::{Result, ScrapeError};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    static ref WIKITABLE: Selector = Selector::parse(".wikitable").unwrap();
    static ref CELL_LINK: Selector = Selector::parse("td > a").unwrap();
}

pub trait PageSource {
    fn get(&mut self, url: &Url) -> Result<String>;
}

/// Blocking, one request at a time, no timeout and no retry.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(HttpSource { client })
    }
}

impl PageSource for HttpSource {
    fn get(&mut self, url: &Url) -> Result<String> {
        self.client
            .get(url.clone())
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|source| ScrapeError::Http { url: url.to_string(), source })
    }
}

/// `href`s of the links in the cells of the index page's opcode matrix, each once, in document order.
pub fn detail_links(index_html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(index_html);
    let table = doc
        .select(&WIKITABLE)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement { page: "index".to_owned(), selector: ".wikitable" })?;
    let mut seen = HashSet::new();
    let links = table
        .select(&CELL_LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| seen.insert(*href))
        .map(str::to_owned)
        .collect();
    Ok(links)
}

/// `/wiki/ADC` => `ADC`
pub fn mnemonic_of_link(href: &str) -> Result<Mnemonic> {
    match href.split('/').nth(2) {
        Some(seg) if !seg.is_empty() => Ok(seg.into()),
        _ => Err(ScrapeError::NoIdentifier { href: href.to_owned() }),
    }
}

/// Caches every page linked from the index. Prints the link list to `out`; pages written before a
/// failure stay in the cache.
pub fn run<S: PageSource, W: Write>(
    source: &mut S,
    index: &Url,
    cache: &CacheDir,
    out: &mut W,
) -> Result<Vec<Mnemonic>> {
    info!(url = %index, "fetching index");
    let links = detail_links(&source.get(index)?)?;
    writeln!(out, "{:?}", links).map_err(ScrapeError::Output)?;

    let mut stored = HashSet::new();
    let mut mnemonics = Vec::with_capacity(links.len());
    for href in &links {
        info!("fetch {}", href);
        let mnemonic = mnemonic_of_link(href)?;
        let url = index.join(href).map_err(|source| ScrapeError::Url {
            base: index.to_string(),
            href: href.clone(),
            source,
        })?;
        let html = source.get(&url)?;
        if !stored.insert(mnemonic.clone()) {
            warn!(op = %mnemonic, href = %href, "overwriting page cached earlier in this run");
        }
        cache.store(&mnemonic, &html)?;
        mnemonics.push(mnemonic);
    }
    Ok(mnemonics)
}
