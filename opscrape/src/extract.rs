pub mod descriptor;
pub mod modes;

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use std::io::Write;
use tracing::{info, warn};

use crate::cache::{CacheDir, CachedPage, Mnemonic};
use crate::emit;
use crate::error::{Result, ScrapeError};
use crate::report::{LabelSummary, OpcodeTable};
use descriptor::ClockCount;
use modes::ModeLookup;

lazy_static! {
    static ref WIKITABLE: Selector = Selector::parse(".wikitable").unwrap();
    static ref TBODY: Selector = Selector::parse("tbody").unwrap();
    static ref TR: Selector = Selector::parse("tr").unwrap();
    static ref TD: Selector = Selector::parse("td").unwrap();
}

// the first two sections of an instruction page's table are flags and description
const OPCODE_SECTION: usize = 2;

/// Cell texts of one opcode table row, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeRow {
    pub addressing_mode: String,
    pub opcode: String,
    pub bytes: String,
    pub clocks: String,
}

impl OpcodeRow {
    fn from_element(page: &Mnemonic, row: usize, tr: ElementRef<'_>) -> Result<Self> {
        let mut cells = tr.select(&TD).map(|td| td.text().collect::<String>().trim().to_owned());
        match (cells.next(), cells.next(), cells.next(), cells.next()) {
            (Some(addressing_mode), Some(opcode), Some(bytes), Some(clocks)) => {
                Ok(OpcodeRow { addressing_mode, opcode, bytes, clocks })
            }
            _ => Err(ScrapeError::MissingCells {
                page: page.to_string(),
                row,
                found: tr.select(&TD).count(),
            }),
        }
    }

    pub fn normalize(&self, page: &Mnemonic, row: usize) -> Result<OpcodeEntry> {
        let descriptor_err = |source| ScrapeError::Descriptor { page: page.to_string(), row, source };
        let opcode = u8::from_str_radix(&self.opcode, 16).map_err(|_| ScrapeError::InvalidOpcode {
            page: page.to_string(),
            row,
            text: self.opcode.clone(),
        })?;
        let (emulation_bytes, native_bytes) = descriptor::parse_byte_count(&self.bytes).map_err(descriptor_err)?;
        let clocks = descriptor::parse_clock_count(&self.clocks).map_err(descriptor_err)?;
        Ok(OpcodeEntry {
            mnemonic: page.clone(),
            opcode,
            label: self.addressing_mode.clone(),
            mode: modes::lookup(&self.addressing_mode),
            native: Sizing { bytes: native_bytes, cycles: clocks.native },
            emulation: Sizing { bytes: emulation_bytes, cycles: clocks.emulation },
            clocks,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    pub bytes: u8,
    pub cycles: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub mnemonic: Mnemonic,
    pub opcode: u8,
    /// raw label, as looked up
    pub label: String,
    pub mode: ModeLookup,
    pub native: Sizing,
    pub emulation: Sizing,
    pub clocks: ClockCount,
}

impl OpcodeEntry {
    /// Empty if the label has no identifier yet.
    pub fn symbol(&self) -> &'static str {
        self.mode.symbol()
    }

    pub fn cycle_calc_mode(&self) -> CycleCalcMode {
        match (self.clocks.conditional, self.mode.mode()) {
            (false, _) => CycleCalcMode::None,
            (true, Some(mode)) if mode.is_relative() => CycleCalcMode::Branch,
            (true, _) => CycleCalcMode::Page,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, IntoStaticStr)]
pub enum CycleCalcMode {
    None,
    Page,
    Branch,
}

pub fn parse_rows(page: &Mnemonic, html: &str) -> Result<Vec<OpcodeRow>> {
    let doc = Html::parse_document(html);
    let missing = |selector| ScrapeError::MissingElement { page: page.to_string(), selector };
    let table = doc.select(&WIKITABLE).next().ok_or_else(|| missing(".wikitable"))?;
    let section = table.select(&TBODY).nth(OPCODE_SECTION).ok_or_else(|| missing(".wikitable tbody:nth(3)"))?;
    section.select(&TR).enumerate().map(|(row, tr)| OpcodeRow::from_element(page, row, tr)).collect()
}

pub fn extract_page(page: &CachedPage) -> Result<Vec<OpcodeEntry>> {
    let rows = parse_rows(&page.mnemonic, &page.html)?;
    let mut entries = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        info!(
            op = %page.mnemonic,
            addressing_mode = %row.addressing_mode,
            opcode = %row.opcode,
            bytes = %row.bytes,
            clocks = %row.clocks,
            "row"
        );
        entries.push(row.normalize(&page.mnemonic, i)?);
    }
    Ok(entries)
}

/// Emits one snippet per row of every cached page, then the label summary and the coverage report.
pub fn run<W: Write>(cache: &CacheDir, out: &mut W) -> Result<(LabelSummary, OpcodeTable)> {
    let mut labels = LabelSummary::default();
    let mut table = OpcodeTable::default();

    let pages = cache.load()?;
    if pages.is_empty() {
        warn!(dir = %cache.root().display(), "no cached pages, run fetch first");
    }
    for page in &pages {
        for entry in extract_page(page)? {
            writeln!(out, "{}", emit::snippet(&entry)).map_err(ScrapeError::Output)?;
            labels.record(&entry);
            table.insert(entry);
        }
    }

    labels.write_to(out).map_err(ScrapeError::Output)?;
    table.write_coverage(out).map_err(ScrapeError::Output)?;
    Ok((labels, table))
}
