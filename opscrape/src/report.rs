use enum_map::EnumMap;
use std::collections::BTreeMap;
use std::io::{self, Write};
use tracing::warn;

use crate::extract::modes::{AddressingMode, ModeLookup};
use crate::extract::OpcodeEntry;

/// Distinct raw addressing mode labels seen during a run, used to keep the label table complete.
#[derive(Debug, Default)]
pub struct LabelSummary {
    labels: BTreeMap<String, ModeLookup>,
}

impl LabelSummary {
    pub fn record(&mut self, entry: &OpcodeEntry) {
        self.labels.entry(entry.label.clone()).or_insert(entry.mode);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().filter(|(_, l)| **l == ModeLookup::Missing).map(|(label, _)| label.as_str())
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "// addressing modes seen: {}", self.labels.len())?;
        for (label, lookup) in &self.labels {
            match lookup {
                ModeLookup::Symbol(mode) => writeln!(out, "// {:?} => {}", label, mode.symbol())?,
                ModeLookup::Unassigned => writeln!(out, "// {:?} => (unassigned)", label)?,
                ModeLookup::Missing => writeln!(out, "// {:?} => (missing from table)", label)?,
            }
        }
        Ok(())
    }
}

/// Extracted entries keyed by opcode. The first entry for an opcode wins.
#[derive(Debug, Default)]
pub struct OpcodeTable {
    entries: BTreeMap<u8, OpcodeEntry>,
    duplicates: Vec<OpcodeEntry>,
}

impl OpcodeTable {
    /// Returns false if the opcode was already taken.
    pub fn insert(&mut self, entry: OpcodeEntry) -> bool {
        if let Some(first) = self.entries.get(&entry.opcode) {
            let opcode = format!("0x{:02x}", entry.opcode);
            warn!(
                opcode = %opcode,
                first = %first.mnemonic,
                again = %entry.mnemonic,
                "duplicate opcode"
            );
            self.duplicates.push(entry);
            return false;
        }
        self.entries.insert(entry.opcode, entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn duplicates(&self) -> &[OpcodeEntry] {
        &self.duplicates
    }

    pub fn missing(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|op| !self.entries.contains_key(op)).collect()
    }

    /// Entries per mapped addressing mode, plus the number without an identifier.
    pub fn mode_counts(&self) -> (EnumMap<AddressingMode, usize>, usize) {
        let mut counts: EnumMap<AddressingMode, usize> = EnumMap::default();
        let mut unassigned = 0;
        for entry in self.entries.values() {
            match entry.mode.mode() {
                Some(mode) => counts[mode] += 1,
                None => unassigned += 1,
            }
        }
        (counts, unassigned)
    }

    pub fn write_coverage<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "// opcodes covered: {}/256", self.entries.len())?;

        let missing = self.missing();
        if !missing.is_empty() {
            let missing: Vec<_> = missing.iter().map(|op| format!("{:02x}", op)).collect();
            writeln!(out, "// missing opcodes: {}", missing.join(" "))?;
        }
        for dup in self.duplicates() {
            writeln!(out, "// duplicate opcode 0x{:02x} from {} ({:?})", dup.opcode, dup.mnemonic, dup.label)?;
        }

        let (counts, unassigned) = self.mode_counts();
        for (mode, n) in counts.iter() {
            if *n > 0 {
                writeln!(out, "// {:>4} {}", n, mode.symbol())?;
            }
        }
        if unassigned > 0 {
            writeln!(out, "// {:>4} without addressing mode", unassigned)?;
        }
        Ok(())
    }
}
