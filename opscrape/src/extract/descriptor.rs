use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("malformed byte count {0:?}")]
    ByteCount(String),
    #[error("malformed clock count {0:?}")]
    ClockCount(String),
}

const PER_BYTE_MOVED: &str = " per byte moved";

lazy_static! {
    // like 1 byte, 2 bytes, 2/3 bytes
    static ref BYTE_COUNT_RE: Regex = Regex::new(r"^([1-9])(?:/([1-9]) bytes| bytes?)?$").unwrap();
    // like 2 cycles, 2 cycles*
    static ref CLOCK_COUNT_RE: Regex = Regex::new(r"^([1-9]) cycles(\*)?$").unwrap();
}

/// Returns `(emulation, native)`.
pub fn parse_byte_count(text: &str) -> Result<(u8, u8), DescriptorError> {
    let caps = BYTE_COUNT_RE.captures(text).ok_or_else(|| DescriptorError::ByteCount(text.to_owned()))?;
    let emulation = digit(caps.get(1).map(|m| m.as_str()));
    let native = caps.get(2).map(|m| digit(Some(m.as_str()))).unwrap_or(emulation);
    Ok((emulation, native))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockCount {
    pub emulation: u8,
    pub native: u8,
    /// `*`: more cycles depending on flags, page crossing or branch taken
    pub conditional: bool,
    pub per_byte_moved: bool,
}

impl ClockCount {
    pub fn pair(&self) -> (u8, u8) {
        (self.emulation, self.native)
    }
}

pub fn parse_clock_count(text: &str) -> Result<ClockCount, DescriptorError> {
    let (stripped, per_byte_moved) = match text.strip_suffix(PER_BYTE_MOVED) {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    let caps =
        CLOCK_COUNT_RE.captures(stripped).ok_or_else(|| DescriptorError::ClockCount(text.to_owned()))?;
    // clock tables don't distinguish the modes
    let cycles = digit(caps.get(1).map(|m| m.as_str()));
    Ok(ClockCount { emulation: cycles, native: cycles, conditional: caps.get(2).is_some(), per_byte_moved })
}

// the regexes only capture [1-9]
fn digit(s: Option<&str>) -> u8 {
    s.and_then(|s| s.bytes().next()).map(|b| b - b'0').unwrap_or_default()
}
