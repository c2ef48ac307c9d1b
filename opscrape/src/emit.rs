use std::fmt::Write;

use crate::extract::OpcodeEntry;

/// One line for the emulator's opcode table, like
///
/// ```text
/// m.insert(0x6d, OpCode::new(0x6d, "ADC", (3, 4), (3, 4), CycleCalcMode::None, AddressingMode::Absolute));
/// ```
///
/// The pairs are (bytes, cycles), native mode first. Entries without an addressing mode identifier
/// keep the dangling `AddressingMode::` and get the raw label appended as a comment.
pub fn snippet(entry: &OpcodeEntry) -> String {
    let calc: &'static str = entry.cycle_calc_mode().into();
    let mut s = String::new();
    write!(
        &mut s,
        r#"m.insert(0x{op:02x}, OpCode::new(0x{op:02x}, "{name}", ({nb}, {nc}), ({eb}, {ec}), CycleCalcMode::{calc}, AddressingMode::{mode}));"#,
        op = entry.opcode,
        name = entry.mnemonic,
        nb = entry.native.bytes,
        nc = entry.native.cycles,
        eb = entry.emulation.bytes,
        ec = entry.emulation.cycles,
        calc = calc,
        mode = entry.symbol(),
    )
    .unwrap();
    if entry.symbol().is_empty() {
        write!(&mut s, " // {:?}", entry.label).unwrap();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::descriptor::ClockCount;
    use crate::extract::modes::{AddressingMode, ModeLookup};
    use crate::extract::Sizing;

    fn entry(label: &str, mode: ModeLookup, conditional: bool) -> OpcodeEntry {
        OpcodeEntry {
            mnemonic: "LDA".into(),
            opcode: 0x0a,
            label: label.to_owned(),
            mode,
            native: Sizing { bytes: 3, cycles: 5 },
            emulation: Sizing { bytes: 2, cycles: 5 },
            clocks: ClockCount { emulation: 5, native: 5, conditional, per_byte_moved: false },
        }
    }

    #[test]
    fn test_snippet() {
        let e = entry("Absolute Indexed by X", ModeLookup::Symbol(AddressingMode::Absolute_Indexed_by_X), true);
        assert_eq!(
            snippet(&e),
            r#"m.insert(0x0a, OpCode::new(0x0a, "LDA", (3, 5), (2, 5), CycleCalcMode::Page, AddressingMode::Absolute_Indexed_by_X));"#
        );
    }

    #[test]
    fn test_snippet_without_symbol() {
        let e = entry("Stack (Push)", ModeLookup::Unassigned, false);
        assert_eq!(
            snippet(&e),
            r#"m.insert(0x0a, OpCode::new(0x0a, "LDA", (3, 5), (2, 5), CycleCalcMode::None, AddressingMode::)); // "Stack (Push)""#
        );
        let e = entry("Stack (Push)[2]", ModeLookup::Missing, false);
        assert!(snippet(&e).ends_with(r#"AddressingMode::)); // "Stack (Push)[2]""#));
    }
}
