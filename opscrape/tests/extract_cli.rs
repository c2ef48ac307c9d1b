use std::fs;
use std::path::Path;

fn instruction_page(rows: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><body>
<table class="wikitable">
<tbody><tr><th>Flags affected</th></tr></tbody>
<tbody><tr><th>Addressing Mode</th><th>Opcode</th><th>Bytes</th><th>Cycles</th></tr></tbody>
<tbody>
{}
</tbody>
</table>
</body></html>"#,
        rows
    )
}

fn write_page(dir: &Path, op: &str, rows: &str) {
    fs::write(dir.join(format!("{}.html", op)), instruction_page(rows)).unwrap();
}

#[test]
fn extract_cached_pages() {
    let dir = tempfile::tempdir().unwrap();
    write_page(
        dir.path(),
        "ADC",
        r#"<tr><td>Immediate</td><td>69</td><td>2</td><td>2 cycles</td></tr>
<tr><td>Absolute</td><td>6D</td><td>3 bytes</td><td>4 cycles</td></tr>"#,
    );
    write_page(
        dir.path(),
        "MVN",
        r#"<tr><td>Block Move</td><td>54</td><td>3 bytes</td><td>7 cycles per byte moved</td></tr>"#,
    );

    assert_cli::Assert::main_binary()
        .with_args(&["extract", "--cache-dir", dir.path().to_str().unwrap()])
        .stdout()
        .contains(
            r#"m.insert(0x69, OpCode::new(0x69, "ADC", (2, 2), (2, 2), CycleCalcMode::None, AddressingMode::)); // "Immediate""#,
        )
        .stdout()
        .contains(
            r#"m.insert(0x6d, OpCode::new(0x6d, "ADC", (3, 4), (3, 4), CycleCalcMode::None, AddressingMode::Absolute));"#,
        )
        .stdout()
        .contains(r#"m.insert(0x54, OpCode::new(0x54, "MVN", (3, 7), (3, 7), CycleCalcMode::None, AddressingMode::));"#)
        .stdout()
        .contains(r#"// "Block Move" => (unassigned)"#)
        .stdout()
        .contains("// opcodes covered: 3/256")
        .unwrap();
}

#[test]
fn extract_fails_on_malformed_byte_count() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path(), "ADC", r#"<tr><td>Immediate</td><td>69</td><td>abc bytes</td><td>2 cycles</td></tr>"#);

    assert_cli::Assert::main_binary()
        .with_args(&["extract", "--cache-dir", dir.path().to_str().unwrap()])
        .fails()
        .and()
        .stderr()
        .contains("abc bytes")
        .unwrap();
}
