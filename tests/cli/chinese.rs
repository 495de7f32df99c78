use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

#[test]
fn test_zh_cross_fill() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/zh-cn.json", r#"{"simplified_only": "简体", "shared": "简体"}"#)?;
    test.write_file("locales/zh-tw.json", r#"{"shared": "簡體", "traditional_only": "繁體"}"#)?;

    let output = test.run(&["--zh-cross-fill"])?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("locales/zh-cn.json")?,
        "{\n    \"simplified_only\": \"简体\",\n    \"shared\": \"简体\",\n    \"traditional_only\": \"繁体\"\n}\n"
    );
    assert_eq!(
        test.read_file("locales/zh-tw.json")?,
        "{\n    \"shared\": \"簡體\",\n    \"traditional_only\": \"繁體\",\n    \"simplified_only\": \"簡體\"\n}\n"
    );
    let stdout = stdout(&output);
    assert!(stdout.contains("[FIL] zh-cn\n[ADD] traditional_only\n"));
    assert!(stdout.contains("[FIL] zh-tw\n[ADD] simplified_only\n"));
    assert!(stdout.contains("[TOT] FILES:2 NF:0 ADD:2 EXT:0 DEL:0 SKP:0 ERR:0"));

    Ok(())
}

#[test]
fn test_zh_cross_fill_rejects_target_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["fr", "--zh-cross-fill"])?;

    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
