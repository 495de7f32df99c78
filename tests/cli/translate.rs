use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_translation_failure_is_not_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("index.html", r#"<h1 data-i18n="greeting">Hello</h1>"#)?;
    test.write_file("locales/fr.json", r#"{"existing": "Valeur"}"#)?;

    let output = test
        .command()
        .args(["fr", "--auto-add", "--auto-translate"])
        .env("LOCSYNC_TRANSLATE_ENDPOINT", "http://127.0.0.1:9/translate")
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("locales/fr.json")?,
        "{\n    \"existing\": \"Valeur\",\n    \"greeting\": \"\"\n}\n"
    );
    assert!(stderr(&output).contains("[ERR] Failed to translate 'greeting'"));
    let out = stdout(&output);
    assert!(out.contains("[SKP] Untranslated: greeting"));
    assert!(out.contains("SKP:1 ERR:1"));

    Ok(())
}

#[test]
fn test_translate_endpoint_flag_overrides_env() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("index.html", r#"<h1 data-i18n="greeting">Hello</h1>"#)?;
    test.write_file("locales/fr.json", "{}")?;

    let output = test
        .command()
        .args([
            "fr",
            "--auto-add",
            "--auto-translate",
            "--translate-endpoint",
            "http://127.0.0.1:9/other",
        ])
        .env("LOCSYNC_TRANSLATE_ENDPOINT", "not a url")
        .output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("Failed to translate 'greeting'"));
    assert_eq!(
        test.read_file("locales/fr.json")?,
        "{\n    \"greeting\": \"\"\n}\n"
    );

    Ok(())
}
