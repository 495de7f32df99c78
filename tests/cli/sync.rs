use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

/// A small site: one page, one script bound to the i18n module.
fn setup_site(test: &CliTest) -> Result<()> {
    test.write_file(
        "index.html",
        r#"<!DOCTYPE html>
<html>
<body>
    <h1 data-i18n="greeting"></h1>
</body>
</html>
"#,
    )?;
    test.write_file(
        "scripts/main.js",
        r#"import { t } from './i18n.js';

export function leave(name) {
    alert(t("farewell"));
    // Dynamic keys are invisible to extraction
    console.log(t(`bye.${name}`));
}
"#,
    )
}

#[test]
fn test_auto_add_uses_discovery_order() -> Result<()> {
    let test = CliTest::new()?;
    setup_site(&test)?;
    test.write_file("locales/fr.json", "{}")?;

    let output = test.run(&["fr", "--auto-add"])?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("locales/fr.json")?,
        "{\n    \"greeting\": \"\",\n    \"farewell\": \"\"\n}\n"
    );
    assert_snapshot!(stdout(&output), @r"
    [FIL] fr
    [ NF] greeting
    [ADD] greeting
    [ NF] farewell
    [ADD] farewell
    [SUM] fr | NF:2 ADD:2 EXT:0 DEL:0 SKP:0 | ./locales/fr.json
    [TOT] NF:2 ADD:2 EXT:0 DEL:0 SKP:0 ERR:0
    [ OK] Done!
    ");

    Ok(())
}

#[test]
fn test_auto_remove_drops_unreferenced_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("index.html", r#"<p data-i18n="greeting">Hi</p>"#)?;
    test.write_file(
        "locales/fr.json",
        r#"{"greeting": "Salut", "obsolete": "X"}"#,
    )?;

    let output = test.run(&["fr", "--auto-remove"])?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("locales/fr.json")?,
        "{\n    \"greeting\": \"Salut\"\n}\n"
    );
    assert!(stdout(&output).contains("[EXT] obsolete\n[DEL] obsolete\n"));

    Ok(())
}

#[test]
fn test_without_flags_only_reports() -> Result<()> {
    let test = CliTest::new()?;
    setup_site(&test)?;
    test.write_file("locales/fr.json", r#"{"farewell":"Adieu","old":"Vieux"}"#)?;

    let output = test.run(&["fr"])?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("locales/fr.json")?,
        "{\n    \"farewell\": \"Adieu\",\n    \"old\": \"Vieux\"\n}\n"
    );
    let out = stdout(&output);
    assert!(out.contains("[ NF] greeting"));
    assert!(out.contains("[EXT] old"));
    assert!(!out.contains("[ADD]"));
    assert!(!out.contains("[DEL]"));

    Ok(())
}

#[test]
fn test_add_and_remove_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    setup_site(&test)?;
    test.write_file(
        "locales/de.json",
        r#"{"stale": "Alt", "farewell": "Tschüss"}"#,
    )?;

    let args = ["de", "--auto-add", "--auto-remove"];
    assert!(test.run(&args)?.status.success());
    let first = test.read_file("locales/de.json")?;
    let second_run = test.run(&args)?;
    let second = test.read_file("locales/de.json")?;

    assert_eq!(first, second);
    assert_eq!(
        first,
        "{\n    \"farewell\": \"Tschüss\",\n    \"greeting\": \"\"\n}\n"
    );
    assert!(stdout(&second_run).contains("NF:0 ADD:0 EXT:0 DEL:0"));

    Ok(())
}

#[test]
fn test_sort_keys_is_stable() -> Result<()> {
    let test = CliTest::new()?;
    setup_site(&test)?;
    test.write_file(
        "locales/fr.json",
        r#"{"zzz": "kept", "farewell": "Adieu", "aaa": "also kept", "greeting": "Bonjour"}"#,
    )?;

    assert!(test.run(&["fr", "--sort-keys"])?.status.success());
    let once = test.read_file("locales/fr.json")?;
    assert!(test.run(&["fr", "--sort-keys"])?.status.success());
    let twice = test.read_file("locales/fr.json")?;

    assert_eq!(once, twice);
    assert_eq!(
        once,
        "{\n    \"greeting\": \"Bonjour\",\n    \"farewell\": \"Adieu\",\n    \"zzz\": \"kept\",\n    \"aaa\": \"also kept\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_all_locale_files_are_processed() -> Result<()> {
    let test = CliTest::new()?;
    setup_site(&test)?;
    test.write_file("locales/en.json", r#"{"untouched": "yes"}"#)?;
    test.write_file("locales/lang.json", r#"[{"lang": "fr"}]"#)?;
    test.write_file("locales/fr.json", "{}")?;
    test.write_file("locales/ja.json", "{}")?;

    let output = test.run(&["--auto-add"])?;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("[RUN] Updating all JSON files...\n"));
    assert!(out.contains("[TOT] FILES:2 NF:4 ADD:4"));
    assert_eq!(test.read_file("locales/en.json")?, r#"{"untouched": "yes"}"#);
    assert_eq!(test.read_file("locales/lang.json")?, r#"[{"lang": "fr"}]"#);
    assert!(test.read_file("locales/ja.json")?.contains("\"greeting\": \"\""));

    Ok(())
}

#[test]
fn test_directory_option_and_explicit_path() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("public/index.html", r#"<b data-i18n="title">Title</b>"#)?;
    test.write_file("public/node_modules/lib/index.html", r#"<b data-i18n="vendor">V</b>"#)?;
    test.write_file("i18n/it.json", "{}")?;

    let output = test.run(&["i18n/it.json", "-d", "public/locales", "--auto-add"])?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("i18n/it.json")?,
        "{\n    \"title\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_fill_with_defaults_from_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locsyncrc.json", r#"{"fillWithDefaults": true}"#)?;
    test.write_file(
        "index.html",
        r#"<input data-i18n="[placeholder]search" placeholder="Search..."><span data-i18n="Close">Close</span>"#,
    )?;
    test.write_file("locales/en.json", "{}")?;

    let output = test.run(&["en", "--auto-add"])?;

    assert!(output.status.success());
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n    \"search\": \"Search...\",\n    \"Close\": \"Close\"\n}\n"
    );

    Ok(())
}
