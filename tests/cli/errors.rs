use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr};

#[test]
fn test_missing_json_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("index.html", r#"<p data-i18n="greeting">Hi</p>"#)?;

    let output = test.run(&["de", "--auto-add"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[ERR] JSON file 'de.json' not found."));

    Ok(())
}

#[test]
fn test_missing_directory() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["fr", "-d", "nowhere"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Directory 'nowhere' not found."));

    Ok(())
}

#[test]
fn test_invalid_json_aborts_without_writing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("index.html", r#"<p data-i18n="greeting">Hi</p>"#)?;
    test.write_file("locales/fr.json", "{ \"broken\": ")?;

    let output = test.run(&["fr", "--auto-add"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid localization file"));
    assert_eq!(test.read_file("locales/fr.json")?, "{ \"broken\": ");

    Ok(())
}

#[test]
fn test_invalid_file_aborts_all_files_mode_before_writing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("index.html", r#"<p data-i18n="greeting">Hi</p>"#)?;
    test.write_file("locales/de.json", "{}")?;
    test.write_file("locales/fr.json", r#"{"nested": {"a": "b"}}"#)?;

    let output = test.run(&["--auto-add"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("value of \"nested\" is not a string"));
    assert_eq!(test.read_file("locales/de.json")?, "{}");

    Ok(())
}

#[test]
fn test_unknown_argument() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["--auto-everything"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--auto-everything"));

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".locsyncrc.json", r#"{"ignores": ["[oops"]}"#)?;
    test.write_file("locales/fr.json", "{}")?;

    let output = test.run(&["fr"])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_unparseable_script_blocks_removal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("index.html", r#"<p data-i18n="greeting">Hi</p>"#)?;
    test.write_file("scripts/broken.js", "const label = t`Kept`;\nfunction (")?;
    test.write_file("locales/fr.json", r#"{"greeting": "Salut", "Kept": "Gardé"}"#)?;

    let output = test.run(&["fr", "--auto-remove"])?;

    assert!(output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("Skipping unparseable file"));
    assert!(stderr.contains("Not removing keys: 1 source paths could not be scanned"));
    assert_eq!(
        test.read_file("locales/fr.json")?,
        "{\n    \"greeting\": \"Salut\",\n    \"Kept\": \"Gardé\"\n}\n"
    );

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_blocks_removal() -> Result<()> {
    use std::{fs, os::unix::fs::PermissionsExt};

    let test = CliTest::new()?;
    test.write_file("index.html", r#"<p data-i18n="greeting">Hi</p>"#)?;
    test.write_file("private/panel.html", r#"<p data-i18n="panel">Panel</p>"#)?;
    test.write_file("locales/fr.json", r#"{"greeting": "Salut", "panel": "Panneau"}"#)?;

    let private = test.project_dir.join("private");
    fs::set_permissions(&private, fs::Permissions::from_mode(0o000))?;
    if fs::read_dir(&private).is_ok() {
        // Privileged users can still read it.
        fs::set_permissions(&private, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let output = test.run(&["fr", "--auto-remove"])?;
    fs::set_permissions(&private, fs::Permissions::from_mode(0o755))?;

    assert!(output.status.success());
    let stderr = stderr(&output);
    assert!(stderr.contains("warning: Cannot access path"));
    assert!(stderr.contains("Not removing keys"));
    assert!(test.read_file("locales/fr.json")?.contains("\"panel\": \"Panneau\""));

    Ok(())
}
