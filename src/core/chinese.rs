//! Keeping the Simplified and Traditional Chinese files in step.
//!
//! Each file receives the keys only the other one has, then every value is
//! converted to the file's own script.

use zhconv::{Variant, zhconv};

use super::{LocaleFile, SyncEvent, SyncOutcome};

/// Simplified file name in the locales directory.
pub const SIMPLIFIED_FILE: &str = "zh-cn.json";
/// Traditional file name in the locales directory.
pub const TRADITIONAL_FILE: &str = "zh-tw.json";

/// Fixups applied after conversion, for terms the converter renders in an
/// unwanted variant.
const REPLACEMENTS: &[(&str, &str)] = &[("幺", "么"), ("控制檯", "控制台"), ("主控臺", "主控台")];

pub trait ChineseConverter {
    fn to_simplified(&self, text: &str) -> String;
    fn to_traditional(&self, text: &str) -> String;
}

/// Dictionary-based conversion with Taiwan conventions for Traditional.
pub struct ZhConverter;

impl ChineseConverter for ZhConverter {
    fn to_simplified(&self, text: &str) -> String {
        zhconv(text, Variant::ZhCN)
    }

    fn to_traditional(&self, text: &str) -> String {
        zhconv(text, Variant::ZhTW)
    }
}

fn apply_replacements(text: String) -> String {
    REPLACEMENTS
        .iter()
        .fold(text, |text, (from, to)| text.replace(from, to))
}

fn add_missing(file: &mut LocaleFile, other: &[(String, String)]) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();
    for (key, value) in other {
        if !file.contains(key) {
            file.insert(key.clone(), value.clone());
            outcome.record(SyncEvent::Added {
                key: key.clone(),
                translated: false,
            });
        }
    }
    outcome
}

fn convert_values(file: &mut LocaleFile, convert: impl Fn(&str) -> String) {
    let converted: Vec<(String, String)> = file
        .iter()
        .map(|(key, value)| (key.to_string(), apply_replacements(convert(value))))
        .collect();
    for (key, value) in converted {
        file.insert(key, value);
    }
}

fn snapshot(file: &LocaleFile) -> Vec<(String, String)> {
    file.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Fill each file with the other's missing keys and convert every value.
///
/// Keys are copied from the files as they were before conversion. Existing
/// keys keep their position; copied keys are appended in the other file's
/// order. Returns the outcomes for the simplified and traditional files.
pub fn cross_fill(
    simplified: &mut LocaleFile,
    traditional: &mut LocaleFile,
    converter: &dyn ChineseConverter,
) -> (SyncOutcome, SyncOutcome) {
    let simplified_before = snapshot(simplified);
    let traditional_before = snapshot(traditional);

    let simplified_outcome = add_missing(simplified, &traditional_before);
    let traditional_outcome = add_missing(traditional, &simplified_before);

    convert_values(simplified, |text| converter.to_simplified(text));
    convert_values(traditional, |text| converter.to_traditional(text));

    (simplified_outcome, traditional_outcome)
}
