use std::time::Duration;

use serde_json::Value;

use super::{Translate, TranslateError};

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Blocking client for the public Google Translate endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    endpoint: String,
    source: String,
    agent: ureq::Agent,
}

impl GoogleTranslator {
    pub fn new(endpoint: &str, source: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout(timeout)
            .build();

        Self {
            endpoint: endpoint.to_string(),
            source: source.to_string(),
            agent,
        }
    }
}

impl Translate for GoogleTranslator {
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("client", "gtx")
            .query("sl", &self.source)
            .query("tl", target)
            .query("dt", "t")
            .query("q", text)
            .call()
            .map_err(|err| match err {
                // The endpoint rejects unknown target codes with 400.
                ureq::Error::Status(400, _) => TranslateError::UnsupportedLanguage(target.to_string()),
                ureq::Error::Status(code, response) => {
                    TranslateError::Http(format!("{} {}", code, response.status_text()))
                }
                ureq::Error::Transport(transport) => TranslateError::Http(transport.to_string()),
            })?;

        let body: Value = response
            .into_json()
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;
        parse_response(&body)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body looks like `[[["Bonjour","Hello",null,null,10], ...], null, "en", ...]`.
fn parse_response(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::InvalidResponse(truncate(&body.to_string())))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslateError::InvalidResponse(truncate(&body.to_string())));
    }
    Ok(translated)
}

fn truncate(text: &str) -> String {
    const MAX: usize = 120;
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
