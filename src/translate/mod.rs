//! Machine translation of newly added keys.
//!
//! The synchronizer only sees the [`Translate`] trait, so tests can swap the
//! HTTP client for a stub.

mod google;

pub use google::{DEFAULT_ENDPOINT, GoogleTranslator};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("No support for the provided language: {0}")]
    UnsupportedLanguage(String),
    #[error("Translation request failed: {0}")]
    Http(String),
    #[error("Unexpected translation response: {0}")]
    InvalidResponse(String),
}

pub trait Translate {
    /// Translate `text` into the language identified by `target`.
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;
}

/// Target language codes to try for a locale, most specific first.
///
/// `zh-tw` → `zh-tw`, `zh-TW`, `zh`.
pub fn language_candidates(locale: &str) -> Vec<String> {
    let mut candidates = vec![locale.to_string()];
    if let Some((language, region)) = locale.split_once('-') {
        candidates.push(format!("{}-{}", language, region.to_uppercase()));
        candidates.push(language.to_string());
    }
    candidates.dedup();
    candidates
}

/// Translates into one locale, falling back to less specific language codes.
///
/// Once a fallback code has been accepted by the service it is used for all
/// following requests.
pub struct LocaleTranslator<'a> {
    translator: &'a dyn Translate,
    candidates: Vec<String>,
}

impl<'a> LocaleTranslator<'a> {
    pub fn new(translator: &'a dyn Translate, locale: &str) -> Self {
        Self {
            translator,
            candidates: language_candidates(locale),
        }
    }

    /// The language code currently in use.
    pub fn target(&self) -> &str {
        self.candidates.first().map_or("", String::as_str)
    }

    pub fn translate(&mut self, text: &str) -> Result<String, TranslateError> {
        loop {
            match self.translator.translate(text, self.target()) {
                Err(TranslateError::UnsupportedLanguage(_)) if self.candidates.len() > 1 => {
                    self.candidates.remove(0);
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Accepts only the listed language codes and records every request.
    struct Picky {
        supported: Vec<&'static str>,
        requests: RefCell<Vec<String>>,
    }

    impl Translate for Picky {
        fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
            self.requests.borrow_mut().push(target.to_string());
            if self.supported.contains(&target) {
                Ok(format!("{}:{}", target, text))
            } else {
                Err(TranslateError::UnsupportedLanguage(target.to_string()))
            }
        }
    }

    #[test]
    fn test_language_candidates() {
        assert_eq!(language_candidates("fr"), vec!["fr"]);
        assert_eq!(language_candidates("zh-tw"), vec!["zh-tw", "zh-TW", "zh"]);
        assert_eq!(language_candidates("pt-BR"), vec!["pt-BR", "pt"]);
    }

    #[test]
    fn test_falls_back_to_region_code() {
        let picky = Picky {
            supported: vec!["zh-TW"],
            requests: RefCell::new(Vec::new()),
        };
        let mut translator = LocaleTranslator::new(&picky, "zh-tw");

        assert_eq!(translator.translate("Hi").unwrap(), "zh-TW:Hi");
        assert_eq!(translator.translate("Bye").unwrap(), "zh-TW:Bye");
        assert_eq!(*picky.requests.borrow(), vec!["zh-tw", "zh-TW", "zh-TW"]);
    }

    #[test]
    fn test_falls_back_to_bare_language() {
        let picky = Picky {
            supported: vec!["ko"],
            requests: RefCell::new(Vec::new()),
        };
        let mut translator = LocaleTranslator::new(&picky, "ko-kr");

        assert_eq!(translator.translate("Hi").unwrap(), "ko:Hi");
        assert_eq!(translator.target(), "ko");
    }

    #[test]
    fn test_unsupported_everywhere_is_error() {
        let picky = Picky {
            supported: vec![],
            requests: RefCell::new(Vec::new()),
        };
        let mut translator = LocaleTranslator::new(&picky, "xx-yy");

        let err = translator.translate("Hi").unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedLanguage(_)));
        assert_eq!(picky.requests.borrow().len(), 3);
    }
}
