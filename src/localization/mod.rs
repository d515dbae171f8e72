use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

type Bundle = FluentBundle<FluentResource>;

const FALLBACK_LANG: &str = "en";

/// Languages with an embedded FTL resource. Stored in settings as its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportedLang {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "ru")]
    Ru,
}

impl SupportedLang {
    pub const ALL: [SupportedLang; 2] = [SupportedLang::En, SupportedLang::Ru];

    pub fn code(&self) -> &'static str {
        match self {
            SupportedLang::En => "en",
            SupportedLang::Ru => "ru",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SupportedLang::En => "English",
            SupportedLang::Ru => "Русский",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.code() == code)
    }
}

fn load_ftl_source(lang: SupportedLang) -> &'static str {
    match lang {
        SupportedLang::En => include_str!("resources/en.ftl"),
        SupportedLang::Ru => include_str!("resources/ru.ftl"),
    }
}

fn parse_lang(lang_code: &str) -> LanguageIdentifier {
    lang_code
        .parse::<LanguageIdentifier>()
        .unwrap_or_else(|_| FALLBACK_LANG.parse().unwrap())
}

fn normalize_lang(mut code: String) -> String {
    code.make_ascii_lowercase();
    let sep = code.find(['-', '_']).unwrap_or(code.len());
    let short = &code[..sep];
    if SupportedLang::from_code(short).is_some() {
        short.to_string()
    } else {
        FALLBACK_LANG.to_string()
    }
}

fn detect_system_lang() -> String {
    let sys = sys_locale::get_locale().unwrap_or_default();
    normalize_lang(sys)
}

struct LocalizationManager {
    current: String,
    fallback: String,
    bundles: HashMap<String, Bundle>,
}

impl LocalizationManager {
    fn new() -> Self {
        let mut bundles: HashMap<String, Bundle> = HashMap::new();
        for lang in SupportedLang::ALL {
            let langid = parse_lang(lang.code());
            let mut bundle: Bundle = FluentBundle::new(vec![langid]);
            let res = FluentResource::try_new(load_ftl_source(lang).to_string())
                .expect("Failed to parse embedded FTL resource");
            bundle
                .add_resource(res)
                .expect("Failed to add FTL to bundle");
            bundles.insert(lang.code().to_string(), bundle);
        }
        Self {
            current: FALLBACK_LANG.to_string(),
            fallback: FALLBACK_LANG.to_string(),
            bundles,
        }
    }

    fn set_current(&mut self, code: &str) -> Result<(), LocalizationError> {
        let code = normalize_lang(code.to_string());
        if !self.bundles.contains_key(&code) {
            return Err(LocalizationError::UnsupportedLanguage(code));
        }
        self.current = code;
        Ok(())
    }

    fn set_auto(&mut self) {
        self.current = detect_system_lang();
    }

    fn format_with_args(&self, id: &str, args: Option<&FluentArgs>) -> String {
        for code in [self.current.as_str(), self.fallback.as_str()] {
            if let Some(b) = self.bundles.get(code) {
                if let Some(pat) = b.get_message(id).and_then(|m| m.value()) {
                    let mut errors = vec![];
                    return b.format_pattern(pat, args, &mut errors).to_string();
                }
            }
        }
        format!("[missing: {}]", id)
    }
}

thread_local! {
    static LOCALIZATION: RefCell<LocalizationManager> = RefCell::new(LocalizationManager::new());
}

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Initialize from the saved preference; None means system locale autodetect.
pub fn initialize_localization(
    preferred: Option<SupportedLang>,
) -> Result<(), LocalizationError> {
    LOCALIZATION.with(|cell| {
        let mut mgr = cell.borrow_mut();
        match preferred {
            Some(lang) => mgr.set_current(lang.code()),
            None => {
                mgr.set_auto();
                Ok(())
            }
        }
    })
}

/// Explicitly switch to a supported language.
pub fn set_current_language(lang: SupportedLang) -> Result<(), LocalizationError> {
    LOCALIZATION.with(|cell| cell.borrow_mut().set_current(lang.code()))
}

/// Switch back to the system locale (autodetect).
pub fn set_language_auto() {
    LOCALIZATION.with(|cell| cell.borrow_mut().set_auto());
}

/// Translate a message without arguments. Returns owned String.
pub fn translate(message_id: &str) -> String {
    LOCALIZATION.with(|cell| cell.borrow().format_with_args(message_id, None))
}

/// Translate a message with arguments given as (&str, String) pairs.
pub fn translate_with(message_id: &str, args: &[(&str, String)]) -> String {
    let mut fargs = FluentArgs::new();
    for (k, v) in args {
        fargs.set(*k, v.clone());
    }
    LOCALIZATION.with(|cell| cell.borrow().format_with_args(message_id, Some(&fargs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_for_unknown_codes() {
        assert_eq!(normalize_lang("de-DE".to_string()), "en");
        assert_eq!(normalize_lang("ru_RU".to_string()), "ru");
        assert_eq!(normalize_lang("EN".to_string()), "en");
    }

    #[test]
    fn translates_known_keys() {
        set_current_language(SupportedLang::En).unwrap();
        assert_eq!(translate("section-games"), "Games");
        assert!(translate("no-such-key").starts_with("[missing:"));
    }
}
