//! Channel labels used in entry names: built-in en/ru text plus config overrides.

use growplan_config::{Language, LabelsCfg};
use growplan_traits::NameResolver;
use std::collections::BTreeMap;

const EN: [(&str, &str); 5] = [
    ("growth_pump_ph_plus", "Pump 1: pH+"),
    ("growth_pump_ph_minus", "Pump 2: pH-"),
    ("growth_pump_nutrient_a", "Pump 3: Nutrient A"),
    ("growth_pump_nutrient_b", "Pump 4: Nutrient B"),
    ("growth_pump_nutrient_c", "Pump 5: Nutrient C"),
];

const RU: [(&str, &str); 5] = [
    ("growth_pump_ph_plus", "Насос 1: pH+"),
    ("growth_pump_ph_minus", "Насос 2: pH-"),
    ("growth_pump_nutrient_a", "Насос 3: Удобрение A"),
    ("growth_pump_nutrient_b", "Насос 4: Удобрение B"),
    ("growth_pump_nutrient_c", "Насос 5: Удобрение C"),
];

#[derive(Debug, Clone, Default)]
pub struct Labels {
    language: Language,
    overrides: BTreeMap<String, String>,
}

impl Labels {
    pub fn new(language: Language, overrides: BTreeMap<String, String>) -> Self {
        Self {
            language,
            overrides,
        }
    }

    /// Labels from `[labels]`, with the command line's language taking precedence.
    pub fn from_config(cfg: &LabelsCfg, language: Option<Language>) -> Self {
        Self::new(language.unwrap_or(cfg.language), cfg.overrides.clone())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn builtin(&self, key: &str) -> Option<&'static str> {
        let table = match self.language {
            Language::En => &EN,
            Language::Ru => &RU,
        };
        table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl NameResolver for Labels {
    fn resolve(&self, key: &str) -> String {
        if let Some(text) = self.overrides.get(key) {
            return text.clone();
        }
        self.builtin(key).unwrap_or(key).to_string()
    }
}
