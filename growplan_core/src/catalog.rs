//! Immutable in-memory catalog of growth programs.
//!
//! Built once from records (built-in or imported) and passed explicitly to
//! whoever needs it; nothing here is global or mutable.

use crate::error::PlanError;
use growplan_config::{Language, ProgramRecord};

/// Nutrient doses in ml per liter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutrientDose {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// pH corrector doses in ml per 10 liters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhDose {
    pub plus: f64,
    pub minus: f64,
}

/// One growth stage of a program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedingPhase {
    pub key: String,
    pub feedings_per_week: u8,
    pub ph_adjustments_per_week: u8,
    pub nutrients: NutrientDose,
    pub ph: PhDose,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrowthProgram {
    pub id: String,
    pub fertilizer_id: String,
    pub fertilizer_name_en: String,
    pub fertilizer_name_ru: String,
    pub plant_id: String,
    pub plant_name_en: String,
    pub plant_name_ru: String,
    pub name_en: String,
    pub name_ru: String,
    pub source: String,
    pub phases: Vec<FeedingPhase>,
}

fn pick<'a>(lang: Language, en: &'a str, ru: &'a str, last: &'a str) -> &'a str {
    if lang == Language::Ru && !ru.is_empty() {
        return ru;
    }
    [en, ru, last].into_iter().find(|s| !s.is_empty()).unwrap_or("")
}

impl GrowthProgram {
    /// Name written into schedule entries and shown to the user.
    pub fn display_name(&self, lang: Language) -> &str {
        match pick(lang, &self.name_en, &self.name_ru, &self.id) {
            "" => "Program",
            name => name,
        }
    }

    /// `"{fertilizer} / {plant}"` when both are known, the program name otherwise.
    pub fn pair_label(&self, lang: Language) -> String {
        let fertilizer = pick(lang, &self.fertilizer_name_en, &self.fertilizer_name_ru, "");
        let plant = pick(lang, &self.plant_name_en, &self.plant_name_ru, "");
        if fertilizer.is_empty() || plant.is_empty() {
            self.display_name(lang).to_string()
        } else {
            format!("{fertilizer} / {plant}")
        }
    }

    pub fn phase(&self, key: &str) -> Option<&FeedingPhase> {
        self.phases.iter().find(|p| p.key == key)
    }

    /// Phase by key, falling back to the first phase.
    pub fn phase_or_first(&self, key: &str) -> Option<&FeedingPhase> {
        self.phase(key).or_else(|| self.phases.first())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    programs: Vec<GrowthProgram>,
}

impl Catalog {
    pub fn new(programs: Vec<GrowthProgram>) -> Self {
        Self { programs }
    }

    pub fn from_records(records: &[ProgramRecord]) -> Self {
        Self::new(records.iter().map(GrowthProgram::from).collect())
    }

    /// Catalog built from the built-in fertilizer × plant table.
    pub fn builtin() -> Self {
        Self::from_records(&growplan_config::default_programs())
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GrowthProgram> {
        self.programs.iter()
    }

    pub fn get(&self, id: &str) -> Option<&GrowthProgram> {
        self.programs.iter().find(|p| p.id == id)
    }

    pub fn by_pair(&self, plant_id: &str, fertilizer_id: &str) -> Option<&GrowthProgram> {
        self.programs
            .iter()
            .find(|p| p.plant_id == plant_id && p.fertilizer_id == fertilizer_id)
    }

    /// Strict lookup used by the command line: a plant/fertilizer pair wins
    /// over an id, and an unknown selection is an error.
    pub fn select(
        &self,
        id: Option<&str>,
        pair: Option<(&str, &str)>,
    ) -> Result<&GrowthProgram, PlanError> {
        if let Some((plant, fertilizer)) = pair {
            return self
                .by_pair(plant, fertilizer)
                .ok_or_else(|| PlanError::UnknownProgram(format!("{fertilizer}-{plant}")));
        }
        match id {
            Some(id) => self
                .get(id)
                .ok_or_else(|| PlanError::UnknownProgram(id.to_string())),
            None => self.programs.first().ok_or(PlanError::EmptyCatalog),
        }
    }

    /// Distinct `(id, en, ru)` plants in first-seen order.
    pub fn plants(&self) -> Vec<(&str, &str, &str)> {
        let mut out: Vec<(&str, &str, &str)> = Vec::new();
        for p in &self.programs {
            if !out.iter().any(|(id, _, _)| *id == p.plant_id) {
                out.push((
                    p.plant_id.as_str(),
                    p.plant_name_en.as_str(),
                    p.plant_name_ru.as_str(),
                ));
            }
        }
        out
    }

    /// Distinct `(id, en, ru)` fertilizers in first-seen order.
    pub fn fertilizers(&self) -> Vec<(&str, &str, &str)> {
        let mut out: Vec<(&str, &str, &str)> = Vec::new();
        for p in &self.programs {
            if !out.iter().any(|(id, _, _)| *id == p.fertilizer_id) {
                out.push((
                    p.fertilizer_id.as_str(),
                    p.fertilizer_name_en.as_str(),
                    p.fertilizer_name_ru.as_str(),
                ));
            }
        }
        out
    }
}
