//! Growth-program catalog: records, built-in defaults, JSON v1 interchange.
//!
//! A program is one fertilizer line paired with one plant; it carries four
//! phases (seedling → fruiting) of per-liter nutrient doses, per-10-liter pH
//! doses and weekly frequencies.
//!
//! Import is deliberately lenient. Three payload shapes are accepted:
//! - the v1 envelope `{ schema, schemaVersion: 1, programs: [...] }`
//! - a bare array of programs
//! - an object map `id -> program` whose values carry a `phases` array
//!
//! Every imported program is normalized field by field; a missing field falls
//! back to the built-in program at the same index.

use eyre::WrapErr;
use growplan_traits::WallClock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub const GROWTH_SCHEMA: &str = "peristaltic.growth-programs";
pub const GROWTH_SCHEMA_VERSION: u64 = 1;
pub const GROWTH_PHASE_KEYS: [&str; 4] = ["seedling", "vegetative", "flowering", "fruiting"];

/// Nutrient doses in ml per liter of reservoir water.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientRecord {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// pH corrector doses in ml per 10 liters of reservoir water.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhRecord {
    pub plus: f64,
    pub minus: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    pub key: String,
    pub feedings_per_week: u8,
    pub ph_adjustments_per_week: u8,
    pub nutrients: NutrientRecord,
    pub ph: PhRecord,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRecord {
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
    pub phases: Vec<PhaseRecord>,
}

/// Export/import envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub schema: String,
    pub schema_version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    pub programs: Vec<ProgramRecord>,
}

// ── Built-in catalog ─────────────────────────────────────────────────────────

/// One fertilizer line: `phases[i]` are the `(a, b, c)` doses for `GROWTH_PHASE_KEYS[i]`.
#[derive(Debug, Clone, Copy)]
pub struct FertilizerSpec {
    pub id: &'static str,
    pub name_en: &'static str,
    pub name_ru: &'static str,
    pub source: &'static str,
    pub phases: [[f64; 3]; 4],
}

/// One plant: scales the fertilizer chart and sets frequencies and pH doses.
#[derive(Debug, Clone, Copy)]
pub struct PlantSpec {
    pub id: &'static str,
    pub name_en: &'static str,
    pub name_ru: &'static str,
    pub nutrient_mul: f64,
    pub feedings: [u8; 4],
    pub ph_adjustments: [u8; 4],
    pub ph_plus: f64,
    pub ph_minus: f64,
}

pub const DEFAULT_FERTILIZERS: [FertilizerSpec; 4] = [
    FertilizerSpec {
        id: "aquatica-tripart",
        name_en: "Aquatica TriPart",
        name_ru: "Aquatica TriPart",
        source: "Terra Aquatica TriPart feed chart",
        phases: [[0.6, 0.6, 0.6], [1.5, 1.0, 0.5], [1.5, 1.5, 1.0], [0.7, 1.4, 2.1]],
    },
    FertilizerSpec {
        id: "gh-floraseries",
        name_en: "General Hydroponics FloraSeries",
        name_ru: "General Hydroponics FloraSeries",
        source: "General Hydroponics FloraSeries usage guide",
        phases: [[1.0, 1.0, 1.0], [2.0, 1.0, 1.0], [1.0, 2.0, 3.0], [1.0, 2.0, 3.0]],
    },
    FertilizerSpec {
        id: "an-ph-perfect",
        name_en: "Advanced Nutrients pH Perfect G/M/B",
        name_ru: "Advanced Nutrients pH Perfect G/M/B",
        source: "Advanced Nutrients pH Perfect feeding chart",
        phases: [[1.0, 1.0, 1.0], [2.0, 2.0, 2.0], [3.0, 3.0, 3.0], [4.0, 4.0, 4.0]],
    },
    FertilizerSpec {
        id: "foxfarm-trio",
        name_en: "FoxFarm Hydro Trio",
        name_ru: "FoxFarm Hydro Trio",
        source: "FoxFarm Big Bloom / Grow Big / Tiger Bloom guides",
        phases: [[0.5, 1.5, 0.2], [2.5, 2.5, 0.5], [1.5, 3.0, 2.5], [1.0, 3.0, 3.0]],
    },
];

#[allow(clippy::too_many_arguments)]
const fn plant(
    id: &'static str,
    name_en: &'static str,
    name_ru: &'static str,
    nutrient_mul: f64,
    feedings: [u8; 4],
    ph_adjustments: [u8; 4],
    ph_plus: f64,
    ph_minus: f64,
) -> PlantSpec {
    PlantSpec {
        id,
        name_en,
        name_ru,
        nutrient_mul,
        feedings,
        ph_adjustments,
        ph_plus,
        ph_minus,
    }
}

pub const DEFAULT_PLANTS: [PlantSpec; 15] = [
    plant("universal", "Universal", "Универсально", 1.0, [2, 3, 4, 4], [2, 2, 3, 3], 0.28, 0.34),
    plant("lettuce", "Lettuce", "Салат", 0.78, [2, 4, 4, 4], [2, 3, 3, 3], 0.2, 0.28),
    plant("basil", "Basil", "Базилик", 0.9, [2, 3, 4, 4], [2, 2, 3, 3], 0.24, 0.3),
    plant("spinach", "Spinach", "Шпинат", 0.82, [2, 4, 4, 4], [2, 3, 3, 3], 0.22, 0.28),
    plant("kale", "Kale", "Капуста кейл", 0.9, [2, 3, 4, 4], [2, 2, 3, 3], 0.25, 0.31),
    plant("arugula", "Arugula", "Руккола", 0.74, [2, 4, 4, 4], [2, 3, 3, 3], 0.2, 0.27),
    plant("mint", "Mint", "Мята", 0.86, [2, 3, 4, 4], [2, 2, 3, 3], 0.23, 0.3),
    plant("parsley", "Parsley", "Петрушка", 0.84, [2, 3, 4, 4], [2, 2, 3, 3], 0.23, 0.3),
    plant("cilantro", "Cilantro", "Кинза", 0.8, [2, 3, 4, 4], [2, 2, 3, 3], 0.22, 0.29),
    plant("microgreens", "Microgreens", "Микрозелень", 0.6, [2, 3, 3, 3], [1, 2, 2, 2], 0.18, 0.24),
    plant("strawberry", "Strawberry", "Клубника", 0.92, [2, 3, 4, 4], [2, 2, 3, 3], 0.26, 0.33),
    plant("tomato", "Tomato", "Томат", 1.08, [2, 3, 4, 5], [2, 2, 3, 3], 0.32, 0.38),
    plant("cucumber", "Cucumber", "Огурец", 1.0, [2, 3, 4, 4], [2, 2, 3, 3], 0.3, 0.36),
    plant("pepper", "Pepper", "Перец", 1.05, [2, 3, 4, 4], [2, 2, 3, 3], 0.3, 0.37),
    plant("flowers", "Flowers", "Цветы", 0.95, [2, 3, 4, 4], [2, 2, 3, 3], 0.26, 0.32),
];

/// Lowercase and replace anything outside `[a-z0-9-_]` with `-`.
pub fn slugify(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' => c,
            _ => '-',
        })
        .collect()
}

/// Clamp a weekly frequency into 1..=7; non-finite and zero count as 1.
pub fn clamp_frequency(v: f64) -> u8 {
    if !v.is_finite() || v == 0.0 {
        return 1;
    }
    v.round().clamp(1.0, 7.0) as u8
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[inline]
fn non_negative(x: f64) -> f64 {
    if x.is_finite() { x.max(0.0) } else { 0.0 }
}

/// Pair a fertilizer with a plant.
pub fn build_growth_program(fertilizer: &FertilizerSpec, plant: &PlantSpec) -> ProgramRecord {
    let mul = plant.nutrient_mul.max(0.1);
    let phases = GROWTH_PHASE_KEYS
        .iter()
        .enumerate()
        .map(|(idx, key)| {
            let [a, b, c] = fertilizer.phases[idx];
            PhaseRecord {
                key: (*key).to_string(),
                feedings_per_week: clamp_frequency(f64::from(plant.feedings[idx])),
                ph_adjustments_per_week: clamp_frequency(f64::from(plant.ph_adjustments[idx])),
                nutrients: NutrientRecord {
                    a: round2(non_negative(a) * mul),
                    b: round2(non_negative(b) * mul),
                    c: round2(non_negative(c) * mul),
                },
                ph: PhRecord {
                    plus: non_negative(plant.ph_plus),
                    minus: non_negative(plant.ph_minus),
                },
            }
        })
        .collect();

    ProgramRecord {
        id: slugify(&format!("{}-{}", fertilizer.id, plant.id)),
        fertilizer_id: fertilizer.id.to_string(),
        fertilizer_name_en: fertilizer.name_en.to_string(),
        fertilizer_name_ru: fertilizer.name_ru.to_string(),
        plant_id: plant.id.to_string(),
        plant_name_en: plant.name_en.to_string(),
        plant_name_ru: plant.name_ru.to_string(),
        name_en: format!("{} / {}", fertilizer.name_en, plant.name_en),
        name_ru: format!("{} / {}", fertilizer.name_ru, plant.name_ru),
        source: fertilizer.source.to_string(),
        phases,
    }
}

/// The built-in catalog: every fertilizer crossed with every plant, fertilizer-major.
pub fn default_programs() -> Vec<ProgramRecord> {
    DEFAULT_FERTILIZERS
        .iter()
        .flat_map(|f| DEFAULT_PLANTS.iter().map(move |p| build_growth_program(f, p)))
        .collect()
}

// ── Lenient field access ─────────────────────────────────────────────────────

fn text(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn number(v: &Value, key: &str) -> Option<f64> {
    let n = match v.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(true) => 1.0,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn normalize_phase(raw: &Value, fallback_key: &str) -> PhaseRecord {
    let nutrients = raw.get("nutrients").unwrap_or(&Value::Null);
    let ph = raw.get("ph").unwrap_or(&Value::Null);
    let dose = |v: &Value, key: &str| non_negative(number(v, key).unwrap_or(0.0));
    PhaseRecord {
        key: text(raw, "key").unwrap_or_else(|| fallback_key.to_string()),
        feedings_per_week: clamp_frequency(number(raw, "feedingsPerWeek").unwrap_or(1.0)),
        ph_adjustments_per_week: clamp_frequency(
            number(raw, "phAdjustmentsPerWeek").unwrap_or(1.0),
        ),
        nutrients: NutrientRecord {
            a: dose(nutrients, "a"),
            b: dose(nutrients, "b"),
            c: dose(nutrients, "c"),
        },
        ph: PhRecord {
            plus: dose(ph, "plus"),
            minus: dose(ph, "minus"),
        },
    }
}

fn normalize_program(raw: &Value, index: usize, defaults: &[ProgramRecord]) -> ProgramRecord {
    let empty = ProgramRecord::default();
    let fallback = if defaults.is_empty() {
        &empty
    } else {
        &defaults[index % defaults.len()]
    };

    let id = slugify(
        &text(raw, "id")
            .or_else(|| non_empty(&fallback.id))
            .unwrap_or_else(|| format!("program-{}", index + 1)),
    );
    let fertilizer_name_en = text(raw, "fertilizerNameEn")
        .or_else(|| non_empty(&fallback.fertilizer_name_en))
        .unwrap_or_default();
    let plant_name_en = text(raw, "plantNameEn")
        .or_else(|| non_empty(&fallback.plant_name_en))
        .unwrap_or_default();
    let phases = match raw.get("phases").and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .enumerate()
            .map(|(i, p)| normalize_phase(p, GROWTH_PHASE_KEYS.get(i).copied().unwrap_or("seedling")))
            .collect(),
        None => fallback.phases.clone(),
    };

    ProgramRecord {
        fertilizer_id: text(raw, "fertilizerId")
            .or_else(|| non_empty(&fallback.fertilizer_id))
            .unwrap_or_default(),
        fertilizer_name_ru: text(raw, "fertilizerNameRu")
            .or_else(|| non_empty(&fallback.fertilizer_name_ru))
            .unwrap_or_else(|| fertilizer_name_en.clone()),
        fertilizer_name_en,
        plant_id: text(raw, "plantId")
            .or_else(|| non_empty(&fallback.plant_id))
            .unwrap_or_default(),
        plant_name_ru: text(raw, "plantNameRu")
            .or_else(|| non_empty(&fallback.plant_name_ru))
            .unwrap_or_else(|| plant_name_en.clone()),
        plant_name_en,
        name_en: text(raw, "nameEn")
            .or_else(|| text(raw, "name"))
            .or_else(|| non_empty(&fallback.name_en))
            .unwrap_or_else(|| id.clone()),
        name_ru: text(raw, "nameRu")
            .or_else(|| text(raw, "name"))
            .or_else(|| non_empty(&fallback.name_ru))
            .or_else(|| non_empty(&fallback.name_en))
            .unwrap_or_else(|| id.clone()),
        source: text(raw, "source").unwrap_or_else(|| "imported".to_string()),
        phases,
        id,
    }
}

/// Turn any accepted payload shape into normalized programs.
pub fn migrate_payload(payload: &Value, defaults: &[ProgramRecord]) -> eyre::Result<Vec<ProgramRecord>> {
    let normalize_all = |items: &[Value]| {
        items
            .iter()
            .enumerate()
            .map(|(idx, p)| normalize_program(p, idx, defaults))
            .collect::<Vec<_>>()
    };

    if payload.get("schema").and_then(Value::as_str) == Some(GROWTH_SCHEMA)
        && number(payload, "schemaVersion") == Some(GROWTH_SCHEMA_VERSION as f64)
        && let Some(programs) = payload.get("programs").and_then(Value::as_array)
    {
        return Ok(normalize_all(programs.as_slice()));
    }
    if let Some(items) = payload.as_array() {
        return Ok(normalize_all(items.as_slice()));
    }
    if let Some(map) = payload.as_object() {
        let keyed: Vec<Value> = map
            .iter()
            .filter(|(_, v)| v.get("phases").is_some_and(Value::is_array))
            .map(|(id, v)| {
                let mut v = v.clone();
                if let Some(obj) = v.as_object_mut() {
                    obj.insert("id".to_string(), Value::String(id.clone()));
                }
                v
            })
            .collect();
        if !keyed.is_empty() {
            return Ok(normalize_all(keyed.as_slice()));
        }
    }
    eyre::bail!("unsupported growth programs format")
}

/// Parse an import file's text against the built-in defaults.
pub fn parse_catalog_json(text: &str) -> eyre::Result<Vec<ProgramRecord>> {
    let payload: Value = serde_json::from_str(text).wrap_err("catalog is not valid JSON")?;
    let programs = migrate_payload(&payload, &default_programs())?;
    if programs.is_empty() {
        eyre::bail!("catalog contains no programs");
    }
    Ok(programs)
}

/// Render the v1 envelope, stamped with the clock's current time.
pub fn export_catalog_json(programs: &[ProgramRecord], clock: &impl WallClock) -> eyre::Result<String> {
    let stamp = chrono::DateTime::<chrono::Utc>::from(clock.now())
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let file = CatalogFile {
        schema: GROWTH_SCHEMA.to_string(),
        schema_version: GROWTH_SCHEMA_VERSION,
        exported_at: Some(stamp),
        programs: programs.to_vec(),
    };
    serde_json::to_string_pretty(&file).wrap_err("serialize catalog")
}

pub fn load_catalog(path: &Path) -> eyre::Result<Vec<ProgramRecord>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("open catalog {:?}: {}", path, e))?;
    parse_catalog_json(&text).wrap_err_with(|| format!("import catalog {path:?}"))
}

pub fn save_catalog(path: &Path, programs: &[ProgramRecord], clock: &impl WallClock) -> eyre::Result<()> {
    let text = export_catalog_json(programs, clock)?;
    std::fs::write(path, text).map_err(|e| eyre::eyre!("write catalog {:?}: {}", path, e))
}
