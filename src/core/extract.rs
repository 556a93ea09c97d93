use crate::domain::model::{Category, Polarity, ReferenceEntry, SpecialYogaEntry};
use serde_json::{Map, Value};

// 各欄位依序嘗試的鍵名；打包資料混用西班牙文與英文欄位
const NAME_KEYS: &[&str] = &["name", "nombre", "vara", "tithi"];
const IAST_KEYS: &[&str] = &["nameIAST", "name_iast", "iast", "transliteracion"];
const TRANSLATION_KEYS: &[&str] = &["translation", "traduccion", "es", "significado"];
const DEITY_KEYS: &[&str] = &["deity", "deidad", "devata"];
const PLANET_KEYS: &[&str] = &["planet", "planeta", "regente"];
const ELEMENT_KEYS: &[&str] = &["element", "elemento"];
const CLASSIFICATION_KEYS: &[&str] = &["classification", "clasificacion", "naturaleza", "tipo"];
const FAVORABLE_KEYS: &[&str] = &[
    "favorables",
    "favorable",
    "actividades_sugeridas",
    "beneficial_activities",
];
const UNFAVORABLE_KEYS: &[&str] = &["desfavorables", "desfavorable", "avoid_activities"];

const SANSKRIT_KEYS: &[&str] = &["name_sanskrit", "nameIAST", "sanskrit"];
const SPANISH_KEYS: &[&str] = &["name_spanish", "nombre", "es"];
const POLARITY_KEYS: &[&str] = &["polarity", "polaridad"];
const TYPE_KEYS: &[&str] = &["type", "tipo"];
const DESCRIPTION_KEYS: &[&str] = &["description", "explain", "descripcion"];
const DETAILED_KEYS: &[&str] = &["detailed_description", "detailedDescription"];
const NOTES_KEYS: &[&str] = &["notes", "notas", "reason"];
const BENEFICIAL_KEYS: &[&str] = &["beneficial_activities", "favorables", "activities"];
const AVOID_KEYS: &[&str] = &["avoid_activities", "desfavorables", "avoid"];

/// 每個類別在 JSON 中可能的資料位置 (JSON pointer)，第一個存在的為準
pub fn candidate_paths(category: Category) -> &'static [&'static str] {
    match category {
        Category::Nakshatra => &["/nakshatras"],
        Category::Tithi => &["/tithi/devatas_por_tithi/brhatsamhita_99_1_2a", "/tithis"],
        Category::Karana => &["/karana/karanas_detalle", "/karanas"],
        Category::Vara => &["/dias", "/varas"],
        Category::Yoga => &["/yoga/tablas/base_27", "/yogas"],
        Category::SpecialYoga => &["/yogas", "/specialYogas"],
    }
}

/// 取出類別對應的原始物件；物件形式的集合會帶上其鍵作為備用名稱
fn raw_items<'a>(category: Category, document: &'a Value) -> Option<Vec<(Option<&'a str>, &'a Map<String, Value>)>> {
    for path in candidate_paths(category) {
        let Some(found) = document.pointer(path) else {
            continue;
        };
        match found {
            Value::Array(items) => {
                return Some(
                    items
                        .iter()
                        .filter_map(Value::as_object)
                        .map(|object| (None, object))
                        .collect(),
                );
            }
            // 只有特殊 yoga 以物件（鍵 -> 定義）存放
            Value::Object(map) if category == Category::SpecialYoga => {
                return Some(
                    map.iter()
                        .filter_map(|(key, value)| value.as_object().map(|o| (Some(key.as_str()), o)))
                        .collect(),
                );
            }
            _ => continue,
        }
    }
    None
}

pub fn extract_reference_entries(category: Category, document: &Value) -> Vec<ReferenceEntry> {
    let Some(items) = raw_items(category, document) else {
        tracing::warn!(
            "⚠️ No {} entries found at {:?}",
            category,
            candidate_paths(category)
        );
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(items.len());
    for (key, object) in items {
        let Some(name) = text(object, NAME_KEYS).or_else(|| key.map(str::to_string)) else {
            tracing::debug!("Skipping {} entry without a name", category);
            continue;
        };
        entries.push(ReferenceEntry {
            name,
            name_iast: text(object, IAST_KEYS),
            translation: text(object, TRANSLATION_KEYS),
            deity: text(object, DEITY_KEYS),
            planet: text(object, PLANET_KEYS),
            element: text(object, ELEMENT_KEYS),
            classification: text(object, CLASSIFICATION_KEYS),
            favorables: list(object, FAVORABLE_KEYS),
            unfavorables: list(object, UNFAVORABLE_KEYS),
        });
    }
    entries
}

pub fn extract_special_yogas(document: &Value) -> Vec<SpecialYogaEntry> {
    let Some(items) = raw_items(Category::SpecialYoga, document) else {
        tracing::warn!(
            "⚠️ No special yoga entries found at {:?}",
            candidate_paths(Category::SpecialYoga)
        );
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(items.len());
    for (key, object) in items {
        let name = text(object, &["name"])
            .or_else(|| key.map(str::to_string))
            .or_else(|| text(object, SANSKRIT_KEYS));
        let Some(name) = name else {
            tracing::debug!("Skipping special yoga without a name");
            continue;
        };
        entries.push(SpecialYogaEntry {
            name,
            name_sanskrit: text(object, SANSKRIT_KEYS),
            name_spanish: text(object, SPANISH_KEYS),
            polarity: text(object, POLARITY_KEYS)
                .map(|raw| Polarity::parse(&raw))
                .unwrap_or_default(),
            kind: text(object, TYPE_KEYS),
            description: text(object, DESCRIPTION_KEYS),
            detailed_description: text(object, DETAILED_KEYS),
            notes: text(object, NOTES_KEYS),
            beneficial_activities: list(object, BENEFICIAL_KEYS),
            avoid_activities: list(object, AVOID_KEYS),
        });
    }
    entries
}

/// 第一個非空字串欄位
fn text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// 第一個存在的清單欄位；單一字串視為只有一項
fn list(object: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    for key in keys {
        match object.get(*key) {
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            Some(Value::String(item)) if !item.trim().is_empty() => {
                return vec![item.trim().to_string()];
            }
            _ => continue,
        }
    }
    Vec::new()
}
