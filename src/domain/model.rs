use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// 參考資料類別，每個類別對應一個 JSON 檔案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Nakshatra,
    Tithi,
    Karana,
    Vara,
    Yoga,
    SpecialYoga,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Nakshatra,
        Category::Tithi,
        Category::Karana,
        Category::Vara,
        Category::Yoga,
        Category::SpecialYoga,
    ];

    /// 打包資料中的預設檔名（保留原始資料庫的拼寫）
    pub fn default_file_name(self) -> &'static str {
        match self {
            Category::Nakshatra => "Nakashatras.json",
            Category::Tithi => "TIthi.json",
            Category::Karana => "karanas.json",
            Category::Vara => "Vara.json",
            Category::Yoga => "nitya-yogas.json",
            Category::SpecialYoga => "yogas-special.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Nakshatra => "nakshatra",
            Category::Tithi => "tithi",
            Category::Karana => "karana",
            Category::Vara => "vara",
            Category::Yoga => "yoga",
            Category::SpecialYoga => "special_yoga",
        }
    }

    /// API 有時在名稱後附加類別字 (e.g. "Ashwini Nakshatra")
    pub fn suffix_words(self) -> &'static [&'static str] {
        match self {
            Category::Nakshatra => &["nakshatra", "naksatra"],
            Category::Tithi => &["tithi"],
            Category::Karana => &["karana"],
            Category::Vara => &["vara", "var"],
            Category::Yoga => &["yoga"],
            Category::SpecialYoga => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| format!("unknown category '{}'", raw))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub name_iast: Option<String>,
    pub translation: Option<String>,
    pub deity: Option<String>,
    pub planet: Option<String>,
    pub element: Option<String>,
    pub classification: Option<String>,
    pub favorables: Vec<String>,
    pub unfavorables: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Polarity {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "positive" | "auspicious" | "favorable" | "positivo" => Polarity::Positive,
            "negative" | "inauspicious" | "desfavorable" | "negativo" => Polarity::Negative,
            _ => Polarity::Neutral,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialYogaEntry {
    pub name: String,
    pub name_sanskrit: Option<String>,
    pub name_spanish: Option<String>,
    pub polarity: Polarity,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub notes: Option<String>,
    pub beneficial_activities: Vec<String>,
    pub avoid_activities: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Auspicious,
    Inauspicious,
    #[default]
    Neutral,
}

/// 外部 API 回傳的一天的名稱
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayInput {
    pub date: Option<NaiveDate>,
    pub tithi: Option<String>,
    pub vara: Option<String>,
    pub nakshatra: Option<String>,
    pub yoga: Option<String>,
    pub karana: Option<String>,
    #[serde(default)]
    pub special_yogas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub favorable_activities: Vec<String>,
    pub avoid_activities: Vec<String>,
    pub special_favorable_activities: Vec<String>,
    pub special_avoid_activities: Vec<String>,
    pub overall_mood: Mood,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayRecommendations {
    pub tithi: Option<Arc<ReferenceEntry>>,
    pub vara: Option<Arc<ReferenceEntry>>,
    pub nakshatra: Option<Arc<ReferenceEntry>>,
    pub yoga: Option<Arc<ReferenceEntry>>,
    pub karana: Option<Arc<ReferenceEntry>>,
    pub special_yogas: Vec<Arc<SpecialYogaEntry>>,
    pub summary: DaySummary,
}
