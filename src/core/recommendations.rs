use crate::core::index::ReferenceIndex;
use crate::domain::model::{
    Category, DayInput, DayRecommendations, DaySummary, Mood, ReferenceEntry, SpecialYogaEntry,
};
use std::collections::HashSet;
use std::sync::Arc;

const AUSPICIOUS_MARKERS: &[&str] = &["auspicious", "favorable"];
const INAUSPICIOUS_MARKERS: &[&str] = &["inauspicious", "cruel", "feroz", "desfavorable"];

/// 解析一天的各項元素並彙整建議
pub struct DayRecommender<'a> {
    index: &'a ReferenceIndex,
}

impl<'a> DayRecommender<'a> {
    pub fn new(index: &'a ReferenceIndex) -> Self {
        Self { index }
    }

    pub async fn recommend(&self, day: &DayInput) -> DayRecommendations {
        let (tithi, vara, nakshatra, yoga, karana, special_yogas) = tokio::join!(
            self.resolve(Category::Tithi, day.tithi.as_deref()),
            self.resolve(Category::Vara, day.vara.as_deref()),
            self.resolve(Category::Nakshatra, day.nakshatra.as_deref()),
            self.resolve(Category::Yoga, day.yoga.as_deref()),
            self.resolve(Category::Karana, day.karana.as_deref()),
            self.index.find_special_yogas(&day.special_yogas),
        );

        let summary = summarize(
            [
                tithi.as_deref(),
                vara.as_deref(),
                nakshatra.as_deref(),
                yoga.as_deref(),
            ],
            &special_yogas,
        );
        tracing::debug!(
            "Day summary: {} favorable, {} avoid, mood {:?}",
            summary.favorable_activities.len(),
            summary.avoid_activities.len(),
            summary.overall_mood
        );

        DayRecommendations {
            tithi,
            vara,
            nakshatra,
            yoga,
            karana,
            special_yogas,
            summary,
        }
    }

    async fn resolve(&self, category: Category, name: Option<&str>) -> Option<Arc<ReferenceEntry>> {
        let name = name?;
        let found = self.index.find_entry(category, name).await;
        if found.is_none() {
            tracing::debug!("No {} entry for '{}'", category, name);
        }
        found
    }
}

/// 核心四項依 tithi、vara、nakshatra、yoga 的順序合併；特殊 yoga 另列
pub fn summarize(
    core: [Option<&ReferenceEntry>; 4],
    special_yogas: &[Arc<SpecialYogaEntry>],
) -> DaySummary {
    let resolved: Vec<&ReferenceEntry> = core.into_iter().flatten().collect();

    DaySummary {
        favorable_activities: dedup(resolved.iter().flat_map(|e| e.favorables.iter())),
        avoid_activities: dedup(resolved.iter().flat_map(|e| e.unfavorables.iter())),
        special_favorable_activities: dedup(
            special_yogas
                .iter()
                .flat_map(|y| y.beneficial_activities.iter()),
        ),
        special_avoid_activities: dedup(special_yogas.iter().flat_map(|y| y.avoid_activities.iter())),
        overall_mood: classify_mood(&resolved),
    }
}

/// 以分類字串計分；子字串比對，"inauspicious" 同時也含 "auspicious"
pub fn classify_mood(entries: &[&ReferenceEntry]) -> Mood {
    let mut auspicious = 0;
    let mut inauspicious = 0;

    for entry in entries {
        let Some(classification) = entry.classification.as_deref() else {
            continue;
        };
        let classification = classification.to_lowercase();
        if AUSPICIOUS_MARKERS.iter().any(|m| classification.contains(m)) {
            auspicious += 1;
        }
        if INAUSPICIOUS_MARKERS.iter().any(|m| classification.contains(m)) {
            inauspicious += 1;
        }
    }

    match auspicious.cmp(&inauspicious) {
        std::cmp::Ordering::Greater => Mood::Auspicious,
        std::cmp::Ordering::Less => Mood::Inauspicious,
        std::cmp::Ordering::Equal => Mood::Neutral,
    }
}

/// 去除重複，保留第一次出現的順序
fn dedup<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::tests::sample_source;
    use crate::core::index::DEFAULT_TTL;
    use serde_json::json;

    fn classified(classification: &str) -> ReferenceEntry {
        ReferenceEntry {
            name: classification.to_string(),
            classification: Some(classification.to_string()),
            ..Default::default()
        }
    }

    fn index() -> ReferenceIndex {
        let source = sample_source().with_file(
            "nitya-yogas.json",
            json!({
                "yoga": { "tablas": { "base_27": [
                    { "nombre": "Siddhi", "clasificacion": "Auspicious",
                      "favorables": ["estudios", "ceremonias"] }
                ] } }
            }),
        );
        ReferenceIndex::new(Arc::new(source), DEFAULT_TTL)
    }

    #[test]
    fn test_mood_majority_wins() {
        let entries = [
            classified("Favorable"),
            classified("auspicious"),
            classified("Muy favorable"),
            classified("Cruel"),
        ];
        let refs: Vec<&ReferenceEntry> = entries.iter().collect();
        assert_eq!(classify_mood(&refs), Mood::Auspicious);

        let entries = [classified("Feroz"), classified("cruel"), classified("Mixto")];
        let refs: Vec<&ReferenceEntry> = entries.iter().collect();
        assert_eq!(classify_mood(&refs), Mood::Inauspicious);
    }

    #[test]
    fn test_mood_without_entries_is_neutral() {
        assert_eq!(classify_mood(&[]), Mood::Neutral);
        let unclassified = ReferenceEntry::default();
        assert_eq!(classify_mood(&[&unclassified]), Mood::Neutral);
    }

    #[test]
    fn test_mood_substring_counts_both_sides() {
        let inauspicious = classified("Inauspicious");
        assert_eq!(classify_mood(&[&inauspicious]), Mood::Neutral);

        let desfavorable = classified("Desfavorable");
        let cruel = classified("Cruel");
        assert_eq!(classify_mood(&[&desfavorable, &cruel]), Mood::Inauspicious);
    }

    #[test]
    fn test_summary_dedups_in_first_seen_order() {
        let tithi = ReferenceEntry {
            favorables: vec!["viajes".into(), "ceremonias".into()],
            unfavorables: vec!["deudas".into()],
            ..Default::default()
        };
        let vara = ReferenceEntry {
            favorables: vec!["ceremonias".into(), "agricultura".into()],
            unfavorables: vec!["deudas".into(), "cirugía".into()],
            ..Default::default()
        };
        let special = vec![
            Arc::new(SpecialYogaEntry {
                beneficial_activities: vec!["negocios".into(), "viajes".into()],
                ..Default::default()
            }),
            Arc::new(SpecialYogaEntry {
                beneficial_activities: vec!["negocios".into()],
                avoid_activities: vec!["préstamos".into()],
                ..Default::default()
            }),
        ];

        let summary = summarize([Some(&tithi), Some(&vara), None, None], &special);

        assert_eq!(
            summary.favorable_activities,
            vec!["viajes", "ceremonias", "agricultura"]
        );
        assert_eq!(summary.avoid_activities, vec!["deudas", "cirugía"]);
        assert_eq!(summary.special_favorable_activities, vec!["negocios", "viajes"]);
        assert_eq!(summary.special_avoid_activities, vec!["préstamos"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sunday_resolves_through_alias() {
        let index = index();
        let day = DayInput {
            vara: Some("Sunday".to_string()),
            ..Default::default()
        };

        let recommendations = DayRecommender::new(&index).recommend(&day).await;

        assert_eq!(recommendations.vara.as_ref().unwrap().name, "Ravivara");
        assert!(recommendations
            .summary
            .favorable_activities
            .contains(&"ceremonias".to_string()));
        assert_eq!(recommendations.summary.overall_mood, Mood::Inauspicious);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_yoga_adds_nothing() {
        let index = index();
        let day = DayInput {
            yoga: Some("Zzznotreal".to_string()),
            ..Default::default()
        };

        let recommendations = DayRecommender::new(&index).recommend(&day).await;

        assert!(recommendations.yoga.is_none());
        assert!(recommendations.summary.favorable_activities.is_empty());
        assert!(recommendations.summary.avoid_activities.is_empty());
        assert_eq!(recommendations.summary.overall_mood, Mood::Neutral);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_day_merges_in_element_order() {
        let index = index();
        let day = DayInput {
            vara: Some("Domingo".to_string()),
            nakshatra: Some("Aśvini".to_string()),
            yoga: Some("Siddhi Yoga".to_string()),
            tithi: Some("Ekadasi".to_string()),
            karana: Some("Bava".to_string()),
            special_yogas: vec!["Amrita Siddhi".to_string(), "Visha".to_string()],
            ..Default::default()
        };

        let recommendations = DayRecommender::new(&index).recommend(&day).await;

        // tithi 與 karana 檔案不存在
        assert!(recommendations.tithi.is_none());
        assert!(recommendations.karana.is_none());
        assert_eq!(recommendations.nakshatra.as_ref().unwrap().name, "Aśvinī");
        assert_eq!(recommendations.yoga.as_ref().unwrap().name, "Siddhi");
        assert_eq!(
            recommendations.summary.favorable_activities,
            vec![
                "ceremonias",
                "asuntos de gobierno",
                "medicina",
                "viajes",
                "estudios"
            ]
        );
        assert_eq!(recommendations.special_yogas.len(), 2);
        assert_eq!(
            recommendations.summary.special_avoid_activities,
            vec!["viajes"]
        );
        // 2 favorable (nakshatra, yoga) 對 1 cruel (vara)
        assert_eq!(recommendations.summary.overall_mood, Mood::Auspicious);
    }
}
