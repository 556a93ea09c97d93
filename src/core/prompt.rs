//! 將一天的建議轉成給文字生成模型的西班牙文提示

use crate::domain::model::{DayInput, DayRecommendations, Mood, Polarity, ReferenceEntry};
use chrono::{Locale, NaiveDate};
use std::fmt::Write;

const TOP_ACTIVITIES: usize = 5;
const SUMMARY_ACTIVITIES: usize = 10;
const NOT_AVAILABLE: &str = "No disponible";

/// `lunes, 6 de enero de 2025`
pub fn format_spanish_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date
            .format_localized("%A, %-d de %B de %Y", Locale::es_ES)
            .to_string(),
        None => "fecha no especificada".to_string(),
    }
}

fn mood_label(mood: Mood) -> &'static str {
    match mood {
        Mood::Auspicious => "Auspicioso ✨",
        Mood::Inauspicious => "Desfavorable ⚠️",
        Mood::Neutral => "Neutral ⚖️",
    }
}

fn polarity_label(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Positive => "Auspicioso",
        Polarity::Negative => "Desfavorable",
        Polarity::Neutral => "Neutral",
    }
}

fn push_list(out: &mut String, items: &[String], limit: usize) {
    if items.is_empty() {
        out.push_str("- (ninguna)\n");
        return;
    }
    for item in items.iter().take(limit) {
        let _ = writeln!(out, "- {}", item);
    }
}

fn push_field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(out, "**{}:** {}", label, value);
    }
}

fn push_element(
    out: &mut String,
    heading: &str,
    requested: Option<&str>,
    entry: Option<&ReferenceEntry>,
) {
    let _ = writeln!(out, "### {}", heading);
    let _ = writeln!(out, "**Recibido:** {}", requested.unwrap_or(NOT_AVAILABLE));

    let Some(entry) = entry else {
        out.push_str("**No se encontraron datos detallados**\n\n");
        return;
    };

    let _ = writeln!(out, "**Nombre completo:** {}", entry.name);
    push_field(out, "Transliteración", entry.name_iast.as_deref());
    push_field(out, "Traducción", entry.translation.as_deref());
    push_field(out, "Deidad", entry.deity.as_deref());
    push_field(out, "Planeta", entry.planet.as_deref());
    push_field(out, "Elemento", entry.element.as_deref());
    push_field(out, "Clasificación", entry.classification.as_deref());

    let _ = writeln!(
        out,
        "\n**Actividades Favorables ({}):**",
        entry.favorables.len()
    );
    push_list(out, &entry.favorables, TOP_ACTIVITIES);
    let _ = writeln!(
        out,
        "\n**Actividades a Evitar ({}):**",
        entry.unfavorables.len()
    );
    push_list(out, &entry.unfavorables, TOP_ACTIVITIES);
    out.push('\n');
}

pub fn daily_report_prompt(day: &DayInput, recommendations: &DayRecommendations) -> String {
    let date = format_spanish_date(day.date);
    let summary = &recommendations.summary;
    let mut out = String::with_capacity(4096);

    let _ = writeln!(out, "# REPORTE DIARIO DE PANCHANGA - {}\n", date.to_uppercase());
    out.push_str("## INFORMACIÓN BÁSICA DEL DÍA\n");
    let _ = writeln!(out, "**Fecha:** {}", date);
    let _ = writeln!(
        out,
        "**Día de la semana:** {}\n",
        recommendations
            .vara
            .as_ref()
            .and_then(|vara| vara.translation.as_deref())
            .or(day.vara.as_deref())
            .unwrap_or(NOT_AVAILABLE)
    );

    out.push_str("## ANÁLISIS DE LOS 5 ANGAS DEL PANCHANGA\n\n");
    push_element(
        &mut out,
        "1. TITHI (Día Lunar)",
        day.tithi.as_deref(),
        recommendations.tithi.as_deref(),
    );
    push_element(
        &mut out,
        "2. VARA (Día de la Semana)",
        day.vara.as_deref(),
        recommendations.vara.as_deref(),
    );
    push_element(
        &mut out,
        "3. NAKSHATRA (Constelación Lunar)",
        day.nakshatra.as_deref(),
        recommendations.nakshatra.as_deref(),
    );
    push_element(
        &mut out,
        "4. YOGA (Combinación Solar-Lunar)",
        day.yoga.as_deref(),
        recommendations.yoga.as_deref(),
    );
    push_element(
        &mut out,
        "5. KARANA (Mitad del Tithi)",
        day.karana.as_deref(),
        recommendations.karana.as_deref(),
    );

    out.push_str("## YOGAS ESPECIALES DEL DÍA\n");
    if recommendations.special_yogas.is_empty() {
        out.push_str("**No hay yogas especiales en este día**\n\n");
    } else {
        let _ = writeln!(
            out,
            "**Total de Yogas Especiales:** {}\n",
            recommendations.special_yogas.len()
        );
        for (i, yoga) in recommendations.special_yogas.iter().enumerate() {
            let _ = writeln!(out, "### Yoga Especial {}: {}", i + 1, yoga.name);
            let _ = writeln!(out, "**Polaridad:** {}", polarity_label(yoga.polarity));
            push_field(&mut out, "Nombre sánscrito", yoga.name_sanskrit.as_deref());
            push_field(&mut out, "Tipo", yoga.kind.as_deref());
            push_field(&mut out, "Descripción", yoga.description.as_deref());
            push_field(&mut out, "Notas Importantes", yoga.notes.as_deref());
            if !yoga.beneficial_activities.is_empty() {
                out.push_str("**Actividades Beneficiosas:**\n");
                push_list(&mut out, &yoga.beneficial_activities, TOP_ACTIVITIES);
            }
            if !yoga.avoid_activities.is_empty() {
                out.push_str("**Actividades a Evitar:**\n");
                push_list(&mut out, &yoga.avoid_activities, TOP_ACTIVITIES);
            }
            out.push('\n');
        }
    }

    out.push_str("## RESUMEN GENERAL DE RECOMENDACIONES\n");
    let _ = writeln!(out, "**Estado General:** {}\n", mood_label(summary.overall_mood));
    let _ = writeln!(
        out,
        "**Total de Actividades Favorables:** {}",
        summary.favorable_activities.len()
    );
    let _ = writeln!(
        out,
        "**Total de Actividades a Evitar:** {}\n",
        summary.avoid_activities.len()
    );
    out.push_str("### Actividades Más Recomendadas:\n");
    push_list(&mut out, &summary.favorable_activities, SUMMARY_ACTIVITIES);
    out.push_str("\n### Actividades Más Importantes a Evitar:\n");
    push_list(&mut out, &summary.avoid_activities, SUMMARY_ACTIVITIES);
    if !summary.special_favorable_activities.is_empty() {
        out.push_str("\n### Favorecido por Yogas Especiales:\n");
        push_list(&mut out, &summary.special_favorable_activities, SUMMARY_ACTIVITIES);
    }
    if !summary.special_avoid_activities.is_empty() {
        out.push_str("\n### Desaconsejado por Yogas Especiales:\n");
        push_list(&mut out, &summary.special_avoid_activities, SUMMARY_ACTIVITIES);
    }

    out.push_str(REPORT_INSTRUCTIONS);
    out
}

pub fn quick_analysis_prompt(day: &DayInput, recommendations: &DayRecommendations) -> String {
    let date = format_spanish_date(day.date);
    let summary = &recommendations.summary;
    let mut out = String::with_capacity(1024);

    let _ = writeln!(out, "# ANÁLISIS RÁPIDO DE PANCHANGA - {}\n", date);
    let _ = writeln!(out, "**Fecha:** {}", date);
    for (label, requested, entry) in [
        ("Tithi", &day.tithi, &recommendations.tithi),
        ("Vara", &day.vara, &recommendations.vara),
        ("Nakshatra", &day.nakshatra, &recommendations.nakshatra),
        ("Yoga", &day.yoga, &recommendations.yoga),
        ("Karana", &day.karana, &recommendations.karana),
    ] {
        let _ = writeln!(
            out,
            "**{}:** {} ({})",
            label,
            requested.as_deref().unwrap_or("N/A"),
            entry.as_ref().map_or("N/A", |e| e.name.as_str())
        );
    }
    let _ = writeln!(
        out,
        "**Yogas Especiales:** {}\n",
        recommendations.special_yogas.len()
    );
    let _ = writeln!(out, "**Estado General:** {}\n", mood_label(summary.overall_mood));

    out.push_str("**Top 5 Actividades Recomendadas:**\n");
    push_list(&mut out, &summary.favorable_activities, TOP_ACTIVITIES);
    out.push_str("\n**Top 5 Actividades a Evitar:**\n");
    push_list(&mut out, &summary.avoid_activities, TOP_ACTIVITIES);

    if !recommendations.special_yogas.is_empty() {
        out.push_str("\n**Yogas Especiales:**\n");
        for yoga in &recommendations.special_yogas {
            let _ = writeln!(out, "- {} ({})", yoga.name, polarity_label(yoga.polarity));
        }
    }

    out.push_str(
        "\nGenera un análisis conciso y práctico para este día, enfocándote en las recomendaciones más importantes.\n",
    );
    out
}

const REPORT_INSTRUCTIONS: &str = "
---

## INSTRUCCIONES PARA EL REPORTE DE IA

Por favor, genera un reporte diario de panchanga basado en la información anterior que incluya:

1. **ANÁLISIS GENERAL DEL DÍA**: carácter general del día y energía predominante.
2. **RECOMENDACIONES ESPECÍFICAS POR ÁREA**: trabajo, familia, espiritualidad, salud, creatividad y finanzas.
3. **ANÁLISIS DE YOGAS ESPECIALES**: impacto de cada yoga especial y precauciones.
4. **HORARIOS RECOMENDADOS**: mejores momentos del día y horarios a evitar.
5. **CONSEJOS PRÁCTICOS**: oportunidades y precauciones del día.
6. **CONCLUSIÓN**: las 3 recomendaciones más importantes.

**Formato del reporte:** Usa un tono profesional pero accesible, con estructura clara con títulos y subtítulos.
";
