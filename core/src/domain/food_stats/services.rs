use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::domain::{
    common::round_to,
    correlation::entities::CorrelationAnalysis,
    diary::{
        entities::{FoodEvent, SymptomEvent},
        value_objects::AlignedDiary,
    },
    food_stats::value_objects::{
        MAX_CATEGORY_ENTRIES, OverviewStats, SafeFoodStats, SymptomStats, SymptomStatsSummary,
        TIMELINE_DAYS, TimelineStats, TriggerStats,
    },
};

/// Map food category to emoji
pub fn category_emoji(category: &str) -> Option<String> {
    match category.to_lowercase().as_str() {
        s if s.contains("dairy") => Some("🥛".to_string()),
        s if s.contains("garlic") => Some("🧄".to_string()),
        s if s.contains("coffee") => Some("☕️".to_string()),
        s if s.contains("vegetable") || s.contains("veggie") => Some("🥦".to_string()),
        s if s.contains("fruit") => Some("🍎".to_string()),
        s if s.contains("meat") => Some("🥩".to_string()),
        s if s.contains("fish") => Some("🐟".to_string()),
        s if s.contains("bread") || s.contains("wheat") => Some("🍞".to_string()),
        s if s.contains("rice") || s.contains("grain") => Some("🍚".to_string()),
        s if s.contains("spice") => Some("🌶️".to_string()),
        _ => None,
    }
}

pub fn symptom_stats(symptom_events: &[SymptomEvent]) -> SymptomStatsSummary {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for event in symptom_events {
        for symptom in &event.symptoms {
            *counts.entry(symptom.as_str()).or_insert(0) += 1;
        }
    }

    let total_records = symptom_events.len() as u32;
    let mut items: Vec<SymptomStats> = counts
        .into_iter()
        .map(|(symptom, count)| SymptomStats {
            symptom: symptom.to_string(),
            count,
            percentage: round_to(f64::from(count) / f64::from(total_records) * 100.0, 1),
        })
        .collect();
    // stable sort keeps names ascending within equal counts
    items.sort_by(|a, b| b.count.cmp(&a.count));

    SymptomStatsSummary {
        items,
        total_records,
    }
}

/// One entry per day from the first to the last event day, last days kept.
pub fn timeline_stats(diary: &AlignedDiary, analysis: &CorrelationAnalysis) -> Vec<TimelineStats> {
    let food_days = diary.food_events.iter().map(|e| e.timestamp.date_naive());
    let symptom_days = diary.symptom_events.iter().map(|e| e.timestamp.date_naive());
    let days: Vec<NaiveDate> = food_days.chain(symptom_days).collect();
    let (Some(first), Some(last)) = (days.iter().min().copied(), days.iter().max().copied())
    else {
        return Vec::new();
    };

    let first = last
        .checked_sub_days(Days::new(TIMELINE_DAYS as u64 - 1))
        .map_or(first, |window_start| first.max(window_start));

    let mut meals_by_day: BTreeMap<NaiveDate, Vec<&FoodEvent>> = BTreeMap::new();
    for event in &diary.food_events {
        meals_by_day
            .entry(event.timestamp.date_naive())
            .or_default()
            .push(event);
    }
    let mut symptoms_by_day: BTreeMap<NaiveDate, Vec<&SymptomEvent>> = BTreeMap::new();
    for event in &diary.symptom_events {
        symptoms_by_day
            .entry(event.timestamp.date_naive())
            .or_default()
            .push(event);
    }

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|date| {
            let meals = meals_by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            let symptoms = symptoms_by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);

            let calories: Vec<f64> = meals.iter().filter_map(|m| m.calories()).collect();
            let avg_severity = if symptoms.is_empty() {
                0.0
            } else {
                let total: u32 = symptoms.iter().map(|s| u32::from(s.severity)).sum();
                round_to(f64::from(total) / symptoms.len() as f64, 1)
            };

            TimelineStats {
                date,
                food_entries: meals.len() as u32,
                symptom_occurrences: symptoms.iter().map(|s| s.symptoms.len() as u32).sum(),
                avg_severity,
                correlation_events: meals
                    .iter()
                    .filter(|m| analysis.is_trigger(&m.food_name))
                    .count() as u32,
                total_calories: (!calories.is_empty())
                    .then(|| round_to(calories.iter().sum::<f64>(), 1)),
            }
        })
        .collect()
}

#[derive(Default)]
struct CategoryTotals {
    exposures: u32,
    symptomatic: u32,
}

/// Groups exposures by food category into trigger and safe categories.
pub fn overview_stats(diary: &AlignedDiary, analysis: &CorrelationAnalysis) -> OverviewStats {
    let mut categories: BTreeMap<&str, CategoryTotals> = BTreeMap::new();
    for exposure in &analysis.exposures {
        let totals = categories.entry(exposure.category.as_str()).or_default();
        totals.exposures += exposure.exposures;
        totals.symptomatic += exposure.symptomatic_exposures;
    }

    let mut triggers: Vec<TriggerStats> = categories
        .iter()
        .filter(|(_, totals)| totals.symptomatic > 0)
        .map(|(category, totals)| TriggerStats {
            category: category.to_string(),
            emoji: category_emoji(category),
            issue_count: totals.symptomatic,
            total_exposures: totals.exposures,
            risk_percent: (f64::from(totals.symptomatic) / f64::from(totals.exposures.max(1))
                * 100.0)
                .round() as u32,
        })
        .collect();
    triggers.sort_by(|a, b| {
        b.risk_percent
            .cmp(&a.risk_percent)
            .then_with(|| b.issue_count.cmp(&a.issue_count))
    });
    triggers.truncate(MAX_CATEGORY_ENTRIES);

    let mut safe_foods: Vec<SafeFoodStats> = categories
        .iter()
        .filter(|(_, totals)| totals.symptomatic == 0)
        .map(|(category, totals)| SafeFoodStats {
            category: category.to_string(),
            emoji: category_emoji(category),
            safe_exposures: totals.exposures,
        })
        .collect();
    safe_foods.sort_by(|a, b| b.safe_exposures.cmp(&a.safe_exposures));
    safe_foods.truncate(MAX_CATEGORY_ENTRIES);

    OverviewStats {
        tracked_meals: diary.food_events.len() as u32,
        tracked_symptom_records: diary.symptom_events.len() as u32,
        triggered_foods: analysis
            .exposures
            .iter()
            .filter(|e| analysis.is_trigger(&e.food))
            .count() as u32,
        triggers,
        safe_foods,
    }
}
