use tracing::debug;

use crate::domain::{
    common::{entities::RiskLevel, round_to},
    correlation::entities::{CorrelationAnalysis, FoodExposure},
    food_risk::entities::{FoodRiskCategory, FoodRiskProfile},
};

pub const AVOID_SCORE: f64 = 2.5;

fn risk_weight(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::Low => 1.0,
        RiskLevel::Medium => 2.0,
        RiskLevel::High | RiskLevel::Critical => 3.0,
    }
}

/// Buckets every exposed food. A food without correlations is only called safe
/// once it was eaten at least `min_exposures_for_safe` times.
pub fn classify_foods(
    analysis: &CorrelationAnalysis,
    min_exposures_for_safe: u32,
) -> Vec<FoodRiskProfile> {
    let mut profiles: Vec<FoodRiskProfile> = analysis
        .exposures
        .iter()
        .map(|exposure| profile(analysis, exposure, min_exposures_for_safe))
        .collect();

    profiles.sort_by(|a, b| {
        a.category_label
            .cmp(&b.category_label)
            .then_with(|| b.overall_risk_score.total_cmp(&a.overall_risk_score))
            .then_with(|| a.food.cmp(&b.food))
    });

    debug!(foods = profiles.len(), "Food risk classification finished");
    profiles
}

fn profile(
    analysis: &CorrelationAnalysis,
    exposure: &FoodExposure,
    min_exposures_for_safe: u32,
) -> FoodRiskProfile {
    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();
    let mut weight_sum = 0.0;
    let mut total = 0u32;

    for result in analysis.results_for(&exposure.food) {
        total += 1;
        weight_sum += risk_weight(result.risk_level);
        let bucket = match result.risk_level {
            RiskLevel::High | RiskLevel::Critical => &mut high,
            RiskLevel::Medium => &mut medium,
            RiskLevel::Low => &mut low,
        };
        bucket.push(result.symptom.clone());
    }
    for bucket in [&mut high, &mut medium, &mut low] {
        bucket.sort();
    }

    let overall_risk_score = if total > 0 {
        round_to(weight_sum / f64::from(total), 2)
    } else {
        0.0
    };

    let category_label = if total == 0 {
        if exposure.exposures >= min_exposures_for_safe {
            FoodRiskCategory::Safe
        } else {
            FoodRiskCategory::InsufficientData
        }
    } else if overall_risk_score >= AVOID_SCORE {
        FoodRiskCategory::Avoid
    } else {
        FoodRiskCategory::Caution
    };

    let recommended_action = match category_label {
        FoodRiskCategory::Avoid => format!(
            "Avoid {} for now; it is strongly linked to {}",
            exposure.food,
            high.join(", ")
        ),
        FoodRiskCategory::Caution => format!(
            "Eat {} in small portions and keep logging how you feel afterwards",
            exposure.food
        ),
        FoodRiskCategory::InsufficientData => format!(
            "Log {} a few more times ({} of {} meals so far) before drawing conclusions",
            exposure.food, exposure.exposures, min_exposures_for_safe
        ),
        FoodRiskCategory::Safe => format!("{} looks well tolerated", exposure.food),
    };

    FoodRiskProfile {
        food: exposure.food.clone(),
        category: exposure.category.clone(),
        category_label,
        exposures: exposure.exposures,
        total_correlations: total,
        high_risk_symptoms: high,
        medium_risk_symptoms: medium,
        low_risk_symptoms: low,
        overall_risk_score,
        recommended_action,
    }
}
