use crate::domain::{
    common::entities::RiskLevel,
    correlation::entities::CorrelationAnalysis,
    food_risk::entities::{FoodRiskCategory, FoodRiskProfile},
    food_stats::value_objects::SymptomStatsSummary,
    forecast::entities::Forecast,
    recommendation::entities::{Alert, AlertSeverity, AlertTrigger},
    trend::entities::TrendOutlook,
};

pub const DEFAULT_RECOMMENDATION: &str =
    "Keep logging meals and symptoms; more entries make these insights more reliable";

const MIN_TRACKING_DAYS: u32 = 14;
/// Most frequent symptoms that get specific advice.
const ADVISED_SYMPTOMS: usize = 3;

fn symptom_advice(symptom: &str) -> &'static [&'static str] {
    match symptom {
        "nausea" => &[
            "Try smaller, more frequent meals and avoid both an empty and an overly full stomach",
            "Ginger or peppermint tea may ease nausea",
        ],
        "abdominal_pain" => &[
            "Note when pain starts relative to your meals",
            "A warm compress on the abdomen may relieve discomfort",
        ],
        "diarrhea" => &[
            "Drink more fluids to avoid dehydration",
            "Consider bland foods such as bananas, rice, apple sauce and toast",
        ],
        "bloating" => &[
            "Watch for high-FODMAP foods as possible triggers",
            "A short walk after meals can help digestion",
        ],
        _ => &[],
    }
}

/// Days of tracking needed to confirm the strongest correlation.
pub fn tracking_period_days(analysis: &CorrelationAnalysis) -> Option<u32> {
    analysis
        .results
        .first()
        .map(|top| ((top.avg_lag_hours * 2.0).ceil().max(0.0) as u32).max(MIN_TRACKING_DAYS))
}

/// Human-readable guidance. Never empty.
pub fn recommendations(
    profiles: &[FoodRiskProfile],
    correlations: Option<&CorrelationAnalysis>,
    forecast: Option<&Forecast>,
    symptom_stats: &SymptomStatsSummary,
) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    for category in [
        FoodRiskCategory::Avoid,
        FoodRiskCategory::Caution,
        FoodRiskCategory::InsufficientData,
    ] {
        recommendations.extend(
            profiles
                .iter()
                .filter(|p| p.category_label == category)
                .map(|p| p.recommended_action.clone()),
        );
    }

    if let Some(days) = correlations.and_then(tracking_period_days) {
        recommendations.push(format!(
            "Keep tracking for at least {} days to confirm these patterns",
            days
        ));
    }

    if let Some(forecast) = forecast {
        let label = forecast.metric.label();
        match forecast.model.outlook {
            TrendOutlook::Worsening => recommendations.push(format!(
                "Your {} is trending worse; review recent meals and talk to your care team if it continues",
                label
            )),
            TrendOutlook::Improving => recommendations.push(format!(
                "Your {} is improving; keep up your current routine",
                label
            )),
            TrendOutlook::Stable => {}
        }

        let high_risk_days = forecast.high_risk_days();
        if high_risk_days > 0 {
            recommendations.push(format!(
                "{} of the next {} days are forecast as high risk for {}",
                high_risk_days,
                forecast.predictions.len(),
                label
            ));
        }
    }

    for stats in symptom_stats.items.iter().take(ADVISED_SYMPTOMS) {
        recommendations.extend(symptom_advice(&stats.symptom).iter().map(|a| a.to_string()));
    }

    if recommendations.is_empty() {
        recommendations.push(DEFAULT_RECOMMENDATION.to_string());
    }
    recommendations
}

/// Alerts for high-risk forecast days and for a worsening outlook.
pub fn alerts(forecast: Option<&Forecast>) -> Vec<Alert> {
    let Some(forecast) = forecast else {
        return Vec::new();
    };
    let model = &forecast.model;
    let label = forecast.metric.label();
    let mut alerts = Vec::new();

    if model.outlook == TrendOutlook::Worsening {
        alerts.push(Alert {
            message: format!(
                "Your {} has been getting worse by {:.2} points per day",
                label,
                model.slope.abs()
            ),
            severity: AlertSeverity::Warning,
            triggered_by: AlertTrigger::MetricTrend {
                metric: forecast.metric,
                direction: model.direction,
                outlook: model.outlook,
                slope: model.slope,
            },
        });
    }

    for prediction in &forecast.predictions {
        let severity = match prediction.risk_level {
            RiskLevel::Critical => AlertSeverity::Critical,
            RiskLevel::High => AlertSeverity::High,
            RiskLevel::Low | RiskLevel::Medium => continue,
        };
        alerts.push(Alert {
            message: format!(
                "{} risk forecast for {} on {}: expected around {:.1}",
                prediction.risk_level.as_str(),
                label,
                prediction.date,
                prediction.predicted_value
            ),
            severity,
            triggered_by: AlertTrigger::ForecastDay {
                date: prediction.date,
                metric: forecast.metric,
                predicted_value: prediction.predicted_value,
                risk_level: prediction.risk_level,
            },
        });
    }

    alerts
}
