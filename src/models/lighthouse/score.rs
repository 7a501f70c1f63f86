use serde::{Serialize, Serializer};
use std::fmt;

pub const NOT_APPLICABLE: &str = "N/A";

/// PageSpeed device emulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category score on the 0..=100 scale, or the "not applicable" sentinel
/// when the upstream report carried no score for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScore {
    Scored(u8),
    NotApplicable,
}

impl CategoryScore {
    pub fn from_fraction(score: Option<f64>) -> Self {
        match score {
            Some(value) if value.is_finite() => {
                CategoryScore::Scored((value * 100.0).round().clamp(0.0, 100.0) as u8)
            }
            _ => CategoryScore::NotApplicable,
        }
    }
}

impl Serialize for CategoryScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryScore::Scored(v) => serializer.serialize_u8(*v),
            CategoryScore::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScoreSet {
    pub performance: CategoryScore,
    pub accessibility: CategoryScore,
    pub best_practices: CategoryScore,
    pub seo: CategoryScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pwa: Option<CategoryScore>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub url: String,
    pub mobile: CategoryScoreSet,
    pub desktop: CategoryScoreSet,
    pub analyzed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fractions_round_to_whole_percentages() {
        assert_eq!(CategoryScore::from_fraction(Some(0.873)), CategoryScore::Scored(87));
        assert_eq!(CategoryScore::from_fraction(Some(0.875)), CategoryScore::Scored(88));
        assert_eq!(CategoryScore::from_fraction(Some(1.0)), CategoryScore::Scored(100));
        assert_eq!(CategoryScore::from_fraction(Some(0.0)), CategoryScore::Scored(0));
    }

    #[test]
    fn missing_scores_are_not_zero() {
        assert_eq!(CategoryScore::from_fraction(None), CategoryScore::NotApplicable);
        assert_eq!(
            CategoryScore::from_fraction(Some(f64::NAN)),
            CategoryScore::NotApplicable
        );
    }

    #[test]
    fn score_set_serializes_with_sentinel_and_without_pwa() {
        let set = CategoryScoreSet {
            performance: CategoryScore::Scored(90),
            accessibility: CategoryScore::NotApplicable,
            best_practices: CategoryScore::Scored(100),
            seo: CategoryScore::Scored(75),
            pwa: None,
        };
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({
                "performance": 90,
                "accessibility": "N/A",
                "bestPractices": 100,
                "seo": 75
            })
        );
    }
}
