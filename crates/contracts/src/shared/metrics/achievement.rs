use serde::{Deserialize, Serialize};

/// Lower edge of the "in progress" band for larger-is-better metrics.
pub const IN_PROGRESS_FROM: f64 = 85.0;
/// Upper edge of the tolerated overshoot for smaller-is-better metrics.
pub const OVERSHOOT_LIMIT: f64 = 115.0;

/// Five-tier status shown on progress-bar rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementStatus {
    NoData,
    Excellent,
    Met,
    Warning,
    Critical,
}

impl AchievementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementStatus::NoData => "no-data",
            AchievementStatus::Excellent => "excellent",
            AchievementStatus::Met => "met",
            AchievementStatus::Warning => "warning",
            AchievementStatus::Critical => "critical",
        }
    }
}

/// Finer band behind [`AchievementStatus`]. Both `InProgress` and
/// `Attention` collapse to `Warning`; the band only changes the caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    NoData,
    /// smaller-is-better, at or under goal
    Excellent,
    /// larger-is-better, at or over goal
    Met,
    /// larger-is-better, 85..100%
    InProgress,
    /// larger-is-better, under 85%
    Attention,
    /// smaller-is-better, 100..=115%
    AboveTarget,
    /// smaller-is-better, over 115%
    Critical,
}

impl ProgressBand {
    pub fn from_percent(percent_of_goal: Option<f64>, smaller_is_better: bool) -> Self {
        let Some(pct) = percent_of_goal else {
            return ProgressBand::NoData;
        };

        if smaller_is_better {
            if pct <= 100.0 {
                ProgressBand::Excellent
            } else if pct <= OVERSHOOT_LIMIT {
                ProgressBand::AboveTarget
            } else {
                ProgressBand::Critical
            }
        } else if pct >= 100.0 {
            ProgressBand::Met
        } else if pct >= IN_PROGRESS_FROM {
            ProgressBand::InProgress
        } else {
            ProgressBand::Attention
        }
    }

    pub fn status(&self) -> AchievementStatus {
        match self {
            ProgressBand::NoData => AchievementStatus::NoData,
            ProgressBand::Excellent => AchievementStatus::Excellent,
            ProgressBand::Met => AchievementStatus::Met,
            ProgressBand::InProgress | ProgressBand::Attention | ProgressBand::AboveTarget => {
                AchievementStatus::Warning
            }
            ProgressBand::Critical => AchievementStatus::Critical,
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            ProgressBand::NoData => "Sem meta",
            ProgressBand::Excellent => "Excelente",
            ProgressBand::Met => "Meta batida",
            ProgressBand::InProgress => "Em andamento",
            ProgressBand::Attention => "Atenção",
            ProgressBand::AboveTarget => "Acima da meta",
            ProgressBand::Critical => "Crítico",
        }
    }
}

/// Per-cell checkmark. `None` when no goal is set: rendered neutral, not as
/// a miss.
pub fn is_achieved(realized: f64, goal: Option<f64>, smaller_is_better: bool) -> Option<bool> {
    let goal = goal?;
    Some(if smaller_is_better {
        realized <= goal
    } else {
        realized >= goal
    })
}

/// Realized value as a percentage of the goal.
///
/// A zero goal with a positive realized value counts as fully achieved.
pub fn percent_of_goal(realized: f64, goal: Option<f64>) -> Option<f64> {
    let goal = goal?;
    Some(if goal > 0.0 {
        realized / goal * 100.0
    } else if realized > 0.0 {
        100.0
    } else {
        0.0
    })
}

pub fn classify(percent_of_goal: Option<f64>, smaller_is_better: bool) -> AchievementStatus {
    ProgressBand::from_percent(percent_of_goal, smaller_is_better).status()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_achieved() {
        assert_eq!(is_achieved(100.0, Some(100.0), false), Some(true));
        assert_eq!(is_achieved(99.0, Some(100.0), false), Some(false));
        assert_eq!(is_achieved(101.0, Some(100.0), true), Some(false));
        assert_eq!(is_achieved(100.0, Some(100.0), true), Some(true));
        assert_eq!(is_achieved(50.0, None, false), None);
        assert_eq!(is_achieved(0.0, None, true), None);
    }

    #[test]
    fn test_classify_larger_is_better() {
        assert_eq!(classify(Some(100.0), false), AchievementStatus::Met);
        assert_eq!(classify(Some(140.0), false), AchievementStatus::Met);
        assert_eq!(classify(Some(85.0), false), AchievementStatus::Warning);
        assert_eq!(classify(Some(84.0), false), AchievementStatus::Warning);
        assert_eq!(classify(Some(0.0), false), AchievementStatus::Warning);
        assert_eq!(classify(None, false), AchievementStatus::NoData);
    }

    #[test]
    fn test_classify_smaller_is_better() {
        assert_eq!(classify(Some(60.0), true), AchievementStatus::Excellent);
        assert_eq!(classify(Some(100.0), true), AchievementStatus::Excellent);
        assert_eq!(classify(Some(110.0), true), AchievementStatus::Warning);
        assert_eq!(classify(Some(115.0), true), AchievementStatus::Warning);
        assert_eq!(classify(Some(116.0), true), AchievementStatus::Critical);
        assert_eq!(classify(None, true), AchievementStatus::NoData);
    }

    #[test]
    fn test_bands_split_warning() {
        assert_eq!(
            ProgressBand::from_percent(Some(90.0), false),
            ProgressBand::InProgress
        );
        assert_eq!(
            ProgressBand::from_percent(Some(84.9), false),
            ProgressBand::Attention
        );
        assert_eq!(ProgressBand::InProgress.caption(), "Em andamento");
        assert_eq!(ProgressBand::Attention.caption(), "Atenção");
    }

    #[test]
    fn test_percent_of_goal() {
        assert_eq!(percent_of_goal(50.0, Some(200.0)), Some(25.0));
        assert_eq!(percent_of_goal(10.0, Some(0.0)), Some(100.0));
        assert_eq!(percent_of_goal(0.0, Some(0.0)), Some(0.0));
        assert_eq!(percent_of_goal(10.0, None), None);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&AchievementStatus::NoData).unwrap();
        assert_eq!(json, "\"no-data\"");
        assert_eq!(AchievementStatus::Critical.as_str(), "critical");
    }
}
