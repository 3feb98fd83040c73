//! Turning Q-values into advice.

use std::fmt;

use cq_core::StationKind;

use crate::Action;

/// Area of the store the advice concerns.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RecommendationKind {
    Layout,
    Staffing,
    Breaks,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// High above 5, medium above 0.
    pub fn from_q_value(q: f64) -> Self {
        if q > 5.0 {
            Priority::High
        } else if q > 0.0 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// The edit a layout tool should apply for a recommendation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutChange {
    OpenStation,
    CloseStation,
    AdjustBreaks,
}

/// One piece of advice derived from a Q-value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    pub action:               Action,
    pub kind:                 RecommendationKind,
    pub change:               LayoutChange,
    pub description:          String,
    pub impact:               String,
    /// Q-value scaled per action, or the action's floor when Q ≤ 0.
    pub expected_improvement: f64,
    /// `(Q + 10) / 20` clamped to [0.5, 0.95].
    pub confidence:           f64,
    pub priority:             Priority,
    /// Kind of station to add or convert to, if any.
    pub new_station_kind:     Option<StationKind>,
    pub q_value:              f64,
}

/// Q-value above which `no_change` is worth reporting.
pub const NO_CHANGE_THRESHOLD: f64 = 3.0;

impl Recommendation {
    /// Advice for `action` at value `q`.  `None` for `no_change` unless
    /// `q` exceeds [`NO_CHANGE_THRESHOLD`].
    pub fn from_action(action: Action, q: f64) -> Option<Self> {
        let confidence = ((q + 10.0) / 20.0).clamp(0.5, 0.95);
        let priority = Priority::from_q_value(q);
        let scaled = |k: f64| if q > 0.0 { q * k } else { k };

        let (kind, change, description, impact, expected_improvement, new_station_kind) = match action {
            Action::AddRegular => (
                RecommendationKind::Layout,
                LayoutChange::OpenStation,
                "Add regular checkout station",
                "Reduce wait time by increasing service capacity",
                scaled(5.0),
                Some(StationKind::Regular),
            ),
            Action::AddKiosk => (
                RecommendationKind::Layout,
                LayoutChange::OpenStation,
                "Add self-service kiosk",
                "Increase throughput for customers with few items",
                scaled(5.0),
                Some(StationKind::Kiosk),
            ),
            Action::RemoveStation => (
                RecommendationKind::Layout,
                LayoutChange::CloseStation,
                "Remove underutilized checkout station",
                "Improve resource efficiency and reduce costs",
                scaled(4.0),
                None,
            ),
            Action::ConvertToKiosk => (
                RecommendationKind::Staffing,
                LayoutChange::AdjustBreaks,
                "Convert regular checkout to self-service kiosk",
                "Better serve customers with few items",
                scaled(3.0),
                Some(StationKind::Kiosk),
            ),
            Action::ConvertToRegular => (
                RecommendationKind::Staffing,
                LayoutChange::AdjustBreaks,
                "Convert self-service kiosk to regular checkout",
                "Better serve customers with many items",
                scaled(3.0),
                Some(StationKind::Regular),
            ),
            Action::OptimizeLayout => (
                RecommendationKind::Layout,
                LayoutChange::AdjustBreaks,
                "Optimize checkout layout",
                "Improve customer flow and reduce congestion",
                scaled(6.0),
                None,
            ),
            Action::NoChange => {
                if q <= NO_CHANGE_THRESHOLD {
                    return None;
                }
                return Some(Self {
                    action,
                    kind:                 RecommendationKind::Breaks,
                    change:               LayoutChange::AdjustBreaks,
                    description:          "Current layout is optimal".into(),
                    impact:               "Maintain current performance".into(),
                    expected_improvement: 0.0,
                    confidence,
                    priority:             Priority::Low,
                    new_station_kind:     None,
                    q_value:              q,
                });
            }
        };

        Some(Self {
            action,
            kind,
            change,
            description: description.into(),
            impact: impact.into(),
            expected_improvement,
            confidence,
            priority,
            new_station_kind,
            q_value: q,
        })
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}] {} ({}; confidence {:.0}%, +{:.1})",
            self.priority,
            self.description,
            self.impact,
            self.confidence * 100.0,
            self.expected_improvement,
        )
    }
}
