//! Core data model types for onsetgrade.
//!
//! These are the fundamental types the whole system uses to represent
//! cases, their predictions, the scoring windows, and per-case results.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::parse_date;

/// Stable identifier of a monitored subject.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CaseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A labelled case: the true symptom onset for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelledCase {
    pub case: CaseId,
    pub symptom_onset: NaiveDate,
}

/// Widths of the scoring windows around the true onset date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Days before onset in which a prediction counts as a valid early warning.
    #[serde(default = "default_days_before")]
    pub days_before_symptoms: u32,
    /// Days after onset in which a late prediction is not penalized.
    #[serde(default = "default_days_after")]
    pub days_after_symptom_to_omit: u32,
}

pub const DEFAULT_DAYS_BEFORE_SYMPTOMS: u32 = 5;
pub const DEFAULT_DAYS_AFTER_SYMPTOM_TO_OMIT: u32 = 5;

fn default_days_before() -> u32 {
    DEFAULT_DAYS_BEFORE_SYMPTOMS
}

fn default_days_after() -> u32 {
    DEFAULT_DAYS_AFTER_SYMPTOM_TO_OMIT
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            days_before_symptoms: DEFAULT_DAYS_BEFORE_SYMPTOMS,
            days_after_symptom_to_omit: DEFAULT_DAYS_AFTER_SYMPTOM_TO_OMIT,
        }
    }
}

impl WindowConfig {
    pub fn new(days_before_symptoms: u32, days_after_symptom_to_omit: u32) -> Self {
        Self {
            days_before_symptoms,
            days_after_symptom_to_omit,
        }
    }

    /// Days of an observation window that can never be quiet days: the
    /// lead-time window, the grace window, and the onset day itself.
    pub fn excluded_days(&self) -> i64 {
        i64::from(self.days_before_symptoms) + i64::from(self.days_after_symptom_to_omit) + 1
    }
}

/// A prediction row that could not be read as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedPrediction {
    /// Zero-based position of the row within the case's predictions.
    pub position: usize,
    /// The raw value as supplied.
    pub raw: String,
}

/// The predictions for one case, split into parsed dates and rejected rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionSet {
    pub parsed: Vec<NaiveDate>,
    pub rejected: Vec<RejectedPrediction>,
}

impl PredictionSet {
    /// Parse every raw prediction independently.
    pub fn parse<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = PredictionSet::default();
        for (position, value) in raw.into_iter().enumerate() {
            let value = value.as_ref();
            match parse_date(value) {
                Some(date) => set.parsed.push(date),
                None => set.rejected.push(RejectedPrediction {
                    position,
                    raw: value.to_string(),
                }),
            }
        }
        set
    }

    pub fn from_dates(dates: Vec<NaiveDate>) -> Self {
        Self {
            parsed: dates,
            rejected: Vec::new(),
        }
    }

    /// Total number of rows, parsed or not.
    pub fn len(&self) -> usize {
        self.parsed.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Why this set cannot be scored, if it cannot.
    pub fn degenerate_reason(&self) -> Option<DegenerateReason> {
        if self.is_empty() {
            Some(DegenerateReason::NoPredictions)
        } else if self.parsed.is_empty() {
            Some(DegenerateReason::AllUnparseable {
                count: self.rejected.len(),
            })
        } else {
            None
        }
    }
}

/// Why a case was scored as zero without looking at its windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegenerateReason {
    /// The model made no predictions for the case.
    NoPredictions,
    /// Every prediction failed to parse as a date.
    AllUnparseable { count: usize },
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::NoPredictions => write!(f, "no prediction available"),
            DegenerateReason::AllUnparseable { count } => {
                write!(f, "none of {count} prediction(s) could be parsed")
            }
        }
    }
}

/// The classification of a single case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub case: CaseId,
    /// 1 if at least one prediction fell in the lead-time window, else 0.
    pub true_positive: u8,
    /// `fp / (fp + tn)`, in `[0, 1]`.
    pub false_positive_rate: f64,
    /// Predictions inside the lead-time window.
    pub lead_hits: u32,
    pub false_positives: u32,
    /// Derived count of quiet days.
    pub true_negatives: u32,
    /// Prediction rows that failed to parse.
    pub rejected: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degenerate: Option<DegenerateReason>,
}

impl CaseResult {
    /// The zero result for a case whose predictions cannot be scored.
    pub fn degenerate(case: CaseId, reason: DegenerateReason, rejected: u32) -> Self {
        Self {
            case,
            true_positive: 0,
            false_positive_rate: 0.0,
            lead_hits: 0,
            false_positives: 0,
            true_negatives: 0,
            rejected,
            degenerate: Some(reason),
        }
    }

    pub fn is_hit(&self) -> bool {
        self.true_positive == 1
    }
}
