// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quiz result models: the locally computed summary and the stored record.

use crate::models::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Performance band shown on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    KeepPracticing,
    Good,
    Excellent,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage < 40 {
            Grade::KeepPracticing
        } else if percentage < 80 {
            Grade::Good
        } else {
            Grade::Excellent
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::KeepPracticing => "Keep practicing! React has a steep learning curve.",
            Grade::Good => "Good job! You have a solid foundation.",
            Grade::Excellent => "Excellent! You're ready for the hackathon.",
        }
    }
}

/// Final score of a completed quiz, as displayed.
///
/// Always computed locally; never depends on whether the stored record was
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSummary {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
}

impl ResultSummary {
    pub fn new(score: u32, total: u32) -> Self {
        Self {
            score,
            total,
            percentage: percentage(score, total),
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage)
    }

    /// Build the record persisted for `identity`.
    pub fn to_record(&self, identity: &Identity, timestamp: DateTime<Utc>) -> ResultRecord {
        ResultRecord {
            user_id: identity.uid.clone(),
            user_name: identity.display_name.clone(),
            score: self.score,
            total: self.total,
            percentage: self.percentage,
            timestamp,
        }
    }
}

/// Rounded percentage, 0 when `total` is 0.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((f64::from(score) / f64::from(total)) * 100.0).round() as u32
}

/// Result document stored in the `quiz_results` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResultRecord {
    pub user_id: String,
    pub user_name: String,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    #[serde(with = "firestore::serialize_as_timestamp")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds() {
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 0), 0);
    }

    #[test]
    fn grade_bands() {
        assert_eq!(ResultSummary::new(1, 5).grade(), Grade::KeepPracticing);
        assert_eq!(ResultSummary::new(2, 5).grade(), Grade::Good);
        assert_eq!(ResultSummary::new(3, 5).grade(), Grade::Good);
        assert_eq!(ResultSummary::new(4, 5).grade(), Grade::Excellent);
        assert_eq!(ResultSummary::new(5, 5).grade(), Grade::Excellent);
    }

    #[test]
    fn record_copies_identity_and_score() {
        let identity = Identity::new("uid-7", Some("Ada"), "ada@ldce.ac.in");
        let now = Utc::now();
        let record = ResultSummary::new(3, 5).to_record(&identity, now);

        assert_eq!(record.user_id, "uid-7");
        assert_eq!(record.user_name, "Ada");
        assert_eq!(record.score, 3);
        assert_eq!(record.total, 5);
        assert_eq!(record.percentage, 60);
        assert_eq!(record.timestamp, now);
    }
}
