use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::eligibility::EligibilityWindow;
use crate::model::ids::AttemptId;
use crate::model::profile::VisitorProfile;

//
// ─── NEW ATTEMPT ───────────────────────────────────────────────────────────────
//

/// A quiz completion that has not been persisted yet.
///
/// Repositories assign the identity when the row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttempt {
    pub name: String,
    pub company: String,
    pub phone: Option<String>,
    pub host_name: String,
    pub score: u32,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
}

impl NewAttempt {
    /// An empty phone is stored as `None`.
    #[must_use]
    pub fn from_profile(
        profile: &VisitorProfile,
        score: u32,
        passed: bool,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: profile.name().to_owned(),
            company: profile.company().to_owned(),
            phone: Some(profile.phone().to_owned()).filter(|p| !p.is_empty()),
            host_name: profile.host_name().to_owned(),
            score,
            passed,
            completed_at,
        }
    }
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// One persisted quiz completion.
///
/// Attempts are append-only: there is no way to mutate one after it has been
/// created. The serialized shape matches the `assessment_results` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    id: AttemptId,
    name: String,
    company: String,
    #[serde(default)]
    phone: Option<String>,
    host_name: String,
    score: u32,
    passed: bool,
    completed_at: DateTime<Utc>,
}

impl Attempt {
    #[must_use]
    pub fn new(id: AttemptId, attempt: NewAttempt) -> Self {
        Self {
            id,
            name: attempt.name,
            company: attempt.company,
            phone: attempt.phone,
            host_name: attempt.host_name,
            score: attempt.score,
            passed: attempt.passed,
            completed_at: attempt.completed_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> AttemptId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn company(&self) -> &str {
        &self.company
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// True when the attempt was completed inside the given window.
    #[must_use]
    pub fn is_within(&self, window: &EligibilityWindow) -> bool {
        window.contains(self.completed_at)
    }
}
