//! The trailing six-month window that decides whether a prior attempt
//! exempts a visitor from retraining.
//!
//! One rule is used everywhere: the most recent attempt inside the window is
//! the *recent completion*, pass or fail. That same attempt is *certified*
//! only when it passed, and the certification runs out six months after it
//! was completed.

use chrono::{DateTime, Months, Utc};

use crate::model::Attempt;

/// Length of the eligibility window in calendar months.
pub const WINDOW_MONTHS: u32 = 6;

/// `[now - 6 months, ∞)`, computed from a single `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityWindow {
    since: DateTime<Utc>,
}

impl EligibilityWindow {
    /// Window ending at `now`.
    ///
    /// Month arithmetic clamps to the end of shorter months, so the window
    /// ending on 31 August starts on 28 (or 29) February.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        let since = now
            .checked_sub_months(Months::new(WINDOW_MONTHS))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { since }
    }

    #[must_use]
    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    /// Inclusive at the lower bound.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.since
    }

    /// Most recent attempt inside the window, regardless of pass/fail.
    ///
    /// On equal timestamps the earlier element of `attempts` wins.
    #[must_use]
    pub fn most_recent<'a>(&self, attempts: &'a [Attempt]) -> Option<&'a Attempt> {
        attempts
            .iter()
            .filter(|attempt| attempt.is_within(self))
            .reduce(|best, attempt| {
                if attempt.completed_at() > best.completed_at() {
                    attempt
                } else {
                    best
                }
            })
    }

    #[must_use]
    pub fn count_within(&self, attempts: &[Attempt]) -> usize {
        attempts.iter().filter(|a| a.is_within(self)).count()
    }
}

/// Certification state of the attempt selected as the recent completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Certification {
    Certified {
        completed_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    NotCertified,
}

impl Certification {
    #[must_use]
    pub fn for_attempt(attempt: &Attempt) -> Self {
        if attempt.passed() {
            let completed_at = attempt.completed_at();
            Self::Certified {
                completed_at,
                expires_at: certification_expiry(completed_at),
            }
        } else {
            Self::NotCertified
        }
    }

    #[must_use]
    pub fn is_certified(&self) -> bool {
        matches!(self, Self::Certified { .. })
    }
}

#[must_use]
pub fn certification_expiry(completed_at: DateTime<Utc>) -> DateTime<Utc> {
    completed_at
        .checked_add_months(Months::new(WINDOW_MONTHS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
