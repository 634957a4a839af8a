use std::sync::Arc;

use induction_core::model::{Attempt, strip_html};
use storage::repository::{AttemptRepository, NameMatch};

use crate::Clock;
use crate::error::LookupError;

/// Shortest searchable name, counted in characters after trimming.
pub const MIN_NAME_CHARS: usize = 2;

/// Result of one name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub searched_name: String,
    /// Every match from the first pass that found anything, most recent first.
    pub completions: Vec<Attempt>,
    /// Most recent match inside the eligibility window, pass or fail.
    pub recent: Option<Attempt>,
    /// Pass that produced `completions`; `None` when nothing matched.
    pub matched_by: Option<NameMatch>,
    pub recent_count: usize,
}

impl LookupOutcome {
    #[must_use]
    pub fn has_completions(&self) -> bool {
        !self.completions.is_empty()
    }

    #[must_use]
    pub fn has_recent_completion(&self) -> bool {
        self.recent.is_some()
    }

    /// User-facing summary of what was found.
    #[must_use]
    pub fn message(&self) -> String {
        match (self.completions.len(), &self.recent) {
            (0, _) => format!("No training records found for {}", self.searched_name),
            (n, Some(_)) => format!(
                "Found {n} training record(s) for {}, including a completion in the last 6 months",
                self.searched_name
            ),
            (n, None) => format!(
                "Found {n} training record(s) for {}, none in the last 6 months",
                self.searched_name
            ),
        }
    }
}

/// Finds prior attempts for a visitor name.
#[derive(Clone)]
pub struct LookupService {
    clock: Clock,
    attempts: Arc<dyn AttemptRepository>,
}

impl LookupService {
    #[must_use]
    pub fn new(clock: Clock, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { clock, attempts }
    }

    /// Look up attempts for `raw_name`, escalating from exact to substring
    /// matching and stopping at the first pass with results.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::InvalidInput` if the trimmed name is shorter than
    /// two characters.
    /// Returns `LookupError::StoreUnavailable` or `LookupError::Configuration`
    /// if the store cannot be queried.
    pub async fn lookup(&self, raw_name: &str) -> Result<LookupOutcome, LookupError> {
        let searched_name = strip_html(raw_name);
        if searched_name.chars().count() < MIN_NAME_CHARS {
            return Err(LookupError::InvalidInput(
                "Please enter a valid name (at least 2 characters)".into(),
            ));
        }

        let mut completions = Vec::new();
        let mut matched_by = None;
        for strategy in NameMatch::ESCALATION {
            let found = self
                .attempts
                .find_by_name(&searched_name, strategy)
                .await
                .inspect_err(|err| {
                    tracing::warn!(error = %err, strategy = strategy.as_str(), "name lookup failed");
                })?;
            if !found.is_empty() {
                tracing::debug!(
                    strategy = strategy.as_str(),
                    matches = found.len(),
                    "name lookup matched"
                );
                completions = found;
                matched_by = Some(strategy);
                break;
            }
        }

        let window = self.clock.eligibility_window();
        let recent = window.most_recent(&completions).cloned();
        let recent_count = window.count_within(&completions);

        tracing::info!(
            matches = completions.len(),
            recent = recent.is_some(),
            "name lookup finished"
        );

        Ok(LookupOutcome {
            searched_name,
            completions,
            recent,
            matched_by,
            recent_count,
        })
    }
}
