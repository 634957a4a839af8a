use std::sync::Arc;

use services::{Clock, LookupService, SubmissionService};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn lookup(&self) -> Arc<LookupService>;
    fn submission(&self) -> Arc<SubmissionService>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    lookup: Arc<LookupService>,
    submission: Arc<SubmissionService>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            lookup: app.lookup(),
            submission: app.submission(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn lookup(&self) -> Arc<LookupService> {
        Arc::clone(&self.lookup)
    }

    #[must_use]
    pub fn submission(&self) -> Arc<SubmissionService> {
        Arc::clone(&self.submission)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
