#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod lookup_service;
pub mod submission_service;

pub use induction_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, LookupError, SubmissionError};
pub use lookup_service::{LookupOutcome, LookupService, MIN_NAME_CHARS};
pub use submission_service::{Submission, SubmissionService};
