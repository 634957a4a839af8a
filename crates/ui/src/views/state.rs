use services::{LookupError, SubmissionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    InvalidInput,
    StoreUnavailable,
    Configuration,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Some details were not accepted. Please check them and try again.",
            Self::StoreUnavailable => {
                "The training records service could not be reached. Please try again."
            }
            Self::Configuration => {
                "The training records service is not set up. Please contact site reception."
            }
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&LookupError> for ViewError {
    fn from(err: &LookupError) -> Self {
        match err {
            LookupError::InvalidInput(_) => Self::InvalidInput,
            LookupError::StoreUnavailable(_) => Self::StoreUnavailable,
            LookupError::Configuration(_) => Self::Configuration,
            _ => Self::Unknown,
        }
    }
}

impl From<&SubmissionError> for ViewError {
    fn from(err: &SubmissionError) -> Self {
        match err {
            SubmissionError::InvalidInput(_) => Self::InvalidInput,
            SubmissionError::StoreUnavailable(_) => Self::StoreUnavailable,
            SubmissionError::Configuration(_) => Self::Configuration,
            _ => Self::Unknown,
        }
    }
}

/// Status of one asynchronous request owned by a view model.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<ViewError> {
        match self {
            Self::Error(err) => Some(*err),
            _ => None,
        }
    }
}
