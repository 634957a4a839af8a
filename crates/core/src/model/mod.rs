mod attempt;
mod ids;
mod profile;
mod quiz;
mod video;

pub use attempt::{Attempt, NewAttempt};
pub use ids::AttemptId;
pub use profile::{
    FieldError, ProfileDraft, ProfileError, ProfileField, VisitorProfile, strip_html,
    validate_visitor_name,
};
pub use quiz::{AnswerRecord, Question, Quiz, QuizError, QuizScore};
pub use video::{Playlist, VideoSegment};
