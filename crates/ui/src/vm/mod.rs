mod quiz_vm;
mod results_vm;
mod time_fmt;
mod video_vm;
mod workflow_vm;

pub use quiz_vm::{FeedbackVm, QuestionVm, QuizProgress, map_question};
pub use results_vm::{
    CertificationVm, DetailsVm, HistoryRowVm, QuestionReviewVm, ResultsVm, SubmissionBannerVm,
    map_results,
};
pub use time_fmt::{format_clock, format_date, format_datetime, time_ago};
pub use video_vm::{SegmentChipVm, SegmentState, VideoVm, map_video};
pub use workflow_vm::{Step, Workflow, WorkflowEffect, WorkflowIntent, run_effect};
