//! Public types for the Triagem API.

mod analysis;
mod input;
mod notice;

pub(crate) use analysis::ErrorBody;
pub use analysis::{AnalysisResult, Category, PRODUCTIVE_LABEL, UNPRODUCTIVE_LABEL};
pub use input::{
    EmailFile, InputLimits, InputMode, SUPPORTED_MEDIA_TYPES, Submission, ViewState,
    is_supported_media_type, media_type_for,
};
pub use notice::{Notice, NoticeLevel};
