//! Flashcard export processing: structural validation, subject detection,
//! grouping by tag, and merging the groups back together.
//!
//! An export is a tab-separated text file whose first lines are an opaque
//! header (`#separator:tab`, `#html:true`, `#tags column:N`). Every later line
//! is one card.

mod group;
mod merge;
mod pipeline;
mod subject;
mod validate;

pub use merge::merge_groups;
pub use pipeline::{PipelineOptions, run};
pub use subject::SubjectVocabulary;
