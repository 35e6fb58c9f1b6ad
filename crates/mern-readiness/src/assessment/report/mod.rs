mod aggregate;
mod feedback;
pub mod views;

pub use aggregate::{aggregate, AssessmentReport, Recommendation};
pub use feedback::{LearningPath, PathKind};
