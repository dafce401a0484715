// Companion tools: water-quality statistics and a grade tracker

pub mod grades;
pub mod water;

// Re-exports
pub use grades::{summarize, Grade, GradeDistribution, Roster, ScoreSummary, Student, TopScore};
pub use water::{geometric_mean, highest, Reading, ReadingSet};
