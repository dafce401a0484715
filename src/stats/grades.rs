use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub scores: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{letter}")
    }
}

/// Count of scores per letter grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    counts: [usize; 5],
}

impl GradeDistribution {
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut distribution = Self::default();
        for &score in scores {
            distribution.counts[Self::slot(Grade::from_score(score))] += 1;
        }
        distribution
    }

    pub fn count(&self, grade: Grade) -> usize {
        self.counts[Self::slot(grade)]
    }

    fn slot(grade: Grade) -> usize {
        match grade {
            Grade::A => 0,
            Grade::B => 1,
            Grade::C => 2,
            Grade::D => 3,
            Grade::F => 4,
        }
    }
}

impl fmt::Display for GradeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Grade::ALL
            .iter()
            .map(|&grade| format!("{grade}={}", self.count(grade)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Highest individual score and every student who reached it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopScore {
    pub names: Vec<String>,
    pub score: f64,
}

/// Average, highest and lowest of a score list
pub fn summarize(scores: &[f64]) -> Option<ScoreSummary> {
    let (&first, rest) = scores.split_first()?;
    let (highest, lowest) = rest
        .iter()
        .fold((first, first), |(hi, lo), &s| (hi.max(s), lo.min(s)));

    Some(ScoreSummary {
        average: scores.iter().sum::<f64>() / scores.len() as f64,
        highest,
        lowest,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Case-insensitive lookup by name
    pub fn find_student(&self, name: &str) -> Option<&Student> {
        let name = name.trim().to_lowercase();
        self.students
            .iter()
            .find(|student| student.name.to_lowercase() == name)
    }

    pub fn add_student(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Student name cannot be empty".to_string()));
        }
        if self.find_student(name).is_some() {
            return Err(Error::Validation(format!(
                "Student '{name}' already exists"
            )));
        }

        self.students.push(Student {
            name: name.to_string(),
            scores: Vec::new(),
        });
        Ok(())
    }

    pub fn add_score(&mut self, name: &str, score: f64) -> Result<()> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(Error::Validation(format!(
                "Score must be between {MIN_SCORE} and {MAX_SCORE}"
            )));
        }

        let key = name.trim().to_lowercase();
        let student = self
            .students
            .iter_mut()
            .find(|student| student.name.to_lowercase() == key)
            .ok_or_else(|| Error::NotFound(format!("No student named '{}'", name.trim())))?;

        student.scores.push(score);
        Ok(())
    }

    /// Every score recorded for every student, in roster order
    pub fn all_scores(&self) -> Vec<f64> {
        self.students
            .iter()
            .flat_map(|student| student.scores.iter().copied())
            .collect()
    }

    pub fn top_students(&self) -> Option<TopScore> {
        let mut top: Option<TopScore> = None;

        for student in &self.students {
            let Some(best) = summarize(&student.scores).map(|s| s.highest) else {
                continue;
            };

            match top.as_ref().map(|current| current.score) {
                Some(score) if best < score => {}
                Some(score) if best == score => {
                    if let Some(current) = top.as_mut() {
                        current.names.push(student.name.clone());
                    }
                }
                _ => {
                    top = Some(TopScore {
                        names: vec![student.name.clone()],
                        score: best,
                    })
                }
            }
        }

        top
    }
}
