use crate::stats::{summarize, GradeDistribution, Roster};
use crate::{Error, Result};
use std::io::{BufRead, Write};
use tracing::warn;

/// Menu-driven grade tracker over any line source
pub struct GradeTracker<R, W> {
    roster: Roster,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> GradeTracker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            roster: Roster::new(),
            input,
            output,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Show the menu until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.ask("Choose (1-6): ")? else {
                writeln!(self.output)?;
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.add_student()?,
                "2" => self.record_score()?,
                "3" => self.student_report()?,
                "4" => self.class_report()?,
                "5" => self.list_students()?,
                "6" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice; please select 1-6.")?,
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Grade Tracker Menu ---")?;
        writeln!(self.output, "1) Add a new student")?;
        writeln!(self.output, "2) Record a score for a student")?;
        writeln!(self.output, "3) Show a student's report")?;
        writeln!(self.output, "4) Show class report")?;
        writeln!(self.output, "5) Show all students")?;
        writeln!(self.output, "6) Exit")?;
        Ok(())
    }

    fn add_student(&mut self) -> Result<()> {
        let Some(name) = self.ask("Enter new student's name: ")? else {
            return Ok(());
        };

        match self.roster.add_student(&name) {
            Ok(()) => writeln!(self.output, "Student '{name}' added.")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn record_score(&mut self) -> Result<()> {
        let Some(name) = self.ask("Student name: ")? else {
            return Ok(());
        };
        if self.roster.find_student(&name).is_none() {
            writeln!(self.output, "No student named '{name}'.")?;
            return Ok(());
        }

        let Some(raw) = self.ask("Enter score (0-100): ")? else {
            return Ok(());
        };
        let Ok(score) = raw.parse::<f64>() else {
            writeln!(self.output, "Invalid score; please enter a number.")?;
            return Ok(());
        };

        match self.roster.add_score(&name, score) {
            Ok(()) => writeln!(self.output, "Added score {score} for {name}.")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn student_report(&mut self) -> Result<()> {
        let Some(name) = self.ask("Student name for report: ")? else {
            return Ok(());
        };

        let Some(student) = self.roster.find_student(&name) else {
            writeln!(self.output, "No student named '{name}'.")?;
            return Ok(());
        };
        let Some(summary) = summarize(&student.scores) else {
            writeln!(self.output, "{} has no scores yet.", student.name)?;
            return Ok(());
        };

        let scores: Vec<String> = student.scores.iter().map(f64::to_string).collect();
        writeln!(self.output, "\n--- Report for {} ---", student.name)?;
        writeln!(self.output, "Scores: {}", scores.join(", "))?;
        writeln!(
            self.output,
            "Average: {:.2}, High: {}, Low: {}",
            summary.average, summary.highest, summary.lowest
        )?;
        writeln!(
            self.output,
            "Grades: {}",
            GradeDistribution::from_scores(&student.scores)
        )?;
        Ok(())
    }

    fn class_report(&mut self) -> Result<()> {
        let scores = self.roster.all_scores();
        let (Some(summary), Some(top)) = (summarize(&scores), self.roster.top_students()) else {
            writeln!(self.output, "No scores recorded for any student.")?;
            return Ok(());
        };

        writeln!(self.output, "\n--- Class Report ---")?;
        writeln!(
            self.output,
            "Students tracked: {}",
            self.roster.students().len()
        )?;
        writeln!(self.output, "Total scores recorded: {}", scores.len())?;
        writeln!(
            self.output,
            "Average: {:.2}, High: {}, Low: {}",
            summary.average, summary.highest, summary.lowest
        )?;
        writeln!(
            self.output,
            "Grades: {}",
            GradeDistribution::from_scores(&scores)
        )?;
        writeln!(
            self.output,
            "Top score {} held by: {}",
            top.score,
            top.names.join(", ")
        )?;
        Ok(())
    }

    fn list_students(&mut self) -> Result<()> {
        if self.roster.is_empty() {
            writeln!(self.output, "No students have been added yet.")?;
            return Ok(());
        }

        writeln!(self.output, "\n--- All Students ---")?;
        for student in self.roster.students() {
            writeln!(self.output, "* {}", student.name)?;
        }
        Ok(())
    }

    fn report(&mut self, error: Error) -> Result<()> {
        let Some(message) = error.user_message().map(str::to_string) else {
            return Err(error);
        };
        warn!("Grade tracker input rejected: {}", message);
        writeln!(self.output, "{message}.")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
