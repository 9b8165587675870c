//! Mock-test scoring with optional negative marking.
//!
//! A correct answer is worth one mark. With negative marking a wrong answer
//! costs a third of a mark; unattempted questions never cost anything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::model::{AnswerMap, MockTestResult, PerformanceLevel, Question};

/// Marks deducted for a wrong answer when negative marking is on.
pub const NEGATIVE_MARK_PENALTY: f64 = 1.0 / 3.0;

/// Raw score for a submission. Unclamped; negative when wrong answers dominate.
pub fn calculate_mock_score(
    questions: &[Question],
    answers: &AnswerMap,
    use_negative_marking: bool,
) -> f64 {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| match answers.get(i) {
            None => 0.0,
            Some(selected) if selected == q.correct_index => 1.0,
            Some(_) if use_negative_marking => -NEGATIVE_MARK_PENALTY,
            Some(_) => 0.0,
        })
        .sum()
}

/// `correct / total` as a fraction in `[0, 1]`.
pub fn accuracy_ratio(correct: usize, total: usize) -> Result<f64, ScoreError> {
    if total == 0 {
        return Err(ScoreError::DivisionUndefined);
    }
    Ok(correct as f64 / total as f64)
}

/// Accuracy as a whole percentage; 0 when there were no questions.
pub fn calculate_accuracy(correct: usize, total: usize) -> u32 {
    match accuracy_ratio(correct, total) {
        Ok(ratio) => (ratio * 100.0).round() as u32,
        Err(e) => {
            tracing::debug!("{e}, reporting 0%");
            0
        }
    }
}

/// Band an accuracy percentage into a performance tier.
pub fn get_performance_level(accuracy_percent: u32) -> PerformanceLevel {
    match accuracy_percent {
        80.. => PerformanceLevel::Excellent,
        60..=79 => PerformanceLevel::Good,
        40..=59 => PerformanceLevel::Average,
        _ => PerformanceLevel::Poor,
    }
}

/// Per-outcome answer counts for a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerTally {
    pub correct: usize,
    pub wrong: usize,
    pub unattempted: usize,
}

impl AnswerTally {
    pub fn total(&self) -> usize {
        self.correct + self.wrong + self.unattempted
    }

    pub fn accuracy(&self) -> u32 {
        calculate_accuracy(self.correct, self.total())
    }
}

/// Count correct, wrong, and unattempted answers.
pub fn tally_answers(questions: &[Question], answers: &AnswerMap) -> AnswerTally {
    let mut tally = AnswerTally::default();
    for (i, q) in questions.iter().enumerate() {
        match answers.get(i) {
            None => tally.unattempted += 1,
            Some(selected) if selected == q.correct_index => tally.correct += 1,
            Some(_) => tally.wrong += 1,
        }
    }
    tally
}

/// Everything the learner sees after submitting a mock test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub result: MockTestResult,
    pub tally: AnswerTally,
    pub accuracy: u32,
    pub level: PerformanceLevel,
}

/// Details of a submission that are not derived from the answers.
#[derive(Debug, Clone)]
pub struct Submission<'a> {
    pub topic: &'a str,
    pub date: NaiveDate,
    pub time_taken_mins: u32,
    pub use_negative_marking: bool,
}

/// Run one scoring pass and package the result record.
pub fn evaluate_submission(
    questions: &[Question],
    answers: &AnswerMap,
    submission: &Submission<'_>,
) -> ScoreCard {
    let score = calculate_mock_score(questions, answers, submission.use_negative_marking);
    let tally = tally_answers(questions, answers);
    let accuracy = tally.accuracy();
    let level = get_performance_level(accuracy);

    tracing::debug!(
        topic = submission.topic,
        score,
        correct = tally.correct,
        wrong = tally.wrong,
        unattempted = tally.unattempted,
        "scored mock test"
    );

    ScoreCard {
        result: MockTestResult {
            date: submission.date,
            topic: submission.topic.to_string(),
            score,
            total_questions: questions.len() as u32,
            correct_answers: tally.correct as u32,
            time_taken_mins: submission.time_taken_mins,
            uses_negative_marking: submission.use_negative_marking,
        },
        tally,
        accuracy,
        level,
    }
}
