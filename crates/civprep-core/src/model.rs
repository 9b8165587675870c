//! Core data model types for civprep.
//!
//! Topics and questions come from a content bank; plans and mock-test
//! results are produced by the planner and score calculator.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A syllabus subject node, e.g. "Polity – Preamble".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    /// Stable identifier used by questions and results.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Coarse grouping such as "Polity" or "Economy".
    #[serde(default)]
    pub subject: String,
}

/// The four pedagogical modes a topic is studied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Read,
    Practice,
    Explain,
    Recall,
}

impl TaskKind {
    /// Every kind, in the order a study day schedules them.
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Read,
        TaskKind::Practice,
        TaskKind::Explain,
        TaskKind::Recall,
    ];
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Read => write!(f, "read"),
            TaskKind::Practice => write!(f, "practice"),
            TaskKind::Explain => write!(f, "explain"),
            TaskKind::Recall => write!(f, "recall"),
        }
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" => Ok(TaskKind::Read),
            "practice" | "practise" => Ok(TaskKind::Practice),
            "explain" => Ok(TaskKind::Explain),
            "recall" | "revise" => Ok(TaskKind::Recall),
            other => Err(format!("unknown task kind: {other}")),
        }
    }
}

/// Minutes allotted to each task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDurations {
    #[serde(default = "default_read")]
    pub read: u32,
    #[serde(default = "default_practice")]
    pub practice: u32,
    #[serde(default = "default_explain")]
    pub explain: u32,
    #[serde(default = "default_recall")]
    pub recall: u32,
}

impl TaskDurations {
    /// Duration in minutes for one task of `kind`.
    pub fn minutes_for(&self, kind: TaskKind) -> u32 {
        match kind {
            TaskKind::Read => self.read,
            TaskKind::Practice => self.practice,
            TaskKind::Explain => self.explain,
            TaskKind::Recall => self.recall,
        }
    }
}

impl Default for TaskDurations {
    fn default() -> Self {
        Self {
            read: default_read(),
            practice: default_practice(),
            explain: default_explain(),
            recall: default_recall(),
        }
    }
}

fn default_read() -> u32 {
    60
}
fn default_practice() -> u32 {
    45
}
fn default_explain() -> u32 {
    30
}
fn default_recall() -> u32 {
    20
}

/// One unit of study work inside a plan day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The topic this task covers.
    pub topic: Topic,
    /// How the topic is studied.
    pub kind: TaskKind,
    /// Scheduled length in minutes.
    pub duration_mins: u32,
    /// Set by the learner once the task is finished.
    #[serde(default)]
    pub is_done: bool,
}

/// A single day of a generated study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    /// 1-based sequence number.
    pub day: u32,
    /// Calendar date, `start_date + (day - 1)`.
    pub date: NaiveDate,
    /// Tasks in scheduled order.
    pub tasks: Vec<Task>,
}

impl PlanDay {
    /// Sum of the scheduled task durations.
    pub fn total_minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.duration_mins).sum()
    }

    /// Whether every task of the day is done. Days without tasks count as done.
    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(|t| t.is_done)
    }
}

/// Learner input to the plan generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfiguration {
    /// Free-text label such as "Prelims 2025".
    pub goal: String,
    /// First day of the plan.
    pub start_date: NaiveDate,
    /// Number of days to plan; must be at least 1.
    pub duration_days: i32,
    /// Daily study budget in hours.
    pub hours_per_day: f64,
}

/// A multiple-choice question from the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub stem: String,
    /// Option strings in display order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_index: usize,
    /// Topic identifier the question belongs to.
    pub topic: String,
    /// Shown to the learner after submission.
    #[serde(default)]
    pub explanation: String,
}

/// Selected option per question, keyed by the question index as a string.
///
/// Keys are stored in canonical decimal form; deserializing normalizes
/// `"07"` or `" 1"` and rejects keys that are not question indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, usize>",
    into = "BTreeMap<String, usize>"
)]
pub struct AnswerMap(BTreeMap<String, usize>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or change) the selected option for question `index`.
    pub fn record(&mut self, index: usize, option: usize) {
        self.0.insert(index.to_string(), option);
    }

    /// The selected option for question `index`, if attempted.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.0.get(&index.to_string()).copied()
    }

    /// Number of attempted questions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(usize, usize)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut map = AnswerMap::new();
        for (index, option) in iter {
            map.record(index, option);
        }
        map
    }
}

impl TryFrom<BTreeMap<String, usize>> for AnswerMap {
    type Error = String;

    fn try_from(raw: BTreeMap<String, usize>) -> Result<Self, Self::Error> {
        let mut map = AnswerMap::new();
        for (key, option) in raw {
            let index: usize = key
                .trim()
                .parse()
                .map_err(|_| format!("invalid question index: '{key}'"))?;
            if map.get(index).is_some() {
                return Err(format!("question {index} answered more than once"));
            }
            map.record(index, option);
        }
        Ok(map)
    }
}

impl From<AnswerMap> for BTreeMap<String, usize> {
    fn from(map: AnswerMap) -> Self {
        map.0
    }
}

/// Parses the `question=option` notation, e.g. `"0=2,1=0,4=3"`.
impl FromStr for AnswerMap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut map = AnswerMap::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (q, o) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected question=option, got '{pair}'"))?;
            let q: usize = q
                .trim()
                .parse()
                .map_err(|_| format!("invalid question index: '{}'", q.trim()))?;
            let o: usize = o
                .trim()
                .parse()
                .map_err(|_| format!("invalid option index: '{}'", o.trim()))?;
            map.record(q, o);
        }
        Ok(map)
    }
}

/// Outcome of one scored mock test. Appended to history, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockTestResult {
    /// Day the test was taken.
    pub date: NaiveDate,
    /// Topic identifier the test covered.
    pub topic: String,
    /// Raw score, possibly fractional or negative.
    pub score: f64,
    /// Number of questions in the test.
    pub total_questions: u32,
    /// Number of correctly answered questions.
    #[serde(default)]
    pub correct_answers: u32,
    /// Time the learner spent, in minutes.
    pub time_taken_mins: u32,
    /// Whether wrong answers were penalised.
    pub uses_negative_marking: bool,
}

/// A curriculum plus its question bank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Topics in curriculum order.
    #[serde(default)]
    pub topics: Vec<Topic>,
    /// Questions in bank order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl ContentBank {
    /// Append another bank's topics and questions after this one's.
    ///
    /// Topics already present by id are not repeated.
    pub fn merge(&mut self, other: ContentBank) {
        for topic in other.topics {
            if !self.topics.iter().any(|t| t.id == topic.id) {
                self.topics.push(topic);
            }
        }
        self.questions.extend(other.questions);
    }
}

/// Coarse banding of an accuracy percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceLevel {
    Poor,
    Average,
    Good,
    Excellent,
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceLevel::Excellent => write!(f, "Excellent"),
            PerformanceLevel::Good => write!(f, "Good"),
            PerformanceLevel::Average => write!(f, "Average"),
            PerformanceLevel::Poor => write!(f, "Poor"),
        }
    }
}
