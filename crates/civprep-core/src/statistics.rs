//! Progress analytics and topic recommendations.
//!
//! Everything here is derived from a plan and the mock-test history; nothing
//! is stored.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{MockTestResult, PerformanceLevel, PlanDay, TaskKind, Topic};
use crate::scoring::{calculate_accuracy, get_performance_level};

/// Completion summary for a generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    pub total_tasks: usize,
    pub done_tasks: usize,
    pub scheduled_minutes: u32,
    pub done_minutes: u32,
    /// Fully completed days.
    pub days_complete: usize,
    /// `(done, total)` task counts per kind.
    pub per_kind: BTreeMap<TaskKind, (usize, usize)>,
}

impl PlanProgress {
    /// Share of tasks done, as a whole percentage.
    pub fn completion_percent(&self) -> u32 {
        calculate_accuracy(self.done_tasks, self.total_tasks)
    }
}

/// Summarise task completion across a plan.
pub fn plan_progress(plan: &[PlanDay]) -> PlanProgress {
    let mut progress = PlanProgress {
        total_tasks: 0,
        done_tasks: 0,
        scheduled_minutes: 0,
        done_minutes: 0,
        days_complete: 0,
        per_kind: BTreeMap::new(),
    };

    for day in plan {
        if day.is_complete() {
            progress.days_complete += 1;
        }
        for task in &day.tasks {
            let entry = progress.per_kind.entry(task.kind).or_default();
            entry.1 += 1;
            progress.total_tasks += 1;
            progress.scheduled_minutes += task.duration_mins;
            if task.is_done {
                entry.0 += 1;
                progress.done_tasks += 1;
                progress.done_minutes += task.duration_mins;
            }
        }
    }

    progress
}

/// Mock-test performance for a single topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicStats {
    pub topic: String,
    pub attempts: usize,
    pub best_score: f64,
    pub latest_score: f64,
    /// Mean of per-attempt accuracy percentages.
    pub avg_accuracy: f64,
    /// Tier of the most recent attempt.
    pub latest_level: PerformanceLevel,
}

fn result_accuracy(r: &MockTestResult) -> u32 {
    calculate_accuracy(r.correct_answers as usize, r.total_questions as usize)
}

/// Per-topic statistics, ordered by first appearance in the history.
pub fn topic_stats(history: &[MockTestResult]) -> Vec<TopicStats> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&MockTestResult>> = HashMap::new();
    for r in history {
        let entry = grouped.entry(r.topic.as_str()).or_default();
        if entry.is_empty() {
            order.push(r.topic.as_str());
        }
        entry.push(r);
    }

    order
        .into_iter()
        .filter_map(|topic| {
            let results = grouped.get(topic)?;
            let latest = results.last()?;
            let best_score = results
                .iter()
                .map(|r| r.score)
                .fold(f64::NEG_INFINITY, f64::max);
            let avg_accuracy = results
                .iter()
                .map(|r| f64::from(result_accuracy(r)))
                .sum::<f64>()
                / results.len() as f64;

            Some(TopicStats {
                topic: topic.to_string(),
                attempts: results.len(),
                best_score,
                latest_score: latest.score,
                avg_accuracy,
                latest_level: get_performance_level(result_accuracy(latest)),
            })
        })
        .collect()
}

/// A topic the learner should focus on next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub topic: Topic,
    /// `None` when the topic has never been tested.
    pub avg_accuracy: Option<f64>,
    pub reason: String,
}

/// Rank topics by need: untested topics first in curriculum order, then
/// tested topics by ascending average accuracy. Topics averaging Excellent
/// are left out.
pub fn recommend_focus(
    topics: &[Topic],
    history: &[MockTestResult],
    limit: usize,
) -> Vec<Recommendation> {
    let stats: HashMap<String, TopicStats> = topic_stats(history)
        .into_iter()
        .map(|s| (s.topic.clone(), s))
        .collect();

    let mut untested = Vec::new();
    let mut weak = Vec::new();
    for (position, topic) in topics.iter().enumerate() {
        match stats.get(&topic.id) {
            None => untested.push(Recommendation {
                topic: topic.clone(),
                avg_accuracy: None,
                reason: "not tested yet".into(),
            }),
            Some(s) => {
                let level = get_performance_level(s.avg_accuracy.round() as u32);
                if level == PerformanceLevel::Excellent {
                    continue;
                }
                weak.push((
                    position,
                    Recommendation {
                        topic: topic.clone(),
                        avg_accuracy: Some(s.avg_accuracy),
                        reason: format!(
                            "{level} average accuracy over {} attempt(s)",
                            s.attempts
                        ),
                    },
                ));
            }
        }
    }

    weak.sort_by(|(pa, a), (pb, b)| {
        a.avg_accuracy
            .partial_cmp(&b.avg_accuracy)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(pa.cmp(pb))
    });

    untested
        .into_iter()
        .chain(weak.into_iter().map(|(_, r)| r))
        .take(limit)
        .collect()
}
