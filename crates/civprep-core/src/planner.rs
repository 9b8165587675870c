//! Study-plan generation.
//!
//! A plan walks the curriculum cyclically, one topic per task slot, and
//! fills each day with task kinds in the fixed order Read, Practice,
//! Explain, Recall until the daily time budget would be exceeded.

use chrono::{Days, NaiveDate};

use crate::error::PlanError;
use crate::model::{PlanDay, StudyConfiguration, Task, TaskDurations, TaskKind, Topic};

/// Generate a plan with the default task durations.
pub fn generate_plan(
    config: &StudyConfiguration,
    topics: &[Topic],
) -> Result<Vec<PlanDay>, PlanError> {
    PlanGenerator::new(TaskDurations::default()).generate(config, topics)
}

/// Deterministic plan generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanGenerator {
    durations: TaskDurations,
}

impl PlanGenerator {
    pub fn new(durations: TaskDurations) -> Self {
        Self { durations }
    }

    pub fn durations(&self) -> &TaskDurations {
        &self.durations
    }

    /// The task kinds scheduled on every day for a budget of `hours_per_day`.
    ///
    /// The list is truncated at the first kind that would overflow the budget.
    pub fn daily_kinds(&self, hours_per_day: f64) -> Vec<TaskKind> {
        let budget = hours_per_day * 60.0;
        let mut used = 0u64;
        let mut kinds = Vec::new();
        for kind in TaskKind::ALL {
            let next = used + u64::from(self.durations.minutes_for(kind));
            if next as f64 > budget {
                break;
            }
            used = next;
            kinds.push(kind);
        }
        kinds
    }

    /// Transform a configuration into `duration_days` plan days.
    pub fn generate(
        &self,
        config: &StudyConfiguration,
        topics: &[Topic],
    ) -> Result<Vec<PlanDay>, PlanError> {
        validate_configuration(config)?;
        if topics.is_empty() {
            return Err(PlanError::invalid("curriculum has no topics"));
        }

        // Validated positive above.
        let days = config.duration_days as u32;
        date_for_day(config.start_date, days)?;
        let kinds = self.daily_kinds(config.hours_per_day);
        let mut cursor = topics.iter().cycle();
        let mut plan = Vec::new();

        for day in 1..=days {
            let date = date_for_day(config.start_date, day)?;
            let tasks = kinds
                .iter()
                .zip(cursor.by_ref())
                .map(|(&kind, topic)| Task {
                    topic: topic.clone(),
                    kind,
                    duration_mins: self.durations.minutes_for(kind),
                    is_done: false,
                })
                .collect();
            plan.push(PlanDay { day, date, tasks });
        }

        tracing::debug!(
            goal = %config.goal,
            days,
            tasks_per_day = kinds.len(),
            topics = topics.len(),
            "generated study plan"
        );

        Ok(plan)
    }
}

fn validate_configuration(config: &StudyConfiguration) -> Result<(), PlanError> {
    if config.goal.trim().is_empty() {
        return Err(PlanError::invalid("goal must not be empty"));
    }
    if config.duration_days <= 0 {
        return Err(PlanError::invalid(format!(
            "duration must be at least 1 day, got {}",
            config.duration_days
        )));
    }
    if !config.hours_per_day.is_finite() || config.hours_per_day < 0.0 {
        return Err(PlanError::invalid(format!(
            "hours per day must be a non-negative number, got {}",
            config.hours_per_day
        )));
    }
    Ok(())
}

fn date_for_day(start: NaiveDate, day: u32) -> Result<NaiveDate, PlanError> {
    start
        .checked_add_days(Days::new(u64::from(day - 1)))
        .ok_or_else(|| PlanError::invalid(format!("day {day} falls outside the calendar range")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn topics(n: usize) -> Vec<Topic> {
        (0..n)
            .map(|i| Topic {
                id: format!("t{i}"),
                name: format!("Topic {i}"),
                subject: "Polity".into(),
            })
            .collect()
    }

    fn config(days: i32, hours: f64) -> StudyConfiguration {
        StudyConfiguration {
            goal: "Prelims".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            duration_days: days,
            hours_per_day: hours,
        }
    }

    #[test]
    fn five_day_three_hour_plan() {
        let plan = generate_plan(&config(5, 3.0), &topics(6)).unwrap();
        assert_eq!(plan.len(), 5);
        for (i, day) in plan.iter().enumerate() {
            assert_eq!(day.day, i as u32 + 1);
            assert_eq!(
                day.date,
                NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap()
            );
            assert!(day.total_minutes() <= 180);
            let kinds: Vec<_> = day.tasks.iter().map(|t| t.kind).collect();
            assert_eq!(kinds, TaskKind::ALL.to_vec());
        }
    }

    #[test]
    fn dates_cross_month_boundary() {
        let mut cfg = config(3, 2.0);
        cfg.start_date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let plan = generate_plan(&cfg, &topics(2)).unwrap();
        assert_eq!(plan[1].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(plan[2].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn budget_truncates_task_list() {
        // 60 + 45 = 105 fits in 2h; adding Explain (30) would reach 135.
        let plan = generate_plan(&config(2, 2.0), &topics(3)).unwrap();
        for day in &plan {
            let kinds: Vec<_> = day.tasks.iter().map(|t| t.kind).collect();
            assert_eq!(kinds, vec![TaskKind::Read, TaskKind::Practice]);
            assert!(day.total_minutes() <= 120);
        }
    }

    #[test]
    fn tiny_budget_yields_empty_days() {
        let plan = generate_plan(&config(3, 0.5), &topics(3)).unwrap();
        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|d| d.tasks.is_empty()));

        let plan = generate_plan(&config(1, 0.0), &topics(3)).unwrap();
        assert!(plan[0].tasks.is_empty());
    }

    #[test]
    fn rejects_non_positive_duration() {
        for days in [0, -3] {
            let err = generate_plan(&config(days, 3.0), &topics(3)).unwrap_err();
            assert!(matches!(err, PlanError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn rejects_blank_goal_and_bad_hours() {
        let mut cfg = config(3, 3.0);
        cfg.goal = "   ".into();
        assert!(generate_plan(&cfg, &topics(2)).is_err());

        assert!(generate_plan(&config(3, -1.0), &topics(2)).is_err());
        assert!(generate_plan(&config(3, f64::NAN), &topics(2)).is_err());
    }

    #[test]
    fn rejects_empty_curriculum() {
        let err = generate_plan(&config(3, 3.0), &[]).unwrap_err();
        assert!(err.to_string().contains("no topics"));
    }

    #[test]
    fn task_count_matches_days_times_tasks_per_day() {
        let generator = PlanGenerator::default();
        let cfg = config(7, 2.5);
        let per_day = generator.daily_kinds(cfg.hours_per_day).len();
        let plan = generator.generate(&cfg, &topics(5)).unwrap();
        let total: usize = plan.iter().map(|d| d.tasks.len()).sum();
        assert_eq!(total, 7 * per_day);
    }

    #[test]
    fn topics_are_cyclically_balanced() {
        let curriculum = topics(7);
        let plan = generate_plan(&config(10, 3.0), &curriculum).unwrap();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for task in plan.iter().flat_map(|d| &d.tasks) {
            *counts.entry(task.topic.id.as_str()).or_default() += 1;
        }
        assert_eq!(counts.len(), curriculum.len());
        let max = counts.values().max().copied().unwrap();
        let min = counts.values().min().copied().unwrap();
        assert!(max - min <= 1, "unbalanced topic counts: {counts:?}");
    }

    #[test]
    fn topic_cursor_continues_across_days() {
        let plan = generate_plan(&config(2, 3.0), &topics(3)).unwrap();
        let ids: Vec<_> = plan
            .iter()
            .flat_map(|d| d.tasks.iter().map(|t| t.topic.id.as_str()))
            .collect();
        assert_eq!(ids, vec!["t0", "t1", "t2", "t0", "t1", "t2", "t0", "t1"]);
    }

    #[test]
    fn generation_is_deterministic() {
        let cfg = config(12, 3.0);
        let a = serde_json::to_string(&generate_plan(&cfg, &topics(5)).unwrap()).unwrap();
        let b = serde_json::to_string(&generate_plan(&cfg, &topics(5)).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn custom_durations_change_daily_kinds() {
        let generator = PlanGenerator::new(TaskDurations {
            read: 30,
            practice: 30,
            explain: 30,
            recall: 30,
        });
        assert_eq!(generator.daily_kinds(1.0).len(), 2);
        assert_eq!(generator.daily_kinds(2.0).len(), 4);
        assert_eq!(generator.daily_kinds(10.0).len(), 4);
    }

    #[test]
    fn oversized_duration_stops_the_day() {
        let generator = PlanGenerator::new(TaskDurations {
            practice: u32::MAX,
            ..TaskDurations::default()
        });
        assert_eq!(generator.daily_kinds(3.0), vec![TaskKind::Read]);

        let all_huge = PlanGenerator::new(TaskDurations {
            read: u32::MAX,
            practice: u32::MAX,
            explain: u32::MAX,
            recall: u32::MAX,
        });
        assert_eq!(all_huge.daily_kinds(f64::MAX).len(), 4);
        assert!(all_huge.daily_kinds(24.0).is_empty());
    }

    #[test]
    fn rejects_plan_running_past_the_calendar() {
        let err = generate_plan(&config(i32::MAX, 0.0), &topics(3)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("calendar range"));
    }
}
