//! The `civprep score` command.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table};

use civprep_core::ledger::StudyLedger;
use civprep_core::model::{AnswerMap, Question};
use civprep_core::parser::load_content;
use civprep_core::scoring::{evaluate_submission, ScoreCard, Submission};
use civprep_core::traits::ContentRepository;

use crate::config::load_config_from;

pub struct ScoreArgs {
    pub topic: String,
    pub answers: String,
    pub negative_marking: Option<bool>,
    pub time_taken: u32,
    pub date: Option<NaiveDate>,
    pub explain: bool,
}

pub fn execute(args: ScoreArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config_from(config_path)?;
    let bank = load_content(&config.content)?;

    let topic = bank.topic(&args.topic).with_context(|| {
        format!(
            "unknown topic '{}'. Available: {:?}",
            args.topic,
            bank.topics().iter().map(|t| t.id.as_str()).collect::<Vec<_>>()
        )
    })?;
    let questions = bank.questions_for(&topic.id);
    if questions.is_empty() {
        eprintln!("Warning: topic '{}' has no questions.", topic.id);
    }

    let answers = parse_answers(&args.answers)?;
    let submission = Submission {
        topic: &topic.id,
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        time_taken_mins: args.time_taken,
        use_negative_marking: args.negative_marking.unwrap_or(config.negative_marking),
    };
    let card = evaluate_submission(&questions, &answers, &submission);

    print_card(&topic.name, &card);
    if args.explain {
        print_explanations(&questions, &answers);
    }

    if config.ledger.exists() {
        let mut ledger = StudyLedger::load_json(&config.ledger)?;
        ledger.record_result(card.result);
        ledger.save_json(&config.ledger)?;
        eprintln!("Result recorded in: {}", config.ledger.display());
    } else {
        eprintln!("No ledger found; result not recorded. Run `civprep plan` to start one.");
    }

    Ok(())
}

/// Accept either `0=2,1=0` notation or a path to a JSON answer map.
fn parse_answers(raw: &str) -> Result<AnswerMap> {
    let path = Path::new(raw);
    if path.is_file() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers from {}", path.display()))?;
        return serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answers JSON: {}", path.display()));
    }
    raw.parse::<AnswerMap>()
        .map_err(|e| anyhow::anyhow!("{e}"))
}

fn print_card(topic_name: &str, card: &ScoreCard) {
    let result = &card.result;
    println!(
        "Mock test: {} ({} questions, negative marking {})",
        topic_name,
        result.total_questions,
        if result.uses_negative_marking { "on" } else { "off" }
    );
    println!("Score: {:.2} / {}", result.score, result.total_questions);
    println!(
        "Correct: {}  Wrong: {}  Unattempted: {}",
        card.tally.correct, card.tally.wrong, card.tally.unattempted
    );
    println!("Accuracy: {}% ({})", card.accuracy, card.level);
}

fn print_explanations(questions: &[Question], answers: &AnswerMap) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", "Explanation"]);

    let option_text = |q: &Question, i: usize| q.options.get(i).cloned().unwrap_or_else(|| format!("#{i}"));

    for (i, q) in questions.iter().enumerate() {
        let yours = answers
            .get(i)
            .map(|o| option_text(q, o))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(i),
            Cell::new(&q.stem),
            Cell::new(yours),
            Cell::new(option_text(q, q.correct_index)),
            Cell::new(&q.explanation),
        ]);
    }

    println!("{table}");
}
