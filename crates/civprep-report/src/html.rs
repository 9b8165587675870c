//! HTML progress report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use civprep_core::ledger::StudyLedger;
use civprep_core::model::{PlanDay, Topic};
use civprep_core::scoring::{calculate_accuracy, get_performance_level};
use civprep_core::statistics::{plan_progress, recommend_focus, topic_stats, TopicStats};

/// How many recommendations the report lists.
const RECOMMENDATION_LIMIT: usize = 5;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a study ledger.
///
/// `topics` is the curriculum used for display names and recommendations.
pub fn generate_html(ledger: &StudyLedger, topics: &[Topic]) -> String {
    let mut html = String::new();
    let config = &ledger.configuration;
    let progress = plan_progress(&ledger.plan);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>civprep — {}</title>\n",
        html_escape(&config.goal)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&config.goal)));
    html.push_str(&format!(
        "<p class=\"meta\">{} days from {} | {:.1} h/day | generated {}</p>\n",
        config.duration_days,
        config.start_date.format("%Y-%m-%d"),
        config.hours_per_day,
        ledger.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html.push_str("</header>\n");

    // Progress summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Progress</h2>\n");
    html.push_str(&format!(
        "<p><strong>{}%</strong> of tasks done ({}/{}), {} of {} minutes, {} day(s) complete</p>\n",
        progress.completion_percent(),
        progress.done_tasks,
        progress.total_tasks,
        progress.done_minutes,
        progress.scheduled_minutes,
        progress.days_complete,
    ));
    let kind_rows: Vec<(String, f64)> = progress
        .per_kind
        .iter()
        .map(|(kind, (done, total))| {
            (
                kind.to_string(),
                f64::from(calculate_accuracy(*done, *total)) / 100.0,
            )
        })
        .collect();
    if !kind_rows.is_empty() {
        html.push_str(&generate_bar_chart(&kind_rows));
    }
    html.push_str("</section>\n");

    // Plan
    html.push_str("<section class=\"plan\">\n");
    html.push_str("<h2>Plan</h2>\n");
    html.push_str("<table class=\"plan-table\">\n");
    html.push_str("<thead><tr><th>Day</th><th>Date</th><th>Tasks</th><th>Minutes</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for day in &ledger.plan {
        html.push_str(&plan_row(day));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Mock-test history
    html.push_str("<section class=\"history\">\n");
    html.push_str("<h2>Mock tests</h2>\n");
    if ledger.history.is_empty() {
        html.push_str("<p class=\"meta\">No mock tests taken yet.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\" id=\"history\">\n");
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Date</th><th onclick=\"sortTable(1)\">Topic</th><th onclick=\"sortTable(2)\">Score</th><th onclick=\"sortTable(3)\">Accuracy</th><th onclick=\"sortTable(4)\">Level</th><th>Time</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for r in &ledger.history {
            let accuracy =
                calculate_accuracy(r.correct_answers as usize, r.total_questions as usize);
            let level = get_performance_level(accuracy);
            let marking = if r.uses_negative_marking { " (−⅓)" } else { "" };
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{:.2}/{}{}</td><td>{}%</td><td>{}</td><td>{} min</td></tr>\n",
                level_class(accuracy),
                r.date.format("%Y-%m-%d"),
                html_escape(display_name(topics, &r.topic)),
                r.score,
                r.total_questions,
                marking,
                accuracy,
                level,
                r.time_taken_mins,
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&topic_table(&topic_stats(&ledger.history), topics));
    }
    html.push_str("</section>\n");

    // Recommendations
    let recs = recommend_focus(topics, &ledger.history, RECOMMENDATION_LIMIT);
    if !recs.is_empty() {
        html.push_str("<section class=\"recommendations\">\n");
        html.push_str("<h2>Focus next</h2>\n<ol>\n");
        for rec in &recs {
            html.push_str(&format!(
                "<li><strong>{}</strong> — {}</li>\n",
                html_escape(&rec.topic.name),
                html_escape(&rec.reason)
            ));
        }
        html.push_str("</ol>\n</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(ledger)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(ledger: &StudyLedger, topics: &[Topic], path: &Path) -> Result<()> {
    let html = generate_html(ledger, topics);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn display_name<'a>(topics: &'a [Topic], id: &'a str) -> &'a str {
    topics
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.as_str())
        .unwrap_or(id)
}

fn level_class(accuracy: u32) -> &'static str {
    if accuracy >= 60 {
        "pass"
    } else {
        "fail"
    }
}

fn plan_row(day: &PlanDay) -> String {
    let tasks = if day.tasks.is_empty() {
        "<em>rest</em>".to_string()
    } else {
        day.tasks
            .iter()
            .map(|t| {
                let mark = if t.is_done { "✔" } else { "○" };
                format!(
                    "<span class=\"task{}\">{} {} · {}</span>",
                    if t.is_done { " done" } else { "" },
                    mark,
                    t.kind,
                    html_escape(&t.topic.name)
                )
            })
            .collect::<Vec<_>>()
            .join("<br>")
    };
    let class = if !day.tasks.is_empty() && day.is_complete() {
        " class=\"pass\""
    } else {
        ""
    };
    format!(
        "<tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        class,
        day.day,
        day.date.format("%a %Y-%m-%d"),
        tasks,
        day.total_minutes()
    )
}

fn topic_table(stats: &[TopicStats], topics: &[Topic]) -> String {
    let mut html = String::new();
    html.push_str("<h3>By topic</h3>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Topic</th><th>Attempts</th><th>Best</th><th>Latest</th><th>Avg accuracy</th><th>Latest level</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for s in stats {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.0}%</td><td>{}</td></tr>\n",
            html_escape(display_name(topics, &s.topic)),
            s.attempts,
            s.best_score,
            s.latest_score,
            s.avg_accuracy,
            s.latest_level,
        ));
    }
    html.push_str("</tbody></table>\n");
    html
}

/// Horizontal bars for `(label, fraction)` rows.
fn generate_bar_chart(rows: &[(String, f64)]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total_height = rows.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, fraction)) in rows.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (fraction.clamp(0.0, 1.0) * max_width as f64) as usize;

        let color = if *fraction >= 0.8 {
            "#22c55e"
        } else if *fraction >= 0.4 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.0}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            fraction * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); }
#history th { cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.task.done { opacity: 0.6; text-decoration: line-through; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('history');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
