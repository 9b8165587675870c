//! The `civprep init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create civprep.toml
    if std::path::Path::new("civprep.toml").exists() {
        println!("civprep.toml already exists, skipping.");
    } else {
        std::fs::write("civprep.toml", SAMPLE_CONFIG)?;
        println!("Created civprep.toml");
    }

    // Create starter content bank
    std::fs::create_dir_all("content")?;
    let bank_path = std::path::Path::new("content/upsc-core.toml");
    if bank_path.exists() {
        println!("content/upsc-core.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, STARTER_CONTENT)?;
        println!("Created content/upsc-core.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: civprep validate");
    println!("  2. Run: civprep plan --goal \"Prelims\" --days 30 --hours 3");
    println!("  3. Run: civprep score --topic polity-preamble --answers 0=1,1=1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# civprep configuration

content = "content"
ledger = ".civprep/ledger.json"
default_hours_per_day = 3.0
default_duration_days = 30
negative_marking = true

[durations]
read = 60
practice = 45
explain = 30
recall = 20
"#;

const STARTER_CONTENT: &str = include_str!("../../../../content/upsc-core.toml");
