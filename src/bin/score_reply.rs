//! Utility to score a saved model reply
//!
//! Usage: score_reply [REPLY_FILE]   (reads stdin when no file is given)

use std::io::Read;

use label_scanner::config::Config;
use label_scanner::label::analyze_reply;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let table = config.scoring_table()?;

    let reply = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let report = analyze_reply(&reply, &table)
        .map_err(|e| format!("{}. Please try again.", e))?;

    eprintln!(
        "Score: {} | Grade: {} | Total: {} (table: {})",
        report.result.score,
        report.result.grade,
        report.result.total,
        table.name()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
