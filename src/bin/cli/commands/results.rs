//! Completed-quiz dashboard

use anyhow::Result;

use learndx::QuizApp;

use crate::OutputFormat;

pub fn run(app: &QuizApp, format: &OutputFormat) -> Result<()> {
    let results = app.results();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = results
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "sessionId": r.session_id.to_string(),
                        "date": r.date.to_string(),
                        "score": r.score,
                        "total": r.total,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if results.is_empty() {
                println!("No quizzes yet — run `learndx quiz` to get started.");
                return Ok(());
            }
            for result in &results {
                println!(
                    "{}  {:>2}/{:<2}  session {}",
                    result.date, result.score, result.total, result.session_id
                );
            }
        }
    }

    Ok(())
}
