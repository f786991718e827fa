//! Performance statistics

use anyhow::Result;

use learndx::QuizApp;

use crate::OutputFormat;

pub fn run(app: &QuizApp, format: &OutputFormat) -> Result<()> {
    let overall = app.overall_stats();
    let subjects = app.subject_stats();
    let tags = app.tag_stats();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "answered": overall.answered,
                "correct": overall.correct,
                "accuracyPercent": overall.accuracy_percent(),
                "bySubject": subjects.iter().map(|s| serde_json::json!({
                    "subject": s.subject.as_str(),
                    "answered": s.stats.answered,
                    "correct": s.stats.correct,
                    "accuracyPercent": s.stats.accuracy_percent(),
                })).collect::<Vec<_>>(),
                "byTag": tags.iter().map(|t| serde_json::json!({
                    "tag": t.tag,
                    "answered": t.stats.answered,
                    "correct": t.stats.correct,
                    "accuracyPercent": t.stats.accuracy_percent(),
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if overall.answered == 0 {
                println!("No questions answered yet — run `learndx quiz` to get started.");
                return Ok(());
            }

            println!("Questions answered: {}", overall.answered);
            println!("Correct answers:    {}", overall.correct);
            println!("Accuracy:           {}%", overall.accuracy_percent());

            if !subjects.is_empty() {
                println!("\nBy subject:");
                for s in &subjects {
                    println!(
                        "  {:<16} {:>3}/{:<3} ({}%)",
                        s.subject,
                        s.stats.correct,
                        s.stats.answered,
                        s.stats.accuracy_percent()
                    );
                }
            }

            if !tags.is_empty() {
                println!("\nBy tag:");
                for t in &tags {
                    println!(
                        "  {:<20} {:>3}/{:<3} ({}%)",
                        t.tag,
                        t.stats.correct,
                        t.stats.answered,
                        t.stats.accuracy_percent()
                    );
                }
            }
        }
    }

    Ok(())
}
