//! Per-session attempt review

use anyhow::{bail, Result};
use uuid::Uuid;

use learndx::history::explanation_lines;
use learndx::QuizApp;

use crate::OutputFormat;

pub fn run(app: &QuizApp, session: &str, format: &OutputFormat) -> Result<()> {
    let session_id = resolve_session(app, session)?;
    let review = app.session_review(session_id);

    if let OutputFormat::Json = format {
        let output = serde_json::json!({
            "sessionId": session_id.to_string(),
            "summary": review.summary.as_ref().map(|s| serde_json::json!({
                "date": s.date.to_string(),
                "score": s.score,
                "total": s.total,
            })),
            "attempts": review.entries.iter().map(|e| serde_json::json!({
                "caseId": e.attempt.case_id,
                "selectedAnswer": e.attempt.selected_answer,
                "wasCorrect": e.attempt.was_correct,
                "subject": e.attempt.subject.as_str(),
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(summary) = &review.summary {
        println!(
            "Quiz taken on {} — score {} / {}\n",
            summary.date, summary.score, summary.total
        );
    }

    if review.entries.is_empty() {
        println!("No attempts found for this quiz.");
        return Ok(());
    }

    for (i, entry) in review.entries.iter().enumerate() {
        // Attempts whose case left the catalog have nothing to show
        let Some(case) = &entry.case else {
            continue;
        };
        let verdict = if entry.attempt.was_correct { "Correct" } else { "Incorrect" };

        print!("Question {} — {}", i + 1, case.subject);
        if let Some(fp) = case.fitzpatrick {
            print!(" — Fitzpatrick {}", fp);
        }
        println!("  [{}]", verdict);
        println!("{}", case.vignette);

        for option in &case.options {
            let mut marks = String::new();
            if *option == entry.attempt.selected_answer {
                marks.push_str("  • your choice");
            }
            if *option == case.correct_answer {
                marks.push_str("  • correct");
            }
            println!("  - {}{}", option, marks);
        }

        println!("Explanation:");
        for line in explanation_lines(case) {
            println!("  {}: {}", line.label, line.text);
        }
        if let Some(notes) = &case.skin_tone_notes {
            if let Some(general) = &notes.general {
                println!("Skin tone notes: {}", general);
            }
        }
        println!();
    }

    Ok(())
}

/// Resolve a session id argument, allowing a unique prefix of any
/// recorded result's id
fn resolve_session(app: &QuizApp, arg: &str) -> Result<Uuid> {
    if let Ok(id) = arg.parse::<Uuid>() {
        return Ok(id);
    }

    let matches: Vec<Uuid> = app
        .results()
        .iter()
        .map(|r| r.session_id)
        .filter(|id| id.to_string().starts_with(arg))
        .collect();

    match matches.len() {
        0 => bail!("no recorded quiz matches session '{}'", arg),
        1 => Ok(matches[0]),
        _ => bail!("session prefix '{}' is ambiguous", arg),
    }
}
