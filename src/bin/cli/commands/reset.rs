//! Data-clearing utilities

use anyhow::{bail, Result};

use learndx::QuizApp;

pub fn run(
    app: &mut QuizApp,
    attempts: bool,
    results: bool,
    progress: bool,
    all: bool,
) -> Result<()> {
    if !(attempts || results || progress || all) {
        bail!("nothing selected; pass --attempts, --results, --progress, or --all");
    }

    if all || progress {
        app.on_discard();
        println!("Cleared saved session.");
    }

    if all || attempts || results {
        // HistoryLog only resets whole logs; pick the requested ones
        if all || (attempts && results) {
            app.reset_history();
            println!("Cleared attempt and result logs.");
        } else if attempts {
            app.reset_attempts();
            println!("Cleared attempt log.");
        } else {
            app.reset_results();
            println!("Cleared result log.");
        }
    }

    Ok(())
}
