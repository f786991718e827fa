//! Interactive quiz loop

use std::io::{self, BufRead, Write};

use anyhow::Result;

use learndx::catalog::Case;
use learndx::history::explanation_lines;
use learndx::quiz::{Advance, SessionConfig, SessionError};
use learndx::QuizApp;

pub fn run(app: &mut QuizApp, config: &SessionConfig, fresh: bool) -> Result<()> {
    if fresh {
        app.on_discard();
    }

    if app.on_resume() {
        let session = app.session().expect("session is active after resume");
        println!(
            "Resuming saved quiz at question {} of {} (score so far: {}).\n",
            session.index() + 1,
            session.total(),
            session.score()
        );
    } else {
        match app.on_generate(config) {
            Ok(()) => {}
            Err(SessionError::NoCases) => {
                println!("No cases match the chosen filters. Nothing to quiz on.");
                return Ok(());
            }
            Err(e) => {
                println!("Could not start a quiz: {}", e);
                return Ok(());
            }
        }
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(case) = app.current_case().cloned() {
        let (index, total) = {
            let session = app.session().expect("session is active inside the loop");
            (session.index(), session.total())
        };

        print_case(&case, index, total);

        // Read a selection; empty/invalid input re-prompts
        let selected = loop {
            print!("Your answer [1-{}] (q to quit, d to discard): ", case.options.len());
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                // stdin closed; progress is autosaved
                println!("\nQuiz paused. Run `learndx quiz` to resume.");
                return Ok(());
            };
            let input = line?.trim().to_string();

            match input.as_str() {
                "q" | "Q" => {
                    println!("Quiz paused. Run `learndx quiz` to resume.");
                    return Ok(());
                }
                "d" | "D" => {
                    app.on_discard();
                    println!("Quiz discarded.");
                    return Ok(());
                }
                _ => {}
            }

            match input.parse::<usize>() {
                Ok(n) if n >= 1 && n <= case.options.len() => {
                    break case.options[n - 1].clone();
                }
                _ => println!("Please enter a number between 1 and {}.", case.options.len()),
            }
        };

        let attempt = match app.on_submit(&selected) {
            Ok(attempt) => attempt,
            Err(e) => {
                log::warn!("submit rejected: {}", e);
                continue;
            }
        };

        if attempt.was_correct {
            println!("\nCorrect!\n");
        } else {
            println!("\nIncorrect. The answer is: {}\n", case.correct_answer);
        }

        println!("Explanation:");
        for line in explanation_lines(&case) {
            println!("  {}: {}", line.label, line.text);
        }
        print_skin_tone_notes(&case);
        println!();

        match app.on_advance() {
            Ok(Advance::Next) => {
                print!("[Enter] for the next question: ");
                io::stdout().flush()?;
                if lines.next().is_none() {
                    println!("\nQuiz paused. Run `learndx quiz` to resume.");
                    return Ok(());
                }
                println!();
            }
            Ok(Advance::Finished(result)) => {
                println!(
                    "Quiz finished: {} / {} correct.",
                    result.score, result.total
                );
                println!(
                    "Review it with `learndx review {}`.",
                    result.session_id
                );
                return Ok(());
            }
            Err(e) => {
                log::warn!("advance rejected: {}", e);
            }
        }
    }

    Ok(())
}

fn print_skin_tone_notes(case: &Case) {
    let Some(notes) = &case.skin_tone_notes else {
        return;
    };

    println!("\nSkin tone notes:");
    if let Some(general) = &notes.general {
        println!("  {}", general);
    }
    if let Some(fp) = case.fitzpatrick {
        if let Some(variant) = notes.variants.get(&fp) {
            println!("  Type {}: {}", fp, variant);
        }
    }
    for pearl in &notes.pearls {
        println!("  Pearl: {}", pearl);
    }
    for pitfall in &notes.pitfalls {
        println!("  Pitfall: {}", pitfall);
    }
}

fn print_case(case: &Case, index: usize, total: usize) {
    println!("Question {} of {}", index + 1, total);
    print!("Subject: {}", case.subject);
    if let Some(fp) = case.fitzpatrick {
        print!("  |  Fitzpatrick: {}", fp);
    }
    println!();
    println!("Image: {}", case.image_url);
    println!("\n{}\n", case.vignette);

    for (i, option) in case.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    println!();
}
