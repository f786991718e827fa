//! Catalog listing

use anyhow::Result;

use learndx::QuizApp;

use crate::OutputFormat;

pub fn run(app: &QuizApp, format: &OutputFormat) -> Result<()> {
    let cases = app.catalog().cases();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = cases
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id,
                        "subject": c.subject.as_str(),
                        "fitzpatrick": c.fitzpatrick.map(|fp| fp.as_str()),
                        "tags": c.tags,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{} cases in the catalog:\n", cases.len());
            for case in cases {
                let tone = case
                    .fitzpatrick
                    .map(|fp| fp.as_str())
                    .unwrap_or("-");
                println!(
                    "  {:<24} {:<16} Fitzpatrick {:<3} [{}]",
                    case.id,
                    case.subject,
                    tone,
                    case.tags.join(", ")
                );
            }
        }
    }

    Ok(())
}
