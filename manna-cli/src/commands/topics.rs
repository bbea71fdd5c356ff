//! Topics command - list available topics and their verse counts.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use manna_core::error::MannaResult;
use manna_services::verses::{available_topics, references_for, verse_count};

use crate::OutputFormat;

pub async fn run(format: OutputFormat) -> MannaResult<()> {
    let topics = available_topics();

    match format {
        OutputFormat::Json => {
            let json: Vec<_> = topics
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "topic": t,
                        "verses": references_for(t),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        }
        OutputFormat::Text => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Topic", "Verses", "References"]);

            for topic in &topics {
                table.add_row(vec![
                    topic.clone(),
                    verse_count(topic).to_string(),
                    references_for(topic).join(", "),
                ]);
            }

            println!("{table}");
        }
    }

    Ok(())
}
