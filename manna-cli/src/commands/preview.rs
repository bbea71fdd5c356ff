//! Preview command - generate sample messages without scheduling.

use console::style;
use rand::rngs::StdRng;
use rand::SeedableRng;

use manna_core::error::MannaResult;
use manna_services::rephrase::rephrase;
use manna_services::verses::select_verse;

use crate::OutputFormat;

pub async fn run(topic: String, count: u32, format: OutputFormat) -> MannaResult<()> {
    let mut rng = StdRng::from_entropy();
    let mut excluded = Vec::new();

    let mut messages = Vec::new();
    for _ in 0..count {
        let verse = select_verse(&topic, &excluded, &mut rng);
        excluded.push(verse.reference.clone());
        messages.push(rephrase(&verse, &mut rng));
    }

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&messages).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            for msg in &messages {
                println!("{}", style(&msg.reference).bold());
                println!("  {}", msg.rephrased);
                println!();
            }
        }
    }

    Ok(())
}
