//! The `studybuddy flashcards` command.

use std::path::PathBuf;

use anyhow::Result;

use studybuddy_client::config::load_config_from;
use studybuddy_client::create_service;

pub async fn execute(document_id: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service = create_service(&config)?;

    eprintln!("Generating flashcards...");
    let cards = service.generate_flashcards(&document_id).await?;

    for (i, card) in cards.iter().enumerate() {
        println!("{}. Q: {}", i + 1, card.question);
        println!("   A: {}", card.answer);
    }
    println!("\n{} flashcard(s)", cards.len());
    Ok(())
}
