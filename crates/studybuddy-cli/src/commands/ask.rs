//! The `studybuddy ask` command.

use std::path::PathBuf;

use anyhow::Result;

use studybuddy_client::config::load_config_from;
use studybuddy_client::create_service;

pub async fn execute(
    document_id: String,
    question: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let service = create_service(&config)?;

    let answer = service.ask_question(&document_id, &question).await?;
    println!("{answer}");
    Ok(())
}
