//! The `studybuddy upload` command.

use std::path::PathBuf;

use anyhow::Result;

use studybuddy_client::config::load_config_from;
use studybuddy_client::create_service;

pub async fn execute(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    anyhow::ensure!(file.is_file(), "document not found: {}", file.display());

    let config = load_config_from(config_path.as_deref())?;
    let service = create_service(&config)?;

    eprintln!("Uploading {}...", file.display());
    let document_id = service.upload_document(&file).await?;

    println!("Document ID: {document_id}");
    eprintln!("Next: studybuddy generate --document-id {document_id}");
    Ok(())
}
