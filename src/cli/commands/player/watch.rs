use async_trait::async_trait;
use tracing::info;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::{MetadataRecord, Session, UNKNOWN_METADATA},
};

/// Prints the track title every time it changes, until the player goes away
pub struct WatchCommand;

#[async_trait]
impl Command for WatchCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let mut changes = session.metadata().changes();
        print_title(&session.metadata().snapshot());

        let event_loop = session.spawn_event_loop()?;
        let finished = event_loop.join();
        tokio::pin!(finished);

        info!(destination = %session.destination(), "Watching for track changes");
        loop {
            tokio::select! {
                biased;
                Some(record) = changes.recv() => print_title(&record),
                result = &mut finished => {
                    result?;
                    return Ok(CommandOutput::Nothing);
                }
            }
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "watch".to_string(),
            description: "Print the track title whenever it changes".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote watch".to_string()],
        }
    }
}

fn print_title(record: &MetadataRecord) {
    let title = record.title().ok().flatten();
    println!("Current track: {}", title.as_deref().unwrap_or(UNKNOWN_METADATA));
}
