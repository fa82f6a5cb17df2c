//! Behavior-sequence preview (dry run).

use echo_music_core::types::CommandSpec;
use echo_music_core::{DispatchClient, DispatchResult};

use crate::cli::PreviewArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the preview command
pub async fn run_preview(client: &DispatchClient, args: PreviewArgs, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let spec = CommandSpec::parse(args.command.as_slice())?;
    let document = client.build_preview(&spec).await?;
    let behavior = document
        .to_behavior_command()
        .map_err(|e| CliError::Other(format!("Failed to encode sequence: {}", e)))?;

    println!("{}", formatter.format_preview(&document, &behavior));

    if let DispatchResult::Failed(reason) = client.preview_behavior(&document) {
        eprintln!("{}", formatter.format_message(&format!("Not sent: {}", reason)));
    }

    Ok(())
}
