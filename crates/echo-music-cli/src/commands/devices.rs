//! Device listing.

use echo_music_core::device::resolve;
use echo_music_core::{DispatchClient, HarnessConfig};
use tracing::debug;

use crate::error::CliError;
use crate::output::get_formatter;

/// Run the devices command
pub async fn run_devices(client: &DispatchClient, config: &HarnessConfig, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let status = client.fetch_proxy_status().await?;
    let target = match resolve(&status, config.family_filter()) {
        Ok(device) => Some(device),
        Err(e) => {
            debug!(error = %e, "no target device");
            None
        }
    };

    println!("{}", formatter.format_devices(&status, target.as_ref()));

    Ok(())
}
