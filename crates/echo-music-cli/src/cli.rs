//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use echo_music_core::config::ConfigOverrides;

/// echo-music - exercise Echo music control through the local proxy
#[derive(Parser, Debug)]
#[command(name = "echo-music")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Base address of the local proxy
    #[arg(long, global = true, env = "ECHO_MUSIC_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Provider used when a search does not name one
    #[arg(long, global = true, env = "ECHO_MUSIC_PROVIDER")]
    pub default_provider: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ECHO_MUSIC_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "ECHO_MUSIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            proxy_url: self.proxy_url.clone(),
            default_provider: self.default_provider.clone(),
            timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current music playback status
    Status,

    /// Resume or start playback
    Play,

    /// Pause playback
    Pause,

    /// Skip to the next track
    Next,

    /// Go back to the previous track
    #[command(alias = "previous")]
    Prev,

    /// Fast-forward the current track
    Forward,

    /// Rewind the current track
    Rewind,

    /// Search for music and play it
    Search(SearchArgs),

    /// Send a free-text command, as if spoken
    Text(TextArgs),

    /// List devices known to the proxy and the selected target
    Devices,

    /// Build the behavior sequence for a command without sending it
    Preview(PreviewArgs),
}

// ==================== Search ====================

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Music provider (e.g. SPOTIFY, AMAZON_MUSIC, TUNEIN)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Search phrase; a leading provider name is recognised
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

// ==================== Text ====================

#[derive(Args, Debug)]
pub struct TextArgs {
    /// Command text, e.g. "play relaxing music on Spotify"
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,
}

// ==================== Preview ====================

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Command and arguments, e.g. `search jazz music`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, num_args = 1..)]
    pub command: Vec<String>,
}
