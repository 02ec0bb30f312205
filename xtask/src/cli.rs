use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtasks")]
#[command(about = "Run project tasks using rust instead of scripts")]
pub struct App {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Builds a binary and installs it at the given path
    Install(InstallArgs),
    /// Tag and push a release
    Release(ReleaseArgs),
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Name of the binary to install (defaults to "devtools")
    #[arg(short, long, default_value = "devtools")]
    pub name: String,

    /// Directory to install the binary to (defaults to ~/.local/bin)
    #[arg(short, long)]
    pub path: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Version to release (e.g., 1.0.0, 2.1.0-beta.1)
    pub version: String,

    /// Skip the git working-tree cleanliness check
    #[arg(long)]
    pub allow_dirty: bool,
}
