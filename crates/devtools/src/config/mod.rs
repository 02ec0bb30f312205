use crate::prelude::{println, *};
use devtools_core::prefs::{self, Preferences, Theme};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, clap::Parser)]
#[command(name = "config")]
#[command(about = "Show and change persisted preferences")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Show or change the color theme (light, dark, auto)
    #[clap(name = "theme")]
    Theme(ThemeOptions),

    /// Print the most recently used tool
    #[clap(name = "last-tool")]
    LastTool,
}

#[derive(Debug, clap::Args)]
pub struct ThemeOptions {
    /// New theme; prints the current theme when omitted
    #[arg(value_name = "THEME")]
    pub value: Option<String>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Theme(options) => match options.value {
            Some(value) => {
                let theme = Theme::from_str(&value).map_err(|e| eyre!(e))?;
                let dir = config_dir()?;
                let mut preferences = prefs::load(&dir);
                preferences.theme = theme;
                prefs::store(&dir, &preferences).map_err(|e| eyre!(e))?;
                if global.verbose {
                    println!("Preferences file: {}", dir.join(prefs::PREFS_FILE).display());
                }
                println!("Theme set to {theme}");
                Ok(())
            }
            None => {
                println!("{}", load_preferences().theme);
                Ok(())
            }
        },
        Commands::LastTool => {
            match load_preferences().last_tool {
                Some(tool) => println!("{tool}"),
                None => println!("(none)"),
            }
            Ok(())
        }
    }
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs_next::config_dir()
        .ok_or_else(|| eyre!("Unable to determine config directory"))?
        .join("devtools");
    Ok(dir)
}

pub fn load_preferences() -> Preferences {
    config_dir()
        .map(|dir| prefs::load(&dir))
        .unwrap_or_default()
}

static ACTIVE_THEME: OnceLock<Theme> = OnceLock::new();

/// Process-wide theme, set once at startup and read wherever rendering
/// depends on it.
pub fn set_active_theme(theme: Theme) {
    let _ = ACTIVE_THEME.set(theme);
}

pub fn active_theme() -> Theme {
    ACTIVE_THEME.get().copied().unwrap_or_default()
}

/// Best-effort marker update; failures are ignored.
pub fn remember_last_tool(tool: &str) {
    if let Ok(dir) = config_dir() {
        let mut preferences = prefs::load(&dir);
        preferences.last_tool = Some(tool.to_string());
        let _ = prefs::store(&dir, &preferences);
    }
}
