use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::settings::parse_override;

#[derive(Debug, Parser)]
#[command(
    name = "specctl",
    about = "Software spectrometer launcher (INI settings + process control)"
)]
pub struct Cli {
    /// Path to config file (default: ./specctl.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the settings stored in an INI file
    Show { ini: PathBuf },
    /// Check that an INI file carries every required setting
    Validate { ini: PathBuf },
    /// Write a template INI with default settings
    Init { ini: PathBuf },
    /// Write the spectrometer INI and start a processing run
    Run(RunArgs),
    /// Interrupt the spectrometer started by the last run
    Cancel,
    /// Show remembered paths and whether the last run is still going
    Status,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Template INI to start from (default: the last written INI)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Recording to process (default: the last input)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Second recording, for cross-polarization runs
    #[arg(long)]
    pub input2: Option<PathBuf>,

    /// Where to write the spectrometer INI (default: <input>.spec.ini)
    #[arg(short, long)]
    pub output_ini: Option<PathBuf>,

    /// Override a single setting, e.g. --set FFTpoints=4096
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_override_arg)]
    pub overrides: Vec<(String, String)>,

    /// Write the INI and print the command without starting it
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Status)
    }
}

fn parse_override_arg(raw: &str) -> Result<(String, String), String> {
    parse_override(raw).map_err(|error| error.to_string())
}
