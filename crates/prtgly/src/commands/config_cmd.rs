//! Config command handlers. None of these talk to a server.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::print_output(&cfg.redacted().to_toml()?, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            if cfg.profiles.is_empty() {
                if !global.quiet {
                    eprintln!(
                        "No profiles configured in {}",
                        config::config_path().display()
                    );
                }
                return Ok(());
            }
            let active = config::active_profile_name(global, &cfg);
            let lines: Vec<String> = cfg
                .profiles
                .iter()
                .map(|(name, profile)| {
                    let marker = if *name == active { "*" } else { " " };
                    format!("{marker} {name}\t{}", profile.server)
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }
    }
}
