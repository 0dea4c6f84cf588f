//! Config command handlers. These run without a Portal.

use tabled::Tabled;

use spacebook_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Clone, Tabled, serde::Serialize)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Base URL")]
    base_url: String,
    #[tabled(rename = "Default")]
    default: String,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let path = spacebook_config::config_path()?;
            if path.exists()
                && !util::confirm("A config file already exists. Overwrite?", global.yes)?
            {
                return Ok(());
            }

            let base_url =
                util::prompt_or(global.base_url.clone(), "Backend base URL")?;
            let mut config = Config::default();
            config.profiles.insert(
                config.default_profile.clone(),
                Profile {
                    base_url,
                    ..Profile::default()
                },
            );
            spacebook_config::save_config(&config)?;
            if !global.quiet {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let config = spacebook_config::load_config_or_default()?;
            let out = output::render_single(
                &global.output,
                &config,
                |c| {
                    format!(
                        "config file: {}\ndefault profile: {}\nprofiles: {}",
                        spacebook_config::config_path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default(),
                        c.default_profile,
                        c.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
                    )
                },
                |c| c.default_profile.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { profile, base_url } => {
            let mut config = spacebook_config::load_config_or_default()?;
            config
                .profiles
                .entry(profile.clone())
                .or_default()
                .base_url = base_url;
            spacebook_config::save_config(&config)?;
            if !global.quiet {
                eprintln!("Profile '{profile}' updated");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let config = spacebook_config::load_config_or_default()?;
            let rows: Vec<ProfileRow> = config
                .profiles
                .iter()
                .map(|(name, p)| ProfileRow {
                    name: name.clone(),
                    base_url: p.base_url.clone(),
                    default: if *name == config.default_profile {
                        "*".into()
                    } else {
                        String::new()
                    },
                })
                .collect();
            let out =
                output::render_list(&global.output, &rows, Clone::clone, |r| r.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut config = spacebook_config::load_config_or_default()?;
            if !config.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound { name });
            }
            config.default_profile = name.clone();
            spacebook_config::save_config(&config)?;
            if !global.quiet {
                eprintln!("Default profile is now '{name}'");
            }
            Ok(())
        }
    }
}
