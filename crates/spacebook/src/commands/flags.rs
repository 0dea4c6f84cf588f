//! Feature-flag command handlers.

use tabled::Tabled;

use spacebook_core::model::FeatureFlag;
use spacebook_core::Portal;

use crate::cli::{FlagsArgs, FlagsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct FlagRow {
    #[tabled(rename = "Flag")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&FeatureFlag> for FlagRow {
    fn from(f: &FeatureFlag) -> Self {
        Self {
            name: f.name.clone(),
            state: if f.enabled { "on".into() } else { "off".into() },
            description: f.description.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(portal: &Portal, args: FlagsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        FlagsCommand::List => {
            let flags = portal.feature_flags().await?;
            let out = output::render_list(
                &global.output,
                &flags,
                FlagRow::from,
                |f| f.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FlagsCommand::Set { name, state } => {
            let enabled = state == "on";
            let flag = portal.set_feature_flag(&name, enabled).await?;
            if !global.quiet {
                eprintln!(
                    "Flag '{}' is now {}",
                    flag.name,
                    if flag.enabled { "on" } else { "off" }
                );
            }
            Ok(())
        }
    }
}
