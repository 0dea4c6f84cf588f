//! Amenity command handlers (admin surface).

use tabled::Tabled;

use spacebook_core::model::Amenity;
use spacebook_core::Portal;

use crate::cli::{AmenitiesArgs, AmenitiesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AmenityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Amenity> for AmenityRow {
    fn from(a: &Amenity) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
        }
    }
}

pub async fn handle(
    portal: &Portal,
    args: AmenitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AmenitiesCommand::List => {
            let amenities = portal.amenities().await?;
            let out = output::render_list(
                &global.output,
                &amenities,
                AmenityRow::from,
                |a| a.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AmenitiesCommand::Create { name } => {
            let created = portal.create_amenity(&name).await?;
            if !global.quiet {
                eprintln!("Amenity created: {}", created.id);
            }
            Ok(())
        }

        AmenitiesCommand::Rename { id, name } => {
            let renamed = portal.rename_amenity(&id, &name).await?;
            if !global.quiet {
                eprintln!("Amenity renamed to '{}'", renamed.name);
            }
            Ok(())
        }

        AmenitiesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete amenity '{id}'?"), global.yes)? {
                return Ok(());
            }
            portal.delete_amenity(&id).await?;
            if !global.quiet {
                eprintln!("Amenity deleted");
            }
            Ok(())
        }
    }
}
