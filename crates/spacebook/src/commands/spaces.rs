//! Space command handlers.

use tabled::Tabled;

use spacebook_core::model::Space;
use spacebook_core::{CreateSpaceRequest, Portal, SpaceQuery, UpdateSpaceRequest};

use crate::cli::{GlobalOpts, SpacesArgs, SpacesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SpaceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    space_type: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Featured")]
    featured: String,
}

impl From<&Space> for SpaceRow {
    fn from(s: &Space) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            space_type: s.space_type.clone().unwrap_or_default(),
            location: s.location.clone().unwrap_or_default(),
            price: format!("{:.2}/{}", s.price, s.price_unit),
            capacity: s.capacity.map(|c| c.to_string()).unwrap_or_default(),
            featured: if s.featured { "*".into() } else { String::new() },
        }
    }
}

fn space_detail(s: &Space) -> String {
    let mut lines = vec![
        format!("{} ({})", s.name, s.id),
        format!("  price:    {:.2}/{}", s.price, s.price_unit),
    ];
    if let Some(ref t) = s.space_type {
        lines.push(format!("  type:     {t}"));
    }
    if let Some(ref l) = s.location {
        lines.push(format!("  location: {l}"));
    }
    if let Some(c) = s.capacity {
        lines.push(format!("  capacity: {c}"));
    }
    if let Some(r) = s.rating {
        lines.push(format!("  rating:   {r:.1}"));
    }
    if !s.amenities.is_empty() {
        lines.push(format!("  amenities: {}", s.amenities.join(", ")));
    }
    if let Some(ref d) = s.description {
        lines.push(format!("\n{d}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: SpacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SpacesCommand::List {
            search,
            space_type,
            location,
            min_capacity,
            featured,
            owned,
        } => {
            let query = SpaceQuery {
                search,
                space_type,
                location,
                min_capacity,
                featured: featured.then_some(true),
                owned,
            };
            let spaces = portal.spaces(&query).await?;
            let out = output::render_list(
                &global.output,
                &spaces,
                SpaceRow::from,
                |s| s.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SpacesCommand::Get { id } => {
            let space = portal.space(&id).await?;
            let out = output::render_single(
                &global.output,
                space.as_ref(),
                space_detail,
                |s| s.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SpacesCommand::Create {
            name,
            space_type,
            price,
            price_unit,
            description,
            location,
            capacity,
            amenities,
        } => {
            let req = CreateSpaceRequest {
                name,
                description,
                location,
                price,
                price_unit,
                space_type,
                images: Vec::new(),
                amenities: amenities.unwrap_or_default(),
                capacity,
                availability: None,
            };
            let created = portal.create_space(&req).await?;
            if !global.quiet {
                eprintln!("Space created: {}", created.id);
            }
            Ok(())
        }

        SpacesCommand::Update {
            id,
            name,
            description,
            location,
            price,
            capacity,
            featured,
        } => {
            let req = UpdateSpaceRequest {
                name,
                description,
                location,
                price,
                capacity,
                featured,
                ..UpdateSpaceRequest::default()
            };
            let updated = portal.update_space(&id, &req).await?;
            if !global.quiet {
                eprintln!("Space updated: {}", updated.id);
            }
            Ok(())
        }

        SpacesCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete space '{id}'? Its bookings will be orphaned."),
                global.yes,
            )? {
                return Ok(());
            }
            portal.delete_space(&id).await?;
            if !global.quiet {
                eprintln!("Space deleted");
            }
            Ok(())
        }
    }
}
