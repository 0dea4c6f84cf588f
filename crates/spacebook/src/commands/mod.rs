//! Command handlers, one module per resource.

pub mod amenities;
pub mod auth;
pub mod bookings;
pub mod config_cmd;
pub mod flags;
pub mod spaces;
mod util;

use spacebook_core::Portal;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(cmd: Command, portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(portal, args, global).await,
        Command::Spaces(args) => spaces::handle(portal, args, global).await,
        Command::Book(args) => bookings::handle_book(portal, args, global).await,
        Command::Bookings(args) => bookings::handle(portal, args, global).await,
        Command::Amenities(args) => amenities::handle(portal, args, global).await,
        Command::Flags(args) => flags::handle(portal, args, global).await,
        // Handled before a Portal is built
        Command::Config(_) | Command::Completions(_) => unreachable!("handled in main"),
    }
}
