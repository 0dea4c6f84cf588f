//! Booking command handlers: submission plus the owner dashboard.

use tabled::Tabled;

use spacebook_core::model::{Booking, BookingStatus};
use spacebook_core::{BookingDraft, BookingQuery, Portal};

use crate::cli::{BookArgs, BookingsArgs, BookingsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Space")]
    space: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&Booking> for BookingRow {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id.clone(),
            space: b.space_name.clone().unwrap_or_else(|| b.space_id.clone()),
            customer: b.customer.name.clone(),
            date: b.event_date.to_string(),
            time: format!(
                "{}-{}",
                b.start_time.format("%H:%M"),
                b.end_time.format("%H:%M")
            ),
            status: b.status.to_string(),
            total: b
                .total_price
                .map(|p| format!("{p:.2}"))
                .unwrap_or_default(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

/// `spacebook book <space> --date ... --start ... --end ...`
pub async fn handle_book(
    portal: &Portal,
    args: BookArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Contact details default to the signed-in user; anonymous callers
    // must pass them explicitly.
    let user = portal.current_user();
    let name = match (args.name, &user) {
        (Some(name), _) => name,
        (None, Some(user)) => user.name.clone(),
        (None, None) => util::prompt_or(None, "Your name")?,
    };
    let email = match (args.email, &user) {
        (Some(email), _) => email,
        (None, Some(user)) => user.email.clone(),
        (None, None) => util::prompt_or(None, "Contact email")?,
    };

    let draft = BookingDraft {
        space_id: args.space,
        customer_name: name,
        customer_email: email,
        customer_phone: args.phone,
        event_date: util::parse_date(&args.date, "date")?,
        start_time: util::parse_time(&args.start, "start")?,
        end_time: util::parse_time(&args.end, "end")?,
        notes: args.notes,
    };

    let booking = portal.submit_booking(draft).await?;
    if !global.quiet {
        eprintln!(
            "Booking request {} submitted ({}); the owner will confirm it",
            booking.id, booking.status
        );
    }
    Ok(())
}

pub async fn handle(
    portal: &Portal,
    args: BookingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BookingsCommand::List {
            space,
            status,
            owned,
        } => {
            let query = BookingQuery {
                space_id: space,
                status,
                owned,
            };
            let bookings = portal.bookings(&query).await?;
            let out = output::render_list(
                &global.output,
                &bookings,
                BookingRow::from,
                |b| b.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Confirm { id } => {
            let updated = portal
                .update_booking_status(&id, BookingStatus::Confirmed)
                .await?;
            if !global.quiet {
                eprintln!("Booking {} confirmed", updated.id);
            }
            Ok(())
        }

        BookingsCommand::Cancel { id } => {
            if !util::confirm(&format!("Cancel booking '{id}'?"), global.yes)? {
                return Ok(());
            }
            let updated = portal
                .update_booking_status(&id, BookingStatus::Cancelled)
                .await?;
            if !global.quiet {
                eprintln!("Booking {} cancelled", updated.id);
            }
            Ok(())
        }
    }
}
