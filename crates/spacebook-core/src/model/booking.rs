use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use strum::{Display, EnumString};

/// Lifecycle of a booking request.
///
/// `Completed` is assigned by the backend once the event date passes;
/// the client never sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Transitions an owner may perform from this status.
    pub fn owner_transitions(self) -> &'static [BookingStatus] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Cancelled],
            Self::Cancelled | Self::Completed => &[],
        }
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        self.owner_transitions().contains(&next)
    }

    /// Whether some owner transition can produce this status.
    pub fn owner_settable(self) -> bool {
        [Self::Pending, Self::Confirmed, Self::Cancelled, Self::Completed]
            .into_iter()
            .any(|from| from.can_transition_to(self))
    }
}

/// Who the booking is for.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A booking request as the client sees it.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String,
    pub space_id: String,
    pub space_name: Option<String>,
    pub customer: CustomerContact,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: BookingStatus,
    pub total_price: Option<f64>,
    pub notes: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_be_confirmed_or_cancelled() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn terminal_statuses_have_no_transitions() {
        assert!(BookingStatus::Cancelled.owner_transitions().is_empty());
        assert!(BookingStatus::Completed.owner_transitions().is_empty());
    }

    #[test]
    fn only_confirmed_and_cancelled_are_owner_settable() {
        assert!(BookingStatus::Confirmed.owner_settable());
        assert!(BookingStatus::Cancelled.owner_settable());
        assert!(!BookingStatus::Pending.owner_settable());
        assert!(!BookingStatus::Completed.owner_settable());
    }

    #[test]
    fn status_round_trips_as_lowercase() {
        assert_eq!(
            "confirmed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(BookingStatus::Cancelled.to_string(), "cancelled");
    }
}
