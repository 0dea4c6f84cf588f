use chrono::NaiveDate;
use serde::Serialize;

/// A rentable space listing.
#[derive(Debug, Clone, Serialize)]
pub struct Space {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price: f64,
    /// Billing granularity as the backend reports it ("hour", "day").
    pub price_unit: String,
    pub space_type: Option<String>,
    pub capacity: Option<u32>,
    pub featured: bool,
    pub rating: Option<f64>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub owner_id: Option<String>,
    pub availability: Option<Availability>,
}

/// Bookable date window for a space.
#[derive(Debug, Clone, Serialize)]
pub struct Availability {
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    /// Individual dates the owner has blocked out.
    pub excluded_dates: Vec<NaiveDate>,
}

impl Availability {
    /// Whether `date` falls inside the window and is not excluded.
    pub fn accepts(&self, date: NaiveDate) -> bool {
        if self.available_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.available_to.is_some_and(|to| date > to) {
            return false;
        }
        !self.excluded_dates.contains(&date)
    }
}

/// An amenity option managed through the admin surface.
#[derive(Debug, Clone, Serialize)]
pub struct Amenity {
    pub id: String,
    pub name: String,
}

/// A backend feature flag.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureFlag {
    pub name: String,
    pub enabled: bool,
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn availability_window_and_exclusions() {
        let avail = Availability {
            available_from: Some(date("2025-06-01")),
            available_to: Some(date("2025-06-30")),
            excluded_dates: vec![date("2025-06-15")],
        };
        assert!(avail.accepts(date("2025-06-10")));
        assert!(!avail.accepts(date("2025-05-31")));
        assert!(!avail.accepts(date("2025-07-01")));
        assert!(!avail.accepts(date("2025-06-15")));
    }

    #[test]
    fn open_ended_availability_accepts_any_unexcluded_date() {
        let avail = Availability {
            available_from: None,
            available_to: None,
            excluded_dates: vec![],
        };
        assert!(avail.accepts(date("1999-01-01")));
        assert!(avail.accepts(date("2099-12-31")));
    }
}
