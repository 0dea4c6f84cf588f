// ── Wire-to-domain conversion ──
//
// All normalization of backend quirks happens here, in one place:
// the two historical user role shapes, stringly-typed statuses, and
// `HH:MM` time strings. Failures become `CoreError::UnexpectedResponse`
// so callers never see half-converted entities.

use chrono::NaiveTime;

use spacebook_api::models::{ApiAvailability, ApiBooking, ApiSpace, ApiUser};

use crate::error::CoreError;
use crate::model::{Availability, Booking, BookingStatus, CustomerContact, Role, Space, User};

/// Normalize a wire user into the canonical multi-role model.
///
/// Legacy payloads carry a lone `role` string; current ones carry
/// `roles` plus `activeRole`. Either way the result has a non-empty
/// role list and an active role drawn from it.
pub fn user(api: ApiUser) -> Result<User, CoreError> {
    let roles: Vec<Role> = match (&api.roles, &api.role) {
        (Some(roles), _) if !roles.is_empty() => roles
            .iter()
            .map(|r| parse_role(r))
            .collect::<Result<_, _>>()?,
        (_, Some(role)) => vec![parse_role(role)?],
        _ => {
            return Err(CoreError::UnexpectedResponse {
                message: format!("user '{}' has no role information", api.id),
            });
        }
    };

    let active_role = match api.active_role {
        Some(ref r) => {
            let role = parse_role(r)?;
            if !roles.contains(&role) {
                return Err(CoreError::UnexpectedResponse {
                    message: format!("active role '{role}' is not among the assigned roles"),
                });
            }
            role
        }
        None => roles[0],
    };

    Ok(User {
        id: api.id,
        name: api.name,
        email: api.email,
        roles,
        active_role,
        email_verified: api.email_verified.unwrap_or(false),
        created_at: api.created_at,
    })
}

pub fn space(api: ApiSpace) -> Space {
    Space {
        id: api.id,
        name: api.name,
        description: api.description,
        location: api.location,
        price: api.price,
        price_unit: api.price_unit.unwrap_or_else(|| "hour".to_owned()),
        space_type: api.space_type,
        capacity: api.capacity,
        featured: api.featured.unwrap_or(false),
        rating: api.rating,
        images: api.images,
        amenities: api.amenities,
        owner_id: api.owner_id,
        availability: api.availability.map(availability),
    }
}

pub fn availability(api: ApiAvailability) -> Availability {
    Availability {
        available_from: api.available_from,
        available_to: api.available_to,
        excluded_dates: api.excluded_dates,
    }
}

pub fn booking(api: ApiBooking) -> Result<Booking, CoreError> {
    let status = api
        .status
        .parse::<BookingStatus>()
        .map_err(|_| CoreError::UnexpectedResponse {
            message: format!("unknown booking status '{}'", api.status),
        })?;

    Ok(Booking {
        status,
        start_time: parse_time(&api.start_time)?,
        end_time: parse_time(&api.end_time)?,
        id: api.id,
        space_id: api.space_id,
        space_name: None,
        customer: CustomerContact {
            name: api.customer_name,
            email: api.customer_email,
            phone: api.customer_phone,
        },
        event_date: api.event_date,
        total_price: api.total_price,
        notes: api.notes,
    })
}

fn parse_role(raw: &str) -> Result<Role, CoreError> {
    raw.parse::<Role>()
        .map_err(|_| CoreError::UnexpectedResponse {
            message: format!("unknown role '{raw}'"),
        })
}

// The backend emits "HH:MM"; some older rows carry seconds.
fn parse_time(raw: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| CoreError::UnexpectedResponse {
            message: format!("unparseable time '{raw}'"),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn api_user() -> ApiUser {
        ApiUser {
            id: "u1".into(),
            name: "Avery Chen".into(),
            email: "avery@example.com".into(),
            role: None,
            roles: Some(vec!["client".into(), "owner".into()]),
            active_role: Some("owner".into()),
            email_verified: Some(true),
            created_at: None,
        }
    }

    #[test]
    fn modern_role_shape_converts_directly() {
        let user = user(api_user()).unwrap();
        assert_eq!(user.roles, vec![Role::Client, Role::Owner]);
        assert_eq!(user.active_role, Role::Owner);
        assert!(user.email_verified);
    }

    #[test]
    fn legacy_single_role_shape_is_normalized() {
        let api = ApiUser {
            roles: None,
            active_role: None,
            role: Some("client".into()),
            ..api_user()
        };
        let user = user(api).unwrap();
        assert_eq!(user.roles, vec![Role::Client]);
        assert_eq!(user.active_role, Role::Client);
    }

    #[test]
    fn missing_role_information_is_rejected() {
        let api = ApiUser {
            roles: None,
            role: None,
            active_role: None,
            ..api_user()
        };
        assert!(matches!(
            user(api),
            Err(CoreError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn active_role_outside_assigned_set_is_rejected() {
        let api = ApiUser {
            roles: Some(vec!["client".into()]),
            active_role: Some("admin".into()),
            ..api_user()
        };
        assert!(matches!(
            user(api),
            Err(CoreError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn booking_times_accept_both_time_formats() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("09:30:00").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("9.30am").is_err());
    }

    #[test]
    fn unknown_booking_status_is_an_unexpected_response() {
        let api = ApiBooking {
            id: "b1".into(),
            space_id: "s1".into(),
            customer_name: "Avery".into(),
            customer_email: "avery@example.com".into(),
            customer_phone: None,
            event_date: "2025-06-01".parse().unwrap(),
            start_time: "10:00".into(),
            end_time: "12:00".into(),
            status: "tentative".into(),
            created_at: None,
            total_price: None,
            notes: None,
        };
        assert!(matches!(
            booking(api),
            Err(CoreError::UnexpectedResponse { .. })
        ));
    }
}
