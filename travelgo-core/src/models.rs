use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::{BookingKind, ServiceCategory};
use crate::normalize::title_case;

/// Registered account. The password is an opaque credential compared by
/// equality; `logins` counts successful logins and only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub password: String,
    pub logins: i64,
}

/// Admin-entered inventory item. Immutable once ingested; corrections are a
/// new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub service_id: Uuid,
    pub category: ServiceCategory,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub details: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// Builds a service with the matching-relevant fields run through the
    /// shared normalization, so ingestion and search always agree. Prices are
    /// pinned to two decimal places.
    pub fn new(
        category: ServiceCategory,
        name: &str,
        source: Option<String>,
        destination: Option<String>,
        location: Option<String>,
        details: String,
        mut price: Decimal,
    ) -> Self {
        price.rescale(2);
        Self {
            service_id: Uuid::new_v4(),
            category,
            name: name.trim().to_string(),
            source: normalize_field(source),
            destination: normalize_field(destination),
            location: normalize_field(location),
            details,
            price,
            created_at: Utc::now(),
        }
    }
}

fn normalize_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| title_case(&v))
        .filter(|v| !v.is_empty())
}

/// In-progress booking, held only in session state between the book and
/// payment steps. Never persisted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    pub booking_id: Uuid,
    pub email: String,
    pub kind: BookingKind,
    pub source: String,
    pub destination: String,
    pub date: String,
    pub details: String,
    pub price: Decimal,
}

/// Finalized purchase record. Carries a denormalized snapshot of the draft's
/// price and details so later inventory edits cannot change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: Uuid,
    pub email: String,
    pub kind: BookingKind,
    pub source: String,
    pub destination: String,
    pub date: String,
    pub details: String,
    pub price: Decimal,
    pub payment_reference: String,
    pub payment_method: String,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    /// Moves a draft into its immutable persisted form.
    pub fn finalize(draft: BookingDraft, payment_reference: String, payment_method: String) -> Self {
        Self {
            booking_id: draft.booking_id,
            email: draft.email,
            kind: draft.kind,
            source: draft.source,
            destination: draft.destination,
            date: draft.date,
            details: draft.details,
            price: draft.price,
            payment_reference,
            payment_method,
            booked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_service_new_normalizes_matching_fields_only() {
        let service = Service::new(
            ServiceCategory::Hotel,
            "  City Inn ",
            None,
            None,
            Some("pune".to_string()),
            "Budget Hotel".to_string(),
            Decimal::from(3500),
        );
        assert_eq!(service.name, "City Inn");
        assert_eq!(service.location.as_deref(), Some("Pune"));
        assert_eq!(service.price.to_string(), "3500.00");
    }

    #[test]
    fn test_service_new_drops_blank_route_fields() {
        let service = Service::new(
            ServiceCategory::Bus,
            "Volvo AC",
            Some("  ".to_string()),
            Some("bangalore".to_string()),
            None,
            String::new(),
            Decimal::from(1200),
        );
        assert_eq!(service.source, None);
        assert_eq!(service.destination.as_deref(), Some("Bangalore"));
    }

    #[test]
    fn test_finalize_preserves_exact_price() {
        let draft = BookingDraft {
            booking_id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            kind: BookingKind::Hotel,
            source: "N/A".to_string(),
            destination: "N/A".to_string(),
            date: "2026-09-01".to_string(),
            details: "City Inn".to_string(),
            price: Decimal::from_str("3500.00").unwrap(),
        };
        let booking = Booking::finalize(draft.clone(), "PAY-1".to_string(), "upi".to_string());
        assert_eq!(booking.booking_id, draft.booking_id);
        assert_eq!(booking.price.to_string(), "3500.00");
        assert_eq!(booking.payment_reference, "PAY-1");
    }
}
