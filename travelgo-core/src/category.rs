use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inventory categories an admin can ingest and users can search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Bus,
    Train,
    Flight,
    Hotel,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Bus => "bus",
            ServiceCategory::Train => "train",
            ServiceCategory::Flight => "flight",
            ServiceCategory::Hotel => "hotel",
        }
    }

    /// Transport runs carry source/destination and go through seat selection.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ServiceCategory::Hotel)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bus" => Ok(ServiceCategory::Bus),
            "train" => Ok(ServiceCategory::Train),
            "flight" => Ok(ServiceCategory::Flight),
            "hotel" => Ok(ServiceCategory::Hotel),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// What a booking draft is for. `Service` covers generic offerings that have
/// neither a transport route nor a hotel location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Bus,
    Train,
    Flight,
    Hotel,
    Service,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Bus => "bus",
            BookingKind::Train => "train",
            BookingKind::Flight => "flight",
            BookingKind::Hotel => "hotel",
            BookingKind::Service => "service",
        }
    }

    /// Only transport bookings route through the seat selection step.
    pub fn requires_seat_selection(&self) -> bool {
        matches!(self, BookingKind::Bus | BookingKind::Train | BookingKind::Flight)
    }
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingKind {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bus" => Ok(BookingKind::Bus),
            "train" => Ok(BookingKind::Train),
            "flight" => Ok(BookingKind::Flight),
            "hotel" => Ok(BookingKind::Hotel),
            "service" => Ok(BookingKind::Service),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for raw in ["bus", "train", "flight", "hotel"] {
            let category: ServiceCategory = raw.parse().unwrap();
            assert_eq!(category.as_str(), raw);
        }
        assert!("cruise".parse::<ServiceCategory>().is_err());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("Bus".parse::<ServiceCategory>().unwrap(), ServiceCategory::Bus);
        assert_eq!(" HOTEL ".parse::<ServiceCategory>().unwrap(), ServiceCategory::Hotel);
    }

    #[test]
    fn test_seat_selection_branch() {
        assert!(BookingKind::Bus.requires_seat_selection());
        assert!(BookingKind::Train.requires_seat_selection());
        assert!(BookingKind::Flight.requires_seat_selection());
        assert!(!BookingKind::Hotel.requires_seat_selection());
        assert!(!BookingKind::Service.requires_seat_selection());
    }
}
