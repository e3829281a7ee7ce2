use serde::{Deserialize, Serialize};

use crate::category::ServiceCategory;
use crate::models::Service;
use crate::normalize::title_case;

/// Equality-filter criteria for one inventory category. Criteria text goes
/// through the same normalization as ingested records, so matching is
/// case-insensitive by construction. No partial matching, no ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub category: ServiceCategory,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub location: Option<String>,
}

impl SearchCriteria {
    pub fn transport(category: ServiceCategory, source: Option<String>, destination: Option<String>) -> Self {
        Self {
            category,
            source,
            destination,
            location: None,
        }
        .normalized()
    }

    pub fn hotel(location: Option<String>) -> Self {
        Self {
            category: ServiceCategory::Hotel,
            source: None,
            destination: None,
            location,
        }
        .normalized()
    }

    /// Applies the shared ingestion normalization to every present criterion;
    /// blank criteria are dropped rather than matched against.
    pub fn normalized(mut self) -> Self {
        self.source = normalize(self.source);
        self.destination = normalize(self.destination);
        self.location = normalize(self.location);
        self
    }

    /// Exact match on category and every present criterion.
    pub fn matches(&self, service: &Service) -> bool {
        if service.category != self.category {
            return false;
        }
        if let Some(source) = &self.source {
            if service.source.as_deref() != Some(source.as_str()) {
                return false;
            }
        }
        if let Some(destination) = &self.destination {
            if service.destination.as_deref() != Some(destination.as_str()) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if service.location.as_deref() != Some(location.as_str()) {
                return false;
            }
        }
        true
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.map(|v| title_case(&v)).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn hotel_in(location: &str) -> Service {
        Service::new(
            ServiceCategory::Hotel,
            "City Inn",
            None,
            None,
            Some(location.to_string()),
            "Budget Hotel".to_string(),
            Decimal::from(3500),
        )
    }

    #[test]
    fn test_criteria_match_is_case_insensitive() {
        let service = hotel_in("Mumbai");
        for query in ["mumbai", "MUMBAI", " Mumbai "] {
            let criteria = SearchCriteria::hotel(Some(query.to_string()));
            assert!(criteria.matches(&service), "query {:?} should match", query);
        }
    }

    #[test]
    fn test_criteria_mismatch_and_category_gate() {
        let service = hotel_in("Mumbai");
        assert!(!SearchCriteria::hotel(Some("Pune".to_string())).matches(&service));

        let transport = SearchCriteria::transport(
            ServiceCategory::Bus,
            Some("Mumbai".to_string()),
            None,
        );
        assert!(!transport.matches(&service));
    }

    #[test]
    fn test_blank_criteria_match_whole_category() {
        let service = hotel_in("Mumbai");
        let criteria = SearchCriteria::hotel(Some("   ".to_string()));
        assert!(criteria.matches(&service));
        assert!(SearchCriteria::hotel(None).matches(&service));
    }
}
