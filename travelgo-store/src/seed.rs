use rust_decimal::Decimal;
use tracing::info;
use travelgo_core::repository::ServiceRepo;
use travelgo_core::{RecordStore, Service, ServiceCategory, StoreError};

struct SeedRow {
    category: ServiceCategory,
    name: &'static str,
    source: Option<&'static str>,
    destination: Option<&'static str>,
    location: Option<&'static str>,
    details: &'static str,
    price: i64,
}

const fn transport(
    category: ServiceCategory,
    name: &'static str,
    source: &'static str,
    destination: &'static str,
    details: &'static str,
    price: i64,
) -> SeedRow {
    SeedRow {
        category,
        name,
        source: Some(source),
        destination: Some(destination),
        location: None,
        details,
        price,
    }
}

const fn hotel(name: &'static str, location: &'static str, details: &'static str, price: i64) -> SeedRow {
    SeedRow {
        category: ServiceCategory::Hotel,
        name,
        source: None,
        destination: None,
        location: Some(location),
        details,
        price,
    }
}

const DEMO_INVENTORY: &[SeedRow] = &[
    transport(ServiceCategory::Bus, "Volvo AC", "hyderabad", "bangalore", "Sleeper • AC", 1200),
    transport(ServiceCategory::Bus, "KSRTC", "bangalore", "mysore", "Semi Sleeper • Non-AC", 800),
    transport(ServiceCategory::Bus, "Orange Travels", "hyderabad", "chennai", "Luxury Sleeper", 1500),
    transport(ServiceCategory::Train, "Vande Bharat Express", "delhi", "varanasi", "Express • Chair Car", 1500),
    transport(ServiceCategory::Train, "Rajdhani Express", "delhi", "mumbai", "Superfast • AC", 1800),
    transport(ServiceCategory::Train, "Duronto Express", "mumbai", "kolkata", "Non-stop • AC", 1700),
    transport(ServiceCategory::Flight, "IndiGo", "hyderabad", "delhi", "Non-stop • Economy", 4500),
    transport(ServiceCategory::Flight, "Air India", "mumbai", "delhi", "Economy • Meal Included", 5200),
    transport(ServiceCategory::Flight, "Vistara", "bangalore", "mumbai", "Premium Economy", 6200),
    hotel("Grand Palace", "mumbai", "5 Star Luxury", 7000),
    hotel("City Inn", "pune", "Budget Hotel", 3500),
    hotel("Comfort Stay", "hyderabad", "3 Star • Free Breakfast", 4200),
];

/// Loads the demo inventory through the regular ingestion path, so the seeded
/// records carry the same normalization as admin-entered ones.
pub async fn seed_demo_inventory(store: &dyn RecordStore) -> Result<(), StoreError> {
    for row in DEMO_INVENTORY {
        let service = Service::new(
            row.category,
            row.name,
            row.source.map(str::to_string),
            row.destination.map(str::to_string),
            row.location.map(str::to_string),
            row.details.to_string(),
            Decimal::from(row.price),
        );
        ServiceRepo::insert(store, &service).await?;
    }
    info!(count = DEMO_INVENTORY.len(), "demo inventory seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use travelgo_core::SearchCriteria;

    #[tokio::test]
    async fn test_seeded_inventory_is_searchable_case_insensitively() {
        let store = MemoryStore::new();
        seed_demo_inventory(&store).await.unwrap();

        let criteria = SearchCriteria::hotel(Some("PUNE".to_string()));
        let results = ServiceRepo::search(&store, &criteria).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "City Inn");
        assert_eq!(results[0].location.as_deref(), Some("Pune"));
        assert_eq!(results[0].price.to_string(), "3500.00");

        let criteria = SearchCriteria::transport(
            ServiceCategory::Bus,
            Some("Hyderabad".to_string()),
            Some("BANGALORE".to_string()),
        );
        let results = ServiceRepo::search(&store, &criteria).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Volvo AC");
    }
}
