use uuid::Uuid;

use crate::models::{Booking, Service, User};
use crate::record::{tables, RecordStore, StoreError};
use crate::search::SearchCriteria;

/// Typed access to the `users` table.
pub struct UserRepo;

impl UserRepo {
    pub async fn get(store: &dyn RecordStore, email: &str) -> Result<Option<User>, StoreError> {
        match store.get(tables::USERS, email).await? {
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
            None => Ok(None),
        }
    }

    pub async fn insert(store: &dyn RecordStore, user: &User) -> Result<(), StoreError> {
        store
            .put(tables::USERS, &user.email, serde_json::to_value(user)?)
            .await
    }

    /// Bumps the login counter atomically in the store.
    pub async fn record_login(store: &dyn RecordStore, email: &str) -> Result<i64, StoreError> {
        store.update_increment(tables::USERS, email, "logins", 1).await
    }
}

/// Typed access to the `bookings` table.
pub struct BookingRepo;

impl BookingRepo {
    pub async fn insert(store: &dyn RecordStore, booking: &Booking) -> Result<(), StoreError> {
        store
            .put(
                tables::BOOKINGS,
                &booking.booking_id.to_string(),
                serde_json::to_value(booking)?,
            )
            .await
    }

    /// Point lookup by booking id, falling back to a full-table scan when the
    /// point read misses.
    pub async fn find(store: &dyn RecordStore, booking_id: Uuid) -> Result<Option<Booking>, StoreError> {
        let key = booking_id.to_string();
        if let Some(record) = store.get(tables::BOOKINGS, &key).await? {
            return Ok(Some(serde_json::from_value(record)?));
        }
        let matches = store
            .scan(tables::BOOKINGS, &|record| {
                record.get("booking_id").and_then(|v| v.as_str()) == Some(key.as_str())
            })
            .await?;
        match matches.into_iter().next() {
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
            None => Ok(None),
        }
    }

    pub async fn list_for_email(store: &dyn RecordStore, email: &str) -> Result<Vec<Booking>, StoreError> {
        let records = store
            .scan(tables::BOOKINGS, &|record| {
                record.get("email").and_then(|v| v.as_str()) == Some(email)
            })
            .await?;
        let mut bookings = Vec::with_capacity(records.len());
        for record in records {
            bookings.push(serde_json::from_value(record)?);
        }
        Ok(bookings)
    }

    pub async fn list_all(store: &dyn RecordStore) -> Result<Vec<Booking>, StoreError> {
        let records = store.scan(tables::BOOKINGS, &|_| true).await?;
        let mut bookings = Vec::with_capacity(records.len());
        for record in records {
            bookings.push(serde_json::from_value(record)?);
        }
        Ok(bookings)
    }
}

/// Typed access to the `services` table.
pub struct ServiceRepo;

impl ServiceRepo {
    pub async fn insert(store: &dyn RecordStore, service: &Service) -> Result<(), StoreError> {
        store
            .put(
                tables::SERVICES,
                &service.service_id.to_string(),
                serde_json::to_value(service)?,
            )
            .await
    }

    /// Equality search over normalized criteria. The store-side predicate
    /// prunes on category; the remaining criteria run on the typed records.
    pub async fn search(store: &dyn RecordStore, criteria: &SearchCriteria) -> Result<Vec<Service>, StoreError> {
        let category = criteria.category.as_str();
        let records = store
            .scan(tables::SERVICES, &|record| {
                record.get("category").and_then(|v| v.as_str()) == Some(category)
            })
            .await?;
        let mut services = Vec::new();
        for record in records {
            let service: Service = serde_json::from_value(record)?;
            if criteria.matches(&service) {
                services.push(service);
            }
        }
        Ok(services)
    }
}
