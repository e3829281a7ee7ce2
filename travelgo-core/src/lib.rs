pub mod category;
pub mod models;
pub mod normalize;
pub mod record;
pub mod repository;
pub mod search;

pub use category::{BookingKind, ServiceCategory};
pub use models::{Booking, BookingDraft, Service, User};
pub use record::{tables, RecordStore, StoreError};
pub use search::SearchCriteria;
