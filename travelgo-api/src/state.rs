use std::sync::Arc;

use travelgo_booking::{BookingPipeline, SessionStore};
use travelgo_core::RecordStore;
use travelgo_store::app_config::AdminConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub sessions: Arc<SessionStore>,
    pub pipeline: Arc<BookingPipeline>,
    pub admin: AdminConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, sessions: Arc<SessionStore>, admin: AdminConfig) -> Self {
        let pipeline = Arc::new(BookingPipeline::new(sessions.clone(), store.clone()));
        Self {
            store,
            sessions,
            pipeline,
            admin,
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        email == self.admin.email
    }
}
