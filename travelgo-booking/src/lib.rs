pub mod pipeline;
pub mod session;

pub use pipeline::{BookingPipeline, NewDraft, NextStep};
pub use session::{Session, SessionStore};

use travelgo_core::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("no authenticated identity in session")]
    Unauthenticated,

    #[error("no booking draft in session")]
    NoDraft,

    #[error(transparent)]
    Store(#[from] StoreError),
}
