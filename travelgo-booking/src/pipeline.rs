use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use travelgo_core::repository::BookingRepo;
use travelgo_core::{Booking, BookingDraft, BookingKind, RecordStore};
use uuid::Uuid;

use crate::session::SessionStore;
use crate::BookingError;

/// Fields captured from the booking form when the pipeline starts.
#[derive(Debug, Clone)]
pub struct NewDraft {
    pub kind: BookingKind,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub details: String,
    pub price: Decimal,
}

/// Where the flow goes once a draft exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    SelectSeats,
    Payment,
}

const SEATS_MARKER: &str = " | Seats: ";

/// The checkout state machine: draft creation, optional seat augmentation,
/// payment finalization. Intermediate state lives in the session store; the
/// finalized booking is written to the record store exactly once.
pub struct BookingPipeline {
    sessions: Arc<SessionStore>,
    store: Arc<dyn RecordStore>,
}

impl BookingPipeline {
    pub fn new(sessions: Arc<SessionStore>, store: Arc<dyn RecordStore>) -> Self {
        Self { sessions, store }
    }

    /// Starts a booking: mints a booking id and installs the draft under the
    /// session identity. Any prior unfinished draft is discarded.
    pub fn start(&self, token: &str, input: NewDraft) -> Result<BookingDraft, BookingError> {
        let email = self
            .sessions
            .get_identity(token)
            .ok_or(BookingError::Unauthenticated)?;

        let mut price = input.price;
        price.rescale(2);

        let draft = BookingDraft {
            booking_id: Uuid::new_v4(),
            email,
            kind: input.kind,
            source: or_na(input.source),
            destination: or_na(input.destination),
            date: or_na(input.date),
            details: input.details,
            price,
        };
        info!(booking_id = %draft.booking_id, kind = %draft.kind, "booking draft created");
        self.sessions.create_draft(token, draft)
    }

    /// Pure branch on the draft kind: transport goes through seat selection,
    /// hotels and generic services go straight to payment.
    pub fn next_step(kind: BookingKind) -> NextStep {
        if kind.requires_seat_selection() {
            NextStep::SelectSeats
        } else {
            NextStep::Payment
        }
    }

    pub fn current_draft(&self, token: &str) -> Result<BookingDraft, BookingError> {
        self.sessions.peek_draft(token)
    }

    /// Records the seat descriptor on the draft. Resubmitting replaces the
    /// previous descriptor instead of accumulating suffixes.
    pub fn confirm_seats(&self, token: &str, seats: Option<String>) -> Result<BookingDraft, BookingError> {
        let seats = seats
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "None".to_string());

        self.sessions.mutate_draft(token, |draft| {
            if let Some(idx) = draft.details.find(SEATS_MARKER) {
                draft.details.truncate(idx);
            }
            draft.details.push_str(SEATS_MARKER);
            draft.details.push_str(&seats);
            draft.clone()
        })
    }

    /// Finalizes payment: consumes the draft, attaches the payment fields and
    /// persists the booking. If the store write fails the draft is restored
    /// into the session before the error surfaces, so payment can be retried.
    pub async fn finalize(
        &self,
        token: &str,
        payment_reference: &str,
        payment_method: &str,
    ) -> Result<Booking, BookingError> {
        let draft = self.sessions.take_draft(token)?;
        let booking = Booking::finalize(
            draft.clone(),
            payment_reference.to_string(),
            payment_method.to_string(),
        );

        match BookingRepo::insert(self.store.as_ref(), &booking).await {
            Ok(()) => {
                info!(booking_id = %booking.booking_id, email = %booking.email, "booking persisted");
                Ok(booking)
            }
            Err(err) => {
                warn!(booking_id = %draft.booking_id, error = %err, "booking write failed, draft restored");
                self.sessions.restore_draft(token, draft);
                Err(err.into())
            }
        }
    }
}

fn or_na(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "N/A".to_string())
}
