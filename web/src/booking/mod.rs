//! Framework-free booking core: pricing, input rules, the single-slot store
//! and the form → payment → confirmation state machine. Nothing in here
//! touches the DOM; see `crate::controller` and `crate::browser` for that.

pub mod error;
pub mod notify;
pub mod pricing;
pub mod sanitize;
pub mod store;
pub mod workflow;

pub use error::{BookingError, NotifyError, PaymentNotice, StoreError};
pub use notify::{PaymentNotifier, PaymentSummary};
pub use store::{BookingStore, MemoryStore};
pub use workflow::{BookingDraft, BookingFlow, ConfirmationView, PaymentAttempt, Stage};

pub use shared_types::{Booking, TicketType};
