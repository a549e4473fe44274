use thiserror::Error;

/// Failures of a user action. `Display` is the text shown in the blocking alert.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Please fill all required fields.")]
    MissingFields,
    #[error("Please fill all required fields.")]
    InvalidQuantity,
    #[error("No booking found. Please complete the form first.")]
    NoBooking,
    #[error("Choose a payment method from the payment step.")]
    NotAwaitingPayment,
    #[error("Could not save your booking: {0}")]
    Save(#[source] StoreError),
    #[error("Could not load your booking: {0}")]
    Load(#[source] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("browser storage is unavailable")]
    Unavailable,
    #[error("failed to write booking: {0}")]
    Write(String),
    #[error("stored booking is unreadable: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to encode booking: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("popup window was blocked")]
    Blocked,
    #[error("popup windows are not available here")]
    Unsupported,
    #[error("failed to render popup: {0}")]
    Render(String),
}

/// Non-fatal condition reported alongside a successful payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentNotice {
    #[error("⚠️ Popup blocked! Please allow popups to view payment confirmation.")]
    PopupBlocked,
}
