pub mod booking_form;
pub mod confirmation_panel;
pub mod navbar;
pub mod payment_panel;
pub mod ticket_tiers;

// Re-export commonly used types
pub use booking_form::BookingForm;
pub use confirmation_panel::ConfirmationPanel;
pub use navbar::Navbar;
pub use payment_panel::PaymentPanel;
pub use ticket_tiers::TicketTiers;
