use chrono::{DateTime, Utc};
use shared_types::{Booking, TicketType};

use super::error::{BookingError, PaymentNotice, StoreError};
use super::notify::{PaymentNotifier, PaymentSummary};
use super::pricing;
use super::sanitize::{self, Selection};
use super::store::BookingStore;
use crate::config::BookingConfig;

/// Which section of the page is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Form,
    Payment,
    Confirmation,
}

/// Editable form state. Every setter applies the field's input rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub ticket: Option<TicketType>,
    /// Raw text of the quantity input.
    pub quantity: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            email: String::new(),
            ticket: Some(TicketType::Regular),
            quantity: "1".to_string(),
        }
    }
}

impl BookingDraft {
    pub fn input_full_name(&mut self, raw: &str) {
        self.full_name = sanitize::sanitize_name(raw);
    }

    pub fn paste_full_name(&mut self, selection: Selection, pasted: &str) {
        let clean = sanitize::sanitize_name(pasted);
        let merged = sanitize::splice(&self.full_name, selection, &clean);
        self.input_full_name(&merged);
    }

    pub fn input_phone(&mut self, raw: &str) {
        self.phone = sanitize::normalize_phone(raw);
    }

    /// Typed email is kept as entered; only pasted text is filtered.
    pub fn input_email(&mut self, raw: &str) {
        self.email = raw.to_string();
    }

    pub fn paste_email(&mut self, selection: Selection, pasted: &str) {
        let clean = sanitize::sanitize_email(pasted);
        self.email = sanitize::splice(&self.email, selection, &clean);
    }

    /// Takes the `<select>` value; anything that is not a tier clears the selection.
    pub fn select_ticket(&mut self, raw: &str) {
        self.ticket = raw.parse().ok();
    }

    pub fn input_quantity(&mut self, raw: &str) {
        self.quantity = raw.to_string();
    }

    /// Live total shown next to the form.
    pub fn total(&self) -> u32 {
        pricing::quote(self.ticket, &self.quantity)
    }

    /// Builds the booking to persist, or says why the form cannot be submitted.
    pub fn to_booking(&self, now: DateTime<Utc>) -> Result<Booking, BookingError> {
        let full_name = self.full_name.trim();
        let phone = self.phone.trim();
        let ticket_type = match self.ticket {
            Some(ticket) if !full_name.is_empty() && !phone.is_empty() => ticket,
            _ => return Err(BookingError::MissingFields),
        };
        let quantity = pricing::parse_int_prefix(&self.quantity)
            .filter(|q| *q >= 1)
            .and_then(|q| u32::try_from(q).ok())
            .ok_or(BookingError::InvalidQuantity)?;

        Ok(Booking {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            email: self.email.trim().to_string(),
            ticket_type,
            quantity,
            total: pricing::total(Some(ticket_type), quantity),
            created_at: now,
        })
    }
}

/// What the confirmation section displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationView {
    pub full_name: String,
    pub phone: String,
    pub ticket_label: String,
    pub quantity: u32,
    pub total: u32,
}

impl From<&Booking> for ConfirmationView {
    fn from(booking: &Booking) -> Self {
        Self {
            full_name: booking.full_name.clone(),
            phone: booking.phone.clone(),
            ticket_label: booking.ticket_type.label().to_string(),
            quantity: booking.quantity,
            total: booking.total,
        }
    }
}

/// A started payment. Only the most recent attempt may confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentAttempt {
    pub id: u64,
    pub notice: Option<PaymentNotice>,
}

#[derive(Debug, Clone)]
struct PendingPayment {
    id: u64,
    booking: Booking,
}

/// Application state for the booking page.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    stage: Stage,
    pub draft: BookingDraft,
    pending: Option<PendingPayment>,
    confirmation: Option<ConfirmationView>,
    attempts: u64,
    currency: String,
    popup_close_secs: u64,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new(&BookingConfig::default())
    }
}

impl BookingFlow {
    pub fn new(config: &BookingConfig) -> Self {
        Self {
            stage: Stage::Form,
            draft: BookingDraft::default(),
            pending: None,
            confirmation: None,
            attempts: 0,
            currency: config.currency.clone(),
            popup_close_secs: config.popup_close_delay().as_secs(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn confirmation(&self) -> Option<&ConfirmationView> {
        self.confirmation.as_ref()
    }

    pub fn has_pending_payment(&self) -> bool {
        self.pending.is_some()
    }

    /// Preselects a tier from one of the ticket cards.
    pub fn choose_ticket(&mut self, ticket: TicketType) {
        self.draft.ticket = Some(ticket);
    }

    /// Validates the draft, stores it as the latest booking and moves to payment.
    pub fn submit(
        &mut self,
        store: &impl BookingStore,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let booking = self.draft.to_booking(now)?;
        store.put(&booking).map_err(BookingError::Save)?;
        tracing::debug!(
            ticket = %booking.ticket_type,
            quantity = booking.quantity,
            total = booking.total,
            "booking stored"
        );
        self.pending = None;
        self.stage = Stage::Payment;
        Ok(booking)
    }

    /// Starts the simulated payment for `method`.
    ///
    /// The stored booking is read back with its total recomputed, the popup is
    /// offered to `notifier`, and a new attempt is returned for the caller to
    /// confirm after its delay. A popup failure is reported as a notice, never
    /// as an error.
    pub fn select_payment(
        &mut self,
        method: &str,
        store: &impl BookingStore,
        notifier: &impl PaymentNotifier,
    ) -> Result<PaymentAttempt, BookingError> {
        if self.stage != Stage::Payment {
            return Err(BookingError::NotAwaitingPayment);
        }
        let mut booking = match store.get() {
            Ok(Some(booking)) if booking.quantity >= 1 => booking,
            Ok(Some(_)) => {
                tracing::warn!("ignoring stored booking without tickets");
                return Err(BookingError::NoBooking);
            }
            Ok(None) => return Err(BookingError::NoBooking),
            Err(StoreError::Corrupt(err)) => {
                tracing::warn!(error = %err, "ignoring unreadable stored booking");
                return Err(BookingError::NoBooking);
            }
            Err(err) => return Err(BookingError::Load(err)),
        };
        let total = booking.expected_total();
        if booking.total != total {
            tracing::warn!(stored = booking.total, total, "stored total does not match tier");
            booking.total = total;
        }

        let summary = PaymentSummary {
            method: method.to_string(),
            booking: booking.clone(),
            currency: self.currency.clone(),
            closes_after_secs: self.popup_close_secs,
        };
        let notice = match notifier.open(&summary) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %err, method, "payment popup not shown");
                Some(PaymentNotice::PopupBlocked)
            }
        };

        self.attempts += 1;
        let id = self.attempts;
        self.pending = Some(PendingPayment { id, booking });
        tracing::debug!(attempt = id, method, "payment started");
        Ok(PaymentAttempt { id, notice })
    }

    /// Moves payment → confirmation if `attempt_id` is still the live attempt.
    /// Returns `false` for cancelled or superseded attempts.
    pub fn confirm(&mut self, attempt_id: u64) -> bool {
        if self.stage != Stage::Payment {
            return false;
        }
        match self.pending.take() {
            Some(pending) if pending.id == attempt_id => {
                self.confirmation = Some(ConfirmationView::from(&pending.booking));
                self.stage = Stage::Confirmation;
                tracing::debug!(attempt = attempt_id, "booking confirmed");
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Leaves the payment step without paying. The draft is kept for editing.
    pub fn back_to_form(&mut self) {
        if self.stage == Stage::Payment {
            self.pending = None;
            self.stage = Stage::Form;
        }
    }

    /// Clears the form for another booking. The stored booking is left alone.
    pub fn start_new_booking(&mut self) {
        self.draft = BookingDraft::default();
        self.pending = None;
        self.confirmation = None;
        self.stage = Stage::Form;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::TimeZone;

    use super::*;
    use crate::booking::error::NotifyError;
    use crate::booking::store::MemoryStore;

    #[derive(Default)]
    struct Recorder {
        opened: RefCell<Vec<PaymentSummary>>,
    }

    impl PaymentNotifier for Recorder {
        fn open(&self, summary: &PaymentSummary) -> Result<(), NotifyError> {
            self.opened.borrow_mut().push(summary.clone());
            Ok(())
        }
    }

    struct Blocked;

    impl PaymentNotifier for Blocked {
        fn open(&self, _: &PaymentSummary) -> Result<(), NotifyError> {
            Err(NotifyError::Blocked)
        }
    }

    fn filled_flow() -> BookingFlow {
        let mut flow = BookingFlow::default();
        flow.draft.input_full_name("Abel Tesfaye");
        flow.draft.input_phone("+251911223344");
        flow.draft.select_ticket("vip");
        flow.draft.input_quantity("2");
        flow
    }

    #[test]
    fn default_draft_quotes_one_regular() {
        let flow = BookingFlow::default();
        assert_eq!(flow.stage(), Stage::Form);
        assert_eq!(flow.draft.total(), 150);
    }

    #[test]
    fn rejects_missing_fields_without_storing() {
        let store = MemoryStore::new();
        let mut flow = filled_flow();
        flow.draft.input_full_name("   ");

        let err = flow.submit(&store, Utc::now()).unwrap_err();
        assert!(matches!(err, BookingError::MissingFields));
        assert_eq!(err.to_string(), "Please fill all required fields.");
        assert_eq!(flow.stage(), Stage::Form);
        assert!(store.raw().is_none());
    }

    #[test]
    fn rejects_unset_ticket_and_bad_quantity() {
        let store = MemoryStore::new();
        let mut flow = filled_flow();
        flow.draft.select_ticket("");
        assert!(matches!(
            flow.submit(&store, Utc::now()),
            Err(BookingError::MissingFields)
        ));

        let mut flow = filled_flow();
        flow.draft.input_quantity("0");
        assert!(matches!(
            flow.submit(&store, Utc::now()),
            Err(BookingError::InvalidQuantity)
        ));
        flow.draft.input_quantity("lots");
        assert!(matches!(
            flow.submit(&store, Utc::now()),
            Err(BookingError::InvalidQuantity)
        ));
        assert!(store.raw().is_none());
    }

    #[test]
    fn submit_recomputes_total_and_moves_to_payment() {
        let store = MemoryStore::new();
        let mut flow = filled_flow();
        flow.draft.input_quantity(" 2 tickets");

        let submitted_at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let booking = flow.submit(&store, submitted_at).unwrap();
        assert_eq!(booking.quantity, 2);
        assert_eq!(booking.total, 600);
        assert_eq!(flow.stage(), Stage::Payment);
        assert_eq!(store.get().unwrap(), Some(booking));
    }

    #[test]
    fn payment_without_stored_booking_stays_put() {
        let mut flow = filled_flow();
        flow.submit(&MemoryStore::new(), Utc::now()).unwrap();

        let empty = MemoryStore::new();
        let err = flow.select_payment("Telebirr", &empty, &Recorder::default()).unwrap_err();
        assert!(matches!(err, BookingError::NoBooking));
        assert_eq!(flow.stage(), Stage::Payment);
        assert!(!flow.has_pending_payment());
    }

    #[test]
    fn corrupt_stored_booking_counts_as_missing() {
        let mut flow = filled_flow();
        flow.submit(&MemoryStore::new(), Utc::now()).unwrap();

        let corrupt = MemoryStore::with_raw("null?");
        assert!(matches!(
            flow.select_payment("Telebirr", &corrupt, &Blocked),
            Err(BookingError::NoBooking)
        ));
    }

    #[test]
    fn stored_total_is_recomputed_before_payment() {
        let mut flow = filled_flow();
        flow.submit(&MemoryStore::new(), Utc::now()).unwrap();

        let tampered = MemoryStore::with_raw(
            r#"{"fullName":"Abel Tesfaye","phone":"+251911223344","email":"","ticket":"vip","quantity":2,"total":1,"timestamp":"2026-10-19T09:00:00.000Z"}"#,
        );
        let recorder = Recorder::default();
        let attempt = flow.select_payment("Telebirr", &tampered, &recorder).unwrap();
        assert_eq!(recorder.opened.borrow()[0].booking.total, 600);

        assert!(flow.confirm(attempt.id));
        let view = flow.confirmation().unwrap();
        assert_eq!(view.quantity, 2);
        assert_eq!(view.total, 600);
    }

    #[test]
    fn stored_booking_without_tickets_counts_as_missing() {
        let mut flow = filled_flow();
        flow.submit(&MemoryStore::new(), Utc::now()).unwrap();

        let empty_order = MemoryStore::with_raw(
            r#"{"fullName":"Abel Tesfaye","phone":"+251911223344","email":"","ticket":"vip","quantity":0,"total":0,"timestamp":"2026-10-19T09:00:00.000Z"}"#,
        );
        assert!(matches!(
            flow.select_payment("Telebirr", &empty_order, &Blocked),
            Err(BookingError::NoBooking)
        ));
        assert!(!flow.has_pending_payment());
    }

    #[test]
    fn storage_failures_name_the_failed_action() {
        let save = BookingError::Save(StoreError::Unavailable);
        let load = BookingError::Load(StoreError::Unavailable);
        assert!(save.to_string().starts_with("Could not save your booking"));
        assert!(load.to_string().starts_with("Could not load your booking"));
    }

    #[test]
    fn method_outside_payment_is_rejected() {
        let store = MemoryStore::new();
        let mut flow = filled_flow();
        assert!(matches!(
            flow.select_payment("Telebirr", &store, &Blocked),
            Err(BookingError::NotAwaitingPayment)
        ));
    }

    #[test]
    fn popup_receives_summary_and_attempt_confirms() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let mut flow = filled_flow();
        flow.submit(&store, Utc::now()).unwrap();

        let attempt = flow.select_payment("CBE Birr", &store, &recorder).unwrap();
        assert_eq!(attempt.notice, None);
        let opened = recorder.opened.borrow();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].method, "CBE Birr");
        assert_eq!(opened[0].closes_after_secs, 5);

        assert!(flow.confirm(attempt.id));
        assert_eq!(flow.stage(), Stage::Confirmation);
        let view = flow.confirmation().unwrap();
        assert!(view.ticket_label.contains("VIP"));
        assert_eq!(view.total, 600);
        assert_eq!(view.quantity, 2);
    }

    #[test]
    fn blocked_popup_still_confirms() {
        let store = MemoryStore::new();
        let mut flow = filled_flow();
        flow.submit(&store, Utc::now()).unwrap();

        let attempt = flow.select_payment("Telebirr", &store, &Blocked).unwrap();
        assert_eq!(attempt.notice, Some(PaymentNotice::PopupBlocked));
        assert!(flow.confirm(attempt.id));
    }

    #[test]
    fn immediate_confirm_clears_pending_payment() {
        let store = MemoryStore::new();
        let mut flow = filled_flow();
        flow.submit(&store, Utc::now()).unwrap();

        let attempt = flow.select_payment("Telebirr", &store, &Blocked).unwrap();
        assert!(flow.has_pending_payment());
        assert!(flow.confirm(attempt.id));
        assert!(!flow.has_pending_payment());
        assert!(!flow.confirm(attempt.id));
        assert_eq!(flow.stage(), Stage::Confirmation);
    }

    #[test]
    fn stale_attempts_do_not_confirm() {
        let store = MemoryStore::new();
        let mut flow = filled_flow();
        flow.submit(&store, Utc::now()).unwrap();

        let first = flow.select_payment("Telebirr", &store, &Blocked).unwrap();
        let second = flow.select_payment("M-Pesa", &store, &Blocked).unwrap();
        assert!(!flow.confirm(first.id));
        assert_eq!(flow.stage(), Stage::Payment);

        flow.back_to_form();
        assert!(!flow.confirm(second.id));
        assert_eq!(flow.stage(), Stage::Form);
        assert_eq!(flow.draft.full_name, "Abel Tesfaye");
    }

    #[test]
    fn new_booking_resets_draft_but_keeps_store() {
        let store = MemoryStore::new();
        let mut flow = filled_flow();
        flow.submit(&store, Utc::now()).unwrap();
        let attempt = flow.select_payment("Telebirr", &store, &Blocked).unwrap();
        flow.confirm(attempt.id);
        let before = store.raw();

        flow.start_new_booking();
        assert_eq!(flow.stage(), Stage::Form);
        assert_eq!(flow.draft, BookingDraft::default());
        assert!(flow.confirmation().is_none());
        assert_eq!(flow.draft.total(), 150);
        assert_eq!(store.raw(), before);

        flow.start_new_booking();
        assert_eq!(store.raw(), before);
    }

    #[test]
    fn pasted_name_is_filtered_before_insert() {
        let mut draft = BookingDraft::default();
        draft.input_full_name("Abel");
        draft.paste_full_name(Selection::caret(4), " T3sfaye!");
        assert_eq!(draft.full_name, "Abel Tsfaye");
    }

    #[test]
    fn email_filters_paste_but_not_typing() {
        let mut draft = BookingDraft::default();
        draft.input_email("abel <at> mail");
        assert_eq!(draft.email, "abel <at> mail");

        draft.input_email("abel@");
        draft.paste_email(Selection::caret(5), " uni vibe.et ");
        assert_eq!(draft.email, "abel@univibe.et");
    }
}
