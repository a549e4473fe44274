use chrono::Utc;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use shared_types::TicketType;

use crate::booking::BookingFlow;
use crate::browser::{alert, LocalStorageStore, PopupWindow};
use crate::config::BookingConfig;

/// Binds a [`BookingFlow`] to the page: signals for rendering, the browser
/// adapters for storage and popups, and the confirmation timer.
///
/// Shared with every component through context; it is `Copy`.
#[derive(Clone, Copy)]
pub struct BookingController {
    pub flow: RwSignal<BookingFlow>,
    pub menu_open: RwSignal<bool>,
    config: StoredValue<BookingConfig>,
    confirm_timer: StoredValue<Option<TimeoutHandle>>,
}

impl BookingController {
    pub fn new(config: BookingConfig) -> Self {
        Self {
            flow: RwSignal::new(BookingFlow::new(&config)),
            menu_open: RwSignal::new(false),
            config: StoredValue::new(config),
            confirm_timer: StoredValue::new(None),
        }
    }

    pub fn provide(config: BookingConfig) -> Self {
        let controller = Self::new(config);
        provide_context(controller);
        controller
    }

    pub fn expect() -> Self {
        expect_context::<Self>()
    }

    pub fn payment_methods(&self) -> Vec<String> {
        self.config.with_value(|config| config.payment_methods.clone())
    }

    pub fn currency(&self) -> String {
        self.config.with_value(|config| config.currency.clone())
    }

    fn store(&self) -> LocalStorageStore {
        LocalStorageStore::new(self.config.with_value(|config| config.storage_key.clone()))
    }

    pub fn toggle_menu(&self) {
        self.menu_open.update(|open| *open = !*open);
    }

    /// A "Buy" button on a ticket card.
    pub fn buy(&self, ticket: TicketType) {
        self.flow.update(|flow| flow.choose_ticket(ticket));
        self.menu_open.set(false);
    }

    pub fn submit(&self) {
        let store = self.store();
        match self.flow.try_update(|flow| flow.submit(&store, Utc::now())) {
            Some(Ok(booking)) => log!("Booking saved: {} x {}", booking.ticket_type, booking.quantity),
            Some(Err(err)) => alert(&err.to_string()),
            None => error!("Booking state is no longer available"),
        }
    }

    /// A scan button on the payment step.
    pub fn pay_with(&self, method: &str) {
        let store = self.store();
        let popup = PopupWindow::new(self.config.with_value(BookingConfig::popup_close_delay));
        let attempt = match self
            .flow
            .try_update(|flow| flow.select_payment(method, &store, &popup))
        {
            Some(Ok(attempt)) => attempt,
            Some(Err(err)) => {
                alert(&err.to_string());
                return;
            }
            None => return,
        };
        if let Some(notice) = attempt.notice {
            alert(&notice.to_string());
        }

        self.cancel_confirmation();
        let flow = self.flow;
        let timer = self.confirm_timer;
        let delay = self.config.with_value(BookingConfig::confirmation_delay);
        match set_timeout_with_handle(
            move || {
                timer.set_value(None);
                if !flow.try_update(|flow| flow.confirm(attempt.id)).unwrap_or(false) {
                    log!("Ignoring confirmation for payment attempt {}", attempt.id);
                }
            },
            delay,
        ) {
            Ok(handle) => self.confirm_timer.set_value(Some(handle)),
            Err(err) => {
                warn!("Confirming without delay, timer unavailable: {:?}", err);
                self.flow.update(|flow| {
                    flow.confirm(attempt.id);
                });
            }
        }
    }

    pub fn back_to_form(&self) {
        self.cancel_confirmation();
        self.flow.update(BookingFlow::back_to_form);
    }

    pub fn new_booking(&self) {
        self.cancel_confirmation();
        self.flow.update(BookingFlow::start_new_booking);
    }

    fn cancel_confirmation(&self) {
        let mut pending = None;
        self.confirm_timer.update_value(|timer| pending = timer.take());
        if let Some(handle) = pending {
            handle.clear();
        }
    }
}
