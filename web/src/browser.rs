//! Browser-side adapters for the booking core: localStorage, the payment
//! popup and blocking alerts. Off the browser (ssr, tests) they report
//! themselves unavailable instead of panicking.

use std::time::Duration;

use shared_types::Booking;

use crate::booking::notify::{PaymentNotifier, PaymentSummary};
use crate::booking::{BookingStore, NotifyError, StoreError};

#[cfg(feature = "hydrate")]
const POPUP_TARGET: &str = "PaymentConfirmation";
#[cfg(feature = "hydrate")]
const POPUP_WIDTH: i32 = 600;
#[cfg(feature = "hydrate")]
const POPUP_HEIGHT: i32 = 500;

/// The latest booking in `window.localStorage` under a single key.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    #[cfg(feature = "hydrate")]
    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

impl BookingStore for LocalStorageStore {
    fn get(&self) -> Result<Option<Booking>, StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let raw = self
                .storage()?
                .get_item(&self.key)
                .map_err(|_| StoreError::Unavailable)?;
            raw.as_deref().map(crate::booking::store::decode).transpose()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StoreError::Unavailable)
        }
    }

    fn put(&self, booking: &Booking) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let encoded = crate::booking::store::encode(booking)?;
            self.storage()?
                .set_item(&self.key, &encoded)
                .map_err(|err| StoreError::Write(format!("{:?}", err)))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = booking;
            Err(StoreError::Unavailable)
        }
    }
}

/// Opens the "payment initiated" summary in a centered popup window that
/// closes itself after `close_after` unless the user closed it first.
#[derive(Debug, Clone, Copy)]
pub struct PopupWindow {
    close_after: Duration,
}

impl PopupWindow {
    pub fn new(close_after: Duration) -> Self {
        Self { close_after }
    }
}

impl PaymentNotifier for PopupWindow {
    fn open(&self, summary: &PaymentSummary) -> Result<(), NotifyError> {
        #[cfg(feature = "hydrate")]
        {
            use leptos::prelude::set_timeout_with_handle;
            use wasm_bindgen::{closure::Closure, JsCast};

            let window = web_sys::window().ok_or(NotifyError::Unsupported)?;
            let (left, top) = window
                .screen()
                .ok()
                .map(|screen| {
                    let width = screen.width().unwrap_or(POPUP_WIDTH);
                    let height = screen.height().unwrap_or(POPUP_HEIGHT);
                    ((width - POPUP_WIDTH) / 2, (height - POPUP_HEIGHT) / 2)
                })
                .unwrap_or((0, 0));
            let features = format!(
                "width={POPUP_WIDTH},height={POPUP_HEIGHT},left={left},top={top},resizable=yes,scrollbars=yes"
            );

            let popup = window
                .open_with_url_and_target_and_features("", POPUP_TARGET, &features)
                .ok()
                .flatten()
                .ok_or(NotifyError::Blocked)?;

            let root = popup
                .document()
                .and_then(|document| document.document_element())
                .ok_or_else(|| NotifyError::Render("popup has no document".to_string()))?;
            root.set_inner_html(&crate::booking::notify::render_summary_html(summary));

            let closing = popup.clone();
            let timer = set_timeout_with_handle(
                move || {
                    if !closing.closed().unwrap_or(true) {
                        let _ = closing.close();
                    }
                },
                self.close_after,
            )
            .map_err(|err| NotifyError::Render(format!("{:?}", err)))?;

            // a user-closed popup must not be closed again by the timer
            let on_unload = Closure::<dyn FnMut()>::new(move || timer.clear());
            if let Err(err) = popup
                .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref())
            {
                leptos::logging::warn!("Popup close timer stays armed: {:?}", err);
            }
            on_unload.forget();

            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (summary, self.close_after);
            Err(NotifyError::Unsupported)
        }
    }
}

/// Blocking `window.alert`. Logged instead when there is no window.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_ok() {
                return;
            }
        }
    }
    leptos::logging::warn!("{}", message);
}
