use leptos::prelude::*;
use thaw::*;

use crate::booking::{ConfirmationView, Stage};
use crate::controller::BookingController;

#[component]
pub fn ConfirmationPanel() -> impl IntoView {
    let controller = BookingController::expect();
    let flow = controller.flow;
    let currency = controller.currency();

    let details = move || {
        flow.with(|f| f.confirmation().cloned()).map(|view: ConfirmationView| {
            let total = format!("{} {}", view.total, currency);
            view! {
                <div class="confirmation-details">
                    <p><strong>"Name: "</strong><span id="confName">{view.full_name}</span></p>
                    <p><strong>"Phone: "</strong><span id="confPhone">{view.phone}</span></p>
                    <p><strong>"Ticket: "</strong><span id="confTicket">{view.ticket_label}</span></p>
                    <p><strong>"Quantity: "</strong><span id="confQty">{view.quantity}</span></p>
                    <p><strong>"Total: "</strong><span id="confTotal">{total}</span></p>
                </div>
            }
        })
    };

    view! {
        <section
            id="confirmationSection"
            class="confirmation-section"
            class:hidden=move || flow.with(|f| f.stage() != Stage::Confirmation)
        >
            <div class="confirmation-section__icon">"✓"</div>
            <h2 class="confirmation-section__title">"Booking Confirmed!"</h2>
            <p class="confirmation-section__subtitle">
                "Show this confirmation at the entrance. See you there!"
            </p>

            {details}

            <div class="form-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| controller.new_booking()
                >
                    "Book Another Ticket"
                </Button>
            </div>
        </section>
    }
}
