use leptos::prelude::*;
use thaw::*;

use crate::booking::Stage;
use crate::controller::BookingController;

#[component]
pub fn PaymentPanel() -> impl IntoView {
    let controller = BookingController::expect();
    let flow = controller.flow;

    let scan_buttons = controller
        .payment_methods()
        .into_iter()
        .map(|method| {
            let data_method = method.clone();
            let label = format!("📱 Scan with {}", method);
            view! {
                <button
                    type="button"
                    class="scan-btn"
                    data-method=data_method
                    on:click=move |_| controller.pay_with(&method)
                >
                    {label}
                </button>
            }
        })
        .collect_view();

    view! {
        <section
            id="paymentSection"
            class="payment-section"
            class:hidden=move || flow.with(|f| f.stage() != Stage::Payment)
        >
            <h2 class="payment-section__title">"Complete Your Payment"</h2>
            <p class="payment-section__subtitle">
                "Pick a payment method and scan the code with your phone."
            </p>

            <div class="scan-grid">{scan_buttons}</div>

            <Show when=move || flow.with(|f| f.has_pending_payment())>
                <p class="payment-section__pending">"Processing payment..."</p>
            </Show>

            <div class="form-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| controller.back_to_form()
                >
                    "← Back to Details"
                </Button>
            </div>
        </section>
    }
}
