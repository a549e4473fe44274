use leptos::ev::{Event, KeyboardEvent, SubmitEvent};
use leptos::prelude::*;
use shared_types::TicketType;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, HtmlInputElement};

use crate::booking::sanitize::{phone_key_allowed, KeyPress, Selection};
use crate::booking::Stage;
use crate::controller::BookingController;

fn input_selection(ev: &Event) -> Selection {
    let input = event_target::<HtmlInputElement>(ev);
    Selection {
        start: input.selection_start().ok().flatten(),
        end: input.selection_end().ok().flatten(),
    }
}

fn clipboard_text(ev: &Event) -> String {
    ev.unchecked_ref::<ClipboardEvent>()
        .clipboard_data()
        .and_then(|data| data.get_data("text").ok())
        .unwrap_or_default()
}

#[component]
pub fn BookingForm() -> impl IntoView {
    let controller = BookingController::expect();
    let flow = controller.flow;
    let currency = controller.currency();

    let field = move |read: fn(&crate::booking::BookingDraft) -> String| {
        move || flow.with(|f| read(&f.draft))
    };

    let on_phone_keydown = move |ev: KeyboardEvent| {
        let input = event_target::<HtmlInputElement>(&ev);
        let key = ev.key();
        let press = KeyPress {
            key: &key,
            command: ev.ctrl_key() || ev.meta_key(),
            caret: input.selection_start().ok().flatten().unwrap_or(0) as usize,
        };
        if !phone_key_allowed(press, &input.value()) {
            ev.prevent_default();
        }
    };

    view! {
        <form
            id="bookingForm"
            class="booking-form"
            class:hidden=move || flow.with(|f| f.stage() != Stage::Form)
            on:submit=move |ev: SubmitEvent| {
                ev.prevent_default();
                controller.submit();
            }
        >
            <h2 class="booking-form__title">"Book Your Ticket"</h2>

            <div class="form-group">
                <label for="fullName">"Full Name *"</label>
                <input
                    id="fullName"
                    type="text"
                    placeholder="Your full name"
                    autocomplete="name"
                    prop:value={field(|d| d.full_name.clone())}
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        flow.update(|f| f.draft.input_full_name(&value));
                    }
                    on:paste=move |ev: Event| {
                        ev.prevent_default();
                        let pasted = clipboard_text(&ev);
                        let selection = input_selection(&ev);
                        flow.update(|f| f.draft.paste_full_name(selection, &pasted));
                    }
                />
            </div>

            <div class="form-group">
                <label for="phone">"Phone Number *"</label>
                <input
                    id="phone"
                    type="tel"
                    placeholder="+2519XXXXXXXX"
                    autocomplete="tel"
                    prop:value={field(|d| d.phone.clone())}
                    on:keydown=on_phone_keydown
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        flow.update(|f| f.draft.input_phone(&value));
                    }
                />
            </div>

            <div class="form-group">
                <label for="email">"Email (optional)"</label>
                <input
                    id="email"
                    type="email"
                    placeholder="you@example.com"
                    autocomplete="email"
                    prop:value={field(|d| d.email.clone())}
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        flow.update(|f| f.draft.input_email(&value));
                    }
                    on:paste=move |ev: Event| {
                        ev.prevent_default();
                        let pasted = clipboard_text(&ev);
                        let selection = input_selection(&ev);
                        flow.update(|f| f.draft.paste_email(selection, &pasted));
                    }
                />
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label for="ticketType">"Ticket Type *"</label>
                    <select
                        id="ticketType"
                        prop:value=move || {
                            flow.with(|f| f.draft.ticket.map(TicketType::as_str).unwrap_or(""))
                        }
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            flow.update(|f| f.draft.select_ticket(&value));
                        }
                    >
                        <option value="" disabled=true>"Select a ticket"</option>
                        {TicketType::ALL
                            .into_iter()
                            .map(|ticket| {
                                view! {
                                    <option value={ticket.as_str()}>
                                        {ticket.priced_label(&currency)}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="quantity">"Quantity *"</label>
                    <input
                        id="quantity"
                        type="number"
                        min="1"
                        max="10"
                        prop:value={field(|d| d.quantity.clone())}
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            flow.update(|f| f.draft.input_quantity(&value));
                        }
                    />
                </div>
            </div>

            <p class="booking-form__total">
                "Total: "
                <span id="totalPrice">{move || flow.with(|f| f.draft.total())}</span>
                {format!(" {}", controller.currency())}
            </p>

            <div class="form-actions">
                <Button button_type=ButtonType::Submit appearance=ButtonAppearance::Primary>
                    "Proceed to Payment"
                </Button>
            </div>
        </form>
    }
}
