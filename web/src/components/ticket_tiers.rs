use leptos::prelude::*;
use shared_types::TicketType;

use crate::controller::BookingController;

fn perks(ticket: TicketType) -> &'static [&'static str] {
    match ticket {
        TicketType::Regular => &["General admission", "Access to all stages"],
        TicketType::Vip => &["Priority entry", "VIP lounge access", "Free welcome drink"],
        TicketType::Vvip => &["Backstage access", "Front-row seating", "Meet & greet", "Exclusive merch"],
    }
}

/// Price cards. "Buy" preselects the tier in the booking form.
#[component]
pub fn TicketTiers() -> impl IntoView {
    let controller = BookingController::expect();
    let currency = controller.currency();

    view! {
        <section id="tickets" class="tickets">
            <h2 class="tickets__title">"Choose Your Experience"</h2>
            <div class="tickets__grid">
                {TicketType::ALL
                    .into_iter()
                    .map(|ticket| {
                        let price = format!("{} {}", ticket.unit_price(), currency);
                        view! {
                            <div class={if ticket == TicketType::Vip { "ticket-card ticket-card--featured" } else { "ticket-card" }}>
                                <h3 class="ticket-card__name">{ticket.label()}</h3>
                                <p class="ticket-card__price">{price}</p>
                                <ul class="ticket-card__perks">
                                    {perks(ticket)
                                        .iter()
                                        .map(|perk| view! { <li>{*perk}</li> })
                                        .collect_view()}
                                </ul>
                                <a
                                    href="#booking"
                                    class="ticket-card__buy"
                                    data-ticket={ticket.as_str()}
                                    on:click=move |_| controller.buy(ticket)
                                >
                                    "Buy Ticket"
                                </a>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
