use leptos::prelude::*;

use crate::components::{BookingForm, ConfirmationPanel, Navbar, PaymentPanel, TicketTiers};
use crate::config::BookingConfig;
use crate::controller::BookingController;

/// The whole event page: hero, ticket tiers and the booking flow.
#[component]
pub fn BookingPage() -> impl IntoView {
    let config = use_context::<BookingConfig>().unwrap_or_default();
    BookingController::provide(config);

    view! {
        <Navbar/>

        <header id="home" class="hero">
            <h1 class="hero__title">"UniVibe Campus Fest"</h1>
            <p class="hero__subtitle">
                "Music, food and the best night of the semester. Grab your ticket before they sell out."
            </p>
            <a href="#tickets" class="hero__cta">"See Tickets"</a>
        </header>

        <TicketTiers/>

        <section id="booking" class="booking">
            <BookingForm/>
            <PaymentPanel/>
            <ConfirmationPanel/>
        </section>

        <footer class="footer">
            <p>"UniVibe Events & Solutions • support@univibe.et"</p>
        </footer>
    }
}
