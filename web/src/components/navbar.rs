use leptos::prelude::*;

use crate::controller::BookingController;

#[component]
pub fn Navbar() -> impl IntoView {
    let controller = BookingController::expect();
    let close_menu = move |_: leptos::ev::MouseEvent| controller.menu_open.set(false);

    view! {
        <nav class="navbar">
            <div class="navbar__container">
                <div class="navbar__brand">
                    <a href="#home" class="navbar__logo">
                        "UniVibe"
                    </a>
                </div>

                <button
                    id="hamburger"
                    type="button"
                    class="navbar__hamburger"
                    aria-label="Toggle menu"
                    on:click=move |_| controller.toggle_menu()
                >
                    "☰"
                </button>

                <div id="navLinks" class="navbar__links" class:active=move || controller.menu_open.get()>
                    <a href="#tickets" class="navbar__link" on:click=close_menu>
                        "Tickets"
                    </a>
                    <a href="#booking" class="navbar__link navbar__link--cta" on:click=close_menu>
                        "Book Now"
                    </a>
                </div>
            </div>
        </nav>
    }
}
