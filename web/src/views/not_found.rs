use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <div class="not-found__code">"404"</div>
            <h1 class="not-found__title">"Page Not Found"</h1>
            <p class="not-found__text">
                "The page you're looking for doesn't exist. Tickets are on the home page."
            </p>
            <a href="/" class="not-found__link">"🏠 Go Home"</a>
        </div>
    }
}
