//! Pages open to everyone.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

#[component]
pub fn HomePage() -> impl IntoView {
    view! { <h1>"Now showing"</h1> }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! { <h1>"About"</h1> }
}

/// Show details for `/shows/:id`.
#[component]
pub fn ShowPage() -> impl IntoView {
    let params = use_params_map();
    let show_id = move || params.read().get("id").unwrap_or_default();

    view! {
        <h1>"Show"</h1>
        <p>{show_id}</p>
    }
}
