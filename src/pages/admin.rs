//! Admin area. Every child route inherits the admin requirement from the
//! `/admin` parent.

use leptos::prelude::*;
use leptos_router::components::Outlet;

use super::account::LogoutButton;

#[component]
pub fn AdminLayout() -> impl IntoView {
    view! {
        <section class="admin">
            <h1>"Admin"</h1>
            <LogoutButton/>
            <Outlet/>
        </section>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! { <p>"Dashboard"</p> }
}

#[component]
pub fn AdminTheatresPage() -> impl IntoView {
    view! { <p>"Theatres"</p> }
}

#[component]
pub fn AdminShowsPage() -> impl IntoView {
    view! { <p>"Shows"</p> }
}
