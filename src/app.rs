//! Root application component with routing and the navigation guard.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
    hooks::use_navigate,
};

use crate::config::GuardConfig;
use crate::pages::{
    account::{BookingsPage, ProtectedPage},
    admin::{AdminDashboardPage, AdminLayout, AdminShowsPage, AdminTheatresPage},
    public::{AboutPage, HomePage, ShowPage},
    visitor::{AdminLoginPage, LoginPage, RegisterPage},
};
use crate::routing::guard::NavigationGuard;
use crate::routing::table::RouteTable;
use crate::state::session::StorageSessionReader;
use crate::util::auth::{BrowserGuard, Guarded, install_navigation_guard};
use crate::util::storage::BrowserStorage;

/// Leaf paths declared in `GuardedRoutes`, in declaration order. The route
/// table tests compare these against `RouteTable::booking`.
pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/about",
    "/login",
    "/register",
    "/admin-login",
    "/protected",
    "/bookings",
    "/shows/:id",
    "/admin",
    "/admin/theatres",
    "/admin/shows",
];

/// Load guard settings and check the redirect paths against `table`, falling
/// back to defaults when either step fails.
pub fn load_config(table: &RouteTable) -> GuardConfig {
    GuardConfig::load()
        .and_then(|config| config.validate_redirects(table).map(|()| config))
        .unwrap_or_else(|err| {
            log::error!("invalid guard config, using defaults: {err}");
            GuardConfig::default()
        })
}

/// Root application component.
///
/// Provides the guard config and the browser guard as context and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let table = RouteTable::booking();
    let config = load_config(&table);
    let reader = StorageSessionReader::new(BrowserStorage, &config);
    provide_context(config.clone());
    provide_context::<BrowserGuard>(NavigationGuard::new(table, reader, config));

    view! {
        <Title text="Theatre Booking"/>

        <Router>
            <GuardedRoutes/>
        </Router>
    }
}

/// Route declarations with the guard installed. Must render inside `<Router>`.
#[component]
fn GuardedRoutes() -> impl IntoView {
    install_navigation_guard(expect_context::<BrowserGuard>(), use_navigate());

    view! {
        <Routes fallback=|| "Page not found.".into_view()>
            <Route path=StaticSegment("") view=|| view! { <Guarded><HomePage/></Guarded> }/>
            <Route path=StaticSegment("about") view=|| view! { <Guarded><AboutPage/></Guarded> }/>
            <Route path=StaticSegment("login") view=|| view! { <Guarded><LoginPage/></Guarded> }/>
            <Route path=StaticSegment("register") view=|| view! { <Guarded><RegisterPage/></Guarded> }/>
            <Route path=StaticSegment("admin-login") view=|| view! { <Guarded><AdminLoginPage/></Guarded> }/>
            <Route path=StaticSegment("protected") view=|| view! { <Guarded><ProtectedPage/></Guarded> }/>
            <Route path=StaticSegment("bookings") view=|| view! { <Guarded><BookingsPage/></Guarded> }/>
            <Route
                path=(StaticSegment("shows"), ParamSegment("id"))
                view=|| view! { <Guarded><ShowPage/></Guarded> }
            />
            <ParentRoute path=StaticSegment("admin") view=|| view! { <Guarded><AdminLayout/></Guarded> }>
                <Route path=StaticSegment("") view=AdminDashboardPage/>
                <Route path=StaticSegment("theatres") view=AdminTheatresPage/>
                <Route path=StaticSegment("shows") view=AdminShowsPage/>
            </ParentRoute>
        </Routes>
    }
}
