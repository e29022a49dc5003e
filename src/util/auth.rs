//! Router integration for the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two pieces cooperate inside `<Router>`:
//! - `Guarded` wraps every route view and renders nothing until the guard
//!   admits the current location, so a refused page never mounts.
//! - `install_navigation_guard` watches the location and performs the
//!   redirect the guard names.
//!
//! Both read the `BrowserGuard` provided as context by the app root.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::routing::guard::{GuardOutcome, NavigationGuard};
use crate::state::session::{SessionReader, StorageSessionReader};
use crate::util::storage::BrowserStorage;

/// Guard wired to `localStorage`, as provided to the component tree.
pub type BrowserGuard = NavigationGuard<StorageSessionReader<BrowserStorage>>;

/// Re-run the guard whenever the router location changes and navigate to the
/// redirect it returns. The redirect replaces the refused history entry.
/// Blocked locations stay put; `Guarded` keeps them unrendered.
pub fn install_navigation_guard<R, F>(guard: NavigationGuard<R>, navigate: F)
where
    R: SessionReader + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        if let GuardOutcome::Redirect(to) = guard.check(&path) {
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Render `children` only while the guard admits the current location.
///
/// Storage is only readable in the browser, so the server render and the
/// hydration pass both show nothing; the decision is made once mounted.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let guard = expect_context::<BrowserGuard>();
    let location = use_location();
    let mounted = RwSignal::new(false);
    Effect::new(move || mounted.set(true));

    let admitted = move || mounted.get() && guard.check_view(&location.pathname.get()).is_allowed();

    view! {
        <Show when=admitted>
            {children()}
        </Show>
    }
}
