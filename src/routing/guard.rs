//! Navigation authorization guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs before every route transition. Given the requirements of the
//! destination and the current session flags it allows the transition or
//! names where to redirect. Performing the redirect is the caller's job.
//!
//! The checks are ordered and the first match wins:
//! 1. auth required, no session        -> login
//! 2. visitor-only page, session       -> home
//! 3. admin required, no admin marker  -> home
//! 4. otherwise                        -> allow
//!
//! Auth comes first so an anonymous request for an admin page is sent to log
//! in rather than silently bounced home.
//!
//! TRADE-OFFS
//! ==========
//! This is navigation UX only. The admin flag comes from client storage and
//! can be set by anyone with devtools; the API must enforce roles itself.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::meta::{NavigationTarget, Requirement};
use super::table::{RouteTable, strip_query};
use crate::config::{DEFAULT_HOME_PATH, GuardConfig};
use crate::state::session::{SessionReader, SessionState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Home,
}

impl Redirect {
    pub fn path(self, config: &GuardConfig) -> &str {
        match self {
            Self::Login => &config.login_path,
            Self::Home => &config.home_path,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(Redirect),
}

/// Decide whether a transition to `target` may proceed. Total and pure.
pub fn decide(target: &NavigationTarget, session: SessionState) -> Decision {
    if target.requires(Requirement::Auth) && !session.logged_in {
        return Decision::RedirectTo(Redirect::Login);
    }
    if target.requires(Requirement::Visitor) && session.logged_in {
        return Decision::RedirectTo(Redirect::Home);
    }
    if target.requires(Requirement::Admin) && !session.is_admin {
        return Decision::RedirectTo(Redirect::Home);
    }
    Decision::Allow
}

/// Result of guarding one location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(String),
    /// Refused with nowhere safe to send the user. The page stays unrendered.
    Blocked,
}

impl GuardOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Evaluate one navigation to `path`.
///
/// Session state is read fresh on every call. Paths the table does not know
/// carry no requirements and proceed to the router fallback. When the
/// configured redirect points back at the refused page the user is sent to
/// the default home page instead, if that page admits them; otherwise the
/// navigation is blocked.
pub fn guard_navigation<R>(path: &str, table: &RouteTable, reader: &R, config: &GuardConfig) -> GuardOutcome
where
    R: SessionReader + ?Sized,
{
    let session = reader.read();
    let target = target_of(table, path);
    let decision = decide(&target, session);
    log::debug!(
        "guard {path}: {decision:?} (requires [{}], logged_in={}, is_admin={})",
        describe(&target),
        session.logged_in,
        session.is_admin
    );

    let Decision::RedirectTo(redirect) = decision else {
        return GuardOutcome::Proceed;
    };
    let to = redirect.path(config);
    if !same_location(path, to) {
        log::info!("guard {path}: redirecting to {to}");
        return GuardOutcome::Redirect(to.to_owned());
    }

    let fallback_admits = decide(&target_of(table, DEFAULT_HOME_PATH), session) == Decision::Allow;
    if !same_location(path, DEFAULT_HOME_PATH) && fallback_admits {
        log::warn!("guard {path}: redirect target is the refused page, falling back to {DEFAULT_HOME_PATH}");
        return GuardOutcome::Redirect(DEFAULT_HOME_PATH.to_owned());
    }
    log::error!("guard {path}: refused with no admissible redirect, blocking");
    GuardOutcome::Blocked
}

/// Route table, session source and settings bundled for the router.
#[derive(Clone, Debug)]
pub struct NavigationGuard<R> {
    table: RouteTable,
    reader: R,
    config: GuardConfig,
}

impl<R: SessionReader> NavigationGuard<R> {
    pub fn new(table: RouteTable, reader: R, config: GuardConfig) -> Self {
        Self { table, reader, config }
    }

    /// Guard a location change.
    pub fn check(&self, path: &str) -> GuardOutcome {
        guard_navigation(path, &self.table, &self.reader, &self.config)
    }

    /// Guard a view the router is about to render. The router only renders
    /// declared routes, so a path missing from the table means the two have
    /// drifted apart; such views are refused.
    pub fn check_view(&self, path: &str) -> GuardOutcome {
        if self.table.resolve(path).is_none() {
            log::error!("guard {path}: rendered route is missing from the route table");
            return GuardOutcome::Blocked;
        }
        self.check(path)
    }
}

pub(crate) fn target_of(table: &RouteTable, path: &str) -> NavigationTarget {
    table.resolve(path).map(|m| m.target).unwrap_or_default()
}

fn describe(target: &NavigationTarget) -> String {
    target.meta().iter().map(Requirement::meta_key).collect::<Vec<_>>().join(", ")
}

fn same_location(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(path: &str) -> &str {
    let trimmed = strip_query(path).trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
