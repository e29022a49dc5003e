//! Route access requirements, route table and the navigation guard.
//!
//! DESIGN
//! ======
//! `meta` and `table` describe destinations; `guard` turns a destination and a
//! session snapshot into a decision. None of it touches the browser.

pub mod guard;
pub mod meta;
pub mod table;

pub use guard::{Decision, GuardOutcome, NavigationGuard, Redirect, decide, guard_navigation};
pub use meta::{NavigationTarget, Requirement, RouteMeta};
pub use table::{MatchedRoute, RouteDef, RouteTable};
