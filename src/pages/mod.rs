//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages are placeholders grouped by the access they require. Access itself
//! is enforced by the navigation guard, never by the pages.

pub mod account;
pub mod admin;
pub mod public;
pub mod visitor;
