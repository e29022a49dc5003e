//! Route definitions and path resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Leptos' router decides which view renders; this table only mirrors the
//! declared paths and their access requirements so the navigation guard can
//! compute the requirements of a destination before it renders.
//!
//! DESIGN
//! ======
//! Definitions nest. A destination inherits the requirements of every route
//! on the matched chain, so children of `/admin` need no flags of their own.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use super::meta::{NavigationTarget, Requirement, RouteMeta};

/// One route entry. `segment` may span several path parts (`shows/:id`);
/// parts starting with `:` capture a parameter. An empty segment matches
/// without consuming anything (home and index children).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub segment: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
    pub children: Vec<RouteDef>,
}

impl RouteDef {
    pub fn new(segment: &'static str, name: &'static str) -> Self {
        Self { segment, name, meta: RouteMeta::NONE, children: Vec::new() }
    }

    #[must_use]
    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.meta = self.meta.with(requirement);
        self
    }

    #[must_use]
    pub fn child(mut self, child: RouteDef) -> Self {
        self.children.push(child);
        self
    }
}

/// Result of resolving a location path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedRoute {
    /// Name of the leaf route.
    pub name: &'static str,
    pub params: Vec<(&'static str, String)>,
    pub target: NavigationTarget,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    /// Routes of the theatre booking client. `app::ROUTE_PATHS` lists the
    /// same leaves as declared to the Leptos router.
    pub fn booking() -> Self {
        use Requirement::{Admin, Auth, Visitor};

        Self::new(vec![
            RouteDef::new("", "home"),
            RouteDef::new("about", "about"),
            RouteDef::new("login", "login").requires(Visitor),
            RouteDef::new("register", "register").requires(Visitor),
            RouteDef::new("admin-login", "admin-login").requires(Visitor),
            RouteDef::new("protected", "protected").requires(Auth),
            RouteDef::new("bookings", "bookings").requires(Auth),
            RouteDef::new("shows/:id", "show"),
            RouteDef::new("admin", "admin")
                .requires(Auth)
                .requires(Admin)
                .child(RouteDef::new("", "admin-dashboard"))
                .child(RouteDef::new("theatres", "admin-theatres"))
                .child(RouteDef::new("shows", "admin-shows")),
        ])
    }

    /// Resolve a location path. Query and fragment are ignored, as are empty
    /// and trailing segments. Definitions are tried in declaration order and
    /// children are preferred over their parent as the leaf.
    pub fn resolve(&self, path: &str) -> Option<MatchedRoute> {
        let path = strip_query(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let chain = resolve_chain(&self.routes, &segments)?;

        let name = chain.last().map(|(route, _)| route.name)?;
        let target = NavigationTarget::from_chain(chain.iter().map(|(route, _)| route.meta));
        let params = chain.into_iter().flat_map(|(_, params)| params).collect();
        Some(MatchedRoute { name, params, target })
    }
}

type Captures = Vec<(&'static str, String)>;

pub(crate) fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or("")
}

fn resolve_chain<'a>(routes: &'a [RouteDef], segments: &[&str]) -> Option<Vec<(&'a RouteDef, Captures)>> {
    for route in routes {
        let Some((consumed, captures)) = match_segment(route.segment, segments) else {
            continue;
        };
        let rest = &segments[consumed..];

        if let Some(mut chain) = resolve_chain(&route.children, rest) {
            chain.insert(0, (route, captures));
            return Some(chain);
        }
        if rest.is_empty() {
            return Some(vec![(route, captures)]);
        }
    }
    None
}

fn match_segment(pattern: &'static str, segments: &[&str]) -> Option<(usize, Captures)> {
    let mut captures = Vec::new();
    let mut consumed = 0;
    for part in pattern.split('/').filter(|p| !p.is_empty()) {
        let segment = segments.get(consumed)?;
        match part.strip_prefix(':') {
            Some(param) => captures.push((param, (*segment).to_owned())),
            None if part == *segment => {}
            None => return None,
        }
        consumed += 1;
    }
    Some((consumed, captures))
}
