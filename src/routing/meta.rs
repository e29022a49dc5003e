//! Access requirements attached to route definitions.

#[cfg(test)]
#[path = "meta_test.rs"]
mod meta_test;

/// One access flag a route can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// Only reachable with a stored session token.
    Auth,
    /// Only reachable without a session (login, register).
    Visitor,
    /// Only reachable when the role marker names an admin.
    Admin,
}

impl Requirement {
    pub const ALL: [Requirement; 3] = [Requirement::Auth, Requirement::Visitor, Requirement::Admin];

    /// Key used in route `meta` objects.
    pub fn meta_key(self) -> &'static str {
        match self {
            Self::Auth => "requiresAuth",
            Self::Visitor => "requiresVisitor",
            Self::Admin => "requiresAdmin",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Auth => 1,
            Self::Visitor => 1 << 1,
            Self::Admin => 1 << 2,
        }
    }
}

/// Unordered set of requirements on a single route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    bits: u8,
}

impl RouteMeta {
    pub const NONE: RouteMeta = RouteMeta { bits: 0 };

    #[must_use]
    pub const fn with(self, requirement: Requirement) -> Self {
        Self { bits: self.bits | requirement.bit() }
    }

    pub const fn requires(self, requirement: Requirement) -> bool {
        self.bits & requirement.bit() != 0
    }

    #[must_use]
    pub const fn union(self, other: RouteMeta) -> Self {
        Self { bits: self.bits | other.bits }
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Requirement> {
        Requirement::ALL.into_iter().filter(move |r| self.requires(*r))
    }
}

/// Requirements of a navigation destination: the union of the `RouteMeta` of
/// every matched segment from the root route down to the leaf.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationTarget {
    merged: RouteMeta,
}

impl NavigationTarget {
    pub fn from_chain<I>(chain: I) -> Self
    where
        I: IntoIterator<Item = RouteMeta>,
    {
        let merged = chain.into_iter().fold(RouteMeta::NONE, RouteMeta::union);
        Self { merged }
    }

    pub const fn requires(&self, requirement: Requirement) -> bool {
        self.merged.requires(requirement)
    }

    pub const fn meta(&self) -> RouteMeta {
        self.merged
    }
}
