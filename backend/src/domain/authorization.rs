//! Path-based authorization policy.
//!
//! An ordered table of `(method?, patterns, requirement)` rows; the first row
//! whose patterns match the request decides the requirement. Paths matching no
//! row require an authenticated user with any role.
//!
//! Patterns are either exact (`/`) or subtree patterns ending in `/**`, which
//! match the base path itself and everything below it. Runs of `/` in the
//! request path count as one before matching.

use std::borrow::Cow;

use super::auth::Principal;
use super::role::Role;

/// Access requirement attached to a policy row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, authenticated or not.
    Public,
    /// Any authenticated user.
    Authenticated,
    /// An authenticated user holding at least one of the listed roles.
    AnyRole(&'static [Role]),
}

/// Outcome of evaluating the policy for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request may proceed.
    Permit,
    /// No authenticated user where one is required.
    Unauthenticated,
    /// Authenticated but lacking the required role.
    Forbidden,
}

/// One row of the policy table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    method: Option<&'static str>,
    patterns: &'static [&'static str],
    requirement: Requirement,
}

impl Rule {
    /// Row applying to every method.
    pub const fn any_method(patterns: &'static [&'static str], requirement: Requirement) -> Self {
        Self {
            method: None,
            patterns,
            requirement,
        }
    }

    /// Row restricted to a single HTTP method (upper-case).
    pub const fn for_method(
        method: &'static str,
        patterns: &'static [&'static str],
        requirement: Requirement,
    ) -> Self {
        Self {
            method: Some(method),
            patterns,
            requirement,
        }
    }

    fn matches(&self, method: &str, path: &str) -> bool {
        if self.method.is_some_and(|wanted| !wanted.eq_ignore_ascii_case(method)) {
            return false;
        }
        self.patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, path))
    }
}

fn collapse_slashes(path: &str) -> Cow<'_, str> {
    if !path.contains("//") {
        return Cow::Borrowed(path);
    }
    let mut collapsed = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(ch);
    }
    Cow::Owned(collapsed)
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(base) => {
            path == base
                || path
                    .strip_prefix(base)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
        None => pattern == path,
    }
}

const USER_OR_MANAGERS: &[Role] = &[Role::User, Role::Managers];
const MANAGERS_ONLY: &[Role] = &[Role::Managers];

const DEFAULT_RULES: &[Rule] = &[
    Rule::any_method(&["/swagger-ui/**", "/v3/api-docs/**"], Requirement::Public),
    // Admin console left open; nothing is mounted there.
    Rule::any_method(&["/h2-console/**"], Requirement::Public),
    Rule::for_method("POST", &["/usuarios/create"], Requirement::Public),
    Rule::any_method(&["/usuarios/**"], Requirement::AnyRole(USER_OR_MANAGERS)),
    Rule::any_method(&["/managers/**"], Requirement::AnyRole(MANAGERS_ONLY)),
    Rule::any_method(&["/users/**"], Requirement::AnyRole(USER_OR_MANAGERS)),
    Rule::any_method(&["/"], Requirement::Public),
    Rule::any_method(&["/login", "/logout", "/health/**"], Requirement::Public),
];

/// Ordered, immutable policy table.
///
/// # Examples
/// ```
/// use usuarios::domain::authorization::{AuthorizationPolicy, Decision};
///
/// let policy = AuthorizationPolicy::default();
/// assert_eq!(policy.evaluate("POST", "/usuarios/create", None), Decision::Permit);
/// assert_eq!(policy.evaluate("GET", "/usuarios", None), Decision::Unauthenticated);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationPolicy {
    rules: &'static [Rule],
}

impl AuthorizationPolicy {
    /// Build a policy over a custom table.
    pub const fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// Requirement of the first matching row, or [`Requirement::Authenticated`].
    pub fn requirement_for(&self, method: &str, path: &str) -> Requirement {
        let path = collapse_slashes(path);
        self.rules
            .iter()
            .find(|rule| rule.matches(method, &path))
            .map_or(Requirement::Authenticated, |rule| rule.requirement)
    }

    /// Decide whether `principal` may perform `method` on `path`.
    pub fn evaluate(&self, method: &str, path: &str, principal: Option<&Principal>) -> Decision {
        match (self.requirement_for(method, path), principal) {
            (Requirement::Public, _) => Decision::Permit,
            (_, None) => Decision::Unauthenticated,
            (Requirement::Authenticated, Some(_)) => Decision::Permit,
            (Requirement::AnyRole(allowed), Some(principal)) => {
                if principal.roles().any(|role| allowed.contains(&role)) {
                    Decision::Permit
                } else {
                    Decision::Forbidden
                }
            }
        }
    }
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RULES)
    }
}
