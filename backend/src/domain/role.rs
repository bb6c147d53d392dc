//! Roles and the ordered role set attached to every user.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prefix applied to role names when exposed as authority tokens.
pub const AUTHORITY_PREFIX: &str = "ROLE_";

/// Coarse-grained permission label attached to a user.
///
/// Variants are declared in rendering order; [`RoleSet`] relies on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular account.
    User,
    /// Manager account with access to the manager area.
    Managers,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 2] = [Self::User, Self::Managers];

    /// Canonical upper-case name, e.g. `USER`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Managers => "MANAGERS",
        }
    }

    /// Authority token compared by the authorization layer, e.g. `ROLE_USER`.
    ///
    /// # Examples
    /// ```
    /// use usuarios::domain::Role;
    ///
    /// assert_eq!(Role::Managers.authority(), "ROLE_MANAGERS");
    /// ```
    pub fn authority(self) -> String {
        format!("{AUTHORITY_PREFIX}{}", self.as_str())
    }

    /// Comma separated list of accepted role names.
    pub fn allowed_names() -> String {
        Self::ALL
            .iter()
            .map(|role| role.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role name is not one of the accepted values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Parse a role name. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "MANAGERS" => Ok(Self::Managers),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Non-empty, ordered set of roles.
///
/// ## Invariants
/// - Contains at least one role.
/// - Iterates and renders in [`Role`] declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(BTreeSet<Role>);

/// Raised when building a [`RoleSet`] with no roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a user must hold at least one role")]
pub struct EmptyRoleSet;

impl RoleSet {
    /// Build a set from the supplied roles, collapsing duplicates.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self, EmptyRoleSet> {
        let set: BTreeSet<Role> = roles.into_iter().collect();
        if set.is_empty() {
            return Err(EmptyRoleSet);
        }
        Ok(Self(set))
    }

    /// Parse role names, reporting the first unknown value.
    ///
    /// An empty input yields the default set.
    ///
    /// # Examples
    /// ```
    /// use usuarios::domain::{Role, RoleSet};
    ///
    /// let roles = RoleSet::parse(["MANAGERS", "USER"]).unwrap();
    /// assert_eq!(roles.to_string(), "[USER, MANAGERS]");
    /// assert!(RoleSet::parse(["ADMIN"]).is_err());
    /// ```
    pub fn parse<I, S>(names: I) -> Result<Self, UnknownRole>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = names
            .into_iter()
            .map(|name| name.as_ref().parse::<Role>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        if set.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self(set))
    }

    /// Whether the set holds `role`.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Roles in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Authority tokens for every held role.
    pub fn authorities(&self) -> Vec<String> {
        self.iter().map(Role::authority).collect()
    }

    /// Canonical role names, used by persistence adapters.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|role| role.as_str().to_owned()).collect()
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self(BTreeSet::from([Role::User]))
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, role) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        f.write_str("]")
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(value: RoleSet) -> Self {
        value.0.into_iter().collect()
    }
}

impl TryFrom<Vec<Role>> for RoleSet {
    type Error = EmptyRoleSet;

    fn try_from(value: Vec<Role>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("USER", Role::User)]
    #[case("MANAGERS", Role::Managers)]
    fn parses_known_roles(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    #[case("ADMIN")]
    #[case("user")]
    #[case("Managers")]
    #[case("")]
    fn rejects_unknown_or_miscased_roles(#[case] raw: &str) {
        assert_eq!(raw.parse::<Role>(), Err(UnknownRole(raw.to_owned())));
    }

    #[rstest]
    fn authority_tokens_carry_prefix() {
        assert_eq!(Role::User.authority(), "ROLE_USER");
        assert_eq!(Role::Managers.authority(), "ROLE_MANAGERS");
    }

    #[rstest]
    fn empty_input_defaults_to_user() {
        let roles = RoleSet::parse(Vec::<String>::new()).expect("empty input is valid");
        assert_eq!(roles, RoleSet::default());
        assert_eq!(roles.to_string(), "[USER]");
    }

    #[rstest]
    fn renders_in_declaration_order_without_duplicates() {
        let roles = RoleSet::parse(["MANAGERS", "USER", "MANAGERS"]).expect("known roles");
        assert_eq!(roles.to_string(), "[USER, MANAGERS]");
        assert_eq!(roles.authorities(), vec!["ROLE_USER", "ROLE_MANAGERS"]);
    }

    #[rstest]
    fn reports_first_unknown_role() {
        let err = RoleSet::parse(["USER", "ADMIN", "ROOT"]).expect_err("ADMIN is unknown");
        assert_eq!(err, UnknownRole("ADMIN".to_owned()));
    }

    #[rstest]
    fn rejects_empty_construction() {
        assert_eq!(RoleSet::new([]), Err(EmptyRoleSet));
    }

    #[rstest]
    fn serialises_as_name_list() {
        let roles = RoleSet::parse(["USER", "MANAGERS"]).expect("known roles");
        let json = serde_json::to_value(&roles).expect("serialise roles");
        assert_eq!(json, serde_json::json!(["USER", "MANAGERS"]));
        let back: RoleSet = serde_json::from_value(json).expect("deserialise roles");
        assert_eq!(back, roles);
    }
}
