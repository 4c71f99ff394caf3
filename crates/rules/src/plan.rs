//! Deployment plan: which roles are rolled out and which domains that needs

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ROLE
// ============================================================================

/// A deployable role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    KerberosClient,
    Shares,
    Samba,
    NfsServer,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::KerberosClient, Self::Shares, Self::Samba, Self::NfsServer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KerberosClient => "kerberos-client",
            Self::Shares => "shares",
            Self::Samba => "samba",
            Self::NfsServer => "nfs-server",
        }
    }

    /// Domains this role needs validated. File servers authenticate through
    /// Kerberos, so they pull in the Kerberos client domains.
    #[must_use]
    pub const fn domains(self) -> &'static [Domain] {
        match self {
            Self::KerberosClient => &[Domain::Realm, Domain::Keytab, Domain::ServicePrincipals],
            Self::Shares => &[Domain::Shares],
            Self::Samba => &[
                Domain::Realm,
                Domain::Keytab,
                Domain::ServicePrincipals,
                Domain::Samba,
            ],
            Self::NfsServer => &[
                Domain::Realm,
                Domain::Keytab,
                Domain::ServicePrincipals,
                Domain::NfsExports,
            ],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|r| r.as_str()).collect();
                format!("unknown role {s:?}, expected one of: {}", known.join(", "))
            })
    }
}

// ============================================================================
// DOMAIN
// ============================================================================

/// A configuration domain, validated by one rule set.
///
/// Declaration order is dependency order: authentication before the shares
/// and exports that rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Realm,
    Keytab,
    ServicePrincipals,
    Shares,
    Samba,
    NfsExports,
}

impl Domain {
    pub const ALL: [Self; 6] = [
        Self::Realm,
        Self::Keytab,
        Self::ServicePrincipals,
        Self::Shares,
        Self::Samba,
        Self::NfsExports,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Realm => "realm",
            Self::Keytab => "keytab",
            Self::ServicePrincipals => "service_principals",
            Self::Shares => "shares",
            Self::Samba => "samba",
            Self::NfsExports => "nfs_exports",
        }
    }

    /// Selection tag carried by every rule of the domain.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Realm | Self::Keytab | Self::ServicePrincipals => "kerberos",
            Self::Shares => "shares",
            Self::Samba => "samba",
            Self::NfsExports => "nfs",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PLAN
// ============================================================================

/// The set of roles being deployed.
///
/// ```rust
/// use preflight_rules::{Domain, Plan, Role};
///
/// let plan = Plan::from_roles([Role::NfsServer]);
/// assert!(plan.requires_principals());
/// assert_eq!(
///     plan.domains(),
///     [Domain::Realm, Domain::Keytab, Domain::ServicePrincipals, Domain::NfsExports]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    roles: BTreeSet<Role>,
}

impl Plan {
    /// Every role.
    #[must_use]
    pub fn all() -> Self {
        Self::from_roles(Role::ALL)
    }

    /// The given roles; an empty list means every role.
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() {
            return Self {
                roles: Role::ALL.into_iter().collect(),
            };
        }
        Self { roles }
    }

    #[must_use]
    pub fn includes(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Domains to validate, in dependency order, without duplicates.
    #[must_use]
    pub fn domains(&self) -> Vec<Domain> {
        let wanted: BTreeSet<Domain> = self
            .roles
            .iter()
            .flat_map(|role| role.domains().iter().copied())
            .collect();
        wanted.into_iter().collect()
    }

    /// Service principals must be listed when a file server is deployed.
    #[must_use]
    pub fn requires_principals(&self) -> bool {
        self.includes(Role::NfsServer) || self.includes(Role::Samba)
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::all()
    }
}
