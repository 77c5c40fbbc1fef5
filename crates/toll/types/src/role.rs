use serde::{Deserialize, Serialize};

/// A named capability granting access to a set of mutating operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Implicit super-role; the only role that can manage [`Role::Admin`].
    DefaultAdmin,
    /// Manages the five operational roles.
    Admin,
    Minter,
    Burner,
    BlacklistManager,
    Pauser,
    FeeManager,
}

impl Role {
    /// Every role, in the order they are granted at genesis.
    pub const ALL: [Role; 7] = [
        Role::DefaultAdmin,
        Role::Admin,
        Role::Minter,
        Role::Burner,
        Role::BlacklistManager,
        Role::Pauser,
        Role::FeeManager,
    ];

    /// The role whose holders may grant and revoke this one.
    pub fn admin_role(&self) -> Role {
        match self {
            Role::DefaultAdmin | Role::Admin => Role::DefaultAdmin,
            Role::Minter
            | Role::Burner
            | Role::BlacklistManager
            | Role::Pauser
            | Role::FeeManager => Role::Admin,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::DefaultAdmin => "DEFAULT_ADMIN_ROLE",
            Role::Admin => "ADMIN_ROLE",
            Role::Minter => "MINTER_ROLE",
            Role::Burner => "BURNER_ROLE",
            Role::BlacklistManager => "BLACKLIST_MANAGER_ROLE",
            Role::Pauser => "PAUSER_ROLE",
            Role::FeeManager => "FEE_MANAGER_ROLE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operational_roles_are_managed_by_admin() {
        for role in [
            Role::Minter,
            Role::Burner,
            Role::BlacklistManager,
            Role::Pauser,
            Role::FeeManager,
        ] {
            assert_eq!(role.admin_role(), Role::Admin);
        }
    }

    #[test]
    fn admin_is_managed_by_default_admin() {
        assert_eq!(Role::Admin.admin_role(), Role::DefaultAdmin);
        assert_eq!(Role::DefaultAdmin.admin_role(), Role::DefaultAdmin);
    }

    #[test]
    fn genesis_order_starts_with_default_admin() {
        assert_eq!(Role::ALL[0], Role::DefaultAdmin);
        assert_eq!(Role::ALL.len(), 7);
    }

    #[test]
    fn display_uses_role_constant_names() {
        assert_eq!(Role::Minter.to_string(), "MINTER_ROLE");
        assert_eq!(Role::BlacklistManager.to_string(), "BLACKLIST_MANAGER_ROLE");
    }
}
