//! Access policy: which capability an operation needs in a tenant scope
//!
//! Every function here is a pure predicate over the actor's capability set.
//! Callers must check before touching the repository or the installer.

use crate::types::{Actor, Capability, ItemKind, TenantScope};

/// Capability required to search for or install items of `kind`
pub fn required_capability(kind: ItemKind, scope: TenantScope) -> Capability {
    match (scope, kind) {
        (TenantScope::Network, ItemKind::Plugin) => Capability::ManageNetworkPlugins,
        (TenantScope::Network, ItemKind::Theme) => Capability::ManageNetworkThemes,
        (TenantScope::SingleSite, ItemKind::Plugin) => Capability::InstallPlugins,
        (TenantScope::SingleSite, ItemKind::Theme) => Capability::InstallThemes,
    }
}

pub fn can_search(actor: &Actor, kind: ItemKind, scope: TenantScope) -> bool {
    actor.has(required_capability(kind, scope))
}

pub fn can_install(actor: &Actor, kind: ItemKind, scope: TenantScope) -> bool {
    actor.has(required_capability(kind, scope))
}

/// Reading or changing the repository settings
pub fn can_manage_settings(actor: &Actor, scope: TenantScope) -> bool {
    match scope {
        TenantScope::Network => actor.has(Capability::ManageNetworkOptions),
        TenantScope::SingleSite => actor.has(Capability::ManageOptions),
    }
}

pub fn can_activate_network_wide(actor: &Actor) -> bool {
    actor.has(Capability::ManageNetworkPlugins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_site_uses_install_capabilities() {
        let actor = Actor::new("admin").with_capability(Capability::InstallPlugins);
        assert!(can_search(&actor, ItemKind::Plugin, TenantScope::SingleSite));
        assert!(can_install(&actor, ItemKind::Plugin, TenantScope::SingleSite));
        assert!(!can_install(&actor, ItemKind::Theme, TenantScope::SingleSite));
    }

    #[test]
    fn test_network_requires_network_capabilities() {
        let site_admin = Actor::new("admin")
            .with_capabilities([Capability::InstallPlugins, Capability::InstallThemes]);
        assert!(!can_install(&site_admin, ItemKind::Plugin, TenantScope::Network));
        assert!(!can_search(&site_admin, ItemKind::Theme, TenantScope::Network));

        let super_admin = Actor::new("root").with_capability(Capability::ManageNetworkThemes);
        assert!(can_install(&super_admin, ItemKind::Theme, TenantScope::Network));
        assert!(!can_install(&super_admin, ItemKind::Plugin, TenantScope::Network));
    }

    #[test]
    fn test_network_capability_does_not_grant_single_site() {
        let actor = Actor::new("root").with_capability(Capability::ManageNetworkPlugins);
        assert!(!can_install(&actor, ItemKind::Plugin, TenantScope::SingleSite));
    }

    #[test]
    fn test_settings_capability_by_scope() {
        let actor = Actor::new("admin").with_capability(Capability::ManageOptions);
        assert!(can_manage_settings(&actor, TenantScope::SingleSite));
        assert!(!can_manage_settings(&actor, TenantScope::Network));
    }

    #[test]
    fn test_empty_actor_is_denied_everything() {
        let nobody = Actor::new("guest");
        for scope in [TenantScope::SingleSite, TenantScope::Network] {
            for kind in [ItemKind::Plugin, ItemKind::Theme] {
                assert!(!can_search(&nobody, kind, scope));
                assert!(!can_install(&nobody, kind, scope));
            }
            assert!(!can_manage_settings(&nobody, scope));
        }
        assert!(!can_activate_network_wide(&nobody));
    }

    #[test]
    fn test_operator_holds_everything() {
        let operator = Actor::operator("cli");
        assert!(can_install(&operator, ItemKind::Theme, TenantScope::Network));
        assert!(can_activate_network_wide(&operator));
    }
}
