//! Join-time role assignment.
//!
//! The core only answers which roles a new member should get. Granting them is
//! delegated to a [`RoleGrantor`] (the Discord HTTP API in the bot binary). Each
//! grant may fail on its own; failures are logged and the remaining roles are
//! still attempted.

use crate::features::autorole::category::{RoleCategory, RoleId};
use crate::features::autorole::manager::AutoroleManager;
use async_trait::async_trait;
use log::{debug, warn};

#[async_trait]
pub trait RoleGrantor: Send + Sync {
    async fn grant_role(&self, role_id: RoleId, reason: &str) -> anyhow::Result<()>;
}

/// What happened while applying autoroles to one member
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub granted: Vec<RoleId>,
    pub failed: Vec<RoleId>,
}

/// Roles to apply to a member joining `tenant`
pub fn roles_for_member(manager: &AutoroleManager, tenant: &str, is_bot: bool) -> Vec<RoleId> {
    manager.get_roles(tenant, RoleCategory::for_member(is_bot))
}

/// Grant every configured role for the member's category, in order.
///
/// `actor` is the bot's display name and ends up in the audit log reason.
pub async fn apply_join_roles<G: RoleGrantor + ?Sized>(
    manager: &AutoroleManager,
    tenant: &str,
    is_bot: bool,
    actor: &str,
    grantor: &G,
) -> JoinOutcome {
    let category = RoleCategory::for_member(is_bot);
    let roles = manager.get_roles(tenant, category);
    let reason = format!("{actor} @ {category} autorole");

    let mut outcome = JoinOutcome::default();
    for role_id in roles {
        match grantor.grant_role(role_id, &reason).await {
            Ok(()) => outcome.granted.push(role_id),
            Err(e) => {
                warn!("Guild {tenant}: failed to grant {category} autorole {role_id}: {e}");
                outcome.failed.push(role_id);
            }
        }
    }

    if !outcome.granted.is_empty() {
        debug!(
            "Guild {tenant}: granted {} {category} autorole(s)",
            outcome.granted.len()
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every attempt and fails for the configured role ids
    struct FakeGrantor {
        failing: Vec<RoleId>,
        attempts: Mutex<Vec<(RoleId, String)>>,
    }

    impl FakeGrantor {
        fn new(failing: &[RoleId]) -> Self {
            FakeGrantor {
                failing: failing.to_vec(),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempted(&self) -> Vec<RoleId> {
            self.attempts.lock().unwrap().iter().map(|(id, _)| *id).collect()
        }
    }

    #[async_trait]
    impl RoleGrantor for FakeGrantor {
        async fn grant_role(&self, role_id: RoleId, reason: &str) -> anyhow::Result<()> {
            self.attempts
                .lock()
                .unwrap()
                .push((role_id, reason.to_string()));
            if self.failing.contains(&role_id) {
                anyhow::bail!("Missing Permissions");
            }
            Ok(())
        }
    }

    fn setup() -> (tempfile::TempDir, AutoroleManager) {
        let dir = tempfile::tempdir().unwrap();
        let manager = AutoroleManager::open(
            dir.path().join("autorole.json"),
            dir.path().join("autorole_templates.json"),
        )
        .unwrap();
        manager
            .add_roles("1", RoleCategory::Human, &[10, 20, 30])
            .unwrap();
        manager
            .add_roles("1", RoleCategory::Automated, &[40])
            .unwrap();
        (dir, manager)
    }

    #[test]
    fn test_roles_for_member_picks_category() {
        let (_dir, manager) = setup();
        assert_eq!(roles_for_member(&manager, "1", false), vec![10, 20, 30]);
        assert_eq!(roles_for_member(&manager, "1", true), vec![40]);
        assert!(roles_for_member(&manager, "2", false).is_empty());
    }

    #[tokio::test]
    async fn test_applies_all_roles_in_order() {
        let (_dir, manager) = setup();
        let grantor = FakeGrantor::new(&[]);

        let outcome = apply_join_roles(&manager, "1", false, "Autorole", &grantor).await;

        assert_eq!(outcome.granted, vec![10, 20, 30]);
        assert!(outcome.failed.is_empty());
        let reasons = grantor.attempts.lock().unwrap().clone();
        assert_eq!(reasons[0].1, "Autorole @ humans autorole");
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let (_dir, manager) = setup();
        let grantor = FakeGrantor::new(&[10, 20]);

        let outcome = apply_join_roles(&manager, "1", false, "Autorole", &grantor).await;

        assert_eq!(grantor.attempted(), vec![10, 20, 30]);
        assert_eq!(outcome.granted, vec![30]);
        assert_eq!(outcome.failed, vec![10, 20]);
    }

    #[tokio::test]
    async fn test_bot_member_gets_bot_roles() {
        let (_dir, manager) = setup();
        let grantor = FakeGrantor::new(&[]);

        let outcome = apply_join_roles(&manager, "1", true, "Autorole", &grantor).await;

        assert_eq!(outcome.granted, vec![40]);
        let reasons = grantor.attempts.lock().unwrap().clone();
        assert_eq!(reasons[0].1, "Autorole @ bots autorole");
    }

    #[tokio::test]
    async fn test_unconfigured_guild_grants_nothing() {
        let (_dir, manager) = setup();
        let grantor = FakeGrantor::new(&[]);

        let outcome = apply_join_roles(&manager, "unknown", false, "Autorole", &grantor).await;

        assert_eq!(outcome, JoinOutcome::default());
        assert!(grantor.attempted().is_empty());
    }
}
