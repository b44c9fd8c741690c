//! Service bundle for the recipe/discovery admin panel.

pub mod entities;
pub mod seed;

use std::sync::Arc;

use mockable::DefaultClock;
use serde_json::json;

use crate::config::ServiceConfig;
use crate::domain::ports::EntityService;
use crate::domain::{EntityId, Envelope, Patch, ServiceError};
use crate::service::ServiceFactory;

pub use self::seed::FALLBACK_ROLE_ID;

use self::entities::{
    Coupon, Dish, Integration, Plan, Preset, Prompt, Recipe, Role, Tag, User, Webhook,
};

/// Every data service the recipes panel's pages consume, built once per
/// process against a shared store or transport.
pub struct RecipesAdmin {
    /// Operator accounts (paginated).
    pub users: Arc<dyn EntityService<User>>,
    /// Permission roles.
    pub roles: Arc<dyn EntityService<Role>>,
    /// Dish catalogue (paginated).
    pub dishes: Arc<dyn EntityService<Dish>>,
    /// Dish tags.
    pub tags: Arc<dyn EntityService<Tag>>,
    /// Discovery prompts.
    pub prompts: Arc<dyn EntityService<Prompt>>,
    /// Recipe write-ups (paginated).
    pub recipes: Arc<dyn EntityService<Recipe>>,
    /// Curated dish presets.
    pub presets: Arc<dyn EntityService<Preset>>,
    /// Provider integrations.
    pub integrations: Arc<dyn EntityService<Integration>>,
    /// Outbound webhooks.
    pub webhooks: Arc<dyn EntityService<Webhook>>,
    /// Subscription plans.
    pub plans: Arc<dyn EntityService<Plan>>,
    /// Discount coupons.
    pub coupons: Arc<dyn EntityService<Coupon>>,
}

impl RecipesAdmin {
    /// Build every entity service from one factory, seeding mock
    /// collections on first access.
    #[must_use]
    pub fn new(factory: &ServiceFactory) -> Self {
        Self {
            users: factory.build(seed::users()),
            roles: factory.build(seed::roles()),
            dishes: factory.build(seed::dishes()),
            tags: factory.build(seed::tags()),
            prompts: factory.build(seed::prompts()),
            recipes: factory.build(seed::recipes()),
            presets: factory.build(seed::presets()),
            integrations: factory.build(seed::integrations()),
            webhooks: factory.build(seed::webhooks()),
            plans: factory.build(seed::plans()),
            coupons: factory.build(seed::coupons()),
        }
    }

    /// Build from configuration with the system clock.
    ///
    /// # Errors
    ///
    /// Propagates [`ServiceFactory::from_config`] failures.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let factory = ServiceFactory::from_config(config, Arc::new(DefaultClock))?;
        Ok(Self::new(&factory))
    }

    /// Delete a role, first reassigning every user that referenced it to
    /// the fallback role.
    ///
    /// The fallback role itself cannot be deleted; asking to resolves to
    /// `ok: false` without touching anything.
    ///
    /// # Errors
    ///
    /// Propagates service failures from either the reassignment or the
    /// delete.
    pub async fn delete_role(&self, id: &EntityId) -> Result<Envelope<()>, ServiceError> {
        if id.as_str() == FALLBACK_ROLE_ID {
            return Ok(Envelope::miss());
        }
        self.users
            .update_matching("roleId", id.as_str(), Patch::new().set("roleId", json!(FALLBACK_ROLE_ID)))
            .await?;
        self.roles.delete(id).await
    }

    /// Delete an integration, first disabling every webhook that belonged
    /// to it.
    ///
    /// # Errors
    ///
    /// Propagates service failures from either the disabling or the
    /// delete.
    pub async fn delete_integration(&self, id: &EntityId) -> Result<Envelope<()>, ServiceError> {
        self.webhooks
            .update_matching(
                "integrationId",
                id.as_str(),
                Patch::new().set("status", json!("disabled")),
            )
            .await?;
        self.integrations.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListQuery;
    use crate::outbound::local::MemoryStore;
    use crate::test_support::MutableClock;

    use super::entities::ToggleStatus;

    fn bundle() -> RecipesAdmin {
        let factory = ServiceFactory::with_store(
            Arc::new(MemoryStore::new()),
            Arc::new(MutableClock::at_ms(1_700_000_000_000)),
            Some(11),
        );
        RecipesAdmin::new(&factory)
    }

    #[tokio::test]
    async fn deleting_a_role_reassigns_its_users_to_the_fallback() {
        let admin = bundle();

        let outcome = admin
            .delete_role(&EntityId::new("role_editor"))
            .await
            .expect("delete resolves");
        assert!(outcome.ok());

        let roles = admin
            .roles
            .list(&ListQuery::all())
            .await
            .expect("list resolves")
            .into_data()
            .expect("roles listed");
        assert!(roles.iter().all(|role| role.id().as_str() != "role_editor"));

        let stranded = admin
            .users
            .list(&ListQuery::all().with_filter("roleId", "role_editor"))
            .await
            .expect("list resolves")
            .into_data()
            .expect("users listed");
        assert!(stranded.is_empty(), "no user still references the role");

        let fallback = admin
            .users
            .list(&ListQuery::all().with_filter("roleId", FALLBACK_ROLE_ID))
            .await
            .expect("list resolves")
            .into_data()
            .expect("users listed");
        assert_eq!(fallback.len(), 3, "both reassigned users joined devi");
    }

    #[tokio::test]
    async fn the_fallback_role_refuses_deletion() {
        let admin = bundle();

        let outcome = admin
            .delete_role(&EntityId::new(FALLBACK_ROLE_ID))
            .await
            .expect("delete resolves");
        assert!(!outcome.ok());

        let roles = admin
            .roles
            .list(&ListQuery::all())
            .await
            .expect("list resolves")
            .into_data()
            .expect("roles listed");
        assert!(
            roles
                .iter()
                .any(|role| role.id().as_str() == FALLBACK_ROLE_ID)
        );
    }

    #[tokio::test]
    async fn deleting_an_integration_disables_its_webhooks() {
        let admin = bundle();

        admin
            .delete_integration(&EntityId::new("int_metrics"))
            .await
            .expect("delete resolves");

        let hooks = admin
            .webhooks
            .list(&ListQuery::all())
            .await
            .expect("list resolves")
            .into_data()
            .expect("webhooks listed");
        let metrics_hook = hooks
            .iter()
            .find(|hook| hook.fields().integration_id == "int_metrics")
            .expect("orphaned webhook kept");
        assert_eq!(metrics_hook.fields().status, ToggleStatus::Disabled);

        let pay_hook = hooks
            .iter()
            .find(|hook| hook.fields().integration_id == "int_pay")
            .expect("unrelated webhook kept");
        assert_eq!(pay_hook.fields().status, ToggleStatus::Enabled);
    }
}
