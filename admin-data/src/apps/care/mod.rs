//! Service bundle for the caregiver marketplace admin panel.

pub mod entities;
pub mod seed;

use std::sync::Arc;

use mockable::DefaultClock;
use serde_json::json;

use crate::config::ServiceConfig;
use crate::domain::ports::EntityService;
use crate::domain::{EntityId, Envelope, Patch, ServiceError};
use crate::service::ServiceFactory;

use self::entities::{
    Boost, Campaign, Conversation, Listing, MatchRecord, Report, Subscription, TemplateDoc,
};

/// Every data service the care panel's pages consume.
pub struct CareAdmin {
    /// Caregiver listings (paginated).
    pub listings: Arc<dyn EntityService<Listing>>,
    /// Seeker-caregiver matches (paginated).
    pub matches: Arc<dyn EntityService<MatchRecord>>,
    /// Message threads (paginated).
    pub conversations: Arc<dyn EntityService<Conversation>>,
    /// Trust-and-safety reports (paginated).
    pub reports: Arc<dyn EntityService<Report>>,
    /// Subscriber billing records.
    pub subscriptions: Arc<dyn EntityService<Subscription>>,
    /// Listing visibility boosts.
    pub boosts: Arc<dyn EntityService<Boost>>,
    /// Outreach campaigns (paginated).
    pub campaigns: Arc<dyn EntityService<Campaign>>,
    /// Message templates.
    pub templates: Arc<dyn EntityService<TemplateDoc>>,
}

impl CareAdmin {
    /// Build every entity service from one factory, seeding mock
    /// collections on first access.
    #[must_use]
    pub fn new(factory: &ServiceFactory) -> Self {
        Self {
            listings: factory.build(seed::listings()),
            matches: factory.build(seed::matches()),
            conversations: factory.build(seed::conversations()),
            reports: factory.build(seed::reports()),
            subscriptions: factory.build(seed::subscriptions()),
            boosts: factory.build(seed::boosts()),
            campaigns: factory.build(seed::campaigns()),
            templates: factory.build(seed::templates()),
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

    /// Delete a listing, first pausing every boost still attached to it.
    ///
    /// # Errors
    ///
    /// Propagates service failures from either the pausing or the delete.
    pub async fn delete_listing(&self, id: &EntityId) -> Result<Envelope<()>, ServiceError> {
        self.boosts
            .update_matching("listingId", id.as_str(), Patch::new().set("status", json!("paused")))
            .await?;
        self.listings.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListQuery;
    use crate::outbound::local::MemoryStore;
    use crate::test_support::MutableClock;

    use super::entities::BoostStatus;

    fn bundle() -> CareAdmin {
        let factory = ServiceFactory::with_store(
            Arc::new(MemoryStore::new()),
            Arc::new(MutableClock::at_ms(1_700_000_000_000)),
            Some(13),
        );
        CareAdmin::new(&factory)
    }

    #[tokio::test]
    async fn deleting_a_listing_pauses_its_boosts() {
        let admin = bundle();

        admin
            .delete_listing(&EntityId::new("lst_night_nurse"))
            .await
            .expect("delete resolves");

        let boosts = admin
            .boosts
            .list(&ListQuery::all())
            .await
            .expect("list resolves")
            .into_data()
            .expect("boosts listed");
        let paused = boosts
            .iter()
            .find(|boost| boost.fields().listing_id == "lst_night_nurse")
            .expect("orphaned boost kept");
        assert_eq!(paused.fields().status, BoostStatus::Paused);

        let untouched = boosts
            .iter()
            .find(|boost| boost.fields().listing_id == "lst_postnatal")
            .expect("unrelated boost kept");
        assert_eq!(untouched.fields().status, BoostStatus::Active);
    }

    #[tokio::test]
    async fn seeded_listings_filter_by_city() {
        let admin = bundle();

        let leeds = admin
            .listings
            .list(&ListQuery::all().with_filter("city", "Leeds"))
            .await
            .expect("list resolves")
            .into_data()
            .expect("listings listed");

        assert_eq!(leeds.len(), 3);
    }
}
