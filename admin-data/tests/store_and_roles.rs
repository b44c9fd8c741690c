//! Role fallback reassignment and JSON-file persistence across restarts.

use std::sync::Arc;

use admin_data::apps::RecipesAdmin;
use admin_data::apps::recipes::FALLBACK_ROLE_ID;
use admin_data::apps::recipes::entities::Tag;
use admin_data::domain::ListQuery;
use admin_data::service::ServiceFactory;
use admin_data::test_support::MutableClock;
use admin_data::{EntityId, ServiceConfig};

fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::at_ms(1_700_000_000_000))
}

#[tokio::test]
async fn deleting_a_referenced_role_reassigns_its_users() {
    let config = ServiceConfig::mock().with_rng_seed(23);
    let factory = ServiceFactory::from_config(&config, clock()).expect("factory builds");
    let admin = RecipesAdmin::new(&factory);

    let outcome = admin
        .delete_role(&EntityId::new("role_editor"))
        .await
        .expect("delete resolves");
    assert!(outcome.ok());

    let users = admin
        .users
        .list(&ListQuery::all())
        .await
        .expect("list resolves")
        .into_data()
        .expect("users present");
    assert!(
        users
            .iter()
            .all(|user| user.fields().role_id != "role_editor"),
        "no user still references the deleted role"
    );
    assert_eq!(
        users
            .iter()
            .filter(|user| user.fields().role_id == FALLBACK_ROLE_ID)
            .count(),
        3
    );
}

#[tokio::test]
async fn mock_data_survives_a_restart_when_a_data_dir_is_set() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = ServiceConfig::mock()
        .with_data_dir(dir.path().to_path_buf())
        .with_rng_seed(29);

    let created_id = {
        let factory = ServiceFactory::from_config(&config, clock()).expect("factory builds");
        let admin = RecipesAdmin::new(&factory);
        let created = admin
            .tags
            .create(Tag {
                name: "Fermented".to_owned(),
                slug: "fermented".to_owned(),
            })
            .await
            .expect("create resolves")
            .into_data()
            .expect("created record returned");
        created.id().clone()
    };

    // A fresh factory over the same directory sees the persisted write and
    // does not re-seed over it.
    let factory = ServiceFactory::from_config(&config, clock()).expect("factory builds");
    let admin = RecipesAdmin::new(&factory);
    let tags = admin
        .tags
        .list(&ListQuery::all())
        .await
        .expect("list resolves")
        .into_data()
        .expect("tags present");

    assert!(tags.iter().any(|tag| tag.id() == &created_id));
    assert_eq!(
        tags.first().map(|tag| tag.fields().name.as_str()),
        Some("Fermented"),
        "creates prepend and the order survives the restart"
    );
}
