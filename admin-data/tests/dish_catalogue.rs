//! End-to-end scenarios for the recipes catalogue in mock mode.

use std::sync::Arc;

use serde_json::json;

use admin_data::apps::RecipesAdmin;
use admin_data::apps::recipes::entities::{Dish, Localised, Tag};
use admin_data::controller::{Draft, DrawerForm};
use admin_data::domain::ListQuery;
use admin_data::outbound::local::MemoryStore;
use admin_data::service::ServiceFactory;
use admin_data::test_support::MutableClock;
use admin_data::{EntityId, Patch};
use pagination::PageRequest;

fn admin() -> RecipesAdmin {
    let factory = ServiceFactory::with_store(
        Arc::new(MemoryStore::new()),
        Arc::new(MutableClock::at_ms(1_700_000_000_000)),
        Some(17),
    );
    RecipesAdmin::new(&factory)
}

#[tokio::test]
async fn twelve_seeded_dishes_split_ten_and_two() {
    let admin = admin();

    let first = admin
        .dishes
        .list_page(&ListQuery::all(), PageRequest::new(1, 10))
        .await
        .expect("page resolves")
        .into_data()
        .expect("page present");
    assert_eq!(first.rows().len(), 10);
    assert_eq!(first.total(), 12);
    assert_eq!(first.pages(), 2);

    let second = admin
        .dishes
        .list_page(&ListQuery::all(), PageRequest::new(2, 10))
        .await
        .expect("page resolves")
        .into_data()
        .expect("page present");
    assert_eq!(second.rows().len(), 2);
    assert_eq!(second.total(), 12);
}

#[tokio::test]
async fn a_created_dish_keeps_its_patched_minutes_and_title() {
    let admin = admin();

    let mut form = DrawerForm::<Dish>::closed();
    form.open_create();
    if let Some(draft) = form.draft_mut() {
        draft.title = Localised::new("Tacos", "Tacos");
        draft.time_minutes = 20;
    }
    let submission = form.submit().expect("draft is submittable");

    let created = admin
        .dishes
        .create(submission.draft)
        .await
        .expect("create resolves")
        .into_data()
        .expect("created record returned");

    admin
        .dishes
        .update(created.id(), Patch::new().set("timeMinutes", json!(10)))
        .await
        .expect("update resolves");

    let fetched = admin
        .dishes
        .list(&ListQuery::all().with_text("tacos"))
        .await
        .expect("list resolves")
        .into_data()
        .expect("rows present");
    let dish = fetched.first().expect("the new dish matches its title");
    assert_eq!(dish.fields().title.en, "Tacos");
    assert_eq!(dish.fields().time_minutes, 10);
    assert!(dish.updated_at() >= dish.created_at());
}

#[tokio::test]
async fn deleting_an_unreferenced_tag_removes_it_from_lists() {
    let admin = admin();

    let before = admin
        .tags
        .list(&ListQuery::all())
        .await
        .expect("list resolves")
        .into_data()
        .expect("tags present");
    assert!(before.iter().any(|tag| tag.id().as_str() == "tag_offal"));

    let outcome = admin
        .tags
        .delete(&EntityId::new("tag_offal"))
        .await
        .expect("delete resolves");
    assert!(outcome.ok());

    let after = admin
        .tags
        .list(&ListQuery::all())
        .await
        .expect("list resolves")
        .into_data()
        .expect("tags present");
    assert!(after.iter().all(|tag| tag.id().as_str() != "tag_offal"));

    // Deleting again is still ok: the operation is idempotent.
    let again = admin
        .tags
        .delete(&EntityId::new("tag_offal"))
        .await
        .expect("delete resolves");
    assert!(again.ok());
}

#[tokio::test]
async fn discrete_filters_and_search_compose() {
    let admin = admin();

    let spicy_published = admin
        .dishes
        .list(
            &ListQuery::all()
                .with_text("laksa")
                .with_filter("status", "published")
                .with_filter("difficulty", "hard"),
        )
        .await
        .expect("list resolves")
        .into_data()
        .expect("rows present");

    assert_eq!(spicy_published.len(), 1);
    assert_eq!(
        spicy_published
            .first()
            .map(|dish| dish.fields().title.en.as_str()),
        Some("Laksa")
    );
}

#[tokio::test]
async fn a_blank_tag_draft_never_reaches_the_service() {
    let mut form = DrawerForm::<Tag>::closed();
    form.open_create();
    if let Some(draft) = form.draft_mut() {
        draft.name = "   ".to_owned();
    }

    assert!(form.submit().is_none());
    assert!(!Tag::default().is_submittable());
}
