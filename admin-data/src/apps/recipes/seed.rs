//! Deterministic seed data for the recipes admin collections.
//!
//! Mock mode writes these into the store on first access. Stamps are fixed
//! so seeded collections serialise identically run to run; records are
//! newest-first, matching the prepend-on-create ordering.

use crate::domain::{EntityId, Stamped};

use super::entities::{
    BillingInterval, Coupon, Difficulty, Dish, Integration, Localised, Plan, Preset, Prompt,
    PublishStatus, Recipe, Role, Tag, ToggleStatus, User, UserStatus, Webhook,
};

/// Identifier of the role users fall back to when theirs is deleted.
pub const FALLBACK_ROLE_ID: &str = "role_viewer";

const BASE_MS: i64 = 1_690_000_000_000;

fn stamped<E>(id: &str, offset_hours: i64, fields: E) -> Stamped<E> {
    Stamped::new(EntityId::new(id), BASE_MS + offset_hours * 3_600_000, fields)
}

/// Seed roles; the fallback role is always present.
#[must_use]
pub fn roles() -> Vec<Stamped<Role>> {
    vec![
        stamped(
            "role_admin",
            2,
            Role {
                name: "Administrator".to_owned(),
                permissions: vec!["content.write".to_owned(), "billing.manage".to_owned()],
            },
        ),
        stamped(
            "role_editor",
            1,
            Role {
                name: "Editor".to_owned(),
                permissions: vec!["content.write".to_owned()],
            },
        ),
        stamped(
            FALLBACK_ROLE_ID,
            0,
            Role {
                name: "Viewer".to_owned(),
                permissions: vec!["content.read".to_owned()],
            },
        ),
    ]
}

/// Seed operator accounts, spread across the seed roles.
#[must_use]
pub fn users() -> Vec<Stamped<User>> {
    let user = |name: &str, email: &str, status, role_id: &str| User {
        name: name.to_owned(),
        email: email.to_owned(),
        status,
        role_id: role_id.to_owned(),
    };
    vec![
        stamped(
            "usr_ana",
            3,
            user("Ana Torres", "ana@example.com", UserStatus::Active, "role_admin"),
        ),
        stamped(
            "usr_ben",
            2,
            user("Ben Castle", "ben@example.com", UserStatus::Active, "role_editor"),
        ),
        stamped(
            "usr_cleo",
            1,
            user("Cleo Marsh", "cleo@example.com", UserStatus::Suspended, "role_editor"),
        ),
        stamped(
            "usr_dev",
            0,
            user("Devi Rao", "devi@example.com", UserStatus::Active, FALLBACK_ROLE_ID),
        ),
    ]
}

/// Seed tags; `tag_offal` is referenced by no seed dish.
#[must_use]
pub fn tags() -> Vec<Stamped<Tag>> {
    let tag = |name: &str, slug: &str| Tag {
        name: name.to_owned(),
        slug: slug.to_owned(),
    };
    vec![
        stamped("tag_spicy", 3, tag("Spicy", "spicy")),
        stamped("tag_vegetarian", 2, tag("Vegetarian", "vegetarian")),
        stamped("tag_street_food", 1, tag("Street food", "street-food")),
        stamped("tag_offal", 0, tag("Offal", "offal")),
    ]
}

/// Seed dishes: exactly twelve, so the default page size of ten splits
/// them ten-and-two.
#[must_use]
pub fn dishes() -> Vec<Stamped<Dish>> {
    let dish = |en: &str, es: &str, minutes, difficulty, tag_ids: &[&str], status| Dish {
        title: Localised::new(en, es),
        time_minutes: minutes,
        difficulty,
        tag_ids: tag_ids.iter().map(|&t| t.to_owned()).collect(),
        status,
    };
    vec![
        stamped(
            "dsh_arepas",
            11,
            dish(
                "Arepas",
                "Arepas",
                30,
                Difficulty::Easy,
                &["tag_street_food"],
                PublishStatus::Published,
            ),
        ),
        stamped(
            "dsh_bibimbap",
            10,
            dish(
                "Bibimbap",
                "Bibimbap",
                45,
                Difficulty::Medium,
                &["tag_spicy"],
                PublishStatus::Published,
            ),
        ),
        stamped(
            "dsh_chilaquiles",
            9,
            dish(
                "Chilaquiles",
                "Chilaquiles",
                25,
                Difficulty::Easy,
                &["tag_spicy", "tag_street_food"],
                PublishStatus::Published,
            ),
        ),
        stamped(
            "dsh_dal",
            8,
            dish(
                "Dal Tadka",
                "Dal tadka",
                40,
                Difficulty::Easy,
                &["tag_vegetarian", "tag_spicy"],
                PublishStatus::Published,
            ),
        ),
        stamped(
            "dsh_empanadas",
            7,
            dish(
                "Empanadas",
                "Empanadas",
                60,
                Difficulty::Medium,
                &["tag_street_food"],
                PublishStatus::Draft,
            ),
        ),
        stamped(
            "dsh_falafel",
            6,
            dish(
                "Falafel",
                "Falafel",
                50,
                Difficulty::Medium,
                &["tag_vegetarian", "tag_street_food"],
                PublishStatus::Published,
            ),
        ),
        stamped(
            "dsh_gazpacho",
            5,
            dish(
                "Gazpacho",
                "Gazpacho",
                15,
                Difficulty::Easy,
                &["tag_vegetarian"],
                PublishStatus::Published,
            ),
        ),
        stamped(
            "dsh_harira",
            4,
            dish(
                "Harira",
                "Harira",
                70,
                Difficulty::Medium,
                &["tag_vegetarian"],
                PublishStatus::Draft,
            ),
        ),
        stamped(
            "dsh_izakaya",
            3,
            dish(
                "Izakaya Wings",
                "Alitas izakaya",
                35,
                Difficulty::Medium,
                &["tag_spicy"],
                PublishStatus::Published,
            ),
        ),
        stamped(
            "dsh_jollof",
            2,
            dish(
                "Jollof Rice",
                "Arroz jollof",
                55,
                Difficulty::Medium,
                &["tag_spicy"],
                PublishStatus::Published,
            ),
        ),
        stamped(
            "dsh_katsu",
            1,
            dish(
                "Katsu Curry",
                "Curry katsu",
                45,
                Difficulty::Hard,
                &[],
                PublishStatus::Archived,
            ),
        ),
        stamped(
            "dsh_laksa",
            0,
            dish(
                "Laksa",
                "Laksa",
                65,
                Difficulty::Hard,
                &["tag_spicy"],
                PublishStatus::Published,
            ),
        ),
    ]
}

/// Seed discovery prompts.
#[must_use]
pub fn prompts() -> Vec<Stamped<Prompt>> {
    vec![
        stamped(
            "prm_tonight",
            1,
            Prompt {
                label: "Tonight's pick".to_owned(),
                text: "What should I cook tonight with what's in my fridge?".to_owned(),
                category: "weeknight".to_owned(),
            },
        ),
        stamped(
            "prm_guests",
            0,
            Prompt {
                label: "Impress guests".to_owned(),
                text: "Suggest a three-course menu for four guests.".to_owned(),
                category: "entertaining".to_owned(),
            },
        ),
    ]
}

/// Seed recipe write-ups.
#[must_use]
pub fn recipes() -> Vec<Stamped<Recipe>> {
    vec![
        stamped(
            "rcp_falafel_classic",
            2,
            Recipe {
                title: "Classic falafel".to_owned(),
                dish_id: "dsh_falafel".to_owned(),
                servings: 4,
                steps: vec![
                    "Soak the chickpeas overnight.".to_owned(),
                    "Blend with herbs and spices.".to_owned(),
                    "Shape and fry until deep brown.".to_owned(),
                ],
                status: PublishStatus::Published,
            },
        ),
        stamped(
            "rcp_gazpacho_quick",
            1,
            Recipe {
                title: "Ten-minute gazpacho".to_owned(),
                dish_id: "dsh_gazpacho".to_owned(),
                servings: 2,
                steps: vec![
                    "Blend tomatoes, cucumber, and pepper.".to_owned(),
                    "Season and chill.".to_owned(),
                ],
                status: PublishStatus::Published,
            },
        ),
        stamped(
            "rcp_laksa_weekend",
            0,
            Recipe {
                title: "Weekend laksa".to_owned(),
                dish_id: "dsh_laksa".to_owned(),
                servings: 4,
                steps: vec![
                    "Make the spice paste from scratch.".to_owned(),
                    "Simmer with coconut milk.".to_owned(),
                    "Assemble over noodles.".to_owned(),
                ],
                status: PublishStatus::Draft,
            },
        ),
    ]
}

/// Seed curated presets.
#[must_use]
pub fn presets() -> Vec<Stamped<Preset>> {
    vec![
        stamped(
            "pre_meatless",
            1,
            Preset {
                name: "Meatless week".to_owned(),
                dish_ids: vec![
                    "dsh_dal".to_owned(),
                    "dsh_falafel".to_owned(),
                    "dsh_gazpacho".to_owned(),
                ],
            },
        ),
        stamped(
            "pre_heat",
            0,
            Preset {
                name: "Bring the heat".to_owned(),
                dish_ids: vec!["dsh_bibimbap".to_owned(), "dsh_laksa".to_owned()],
            },
        ),
    ]
}

/// Seed provider integrations.
#[must_use]
pub fn integrations() -> Vec<Stamped<Integration>> {
    vec![
        stamped(
            "int_metrics",
            1,
            Integration {
                name: "Metrics Hub".to_owned(),
                kind: "analytics".to_owned(),
                status: ToggleStatus::Enabled,
            },
        ),
        stamped(
            "int_pay",
            0,
            Integration {
                name: "PayGate".to_owned(),
                kind: "payments".to_owned(),
                status: ToggleStatus::Enabled,
            },
        ),
    ]
}

/// Seed webhooks, one per seed integration.
#[must_use]
pub fn webhooks() -> Vec<Stamped<Webhook>> {
    vec![
        stamped(
            "whk_dish_published",
            1,
            Webhook {
                url: "https://hooks.example.com/metrics".to_owned(),
                event: "dish.published".to_owned(),
                integration_id: "int_metrics".to_owned(),
                status: ToggleStatus::Enabled,
            },
        ),
        stamped(
            "whk_payment_settled",
            0,
            Webhook {
                url: "https://hooks.example.com/payments".to_owned(),
                event: "payment.settled".to_owned(),
                integration_id: "int_pay".to_owned(),
                status: ToggleStatus::Enabled,
            },
        ),
    ]
}

/// Seed subscription plans.
#[must_use]
pub fn plans() -> Vec<Stamped<Plan>> {
    vec![
        stamped(
            "pln_monthly",
            1,
            Plan {
                name: "Home cook".to_owned(),
                price_cents: 499,
                interval: BillingInterval::Monthly,
                status: ToggleStatus::Enabled,
            },
        ),
        stamped(
            "pln_yearly",
            0,
            Plan {
                name: "Home cook (annual)".to_owned(),
                price_cents: 4_990,
                interval: BillingInterval::Yearly,
                status: ToggleStatus::Enabled,
            },
        ),
    ]
}

/// Seed discount coupons.
#[must_use]
pub fn coupons() -> Vec<Stamped<Coupon>> {
    vec![
        stamped(
            "cpn_welcome",
            1,
            Coupon {
                code: "WELCOME20".to_owned(),
                percent_off: 20,
                status: ToggleStatus::Enabled,
            },
        ),
        stamped(
            "cpn_retired",
            0,
            Coupon {
                code: "LAUNCH50".to_owned(),
                percent_off: 50,
                status: ToggleStatus::Disabled,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_twelve_dishes_are_seeded() {
        assert_eq!(dishes().len(), 12);
    }

    #[test]
    fn the_fallback_role_is_seeded() {
        assert!(
            roles()
                .iter()
                .any(|role| role.id().as_str() == FALLBACK_ROLE_ID)
        );
    }

    #[test]
    fn one_seed_tag_is_unreferenced_by_dishes() {
        let referenced: Vec<String> = dishes()
            .iter()
            .flat_map(|dish| dish.fields().tag_ids.clone())
            .collect();

        assert!(!referenced.contains(&"tag_offal".to_owned()));
        assert!(referenced.contains(&"tag_spicy".to_owned()));
    }

    #[test]
    fn seed_records_are_newest_first() {
        let stamps: Vec<i64> = dishes().iter().map(|dish| dish.created_at()).collect();
        let mut sorted = stamps.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        assert_eq!(stamps, sorted);
    }
}
