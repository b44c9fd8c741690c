//! Entity catalogue for the recipe/discovery admin panel.
//!
//! Each entity is a camelCase serde struct of its domain fields plus an
//! [`EntityKind`] binding (versioned store key, id prefix, REST resource,
//! search haystacks, discrete filter fields) and a [`Draft`] impl gating the
//! drawer form's required fields.

use serde::{Deserialize, Serialize};

use crate::controller::Draft;
use crate::domain::EntityKind;

/// A string localised into the app's two display languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localised {
    /// English text.
    pub en: String,
    /// Spanish text.
    pub es: String,
}

impl Localised {
    /// Build from both translations.
    pub fn new(en: impl Into<String>, es: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            es: es.into(),
        }
    }
}

/// Account standing of an admin-panel user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Able to sign in.
    #[default]
    Active,
    /// Locked out pending review.
    Suspended,
}

impl UserStatus {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

/// Editorial lifecycle of published content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    /// Not yet visible to the apps.
    #[default]
    Draft,
    /// Live.
    Published,
    /// Withdrawn but kept for reference.
    Archived,
}

impl PublishStatus {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

/// How demanding a dish is to prepare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Weeknight-friendly.
    #[default]
    Easy,
    /// Some technique required.
    Medium,
    /// A project.
    Hard,
}

impl Difficulty {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// On/off state for integrations, webhooks, plans, and coupons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleStatus {
    /// In service.
    #[default]
    Enabled,
    /// Switched off; kept for re-enabling.
    Disabled,
}

impl ToggleStatus {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

/// Billing cadence of a subscription plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    /// Billed every month.
    #[default]
    Monthly,
    /// Billed every year.
    Yearly,
}

/// A named permission set assignable to users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Display name.
    pub name: String,
    /// Permission identifiers the role grants.
    pub permissions: Vec<String>,
}

impl EntityKind for Role {
    const STORE_KEY: &'static str = "admin_roles_v1";
    const ID_PREFIX: &'static str = "rol";
    const RESOURCE: &'static str = "roles";

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl Draft for Role {
    fn sanitised(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// An admin-panel operator account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Display name.
    pub name: String,
    /// Sign-in email address.
    pub email: String,
    /// Account standing.
    pub status: UserStatus,
    /// Identifier of the role granting this user's permissions.
    pub role_id: String,
}

impl EntityKind for User {
    const STORE_KEY: &'static str = "admin_users_v1";
    const ID_PREFIX: &'static str = "usr";
    const RESOURCE: &'static str = "users";

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_owned()),
            "roleId" => Some(self.role_id.clone()),
            _ => None,
        }
    }
}

impl Draft for User {
    fn sanitised(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.email = self.email.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}

/// A dish in the discovery catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Localised display title.
    pub title: Localised,
    /// Preparation time in minutes.
    pub time_minutes: u32,
    /// Preparation difficulty.
    pub difficulty: Difficulty,
    /// Identifiers of the tags describing this dish.
    pub tag_ids: Vec<String>,
    /// Editorial lifecycle state.
    pub status: PublishStatus,
}

impl EntityKind for Dish {
    const STORE_KEY: &'static str = "admin_dishes_v1";
    const ID_PREFIX: &'static str = "dsh";
    const RESOURCE: &'static str = "dishes";

    fn search_text(&self) -> Vec<String> {
        vec![self.title.en.clone(), self.title.es.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_owned()),
            "difficulty" => Some(self.difficulty.as_str().to_owned()),
            _ => None,
        }
    }
}

impl Draft for Dish {
    fn sanitised(mut self) -> Self {
        self.title.en = self.title.en.trim().to_owned();
        self.title.es = self.title.es.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.title.en.is_empty()
    }
}

/// A reusable label attached to dishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Display name.
    pub name: String,
    /// URL-safe identifier shown in the apps.
    pub slug: String,
}

impl EntityKind for Tag {
    const STORE_KEY: &'static str = "admin_tags_v1";
    const ID_PREFIX: &'static str = "tag";
    const RESOURCE: &'static str = "tags";

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.slug.clone()]
    }
}

impl Draft for Tag {
    fn sanitised(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.slug = self.slug.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A canned text snippet the discovery app surfaces to end users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    /// Short label shown in the panel's list.
    pub label: String,
    /// The full prompt text.
    pub text: String,
    /// Grouping category.
    pub category: String,
}

impl EntityKind for Prompt {
    const STORE_KEY: &'static str = "admin_prompts_v1";
    const ID_PREFIX: &'static str = "prm";
    const RESOURCE: &'static str = "prompts";

    fn search_text(&self) -> Vec<String> {
        vec![self.label.clone(), self.text.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        (field == "category").then(|| self.category.clone())
    }
}

impl Draft for Prompt {
    fn sanitised(mut self) -> Self {
        self.label = self.label.trim().to_owned();
        self.text = self.text.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.label.is_empty() && !self.text.is_empty()
    }
}

/// A full recipe write-up for one dish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Display title.
    pub title: String,
    /// Identifier of the dish this recipe prepares.
    pub dish_id: String,
    /// Portions the ingredient list yields.
    pub servings: u32,
    /// Ordered preparation steps.
    pub steps: Vec<String>,
    /// Editorial lifecycle state.
    pub status: PublishStatus,
}

impl EntityKind for Recipe {
    const STORE_KEY: &'static str = "admin_recipes_v1";
    const ID_PREFIX: &'static str = "rcp";
    const RESOURCE: &'static str = "recipes";

    fn search_text(&self) -> Vec<String> {
        vec![self.title.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_owned()),
            "dishId" => Some(self.dish_id.clone()),
            _ => None,
        }
    }
}

impl Draft for Recipe {
    fn sanitised(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.title.is_empty()
    }
}

/// A curated collection of dishes surfaced together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Display name.
    pub name: String,
    /// Identifiers of the dishes the preset contains.
    pub dish_ids: Vec<String>,
}

impl EntityKind for Preset {
    const STORE_KEY: &'static str = "admin_presets_v1";
    const ID_PREFIX: &'static str = "pre";
    const RESOURCE: &'static str = "presets";

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl Draft for Preset {
    fn sanitised(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A connection to an external provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    /// Display name.
    pub name: String,
    /// Provider kind, e.g. `analytics` or `payments`.
    pub kind: String,
    /// Whether the connection is live.
    pub status: ToggleStatus,
}

impl EntityKind for Integration {
    const STORE_KEY: &'static str = "admin_integrations_v1";
    const ID_PREFIX: &'static str = "int";
    const RESOURCE: &'static str = "integrations";

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_owned()),
            "kind" => Some(self.kind.clone()),
            _ => None,
        }
    }
}

impl Draft for Integration {
    fn sanitised(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.kind = self.kind.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// An outbound event subscription belonging to an integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Delivery endpoint.
    pub url: String,
    /// Event name the webhook fires on.
    pub event: String,
    /// Identifier of the owning integration.
    pub integration_id: String,
    /// Whether deliveries are active.
    pub status: ToggleStatus,
}

impl EntityKind for Webhook {
    const STORE_KEY: &'static str = "admin_webhooks_v1";
    const ID_PREFIX: &'static str = "whk";
    const RESOURCE: &'static str = "webhooks";

    fn search_text(&self) -> Vec<String> {
        vec![self.url.clone(), self.event.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_owned()),
            "integrationId" => Some(self.integration_id.clone()),
            _ => None,
        }
    }
}

impl Draft for Webhook {
    fn sanitised(mut self) -> Self {
        self.url = self.url.trim().to_owned();
        self.event = self.event.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.url.is_empty() && !self.event.is_empty()
    }
}

/// A purchasable subscription plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Display name.
    pub name: String,
    /// Price per interval, in minor currency units.
    pub price_cents: u32,
    /// Billing cadence.
    pub interval: BillingInterval,
    /// Whether the plan is on sale.
    pub status: ToggleStatus,
}

impl EntityKind for Plan {
    const STORE_KEY: &'static str = "admin_plans_v1";
    const ID_PREFIX: &'static str = "pln";
    const RESOURCE: &'static str = "plans";

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        (field == "status").then(|| self.status.as_str().to_owned())
    }
}

impl Draft for Plan {
    fn sanitised(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A discount code redeemable at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Redemption code.
    pub code: String,
    /// Discount as a whole-number percentage.
    pub percent_off: u32,
    /// Whether the code is redeemable.
    pub status: ToggleStatus,
}

impl EntityKind for Coupon {
    const STORE_KEY: &'static str = "admin_coupons_v1";
    const ID_PREFIX: &'static str = "cpn";
    const RESOURCE: &'static str = "coupons";

    fn search_text(&self) -> Vec<String> {
        vec![self.code.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        (field == "status").then(|| self.status.as_str().to_owned())
    }
}

impl Draft for Coupon {
    fn sanitised(mut self) -> Self {
        self.code = self.code.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.code.is_empty()
    }
}
