//! Entity catalogue for the caregiver marketplace admin panel.

use serde::{Deserialize, Serialize};

use crate::controller::Draft;
use crate::domain::EntityKind;

/// Moderation lifecycle of a caregiver listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Awaiting moderation.
    #[default]
    Pending,
    /// Visible to seekers.
    Active,
    /// Hidden by the caregiver or by moderation.
    Paused,
}

impl ListingStatus {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

/// Progress of a seeker-caregiver match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    /// Proposed by the matcher, not yet actioned.
    #[default]
    Suggested,
    /// The seeker reached out.
    Contacted,
    /// An engagement was agreed.
    Hired,
    /// Either side declined.
    Declined,
}

impl MatchStage {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suggested => "suggested",
            Self::Contacted => "contacted",
            Self::Hired => "hired",
            Self::Declined => "declined",
        }
    }
}

/// Whether a conversation thread is still active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Messages still flowing.
    #[default]
    Open,
    /// Closed and read-only.
    Archived,
}

impl ConversationState {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Archived => "archived",
        }
    }
}

/// How urgently a trust-and-safety report needs attention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Routine.
    #[default]
    Low,
    /// Needs review this week.
    Medium,
    /// Needs review today.
    High,
}

impl Severity {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Resolution state of a trust-and-safety report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Awaiting a moderator.
    #[default]
    Open,
    /// Actioned and closed.
    Resolved,
    /// Closed without action.
    Dismissed,
}

impl ReportStatus {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }
}

/// Billing state of a subscriber account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In the free trial window.
    #[default]
    Trialing,
    /// Paying.
    Active,
    /// Ended by the subscriber.
    Cancelled,
}

impl SubscriptionStatus {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trialing => "trialing",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Whether a visibility boost is currently applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostStatus {
    /// Currently raising the listing's rank.
    #[default]
    Active,
    /// Suspended, weight retained.
    Paused,
}

impl BoostStatus {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

/// Delivery channel of an outreach campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Email blast.
    #[default]
    Email,
    /// Mobile push notification.
    Push,
    /// Text message.
    Sms,
}

impl Channel {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Push => "push",
            Self::Sms => "sms",
        }
    }
}

/// Lifecycle of an outreach campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    /// Being drafted.
    #[default]
    Draft,
    /// Sending.
    Running,
    /// Temporarily stopped.
    Paused,
    /// Fully delivered.
    Finished,
}

impl CampaignStatus {
    /// Wire value, as used in discrete filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

/// A caregiver's public listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Headline shown to seekers.
    pub title: String,
    /// City the caregiver serves.
    pub city: String,
    /// Hourly rate in minor currency units.
    pub rate_cents: u32,
    /// Skills the caregiver advertises.
    pub skills: Vec<String>,
    /// Moderation lifecycle state.
    pub status: ListingStatus,
}

impl EntityKind for Listing {
    const STORE_KEY: &'static str = "care_listings_v1";
    const ID_PREFIX: &'static str = "lst";
    const RESOURCE: &'static str = "listings";

    fn search_text(&self) -> Vec<String> {
        vec![self.title.clone(), self.city.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_owned()),
            "city" => Some(self.city.clone()),
            _ => None,
        }
    }
}

impl Draft for Listing {
    fn sanitised(mut self) -> Self {
        self.title = self.title.trim().to_owned();
        self.city = self.city.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.title.is_empty() && !self.city.is_empty()
    }
}

/// A proposed pairing of a seeker with a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Identifier of the matched listing.
    pub listing_id: String,
    /// Display name of the care seeker.
    pub seeker_name: String,
    /// Progress of the match.
    pub stage: MatchStage,
}

impl EntityKind for MatchRecord {
    const STORE_KEY: &'static str = "care_matches_v1";
    const ID_PREFIX: &'static str = "mat";
    const RESOURCE: &'static str = "matches";

    fn search_text(&self) -> Vec<String> {
        vec![self.seeker_name.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "stage" => Some(self.stage.as_str().to_owned()),
            "listingId" => Some(self.listing_id.clone()),
            _ => None,
        }
    }
}

impl Draft for MatchRecord {
    fn sanitised(mut self) -> Self {
        self.seeker_name = self.seeker_name.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.seeker_name.is_empty() && !self.listing_id.is_empty()
    }
}

/// A message thread between a seeker and a caregiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Display names of both participants.
    pub participants: Vec<String>,
    /// Preview of the most recent message.
    pub last_message: String,
    /// Whether the thread is open or archived.
    pub state: ConversationState,
}

impl EntityKind for Conversation {
    const STORE_KEY: &'static str = "care_conversations_v1";
    const ID_PREFIX: &'static str = "cnv";
    const RESOURCE: &'static str = "conversations";

    fn search_text(&self) -> Vec<String> {
        let mut haystacks = self.participants.clone();
        haystacks.push(self.last_message.clone());
        haystacks
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        (field == "state").then(|| self.state.as_str().to_owned())
    }
}

impl Draft for Conversation {
    fn is_submittable(&self) -> bool {
        self.participants.len() >= 2
    }
}

/// A trust-and-safety report filed against an account or listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Identifier of the reported account or listing.
    pub subject_id: String,
    /// Reporter's description of the problem.
    pub reason: String,
    /// Triage urgency.
    pub severity: Severity,
    /// Resolution state.
    pub status: ReportStatus,
}

impl EntityKind for Report {
    const STORE_KEY: &'static str = "care_reports_v1";
    const ID_PREFIX: &'static str = "rpt";
    const RESOURCE: &'static str = "reports";

    fn search_text(&self) -> Vec<String> {
        vec![self.reason.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "severity" => Some(self.severity.as_str().to_owned()),
            "status" => Some(self.status.as_str().to_owned()),
            _ => None,
        }
    }
}

impl Draft for Report {
    fn sanitised(mut self) -> Self {
        self.reason = self.reason.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.subject_id.is_empty() && !self.reason.is_empty()
    }
}

/// A subscriber account's billing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Display name of the subscribing account.
    pub account: String,
    /// Code of the purchased plan.
    pub plan_code: String,
    /// Billing state.
    pub status: SubscriptionStatus,
}

impl EntityKind for Subscription {
    const STORE_KEY: &'static str = "care_subscriptions_v1";
    const ID_PREFIX: &'static str = "sub";
    const RESOURCE: &'static str = "subscriptions";

    fn search_text(&self) -> Vec<String> {
        vec![self.account.clone(), self.plan_code.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        (field == "status").then(|| self.status.as_str().to_owned())
    }
}

impl Draft for Subscription {
    fn sanitised(mut self) -> Self {
        self.account = self.account.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.account.is_empty() && !self.plan_code.is_empty()
    }
}

/// A paid visibility boost applied to one listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boost {
    /// Identifier of the boosted listing.
    pub listing_id: String,
    /// Relative ranking weight.
    pub weight: u32,
    /// Whether the boost is applied.
    pub status: BoostStatus,
}

impl EntityKind for Boost {
    const STORE_KEY: &'static str = "care_boosts_v1";
    const ID_PREFIX: &'static str = "bst";
    const RESOURCE: &'static str = "boosts";

    fn search_text(&self) -> Vec<String> {
        vec![self.listing_id.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.as_str().to_owned()),
            "listingId" => Some(self.listing_id.clone()),
            _ => None,
        }
    }
}

impl Draft for Boost {
    fn is_submittable(&self) -> bool {
        !self.listing_id.is_empty() && self.weight > 0
    }
}

/// An outreach campaign to seekers or caregivers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Internal name.
    pub name: String,
    /// Delivery channel.
    pub channel: Channel,
    /// Lifecycle state.
    pub status: CampaignStatus,
}

impl EntityKind for Campaign {
    const STORE_KEY: &'static str = "care_campaigns_v1";
    const ID_PREFIX: &'static str = "cmp";
    const RESOURCE: &'static str = "campaigns";

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn discrete_field(&self, field: &str) -> Option<String> {
        match field {
            "channel" => Some(self.channel.as_str().to_owned()),
            "status" => Some(self.status.as_str().to_owned()),
            _ => None,
        }
    }
}

impl Draft for Campaign {
    fn sanitised(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A reusable message template for campaigns and support replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDoc {
    /// Internal name.
    pub name: String,
    /// Subject line.
    pub subject: String,
    /// Message body with placeholders.
    pub body: String,
}

impl EntityKind for TemplateDoc {
    const STORE_KEY: &'static str = "care_templates_v1";
    const ID_PREFIX: &'static str = "tpl";
    const RESOURCE: &'static str = "templates";

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.subject.clone()]
    }
}

impl Draft for TemplateDoc {
    fn sanitised(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.subject = self.subject.trim().to_owned();
        self
    }

    fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.body.is_empty()
    }
}
