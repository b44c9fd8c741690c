//! Deterministic seed data for the care admin collections.

use crate::domain::{EntityId, Stamped};

use super::entities::{
    Boost, BoostStatus, Campaign, CampaignStatus, Channel, Conversation, ConversationState,
    Listing, ListingStatus, MatchRecord, MatchStage, Report, ReportStatus, Severity, Subscription,
    SubscriptionStatus, TemplateDoc,
};

const BASE_MS: i64 = 1_693_000_000_000;

fn stamped<E>(id: &str, offset_hours: i64, fields: E) -> Stamped<E> {
    Stamped::new(EntityId::new(id), BASE_MS + offset_hours * 3_600_000, fields)
}

/// Seed caregiver listings.
#[must_use]
pub fn listings() -> Vec<Stamped<Listing>> {
    let listing = |title: &str, city: &str, rate_cents, skills: &[&str], status| Listing {
        title: title.to_owned(),
        city: city.to_owned(),
        rate_cents,
        skills: skills.iter().map(|&s| s.to_owned()).collect(),
        status,
    };
    vec![
        stamped(
            "lst_night_nurse",
            4,
            listing(
                "Overnight dementia care",
                "Leeds",
                2_400,
                &["dementia care", "medication"],
                ListingStatus::Active,
            ),
        ),
        stamped(
            "lst_weekend_companion",
            3,
            listing(
                "Weekend companionship",
                "York",
                1_600,
                &["companionship", "mobility"],
                ListingStatus::Active,
            ),
        ),
        stamped(
            "lst_live_in",
            2,
            listing(
                "Live-in carer",
                "Leeds",
                2_900,
                &["live-in", "cooking"],
                ListingStatus::Pending,
            ),
        ),
        stamped(
            "lst_respite",
            1,
            listing(
                "Respite cover",
                "Sheffield",
                2_000,
                &["respite", "personal care"],
                ListingStatus::Paused,
            ),
        ),
        stamped(
            "lst_postnatal",
            0,
            listing(
                "Postnatal support",
                "Leeds",
                2_200,
                &["newborn care"],
                ListingStatus::Active,
            ),
        ),
    ]
}

/// Seed matches referencing the seed listings.
#[must_use]
pub fn matches() -> Vec<Stamped<MatchRecord>> {
    let record = |listing_id: &str, seeker_name: &str, stage| MatchRecord {
        listing_id: listing_id.to_owned(),
        seeker_name: seeker_name.to_owned(),
        stage,
    };
    vec![
        stamped(
            "mat_priya_night",
            3,
            record("lst_night_nurse", "Priya Shah", MatchStage::Hired),
        ),
        stamped(
            "mat_tom_weekend",
            2,
            record("lst_weekend_companion", "Tom Hale", MatchStage::Contacted),
        ),
        stamped(
            "mat_ines_live_in",
            1,
            record("lst_live_in", "Inés Prado", MatchStage::Suggested),
        ),
        stamped(
            "mat_omar_respite",
            0,
            record("lst_respite", "Omar Aziz", MatchStage::Declined),
        ),
    ]
}

/// Seed conversation threads.
#[must_use]
pub fn conversations() -> Vec<Stamped<Conversation>> {
    vec![
        stamped(
            "cnv_priya",
            2,
            Conversation {
                participants: vec!["Priya Shah".to_owned(), "Grace N.".to_owned()],
                last_message: "See you Thursday at eight.".to_owned(),
                state: ConversationState::Open,
            },
        ),
        stamped(
            "cnv_tom",
            1,
            Conversation {
                participants: vec!["Tom Hale".to_owned(), "Marta K.".to_owned()],
                last_message: "Could you share references?".to_owned(),
                state: ConversationState::Open,
            },
        ),
        stamped(
            "cnv_closed",
            0,
            Conversation {
                participants: vec!["Omar Aziz".to_owned(), "Lena B.".to_owned()],
                last_message: "Thanks anyway.".to_owned(),
                state: ConversationState::Archived,
            },
        ),
    ]
}

/// Seed trust-and-safety reports.
#[must_use]
pub fn reports() -> Vec<Stamped<Report>> {
    vec![
        stamped(
            "rpt_no_show",
            2,
            Report {
                subject_id: "lst_respite".to_owned(),
                reason: "Carer did not arrive for a booked visit.".to_owned(),
                severity: Severity::High,
                status: ReportStatus::Open,
            },
        ),
        stamped(
            "rpt_photo",
            1,
            Report {
                subject_id: "lst_live_in".to_owned(),
                reason: "Profile photo looks like a stock image.".to_owned(),
                severity: Severity::Low,
                status: ReportStatus::Resolved,
            },
        ),
        stamped(
            "rpt_spam",
            0,
            Report {
                subject_id: "cnv_tom".to_owned(),
                reason: "Repeated off-platform payment requests.".to_owned(),
                severity: Severity::Medium,
                status: ReportStatus::Open,
            },
        ),
    ]
}

/// Seed subscriber billing records.
#[must_use]
pub fn subscriptions() -> Vec<Stamped<Subscription>> {
    vec![
        stamped(
            "sub_grace",
            1,
            Subscription {
                account: "Grace N.".to_owned(),
                plan_code: "carer_pro".to_owned(),
                status: SubscriptionStatus::Active,
            },
        ),
        stamped(
            "sub_marta",
            0,
            Subscription {
                account: "Marta K.".to_owned(),
                plan_code: "carer_starter".to_owned(),
                status: SubscriptionStatus::Trialing,
            },
        ),
    ]
}

/// Seed visibility boosts.
#[must_use]
pub fn boosts() -> Vec<Stamped<Boost>> {
    vec![
        stamped(
            "bst_night_nurse",
            1,
            Boost {
                listing_id: "lst_night_nurse".to_owned(),
                weight: 3,
                status: BoostStatus::Active,
            },
        ),
        stamped(
            "bst_postnatal",
            0,
            Boost {
                listing_id: "lst_postnatal".to_owned(),
                weight: 1,
                status: BoostStatus::Active,
            },
        ),
    ]
}

/// Seed outreach campaigns.
#[must_use]
pub fn campaigns() -> Vec<Stamped<Campaign>> {
    vec![
        stamped(
            "cmp_reactivation",
            2,
            Campaign {
                name: "Lapsed seeker reactivation".to_owned(),
                channel: Channel::Email,
                status: CampaignStatus::Running,
            },
        ),
        stamped(
            "cmp_weekend_push",
            1,
            Campaign {
                name: "Weekend availability push".to_owned(),
                channel: Channel::Push,
                status: CampaignStatus::Paused,
            },
        ),
        stamped(
            "cmp_welcome",
            0,
            Campaign {
                name: "New caregiver welcome".to_owned(),
                channel: Channel::Email,
                status: CampaignStatus::Finished,
            },
        ),
    ]
}

/// Seed message templates.
#[must_use]
pub fn templates() -> Vec<Stamped<TemplateDoc>> {
    vec![
        stamped(
            "tpl_welcome",
            1,
            TemplateDoc {
                name: "Caregiver welcome".to_owned(),
                subject: "Welcome to the marketplace".to_owned(),
                body: "Hi {{name}}, your profile is live.".to_owned(),
            },
        ),
        stamped(
            "tpl_report_ack",
            0,
            TemplateDoc {
                name: "Report acknowledgement".to_owned(),
                subject: "We received your report".to_owned(),
                body: "Thanks {{name}}, our team is reviewing it.".to_owned(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_match_references_a_seed_listing() {
        let listing_ids: Vec<String> = listings()
            .iter()
            .map(|listing| listing.id().as_str().to_owned())
            .collect();

        assert!(
            matches()
                .iter()
                .all(|record| listing_ids.contains(&record.fields().listing_id))
        );
    }

    #[test]
    fn seed_records_are_newest_first() {
        let stamps: Vec<i64> = listings().iter().map(|l| l.created_at()).collect();
        let mut sorted = stamps.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        assert_eq!(stamps, sorted);
    }
}
