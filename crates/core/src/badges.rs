//! Joins earned badges with their progress records into display entries.
//!
//! Both inputs are read-only views fetched independently from the backend.
//! The join never mutates them and never re-orders the earned badges.

use std::collections::HashMap;

use crate::model::{BadgeId, BadgeTier, UserBadge, UserBadgeProgress};

/// Name, description and image shown for a badge.
///
/// Taken from the attached tier when there is one, otherwise from the base badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBadge {
    pub badge_id: BadgeId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub tier_level: Option<u32>,
}

impl DisplayBadge {
    #[must_use]
    pub fn from_user_badge(record: &UserBadge) -> Self {
        match &record.badge_tier_info {
            Some(tier) => Self::from_tier(tier),
            None => Self {
                badge_id: record.badge.badge_id.clone(),
                name: record.badge.name.clone(),
                description: record.badge.description.clone(),
                image: record.badge.image.clone(),
                tier_level: None,
            },
        }
    }

    fn from_tier(tier: &BadgeTier) -> Self {
        Self {
            badge_id: tier.badge.clone(),
            name: tier.name.clone(),
            description: tier.description.clone(),
            image: tier.image.clone(),
            tier_level: Some(tier.tier_level),
        }
    }
}

/// One renderable badge: display data plus progress toward the next tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeEntry {
    pub badge: DisplayBadge,
    pub progress_value: u32,
    pub progress_target: u32,
}

impl BadgeEntry {
    /// A zero target means there is no next tier to progress toward.
    #[must_use]
    pub fn is_max_tier(&self) -> bool {
        self.progress_target == 0
    }
}

/// Merge earned badges with progress records, keeping the earned-badge order.
///
/// Progress is matched by badge identity. When several progress records share
/// a badge, the first one in `progress` wins. Badges with no match get 0 / 0.
#[must_use]
pub fn merge_user_badges(badges: &[UserBadge], progress: &[UserBadgeProgress]) -> Vec<BadgeEntry> {
    let mut by_badge: HashMap<&BadgeId, &UserBadgeProgress> = HashMap::with_capacity(progress.len());
    for record in progress {
        by_badge.entry(&record.badge).or_insert(record);
    }

    badges
        .iter()
        .map(|record| {
            let matched = by_badge.get(record.badge_id()).copied();
            BadgeEntry {
                badge: DisplayBadge::from_user_badge(record),
                progress_value: matched.and_then(|p| p.progress_value).unwrap_or(0),
                progress_target: matched.and_then(|p| p.progress_target).unwrap_or(0),
            }
        })
        .collect()
}
