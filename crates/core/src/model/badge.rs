use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{BadgeId, BadgeTierId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BadgeError {
    #[error("a badge family needs at least one tier")]
    NoTiers,

    #[error("tier {tier:?} belongs to {found:?}, expected {expected:?}")]
    MixedFamilies {
        tier: BadgeTierId,
        expected: BadgeId,
        found: BadgeId,
    },

    #[error("tier levels must strictly increase (level {level} follows {previous})")]
    LevelOrder { previous: u32, level: u32 },

    #[error("reputation thresholds must strictly increase ({threshold} follows {previous})")]
    ThresholdOrder { previous: i64, threshold: i64 },
}

//
// ─── REFERENCE DATA ────────────────────────────────────────────────────────────
//

/// Achievement definition shared by every user who earns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub badge_id: BadgeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Ranked level within a badge family, gated by a reputation threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeTier {
    pub tier_id: BadgeTierId,
    pub badge: BadgeId,
    pub tier_level: u32,
    pub reputation_threshold: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Tiers of a single badge family, ordered by level.
///
/// Levels and thresholds strictly increase; `new` rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeTiers {
    badge: BadgeId,
    tiers: Vec<BadgeTier>,
}

impl BadgeTiers {
    /// Sorts the tiers by level and validates the family invariants.
    ///
    /// # Errors
    ///
    /// Returns `BadgeError` when the list is empty, mixes families, or when
    /// levels or thresholds do not strictly increase.
    pub fn new(mut tiers: Vec<BadgeTier>) -> Result<Self, BadgeError> {
        tiers.sort_by_key(|tier| tier.tier_level);
        let first = tiers.first().ok_or(BadgeError::NoTiers)?;
        let badge = first.badge.clone();

        for tier in &tiers {
            if tier.badge != badge {
                return Err(BadgeError::MixedFamilies {
                    tier: tier.tier_id.clone(),
                    expected: badge,
                    found: tier.badge.clone(),
                });
            }
        }

        for pair in tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.tier_level <= prev.tier_level {
                return Err(BadgeError::LevelOrder {
                    previous: prev.tier_level,
                    level: next.tier_level,
                });
            }
            if next.reputation_threshold <= prev.reputation_threshold {
                return Err(BadgeError::ThresholdOrder {
                    previous: prev.reputation_threshold,
                    threshold: next.reputation_threshold,
                });
            }
        }

        Ok(Self { badge, tiers })
    }

    #[must_use]
    pub fn badge(&self) -> &BadgeId {
        &self.badge
    }

    #[must_use]
    pub fn tiers(&self) -> &[BadgeTier] {
        &self.tiers
    }

    /// Highest tier whose threshold the reputation meets.
    #[must_use]
    pub fn reached(&self, reputation: i64) -> Option<&BadgeTier> {
        self.tiers
            .iter()
            .rev()
            .find(|tier| reputation >= tier.reputation_threshold)
    }

    /// First tier still out of reach, or `None` at the top of the ladder.
    #[must_use]
    pub fn next_after(&self, reputation: i64) -> Option<&BadgeTier> {
        self.tiers
            .iter()
            .find(|tier| reputation < tier.reputation_threshold)
    }
}

//
// ─── PER-USER RECORDS ──────────────────────────────────────────────────────────
//

/// A user's record of having earned a badge, and possibly a tier of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadge {
    #[serde(default)]
    pub user: Option<UserId>,
    pub badge: Badge,
    #[serde(default)]
    pub badge_tier_info: Option<BadgeTier>,
    #[serde(default)]
    pub progress_value: Option<u32>,
    #[serde(default)]
    pub progress_target: Option<u32>,
}

impl UserBadge {
    #[must_use]
    pub fn badge_id(&self) -> &BadgeId {
        &self.badge.badge_id
    }

    /// With a tier attached, a present target must not be below the value.
    #[must_use]
    pub fn progress_is_consistent(&self) -> bool {
        if self.badge_tier_info.is_none() {
            return true;
        }
        match (self.progress_value, self.progress_target) {
            (Some(value), Some(target)) => target >= value,
            _ => true,
        }
    }
}

/// In-flight progress toward the next tier of a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadgeProgress {
    pub badge: BadgeId,
    #[serde(default)]
    pub progress_value: Option<u32>,
    #[serde(default)]
    pub progress_target: Option<u32>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
