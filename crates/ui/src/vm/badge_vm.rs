use hive_core::BadgeEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeVm {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub tier_label: Option<String>,
    pub is_max_tier: bool,
    pub progress_percent: u8,
    pub progress_label: String,
}

impl From<&BadgeEntry> for BadgeVm {
    fn from(entry: &BadgeEntry) -> Self {
        Self {
            name: entry.badge.name.clone(),
            description: entry.badge.description.clone(),
            image: entry.badge.image.clone(),
            tier_label: entry.badge.tier_level.map(|level| format!("Tier {level}")),
            is_max_tier: entry.is_max_tier(),
            progress_percent: progress_percent(entry.progress_value, entry.progress_target),
            progress_label: progress_label(entry.progress_value, entry.progress_target),
        }
    }
}

#[must_use]
pub fn map_badges(entries: &[BadgeEntry]) -> Vec<BadgeVm> {
    entries.iter().map(BadgeVm::from).collect()
}

/// Share of the target reached, clamped to `0..=100`. A max-tier badge is full.
#[must_use]
pub fn progress_percent(value: u32, target: u32) -> u8 {
    if target == 0 {
        return 100;
    }
    let percent = u64::from(value) * 100 / u64::from(target);
    u8::try_from(percent.min(100)).unwrap_or(100)
}

#[must_use]
pub fn progress_label(value: u32, target: u32) -> String {
    if target == 0 {
        "Max tier".to_owned()
    } else {
        format!("{value} / {target}")
    }
}
