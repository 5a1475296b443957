//! Reward tier definitions.
//!
//! A merchant's `sat_back` reward level is bucketed into one of eight tiers
//! that drive the pass background color and the tier name shown on the card.

/// Background color for nonprofit passes, regardless of reward tier.
pub const NONPROFIT_BACKGROUND_COLOR: &str = "rgb(233,30,99)";

/// One row of the fixed tier table.
struct TierSpec {
    name: &'static str,
    color: &'static str,
}

/// Tier table indexed by tier level. Level 7 is the top tier.
const TIERS: [TierSpec; 8] = [
    TierSpec { name: "Member", color: "rgb(96,125,139)" },
    TierSpec { name: "Bronze", color: "rgb(121,85,72)" },
    TierSpec { name: "Silver", color: "rgb(158,158,158)" },
    TierSpec { name: "Gold", color: "rgb(255,193,7)" },
    TierSpec { name: "Platinum", color: "rgb(0,150,136)" },
    TierSpec { name: "Diamond", color: "rgb(63,81,181)" },
    TierSpec { name: "Elite", color: "rgb(156,39,176)" },
    TierSpec { name: "Legend", color: "rgb(33,33,33)" },
];

/// Reward tier derived from a merchant's `sat_back` level.
///
/// Values 0-6 map one-to-one; anything >= 7 is the top tier. Negative input
/// falls through to the tier-0 default (long-standing behavior, kept as-is).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RewardTier(u8);

impl RewardTier {
    /// The highest tier.
    pub const TOP: RewardTier = RewardTier(7);

    /// Bucket a raw `sat_back` value into a tier.
    pub fn from_sat_back(value: i64) -> Self {
        RewardTier(value.clamp(0, 7) as u8)
    }

    /// The tier level (0-7).
    pub fn level(&self) -> u8 {
        self.0
    }

    /// Display name for this tier.
    pub fn name(&self) -> &'static str {
        TIERS[self.0 as usize].name
    }

    /// Pass background color for this tier.
    pub fn background_color(&self) -> &'static str {
        TIERS[self.0 as usize].color
    }
}

impl std::fmt::Display for RewardTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
