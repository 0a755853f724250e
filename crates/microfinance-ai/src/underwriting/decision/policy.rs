use crate::underwriting::config::LoanTier;

/// Result of walking the tier ladder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TierOutcome<'a> {
    Approved(&'a LoanTier),
    BelowLadder,
}

/// First tier whose lower bound the score reaches, walking from the highest band down.
///
/// Bounds are inclusive, so a score sitting exactly on a boundary takes the higher band.
pub(crate) fn select_tier(tiers: &[LoanTier], final_score: f64) -> TierOutcome<'_> {
    tiers
        .iter()
        .find(|tier| final_score >= tier.min_score)
        .map(TierOutcome::Approved)
        .unwrap_or(TierOutcome::BelowLadder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_name(outcome: TierOutcome<'_>) -> Option<&str> {
        match outcome {
            TierOutcome::Approved(tier) => Some(tier.name.as_str()),
            TierOutcome::BelowLadder => None,
        }
    }

    #[test]
    fn lower_bounds_are_closed() {
        let ladder = LoanTier::standard_ladder();
        assert_eq!(tier_name(select_tier(&ladder, 0.7)), Some("tier1"));
        assert_eq!(tier_name(select_tier(&ladder, 0.5)), Some("tier2"));
        assert_eq!(tier_name(select_tier(&ladder, 0.3)), Some("tier3"));
    }

    #[test]
    fn scores_just_below_a_bound_drop_a_band() {
        let ladder = LoanTier::standard_ladder();
        assert_eq!(tier_name(select_tier(&ladder, 0.699_999)), Some("tier2"));
        assert_eq!(tier_name(select_tier(&ladder, 0.499_999)), Some("tier3"));
        assert_eq!(tier_name(select_tier(&ladder, 0.299_999)), None);
    }

    #[test]
    fn negative_scores_fall_below_the_ladder() {
        assert_eq!(
            select_tier(&LoanTier::standard_ladder(), -0.4),
            TierOutcome::BelowLadder
        );
    }
}
