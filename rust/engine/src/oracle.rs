use crate::cards::Card;
use crate::errors::EngineError;
use crate::hand::{evaluate_seven, Category, HandStrength};

/// External boundary for hand ranking at showdown.
///
/// Lower scores are stronger, matching the scoring convention the original
/// leaderboard pipeline consumed. Scores must be total-order comparable
/// across every contender in one showdown.
pub trait RankingOracle: Send + Sync {
    fn score(&self, hole: &[Card], community: &[Card]) -> Result<u32, EngineError>;
}

// Base-15 positional encoding of category + five kickers; anything a seven
// card hand produces stays well below this ceiling.
const SCORE_CEILING: u32 = 9 * 15 * 15 * 15 * 15 * 15;

/// In-process oracle backed by the engine's own seven-card evaluator.
#[derive(Debug, Default)]
pub struct NativeOracle;

impl NativeOracle {
    pub fn new() -> Self {
        Self
    }

    fn encode(strength: &HandStrength) -> u32 {
        let mut v = match strength.category {
            Category::HighCard => 0u32,
            Category::OnePair => 1,
            Category::TwoPair => 2,
            Category::ThreeOfAKind => 3,
            Category::Straight => 4,
            Category::Flush => 5,
            Category::FullHouse => 6,
            Category::FourOfAKind => 7,
            Category::StraightFlush => 8,
        };
        for &k in &strength.kickers {
            v = v * 15 + u32::from(k);
        }
        v
    }
}

impl RankingOracle for NativeOracle {
    fn score(&self, hole: &[Card], community: &[Card]) -> Result<u32, EngineError> {
        if hole.len() != 2 || community.len() != 5 {
            return Err(EngineError::UnscorableHand {
                hole: hole.len(),
                community: community.len(),
            });
        }
        let cards: [Card; 7] = [
            hole[0],
            hole[1],
            community[0],
            community[1],
            community[2],
            community[3],
            community[4],
        ];
        let strength = evaluate_seven(&cards);
        Ok(SCORE_CEILING - Self::encode(&strength))
    }
}
