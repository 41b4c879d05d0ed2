//! Rule-based decision provider for local play and benchmarking.

use async_trait::async_trait;
use pokermind_engine::cards::Card;
use pokermind_engine::hand::{evaluate_seven, Category};
use pokermind_engine::provider::{Decision, DecisionContext, DecisionProvider};

/// Deterministic rule-based policy.
///
/// Pre-flop it rates the hole cards on a 0-10 strength scale (pairs, big
/// aces, suited connectors); post-flop it rates the made hand by category.
/// Facing a bet it calls down to a pot-odds threshold that tightens as the
/// hand weakens; with no bet open it value-raises strong hands and checks
/// the rest. No randomized bluffs, so simulations are reproducible.
#[derive(Debug, Clone, Default)]
pub struct RulePolicy {
    name: String,
}

impl RulePolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Rate hole cards 0-10. Pairs dominate; big suited combinations and
    /// suited connectors rate above random offsuit cards.
    fn preflop_strength(hole: &[Card]) -> u8 {
        let (c1, c2) = (hole[0], hole[1]);
        let r1 = c1.rank.value();
        let r2 = c2.rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = c1.suit == c2.suit;

        if r1 == r2 {
            return match high {
                14 | 13 => 10,
                12 | 11 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => {
                if suited {
                    10
                } else {
                    8
                }
            }
            (14, 12) => {
                if suited {
                    8
                } else {
                    7
                }
            }
            (14, 11) => {
                if suited {
                    7
                } else {
                    6
                }
            }
            (14, 10) => {
                if suited {
                    6
                } else {
                    5
                }
            }
            (14, _) => {
                if suited {
                    5
                } else {
                    4
                }
            }
            (13, 12) => {
                if suited {
                    7
                } else {
                    6
                }
            }
            (13, 11) | (12, 11) => {
                if suited {
                    6
                } else {
                    5
                }
            }
            (13, 10) | (12, 10) => {
                if suited {
                    5
                } else {
                    4
                }
            }
            _ => {
                if suited && high - low <= 2 {
                    if high >= 9 {
                        5
                    } else {
                        4
                    }
                } else if high >= 11 && low >= 9 {
                    4
                } else {
                    2
                }
            }
        }
    }

    /// Rate the made hand 0-10 against a partial or full board. Boards
    /// shorter than five cards are padded with unseen low cards; padding can
    /// understate strength but rarely invents it.
    fn postflop_strength(hole: &[Card], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let mut seven: Vec<Card> = hole.to_vec();
        seven.extend_from_slice(board);
        if seven.len() < 7 {
            let fillers: Vec<Card> = pokermind_engine::cards::full_deck()
                .into_iter()
                .filter(|c| !seven.contains(c))
                .take(7 - seven.len())
                .collect();
            seven.extend(fillers);
        }
        let cards: [Card; 7] = seven[..7].try_into().ok()?;
        let strength = evaluate_seven(&cards);

        let base: u8 = match strength.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let kicker_boost = u8::from(strength.kickers[0] >= 12);
        Some((base + kicker_boost).min(10))
    }

    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    fn decide_facing_bet(strength: u8, ctx: &DecisionContext) -> Decision {
        let odds = Self::pot_odds(ctx.pot, ctx.to_call);
        if ctx.to_call >= ctx.stack {
            // Calling commits the whole stack.
            return if strength >= 7 {
                Decision::Call
            } else {
                Decision::Fold
            };
        }
        match strength {
            9..=10 => {
                let raise = (ctx.pot / 2).max(ctx.min_raise);
                if ctx.stack >= ctx.to_call + raise {
                    Decision::Raise { amount: raise }
                } else {
                    Decision::Call
                }
            }
            7..=8 => Decision::Call,
            5..=6 => {
                if odds >= 0.3 || ctx.to_call <= ctx.pot / 4 {
                    Decision::Call
                } else {
                    Decision::Fold
                }
            }
            3..=4 => {
                if odds >= 0.4 || ctx.to_call <= ctx.pot / 6 {
                    Decision::Call
                } else {
                    Decision::Fold
                }
            }
            _ => Decision::Fold,
        }
    }

    fn decide_unopened(strength: u8, ctx: &DecisionContext) -> Decision {
        match strength {
            9..=10 if ctx.stack >= ctx.min_raise => Decision::Raise {
                amount: (ctx.pot * 2 / 3).max(ctx.min_raise),
            },
            7..=8 if ctx.stack >= ctx.min_raise => Decision::Raise {
                amount: (ctx.pot / 2).max(ctx.min_raise),
            },
            // Call with nothing to match is a check.
            _ => Decision::Call,
        }
    }
}

#[async_trait]
impl DecisionProvider for RulePolicy {
    async fn decide(&self, ctx: &DecisionContext) -> Decision {
        if ctx.hand.len() != 2 {
            return if ctx.to_call == 0 {
                Decision::Call
            } else {
                Decision::Fold
            };
        }

        let strength = if ctx.community.len() < 3 {
            Self::preflop_strength(&ctx.hand)
        } else {
            Self::postflop_strength(&ctx.hand, &ctx.community)
                .unwrap_or_else(|| Self::preflop_strength(&ctx.hand))
        };

        if ctx.to_call == 0 {
            Self::decide_unopened(strength, ctx)
        } else {
            Self::decide_facing_bet(strength, ctx)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokermind_engine::cards::{Rank, Suit};
    use pokermind_engine::player::PlayerStatus;
    use pokermind_engine::provider::SeatView;

    fn c(suit: Suit, rank: Rank) -> Card {
        Card { suit, rank }
    }

    fn ctx(hand: Vec<Card>, community: Vec<Card>, pot: u32, to_call: u32) -> DecisionContext {
        DecisionContext {
            seat: 0,
            hand,
            community,
            pot,
            table_bet: to_call,
            to_call,
            min_raise: 10,
            stack: 1000,
            round_bet: 0,
            seats: vec![SeatView {
                seat: 0,
                name: "p0".to_string(),
                stack: 1000,
                round_bet: 0,
                status: PlayerStatus::Active,
                is_dealer: false,
            }],
            action_log: Vec::new(),
        }
    }

    #[test]
    fn premium_pairs_rate_highest() {
        let aces = [c(Suit::Hearts, Rank::Ace), c(Suit::Spades, Rank::Ace)];
        assert_eq!(RulePolicy::preflop_strength(&aces), 10);
        let deuces = [c(Suit::Hearts, Rank::Two), c(Suit::Spades, Rank::Two)];
        assert_eq!(RulePolicy::preflop_strength(&deuces), 4);
    }

    #[test]
    fn offsuit_trash_rates_low() {
        let trash = [c(Suit::Hearts, Rank::Seven), c(Suit::Spades, Rank::Two)];
        assert!(RulePolicy::preflop_strength(&trash) <= 3);
    }

    #[tokio::test]
    async fn weak_hand_folds_to_a_bet() {
        let policy = RulePolicy::new("rules");
        let decision = policy
            .decide(&ctx(
                vec![c(Suit::Hearts, Rank::Seven), c(Suit::Spades, Rank::Two)],
                Vec::new(),
                100,
                200,
            ))
            .await;
        assert_eq!(decision, Decision::Fold);
    }

    #[tokio::test]
    async fn strong_hand_raises_when_unopened() {
        let policy = RulePolicy::new("rules");
        let decision = policy
            .decide(&ctx(
                vec![c(Suit::Hearts, Rank::Ace), c(Suit::Spades, Rank::Ace)],
                Vec::new(),
                15,
                0,
            ))
            .await;
        assert!(matches!(decision, Decision::Raise { .. }));
    }

    #[tokio::test]
    async fn top_set_bets_when_unopened() {
        let policy = RulePolicy::new("rules");
        let decision = policy
            .decide(&ctx(
                vec![c(Suit::Hearts, Rank::Ace), c(Suit::Spades, Rank::Ace)],
                vec![
                    c(Suit::Diamonds, Rank::Ace),
                    c(Suit::Clubs, Rank::King),
                    c(Suit::Hearts, Rank::Four),
                ],
                60,
                0,
            ))
            .await;
        assert!(matches!(decision, Decision::Raise { .. }));
    }

    #[tokio::test]
    async fn pot_odds_justify_a_medium_call() {
        let policy = RulePolicy::new("rules");
        // Top pair decent kicker facing a small bet into a big pot.
        let decision = policy
            .decide(&ctx(
                vec![c(Suit::Hearts, Rank::King), c(Suit::Spades, Rank::Five)],
                vec![
                    c(Suit::Diamonds, Rank::King),
                    c(Suit::Clubs, Rank::Eight),
                    c(Suit::Hearts, Rank::Two),
                ],
                200,
                20,
            ))
            .await;
        assert_eq!(decision, Decision::Call);
    }
}
