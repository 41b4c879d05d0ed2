//! Showdown scoring and pot settlement.

use crate::events::SeatPayout;
use crate::oracle::RankingOracle;
use crate::table::Table;

/// Result of settling one pot.
#[derive(Debug, Clone)]
pub struct Settlement {
    /// Winning seats in payout order
    pub winners: Vec<usize>,
    pub payouts: Vec<SeatPayout>,
    /// The pot that was distributed
    pub pot: u32,
    /// False when a sole contender took the pot without a ranking call
    pub ranked: bool,
}

/// Distribute the pot among the remaining contenders.
///
/// A sole contender takes everything uncontested, with no oracle call.
/// Otherwise every contender is scored against the board (lower = stronger)
/// and the lowest score wins; ties split by floor division with the
/// remainder paid one chip at a time in seat order starting from the first
/// winner after the dealer, so no chip ever leaves circulation. A scoring
/// failure demotes that contender to the worst possible score and is
/// logged; it never aborts settlement.
pub(crate) fn settle(table: &mut Table, oracle: &dyn RankingOracle) -> Settlement {
    let pot = table.pot;
    let contenders: Vec<usize> = table
        .players()
        .iter()
        .filter(|p| p.in_hand())
        .map(|p| p.seat())
        .collect();

    if contenders.len() == 1 {
        let seat = contenders[0];
        return pay(table, pot, &[seat], false);
    }

    let board = table.community().to_vec();
    let mut best = u32::MAX;
    let mut scores = Vec::with_capacity(contenders.len());
    for &seat in &contenders {
        let hole = table.players()[seat].hand().to_vec();
        let score = match oracle.score(&hole, &board) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(seat, %err, "ranking oracle failed; scoring seat as worst");
                u32::MAX
            }
        };
        best = best.min(score);
        scores.push((seat, score));
    }

    // Payout order is seat order from the first winner after the dealer;
    // this also decides who receives the odd chips of a split pot.
    let n = table.seat_count();
    let mut winners = Vec::new();
    for k in 1..=n {
        let seat = (table.dealer_pos + k) % n;
        if scores.iter().any(|&(s, sc)| s == seat && sc == best) {
            winners.push(seat);
        }
    }

    pay(table, pot, &winners, true)
}

fn pay(table: &mut Table, pot: u32, winners: &[usize], ranked: bool) -> Settlement {
    let count = winners.len() as u32;
    let share = if count > 0 { pot / count } else { 0 };
    let remainder = if count > 0 { pot % count } else { 0 };

    let mut payouts = Vec::with_capacity(winners.len());
    for (i, &seat) in winners.iter().enumerate() {
        let amount = share + u32::from((i as u32) < remainder);
        table.players_mut()[seat].award(amount);
        let name = table.players()[seat].name().to_string();
        table.log(format!("{name} wins {amount}"));
        payouts.push(SeatPayout { seat, name, amount });
    }
    table.pot = 0;

    Settlement {
        winners: winners.to_vec(),
        payouts,
        pot,
        ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::errors::EngineError;
    use crate::player::Participant;

    fn c(suit: Suit, rank: Rank) -> Card {
        Card { suit, rank }
    }

    /// Oracle with canned scores per seat name, for settlement tests.
    struct FixedOracle(Vec<(Rank, u32)>);

    impl RankingOracle for FixedOracle {
        fn score(&self, hole: &[Card], _community: &[Card]) -> Result<u32, EngineError> {
            let key = hole[0].rank;
            Ok(self
                .0
                .iter()
                .find(|(r, _)| *r == key)
                .map(|&(_, s)| s)
                .unwrap_or(u32::MAX))
        }
    }

    fn contested_table(stacks: &[u32]) -> Table {
        let players = stacks
            .iter()
            .enumerate()
            .map(|(i, &s)| Participant::new(format!("p{i}"), s, i))
            .collect();
        Table::new(players, 5, 10)
    }

    fn give_hand(table: &mut Table, seat: usize, rank: Rank) {
        table.players_mut()[seat]
            .receive_cards(vec![c(Suit::Hearts, rank), c(Suit::Clubs, rank)])
            .expect("cards");
    }

    #[test]
    fn split_pot_remainder_goes_by_seat_order_from_dealer() {
        let mut table = contested_table(&[100, 100, 100]);
        table.pot = 101;
        table.dealer_pos = 2;
        give_hand(&mut table, 0, Rank::Ace);
        give_hand(&mut table, 1, Rank::Ace);
        give_hand(&mut table, 2, Rank::Two);
        for _ in 0..5 {
            table.community.push(c(Suit::Diamonds, Rank::Seven));
        }

        let oracle = FixedOracle(vec![(Rank::Ace, 10), (Rank::Two, 500)]);
        let settlement = settle(&mut table, &oracle);

        assert_eq!(settlement.winners, vec![0, 1]);
        assert_eq!(settlement.payouts[0].amount, 51, "first after dealer gets the odd chip");
        assert_eq!(settlement.payouts[1].amount, 50);
        assert_eq!(table.pot(), 0);
        assert_eq!(table.players()[0].stack(), 151);
        assert_eq!(table.players()[1].stack(), 150);
    }

    #[test]
    fn oracle_failure_scores_seat_as_worst() {
        struct FailingOracle;
        impl RankingOracle for FailingOracle {
            fn score(&self, hole: &[Card], community: &[Card]) -> Result<u32, EngineError> {
                if hole[0].rank == Rank::Two {
                    Err(EngineError::UnscorableHand {
                        hole: hole.len(),
                        community: community.len(),
                    })
                } else {
                    Ok(1)
                }
            }
        }

        let mut table = contested_table(&[100, 100]);
        table.pot = 40;
        give_hand(&mut table, 0, Rank::Two);
        give_hand(&mut table, 1, Rank::King);

        let settlement = settle(&mut table, &FailingOracle);
        assert_eq!(settlement.winners, vec![1]);
        assert_eq!(table.players()[1].stack(), 140);
    }
}
