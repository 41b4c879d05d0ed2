use crate::cards::Card;
use crate::errors::EngineError;
use crate::player::{Participant, PlayerStatus};
use crate::provider::{DecisionContext, SeatView};

/// Seats and amounts actually posted for the blinds, for event payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindPost {
    pub small_blind_seat: usize,
    pub small_blind: u32,
    pub big_blind_seat: usize,
    pub big_blind: u32,
}

/// Shared hand state: the fixed-membership seat list, position bookkeeping,
/// pot and betting amounts, community cards and the per-hand action log.
///
/// Chips move from a stack into `pot` at the moment an action commits them;
/// each participant's `current_bet` only tracks what they have matched this
/// round, so `pot + sum(stacks)` is constant at every observable point.
#[derive(Debug)]
pub struct Table {
    players: Vec<Participant>,
    pub(crate) dealer_pos: usize,
    small_blind: u32,
    big_blind: u32,
    pub(crate) pot: u32,
    pub(crate) current_bet: u32,
    min_bet: u32,
    pub(crate) last_raise: u32,
    pub(crate) community: Vec<Card>,
    hand_number: u64,
    action_log: Vec<String>,
}

impl Table {
    pub fn new(players: Vec<Participant>, small_blind: u32, big_blind: u32) -> Self {
        Self {
            players,
            dealer_pos: 0,
            small_blind,
            big_blind,
            pot: 0,
            current_bet: 0,
            min_bet: big_blind,
            last_raise: big_blind,
            community: Vec::with_capacity(5),
            hand_number: 0,
            action_log: Vec::new(),
        }
    }

    pub fn players(&self) -> &[Participant] {
        &self.players
    }
    pub(crate) fn players_mut(&mut self) -> &mut [Participant] {
        &mut self.players
    }
    pub fn seat_count(&self) -> usize {
        self.players.len()
    }
    pub fn dealer_pos(&self) -> usize {
        self.dealer_pos
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn min_bet(&self) -> u32 {
        self.min_bet
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }
    pub fn action_log(&self) -> &[String] {
        &self.action_log
    }

    /// Seats still contending for the pot.
    pub fn contenders(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    /// Seats that can be dealt into the next hand.
    pub fn eligible_players(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.status() != PlayerStatus::Out)
            .count()
    }

    pub fn total_chips(&self) -> u32 {
        self.pot + self.players.iter().map(|p| p.stack()).sum::<u32>()
    }

    /// Reset all per-hand state and bump the hand counter.
    /// Returns the number of seats eligible for the new hand.
    pub(crate) fn begin_hand(&mut self) -> usize {
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.community.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.last_raise = self.big_blind;
        self.action_log.clear();
        self.hand_number += 1;
        self.eligible_players()
    }

    /// First seat at or after `start` (wrapping) that satisfies `pred`,
    /// bounded by one full rotation.
    fn next_seat_where<F>(&self, start: usize, pred: F) -> Option<usize>
    where
        F: Fn(&Participant) -> bool,
    {
        let n = self.players.len();
        (0..n).map(|k| (start + k) % n).find(|&s| pred(&self.players[s]))
    }

    /// First non-folded, non-out seat at or after `start`.
    pub(crate) fn first_in_hand_from(&self, start: usize) -> Option<usize> {
        self.next_seat_where(start, |p| p.in_hand())
    }

    /// Set positional flags for the current dealer position: dealer at
    /// `dealer_pos`, then the next two non-out seats clockwise take the
    /// blinds. No-op when fewer than 2 seats can play.
    pub fn assign_positions(&mut self) {
        for p in &mut self.players {
            p.is_dealer = false;
            p.is_small_blind = false;
            p.is_big_blind = false;
        }
        if self.eligible_players() < 2 {
            return;
        }
        let n = self.players.len();
        self.players[self.dealer_pos].is_dealer = true;
        let sb = self.next_seat_where((self.dealer_pos + 1) % n, |p| {
            p.status() != PlayerStatus::Out
        });
        let Some(sb) = sb else { return };
        self.players[sb].is_small_blind = true;
        let bb = self.next_seat_where((sb + 1) % n, |p| p.status() != PlayerStatus::Out);
        if let Some(bb) = bb {
            self.players[bb].is_big_blind = true;
        }
    }

    /// Advance the dealer button to the next non-out seat and reassign
    /// positional flags. No-op when fewer than 2 seats can play.
    pub fn rotate_dealer(&mut self) {
        if self.eligible_players() < 2 {
            return;
        }
        let n = self.players.len();
        if let Some(next) = self.next_seat_where((self.dealer_pos + 1) % n, |p| {
            p.status() != PlayerStatus::Out
        }) {
            self.dealer_pos = next;
        }
        self.assign_positions();
    }

    /// Post the small and big blinds via the bet primitive. The first active
    /// seat after the dealer posts the small blind, the next active seat the
    /// big blind; the table bet becomes the big blind.
    pub fn post_blinds(&mut self) -> Result<BlindPost, EngineError> {
        let n = self.players.len();
        if n == 0 {
            return Err(EngineError::InsufficientPlayers);
        }
        let sb_seat = self
            .next_seat_where((self.dealer_pos + 1) % n, |p| {
                p.status() == PlayerStatus::Active
            })
            .ok_or(EngineError::InsufficientPlayers)?;
        let bb_seat = self
            .next_seat_where((sb_seat + 1) % n, |p| p.status() == PlayerStatus::Active)
            .ok_or(EngineError::InsufficientPlayers)?;
        if bb_seat == sb_seat {
            return Err(EngineError::InsufficientPlayers);
        }

        let sb_paid = self.commit(sb_seat, self.small_blind)?;
        let bb_paid = self.commit(bb_seat, self.big_blind)?;
        self.current_bet = self.big_blind;
        self.last_raise = self.big_blind;

        let sb_name = self.players[sb_seat].name().to_string();
        let bb_name = self.players[bb_seat].name().to_string();
        self.log(format!("{sb_name} posts small blind {sb_paid}"));
        self.log(format!("{bb_name} posts big blind {bb_paid}"));

        Ok(BlindPost {
            small_blind_seat: sb_seat,
            small_blind: sb_paid,
            big_blind_seat: bb_seat,
            big_blind: bb_paid,
        })
    }

    /// Commit chips for a seat through the bet primitive and move the actual
    /// (possibly clamped) amount into the pot. Returns what was committed.
    pub(crate) fn commit(&mut self, seat: usize, amount: u32) -> Result<u32, EngineError> {
        let actual = self.players[seat].place_bet(amount)?;
        self.pot += actual;
        Ok(actual)
    }

    /// Close a betting round: matched bets are already in the pot, so only
    /// the round-matching bookkeeping is cleared.
    pub(crate) fn close_betting_round(&mut self) {
        for p in &mut self.players {
            p.clear_round_bet();
        }
        self.current_bet = 0;
    }

    pub(crate) fn log(&mut self, entry: String) {
        self.action_log.push(entry);
    }

    /// Read-only snapshot handed to a seat's decision provider.
    pub(crate) fn decision_context(&self, seat: usize) -> DecisionContext {
        let me = &self.players[seat];
        let to_call = self.current_bet.saturating_sub(me.current_bet());
        DecisionContext {
            seat,
            hand: me.hand().to_vec(),
            community: self.community.clone(),
            pot: self.pot,
            table_bet: self.current_bet,
            to_call,
            min_raise: self.last_raise,
            stack: me.stack(),
            round_bet: me.current_bet(),
            seats: self
                .players
                .iter()
                .map(|p| SeatView {
                    seat: p.seat(),
                    name: p.name().to_string(),
                    stack: p.stack(),
                    round_bet: p.current_bet(),
                    status: p.status(),
                    is_dealer: p.is_dealer(),
                })
                .collect(),
            action_log: self.action_log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_seats() -> Table {
        let players = (0..4)
            .map(|i| Participant::new(format!("p{i}"), 1000, i))
            .collect();
        Table::new(players, 5, 10)
    }

    #[test]
    fn blinds_follow_the_dealer() {
        let mut t = four_seats();
        t.assign_positions();
        let post = t.post_blinds().expect("blinds");
        assert_eq!(post.small_blind_seat, 1);
        assert_eq!(post.big_blind_seat, 2);
        assert_eq!(t.pot(), 15);
        assert_eq!(t.current_bet(), 10);
        assert_eq!(t.players()[1].stack(), 995);
        assert_eq!(t.players()[2].stack(), 990);
        assert_eq!(t.total_chips(), 4000);
    }

    #[test]
    fn rotation_skips_out_seats() {
        let mut players: Vec<Participant> = (0..4)
            .map(|i| Participant::new(format!("p{i}"), 1000, i))
            .collect();
        players[1] = Participant::new("bust", 0, 1);
        let mut t = Table::new(players, 5, 10);
        t.begin_hand();
        t.rotate_dealer();
        assert_eq!(t.dealer_pos(), 2);
        t.assign_positions();
        assert!(t.players()[2].is_dealer());
        assert!(t.players()[3].is_small_blind());
        assert!(t.players()[0].is_big_blind());
        assert!(!t.players()[1].is_dealer());
        assert!(!t.players()[1].is_small_blind());
        assert!(!t.players()[1].is_big_blind());
    }

    #[test]
    fn position_assignment_is_a_noop_headsdown() {
        let players = vec![
            Participant::new("solo", 1000, 0),
            Participant::new("bust", 0, 1),
        ];
        let mut t = Table::new(players, 5, 10);
        t.assign_positions();
        assert!(!t.players()[0].is_dealer());
        assert!(t.post_blinds().is_err());
    }

    #[test]
    fn short_stack_blind_is_clamped() {
        let players = vec![
            Participant::new("dealer", 1000, 0),
            Participant::new("short", 3, 1),
            Participant::new("bb", 1000, 2),
        ];
        let mut t = Table::new(players, 5, 10);
        let post = t.post_blinds().expect("blinds");
        assert_eq!(post.small_blind, 3);
        assert_eq!(t.players()[1].status(), PlayerStatus::AllIn);
        assert_eq!(t.pot(), 13);
    }
}
