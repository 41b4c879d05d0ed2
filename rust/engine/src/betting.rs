//! Betting round resolution: the turn-order actor loop.

use crate::engine::PacingConfig;
use crate::errors::EngineError;
use crate::events::{EventSink, GameEvent, Street};
use crate::player::{PlayerAction, PlayerStatus};
use crate::provider::{Decision, DecisionProvider};
use crate::table::Table;

/// Resolve one full betting round for `street`, asking each eligible seat's
/// decision provider in strict seat order from the computed start index.
///
/// The loop repeats full passes until a pass completes with no bet-changing
/// action, or until at most one contender remains. On exit the round's
/// matched-bet bookkeeping is cleared; committed chips are already in the pot.
pub(crate) async fn run_betting_round(
    table: &mut Table,
    providers: &[Box<dyn DecisionProvider>],
    street: Street,
    sink: &dyn EventSink,
    pacing: &PacingConfig,
) -> Result<(), EngineError> {
    let n = table.seat_count();
    if n == 0 || table.contenders() <= 1 {
        return Ok(());
    }

    // Pre-flop inherits the blind-posting state; later streets open fresh.
    if street != Street::Preflop {
        table.current_bet = 0;
        table.last_raise = table.big_blind();
    }
    sink.emit(GameEvent::BettingStarted {
        street,
        pot: table.pot(),
    });

    // Pre-flop action starts past dealer, SB and BB; post-flop past the dealer.
    let offset = if street == Street::Preflop { 3 } else { 1 };
    let Some(start) = table.first_in_hand_from((table.dealer_pos + offset) % n) else {
        return Ok(());
    };

    'round: loop {
        let mut bet_changed = false;
        for k in 0..n {
            if table.contenders() <= 1 {
                break 'round;
            }
            let seat = (start + k) % n;
            if !needs_action(table, seat) {
                continue;
            }

            pacing.pause_before_action().await;
            let ctx = table.decision_context(seat);
            let decision = providers[seat].decide(&ctx).await;
            tracing::debug!(
                seat,
                name = providers[seat].name(),
                ?decision,
                street = ?street,
                "seat decided"
            );

            let (action, changed) = apply_decision(table, seat, decision)?;
            bet_changed |= changed;

            let name = table.players()[seat].name().to_string();
            table.log(format!("{name} {action}"));
            sink.emit(GameEvent::PlayerAction {
                seat,
                name,
                action,
                pot: table.pot(),
            });
        }
        if !bet_changed {
            break;
        }
    }

    table.close_betting_round();
    Ok(())
}

/// A seat acts this pass if it can still make choices (active, which implies
/// a positive stack) and either no bet is open or it has not matched the
/// table bet yet.
fn needs_action(table: &Table, seat: usize) -> bool {
    let p = &table.players()[seat];
    p.status() == PlayerStatus::Active
        && (table.current_bet() == 0 || p.current_bet() < table.current_bet())
}

/// Map a provider decision onto the engine's action vocabulary and apply it.
/// Returns the applied action and whether it changed the table bet (which
/// forces at least one more full pass).
fn apply_decision(
    table: &mut Table,
    seat: usize,
    decision: Decision,
) -> Result<(PlayerAction, bool), EngineError> {
    let table_bet = table.current_bet();
    let round_bet = table.players()[seat].current_bet();
    let to_call = table_bet.saturating_sub(round_bet);

    match decision {
        Decision::Fold => {
            table.players_mut()[seat].fold();
            Ok((PlayerAction::Fold, false))
        }
        Decision::Call if to_call == 0 => Ok((PlayerAction::Check, false)),
        Decision::Call => {
            let paid = table.commit(seat, to_call)?;
            // A clamped call leaves the caller short; the single-pot model
            // still lets them contest the whole pot.
            let action = if is_all_in(table, seat) {
                PlayerAction::AllIn { amount: paid }
            } else {
                PlayerAction::Call { amount: paid }
            };
            Ok((action, false))
        }
        Decision::Raise { amount } if table_bet == 0 => {
            // Opening bet: at least the minimum bet.
            let paid = table.commit(seat, amount.max(table.min_bet()))?;
            let new_bet = table.players()[seat].current_bet();
            let changed = new_bet > table.current_bet();
            if changed {
                table.current_bet = new_bet;
                table.last_raise = new_bet;
            }
            let action = if is_all_in(table, seat) {
                PlayerAction::AllIn { amount: paid }
            } else {
                PlayerAction::Bet { amount: paid }
            };
            Ok((action, changed))
        }
        Decision::Raise { amount } => {
            // Re-raise: call plus at least the last raise increment. The
            // requested amount is provider input and may be anything up to
            // u32::MAX; the sum saturates and the stack clamp in the bet
            // primitive bounds what is actually committed.
            let increment = amount.max(table.last_raise);
            let paid = table.commit(seat, to_call.saturating_add(increment))?;
            let new_bet = table.players()[seat].current_bet();
            let changed = new_bet > table.current_bet();
            if changed {
                table.last_raise = new_bet - table.current_bet();
                table.current_bet = new_bet;
            }
            let action = if is_all_in(table, seat) {
                PlayerAction::AllIn { amount: paid }
            } else {
                PlayerAction::Raise {
                    to: new_bet,
                    by: increment,
                }
            };
            Ok((action, changed))
        }
    }
}

fn is_all_in(table: &Table, seat: usize) -> bool {
    table.players()[seat].status() == PlayerStatus::AllIn
}
