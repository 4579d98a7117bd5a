//! Promotes winners of completed rounds into the next round's matches.
//!
//! Runs after any match completes. Purely a function of child-match
//! completion; wall-clock time never enters into it.

use crate::bracket;
use crate::db::Database;
use crate::error::Result;
use crate::state::game_match::MatchState;
use crate::state::object::TournamentId;

/// Scan the bracket round by round; once a whole round has completed and the
/// following round has not been handed its players yet, fill every match of
/// that round with the winners of its two feeder matches.
pub fn check_for_new_matches_to_start(
    db: &mut Database,
    tournament_id: TournamentId,
) -> Result<()> {
    let match_ids = db.details_of(tournament_id)?.matches.clone();
    let num_matches = match_ids.len();
    if num_matches == 0 {
        return Ok(());
    }
    let num_rounds = (num_matches as u32 + 1).trailing_zeros();

    let mut states = Vec::with_capacity(num_matches);
    for id in &match_ids {
        states.push(db.get_match(*id)?.state);
    }

    // Find the last round in which every match has completed, and whether
    // the match that stopped the scan is still waiting for players.
    let mut last_complete_round = None;
    let mut first_incomplete_match_was_waiting = false;
    'rounds: for round in 0..num_rounds {
        let first = bracket::first_match_in_round(num_rounds, round);
        let count = bracket::matches_in_round(num_rounds, round);
        for index in first..first + count {
            if states[index] != MatchState::MatchComplete {
                first_incomplete_match_was_waiting =
                    states[index] == MatchState::WaitingOnPreviousMatches;
                break 'rounds;
            }
        }
        last_complete_round = Some(round);
    }

    let Some(last_complete_round) = last_complete_round else {
        return Ok(());
    };

    // A complete final belongs to the state machine, not to this scan.
    debug_assert!(
        last_complete_round != num_rounds - 1,
        "scheduler invoked on a finished bracket"
    );
    if last_complete_round == num_rounds - 1 {
        return Ok(());
    }

    if !first_incomplete_match_was_waiting {
        // the next round is already underway
        return Ok(());
    }

    let next_round = last_complete_round + 1;
    let first = bracket::first_match_in_round(num_rounds, next_round);
    let count = bracket::matches_in_round(num_rounds, next_round);
    let now = db.head_block_time();
    for parent in first..first + count {
        let (left, right) = bracket::child_indices(parent);
        let mut winners = Vec::with_capacity(2);
        for child in [left, right] {
            let child_match = db.get_match(match_ids[child])?;
            if let Some(winner) = child_match.winner() {
                debug_assert_eq!(child_match.match_winners.len(), 1);
                winners.push(winner);
            }
        }
        log::debug!(
            "Tournament {:?}: starting round {} match {} with {:?}",
            tournament_id,
            next_round,
            parent,
            winners
        );
        db.modify_match(match_ids[parent], |m| m.on_initiate_match(now, winners))?;
    }
    Ok(())
}
