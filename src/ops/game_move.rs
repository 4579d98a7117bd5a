use crate::db::Database;
use crate::error::{Result, TournamentError};
use crate::lifecycle::{self, TournamentEvent};
use crate::ops::operation::GameMoveOperation;
use crate::require;
use crate::scheduler;
use crate::state::tournament::TournamentState;

/// Forward a player's move to their match. A move that completes the match
/// either promotes winners into the next round or, when the final just
/// resolved, concludes the tournament.
pub fn handle(db: &mut Database, op: &GameMoveOperation) -> Result<()> {
    let tournament = db.tournament(op.tournament_id)?;
    require!(
        tournament.state == TournamentState::InProgress,
        TournamentError::TournamentNotInProgress
    );
    let game_match = db.get_match(op.match_id)?;
    require!(
        game_match.tournament_id == op.tournament_id,
        TournamentError::MatchTournamentMismatch
    );

    let now = db.head_block_time();
    let completed = db.modify_match(op.match_id, |m| {
        m.on_game_move(now, op.player_account_id, op.game_move)
    })??;
    if !completed {
        return Ok(());
    }

    let details = db.details_of(op.tournament_id)?;
    let final_completed = details.matches.first() == Some(&op.match_id);
    if final_completed {
        lifecycle::process_event(db, op.tournament_id, TournamentEvent::FinalGameCompleted)
    } else {
        scheduler::check_for_new_matches_to_start(db, op.tournament_id)
    }
}
