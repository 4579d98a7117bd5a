use crate::db::Database;
use crate::error::{Result, TournamentError};
use crate::lifecycle::{self, TournamentEvent};
use crate::ops::operation::TournamentJoinOperation;
use crate::require;
use crate::state::tournament::TournamentState;

/// Register a player, with the buy-in debited from the payer.
pub fn handle(db: &mut Database, op: &TournamentJoinOperation) -> Result<()> {
    let tournament = db.tournament(op.tournament_id)?;
    require!(
        tournament.state == TournamentState::AcceptingRegistrations,
        TournamentError::RegistrationClosed
    );
    require!(
        db.head_block_time() < tournament.options.registration_deadline,
        TournamentError::RegistrationDeadlinePassed
    );
    require!(
        tournament.options.whitelist.is_empty()
            || tournament.options.whitelist.contains(&op.player_account_id),
        TournamentError::NotWhitelisted
    );
    require!(
        tournament.registered_players < tournament.options.number_of_players,
        TournamentError::TournamentFull
    );
    let details = db.details(tournament.details_id)?;
    require!(
        !details.registered_players.contains(&op.player_account_id),
        TournamentError::AlreadyRegistered
    );

    lifecycle::process_event(
        db,
        op.tournament_id,
        TournamentEvent::PlayerRegistered {
            payer: op.payer_account_id,
            player: op.player_account_id,
        },
    )
}
