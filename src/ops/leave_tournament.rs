use crate::db::Database;
use crate::error::{Result, TournamentError};
use crate::lifecycle;
use crate::ops::operation::TournamentLeaveOperation;
use crate::require;
use crate::state::tournament::TournamentState;

/// Withdraw a registration before the tournament fills. Reverses the join
/// exactly: the seat, the payer's contribution, and the pool all return to
/// their prior values.
///
/// The payer to release is the canceling account when it is someone other
/// than the player; a player canceling their own seat must hold the payer
/// entry themselves.
pub fn handle(db: &mut Database, op: &TournamentLeaveOperation) -> Result<()> {
    let tournament = db.tournament(op.tournament_id)?;
    require!(
        tournament.state == TournamentState::AcceptingRegistrations,
        TournamentError::RegistrationClosed
    );
    let buy_in_amount = tournament.options.buy_in.amount;
    let details = db.details(tournament.details_id)?;
    require!(
        details.registered_players.contains(&op.player_account_id),
        TournamentError::PlayerNotRegistered
    );

    let payer = op.canceling_account_id;
    if buy_in_amount > 0 {
        let contributed = details.payers.get(&payer).copied().unwrap_or(0);
        if op.canceling_account_id != op.player_account_id {
            // not the player, so it must be a payer
            require!(contributed > 0, TournamentError::NotPlayerOrPayer);
        }
        require!(contributed >= buy_in_amount, TournamentError::NoPayerRecord);
    }

    lifecycle::unregister_player(db, op.tournament_id, payer, op.player_account_id)
}
