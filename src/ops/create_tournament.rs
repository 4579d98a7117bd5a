use crate::db::Database;
use crate::error::Result;
use crate::events::{self, Event};
use crate::ops::operation::TournamentCreateOperation;
use crate::state::object::TournamentId;

/// Open a new tournament for registration.
pub fn handle(db: &mut Database, op: &TournamentCreateOperation) -> Result<TournamentId> {
    op.options.validate(db.head_block_time())?;

    let tournament_id = db.create_tournament(op.creator, op.options.clone());
    log::info!(
        "Tournament {:?} created by {:?} for {} players",
        tournament_id,
        op.creator,
        op.options.number_of_players
    );
    db.push_event(Event::TournamentCreated(events::TournamentCreated {
        tournament_id,
        creator: op.creator,
    }));
    Ok(tournament_id)
}
