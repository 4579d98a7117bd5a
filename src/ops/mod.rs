pub mod authority;
pub mod create_tournament;
pub mod game_move;
pub mod join_tournament;
pub mod leave_tournament;
pub mod operation;

pub use authority::*;
pub use operation::*;

use crate::db::Database;
use crate::error::{Result, TournamentError};

/// Route a signed operation to its evaluator. Anything this engine does not
/// consume is rejected; virtual operations never arrive here.
pub fn apply(db: &mut Database, op: &Operation) -> Result<()> {
    match op {
        Operation::TournamentCreate(op) => create_tournament::handle(db, op).map(|_| ()),
        Operation::TournamentJoin(op) => join_tournament::handle(db, op),
        Operation::TournamentLeave(op) => leave_tournament::handle(db, op),
        Operation::GameMove(op) => game_move::handle(db, op),
        _ => Err(TournamentError::UnsupportedOperation),
    }
}
