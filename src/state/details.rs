use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::state::object::{AccountId, MatchId, TournamentDetailsId, TournamentId};

/// The bulk of a tournament's state, split off the overview object.
///
/// `registered_players` iterates in sorted order; that order is the
/// canonical input to the seeding shuffle.
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentDetails {
    pub id: TournamentDetailsId,
    pub tournament_id: TournamentId,
    /// Players registered for this tournament.
    pub registered_players: BTreeSet<AccountId>,
    /// Who contributed to the prize pool, and how much. A payer backing
    /// several players carries a multiple of the buy-in; entries are never
    /// zero.
    pub payers: BTreeMap<AccountId, u64>,
    /// The flat bracket, final first; empty until play begins.
    pub matches: Vec<MatchId>,
}

impl TournamentDetails {
    pub fn new(id: TournamentDetailsId, tournament_id: TournamentId) -> Self {
        Self {
            id,
            tournament_id,
            registered_players: BTreeSet::new(),
            payers: BTreeMap::new(),
            matches: Vec::new(),
        }
    }

    pub fn total_contributions(&self) -> u64 {
        self.payers.values().sum()
    }
}
