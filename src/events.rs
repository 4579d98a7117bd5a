//! Event records the engine appends as side effects land. The host streams
//! them to subscribers alongside its own block events.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::state::object::{AccountId, AssetId, TournamentId};

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentCreated {
    pub tournament_id: TournamentId,
    pub creator: AccountId,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct PlayerRegistered {
    pub tournament_id: TournamentId,
    pub payer: AccountId,
    pub player: AccountId,
    pub buy_in: u64,
    pub prize_pool: u64,
    pub registered_players: u32,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct PlayerUnregistered {
    pub tournament_id: TournamentId,
    pub player: AccountId,
    pub refunded_payer: AccountId,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentStarted {
    pub tournament_id: TournamentId,
    pub number_of_matches: u32,
}

/// A buy-in released back to its payer after the registration period lapsed.
/// This is the unlocking of held funds, not a transfer.
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct BuyInRefunded {
    pub tournament_id: TournamentId,
    pub payer: AccountId,
    pub amount: u64,
    pub asset_id: AssetId,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentConcluded {
    pub tournament_id: TournamentId,
    pub winner: AccountId,
    pub prize_pool: u64,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub enum Event {
    TournamentCreated(TournamentCreated),
    PlayerRegistered(PlayerRegistered),
    PlayerUnregistered(PlayerUnregistered),
    TournamentStarted(TournamentStarted),
    BuyInRefunded(BuyInRefunded),
    TournamentConcluded(TournamentConcluded),
}
