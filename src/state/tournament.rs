use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::*;
use crate::error::{Result, TournamentError};
use crate::require;
use crate::state::object::{AccountId, AssetId, TournamentDetailsId, TournamentId};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize,
    Deserialize,
)]
pub struct AssetAmount {
    pub amount: u64,
    pub asset_id: AssetId,
}

/// Everything fixed at creation time.
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentOptions {
    pub number_of_players: u32,
    /// Locked by the payer for each registered player; returned on expiry.
    pub buy_in: AssetAmount,
    pub registration_deadline: i64,
    /// Absolute start time. Mutually exclusive with `start_delay`.
    pub start_time: Option<i64>,
    /// Seconds after full registration. Mutually exclusive with `start_time`.
    pub start_delay: Option<u32>,
    /// Accounts allowed to register; empty means open registration.
    pub whitelist: BTreeSet<AccountId>,
}

impl TournamentOptions {
    pub fn validate(&self, now: i64) -> Result<()> {
        require!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&self.number_of_players),
            TournamentError::InvalidPlayerCount
        );
        require!(
            self.whitelist.is_empty()
                || self.whitelist.len() >= self.number_of_players as usize,
            TournamentError::WhitelistTooSmall
        );
        require!(
            self.registration_deadline > now,
            TournamentError::RegistrationDeadlineInPast
        );
        match (self.start_time, self.start_delay) {
            (Some(_), Some(_)) => return Err(TournamentError::ConflictingStartCondition),
            (None, None) => return Err(TournamentError::MissingStartCondition),
            (Some(start_time), None) => {
                require!(start_time > now, TournamentError::StartTimeInPast);
                require!(
                    start_time <= now + MAX_START_TIME_IN_FUTURE,
                    TournamentError::StartTimeTooFarInFuture
                );
            }
            (None, Some(start_delay)) => {
                require!(
                    start_delay > 0 && start_delay <= MAX_START_DELAY,
                    TournamentError::InvalidStartDelay
                );
            }
        }
        Ok(())
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum TournamentState {
    AcceptingRegistrations,    // taking buy-ins
    AwaitingStart,             // full; waiting for the start time
    InProgress,                // bracket play underway
    RegistrationPeriodExpired, // deadline hit before filling; buy-ins refunded
    Concluded,                 // champion paid out
}

/// The at-a-glance view of a tournament. Everything only participants care
/// about lives in [`TournamentDetails`](crate::state::TournamentDetails).
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub creator: AccountId,
    pub options: TournamentOptions,
    /// Set when the field fills; the moment play begins once it arrives.
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    /// Sum of all payer contributions; equals
    /// `registered_players * buy_in.amount`.
    pub prize_pool: u64,
    /// Duplicated from the details object so overview reads stay cheap.
    pub registered_players: u32,
    pub details_id: TournamentDetailsId,
    pub state: TournamentState,
}
