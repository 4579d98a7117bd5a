use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, TournamentError};
use crate::require;
use crate::state::object::{AccountId, MatchId, TournamentId};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum GameMove {
    Rock,
    Paper,
    Scissors,
}

impl GameMove {
    fn beats(self, other: GameMove) -> bool {
        matches!(
            (self, other),
            (GameMove::Rock, GameMove::Scissors)
                | (GameMove::Scissors, GameMove::Paper)
                | (GameMove::Paper, GameMove::Rock)
        )
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum MatchState {
    WaitingOnPreviousMatches,
    InProgress,
    MatchComplete,
}

/// One node of the bracket.
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 0 before the feeding matches resolve, 1 for a bye, 2 otherwise.
    pub players: Vec<AccountId>,
    /// Moves submitted for the game in play; cleared on a tie.
    pub game_moves: BTreeMap<AccountId, GameMove>,
    /// Empty until the match completes, then exactly one entry.
    pub match_winners: BTreeSet<AccountId>,
    pub state: MatchState,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl Match {
    pub fn new(id: MatchId, tournament_id: TournamentId) -> Self {
        Self {
            id,
            tournament_id,
            players: Vec::new(),
            game_moves: BTreeMap::new(),
            match_winners: BTreeSet::new(),
            state: MatchState::WaitingOnPreviousMatches,
            start_time: None,
            end_time: None,
        }
    }

    /// Hand the match its players. A single player is a bye: the match
    /// completes on the spot with that player as winner.
    pub fn on_initiate_match(&mut self, now: i64, players: Vec<AccountId>) {
        debug_assert_eq!(self.state, MatchState::WaitingOnPreviousMatches);
        debug_assert!(!players.is_empty() && players.len() <= 2);
        self.players = players;
        self.start_time = Some(now);
        if self.players.len() == 1 {
            self.match_winners.insert(self.players[0]);
            self.state = MatchState::MatchComplete;
            self.end_time = Some(now);
        } else {
            self.state = MatchState::InProgress;
        }
    }

    /// Record one player's move. Returns `true` when this move completed the
    /// match; a tied game clears both moves and the match plays again.
    pub fn on_game_move(
        &mut self,
        now: i64,
        player: AccountId,
        game_move: GameMove,
    ) -> Result<bool> {
        require!(
            self.state == MatchState::InProgress,
            TournamentError::MatchNotInProgress
        );
        require!(
            self.players.contains(&player),
            TournamentError::PlayerNotInMatch
        );
        require!(
            !self.game_moves.contains_key(&player),
            TournamentError::MoveAlreadySubmitted
        );
        self.game_moves.insert(player, game_move);
        if self.game_moves.len() < self.players.len() {
            return Ok(false);
        }

        let (first, second) = (self.players[0], self.players[1]);
        let (first_move, second_move) = (self.game_moves[&first], self.game_moves[&second]);
        let winner = if first_move.beats(second_move) {
            Some(first)
        } else if second_move.beats(first_move) {
            Some(second)
        } else {
            None
        };
        match winner {
            Some(winner) => {
                self.match_winners.insert(winner);
                self.state = MatchState::MatchComplete;
                self.end_time = Some(now);
                Ok(true)
            }
            None => {
                self.game_moves.clear();
                Ok(false)
            }
        }
    }

    pub fn winner(&self) -> Option<AccountId> {
        self.match_winners.iter().next().copied()
    }
}
