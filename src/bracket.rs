//! Bracket construction for single-elimination play.
//!
//! The bracket is a complete binary tree stored as a flat array with the
//! final at index 0 and the first round at the highest indices. Round `r`
//! (0 = first round) occupies `[2^(R-r-1) - 1, 2^(R-r) - 1)`, and the
//! children of the match at index `m` sit at `2m+1` and `2m+2`.
//!
//! First-round slots are assigned by reflected-Gray-code bit reversal, which
//! yields the standard seeded layout: the top seed meets the bottom seed
//! (often a bye) in the top half, the second seed lands in the opposite
//! half, and byes never meet each other.

use crate::rng::HashCtrRng;
use crate::state::AccountId;

/// Number of rounds needed for `num_players` entrants: `floor(log2(N-1)) + 1`.
pub fn rounds_for(num_players: u32) -> u32 {
    debug_assert!(num_players >= 2);
    32 - (num_players - 1).leading_zeros()
}

/// Total matches in the bracket: `2^R - 1`.
pub fn total_matches(num_players: u32) -> u32 {
    (1 << rounds_for(num_players)) - 1
}

pub fn matches_in_round(num_rounds: u32, round: u32) -> usize {
    1 << (num_rounds - round - 1)
}

pub fn first_match_in_round(num_rounds: u32, round: u32) -> usize {
    matches_in_round(num_rounds, round) - 1
}

pub fn child_indices(parent: usize) -> (usize, usize) {
    (2 * parent + 1, 2 * parent + 2)
}

/// Five-stage bitwise reversal of a 32-bit word.
pub fn reverse_bits32(x: u32) -> u32 {
    let x = ((x & 0xaaaa_aaaa) >> 1) | ((x & 0x5555_5555) << 1);
    let x = ((x & 0xcccc_cccc) >> 2) | ((x & 0x3333_3333) << 2);
    let x = ((x & 0xf0f0_f0f0) >> 4) | ((x & 0x0f0f_0f0f) << 4);
    let x = ((x & 0xff00_ff00) >> 8) | ((x & 0x00ff_00ff) << 8);
    (x >> 16) | (x << 16)
}

/// First-round slot for the player holding seed `player_num`.
pub fn seeding_position(player_num: u32, num_rounds: u32) -> u32 {
    let gray = player_num ^ (player_num >> 1);
    reverse_bits32(gray) >> (32 - num_rounds)
}

/// Lay the seeded players out into first-round slots; `None` slots are byes.
///
/// Slots pair off by twos: slots `2i` and `2i+1` feed first-round match `i`.
pub fn pair_players(num_players: u32, seeded: &[AccountId]) -> Vec<Option<AccountId>> {
    debug_assert_eq!(seeded.len(), num_players as usize);
    let num_rounds = rounds_for(num_players);
    let mut paired = vec![None; matches_in_round(num_rounds, 0) * 2];
    for (player_num, player) in seeded.iter().enumerate() {
        let position = seeding_position(player_num as u32, num_rounds);
        paired[position as usize] = Some(*player);
    }
    paired
}

/// Fisher–Yates shuffle driven by the consensus RNG.
///
/// The input order is the canonical (sorted) registration order; were
/// entrants ranked by skill, the strongest would go in front.
pub fn seeded_shuffle(rng: &mut HashCtrRng, mut players: Vec<AccountId>) -> Vec<AccountId> {
    for i in (1..players.len()).rev() {
        let j = rng.next(i as u32 + 1) as usize;
        players.swap(i, j);
    }
    players
}
