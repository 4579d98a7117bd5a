//! The tournament state machine.
//!
//! Five states, four events, and a transition function that runs entry
//! actions as states are entered. Events arrive synchronously from the
//! host's block-processing loop; an event the current state does not handle
//! is dropped (the host is expected never to produce one).

use crate::bracket;
use crate::db::Database;
use crate::error::{Result, TournamentError};
use crate::events::{self, Event};
use crate::ops::operation::{Operation, TournamentPayoutOperation};
use crate::rng::HashCtrRng;
use crate::state::object::{AccountId, TournamentId};
use crate::state::tournament::{AssetAmount, TournamentState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentEvent {
    PlayerRegistered { payer: AccountId, player: AccountId },
    RegistrationDeadlinePassed,
    StartTimeArrived,
    FinalGameCompleted,
}

/// Advance one tournament's state machine by one event.
pub fn process_event(
    db: &mut Database,
    tournament_id: TournamentId,
    event: TournamentEvent,
) -> Result<()> {
    let state = db.tournament(tournament_id)?.state;
    match (state, event) {
        (
            TournamentState::AcceptingRegistrations,
            TournamentEvent::PlayerRegistered { payer, player },
        ) => {
            register_player(db, tournament_id, payer, player)?;
            let tournament = db.tournament(tournament_id)?;
            if tournament.registered_players == tournament.options.number_of_players {
                enter_awaiting_start(db, tournament_id)?;
            }
            Ok(())
        }
        (
            TournamentState::AcceptingRegistrations,
            TournamentEvent::RegistrationDeadlinePassed,
        ) => enter_registration_period_expired(db, tournament_id),
        (TournamentState::AwaitingStart, TournamentEvent::StartTimeArrived) => {
            enter_in_progress(db, tournament_id)
        }
        (TournamentState::InProgress, TournamentEvent::FinalGameCompleted) => {
            enter_concluded(db, tournament_id)
        }
        (state, event) => {
            log::warn!(
                "Tournament {:?}: dropping event {:?} in state {:?}",
                tournament_id,
                event,
                state
            );
            Ok(())
        }
    }
}

/// Debit the payer, record the contribution, and seat the player. The debit
/// comes first so a failed buy-in leaves no partial registration behind.
fn register_player(
    db: &mut Database,
    tournament_id: TournamentId,
    payer: AccountId,
    player: AccountId,
) -> Result<()> {
    log::debug!(
        "Tournament {:?}: registering player {:?}, paid by {:?}",
        tournament_id,
        player,
        payer
    );
    let tournament = db.tournament(tournament_id)?;
    let details_id = tournament.details_id;
    let buy_in = tournament.options.buy_in;

    let debit = i64::try_from(buy_in.amount).map_err(|_| TournamentError::MathOverflow)?;
    db.adjust_balance(payer, buy_in.asset_id, -debit)?;

    db.modify_details(details_id, |details| -> Result<()> {
        if buy_in.amount > 0 {
            let contributed = details.payers.entry(payer).or_insert(0);
            *contributed = contributed
                .checked_add(buy_in.amount)
                .ok_or(TournamentError::MathOverflow)?;
        }
        details.registered_players.insert(player);
        Ok(())
    })??;
    let (prize_pool, registered_players) =
        db.modify_tournament(tournament_id, |t| -> Result<(u64, u32)> {
            t.registered_players += 1;
            t.prize_pool = t
                .prize_pool
                .checked_add(buy_in.amount)
                .ok_or(TournamentError::MathOverflow)?;
            Ok((t.prize_pool, t.registered_players))
        })??;

    db.push_event(Event::PlayerRegistered(events::PlayerRegistered {
        tournament_id,
        payer,
        player,
        buy_in: buy_in.amount,
        prize_pool,
        registered_players,
    }));
    Ok(())
}

/// Undo one registration: unseat the player, release the payer's
/// contribution, and shrink the pool. The caller has already verified the
/// payer entry covers one buy-in.
pub fn unregister_player(
    db: &mut Database,
    tournament_id: TournamentId,
    payer: AccountId,
    player: AccountId,
) -> Result<()> {
    let tournament = db.tournament(tournament_id)?;
    let details_id = tournament.details_id;
    let buy_in = tournament.options.buy_in;

    db.modify_details(details_id, |details| -> Result<()> {
        details.registered_players.remove(&player);
        if buy_in.amount > 0 {
            let contributed = details
                .payers
                .get_mut(&payer)
                .ok_or(TournamentError::NoPayerRecord)?;
            *contributed = contributed
                .checked_sub(buy_in.amount)
                .ok_or(TournamentError::NoPayerRecord)?;
            if *contributed == 0 {
                details.payers.remove(&payer);
            }
        }
        Ok(())
    })??;
    db.modify_tournament(tournament_id, |t| -> Result<()> {
        t.registered_players = t
            .registered_players
            .checked_sub(1)
            .ok_or(TournamentError::MathOverflow)?;
        t.prize_pool = t
            .prize_pool
            .checked_sub(buy_in.amount)
            .ok_or(TournamentError::MathOverflow)?;
        Ok(())
    })??;

    let credit = i64::try_from(buy_in.amount).map_err(|_| TournamentError::MathOverflow)?;
    db.adjust_balance(payer, buy_in.asset_id, credit)?;

    db.push_event(Event::PlayerUnregistered(events::PlayerUnregistered {
        tournament_id,
        player,
        refunded_payer: payer,
        amount: buy_in.amount,
    }));
    Ok(())
}

fn enter_awaiting_start(db: &mut Database, tournament_id: TournamentId) -> Result<()> {
    log::info!(
        "Tournament {:?} now has enough players registered to begin",
        tournament_id
    );
    let now = db.head_block_time();
    db.modify_tournament(tournament_id, |t| {
        t.state = TournamentState::AwaitingStart;
        t.start_time = Some(match t.options.start_time {
            Some(at) => at,
            None => now + i64::from(t.options.start_delay.unwrap_or(0)),
        });
    })
}

/// Seed, shuffle, and lay out the whole bracket, then open the first round.
fn enter_in_progress(db: &mut Database, tournament_id: TournamentId) -> Result<()> {
    log::info!("Tournament {:?} is beginning", tournament_id);
    db.modify_tournament(tournament_id, |t| t.state = TournamentState::InProgress)?;

    let tournament = db.tournament(tournament_id)?;
    let details_id = tournament.details_id;
    let num_players = tournament.options.number_of_players;

    let mut rng = HashCtrRng::new(db.random_seed());
    let registered: Vec<AccountId> = db
        .details(details_id)?
        .registered_players
        .iter()
        .copied()
        .collect();
    let seeded_players = bracket::seeded_shuffle(&mut rng, registered);
    let paired = bracket::pair_players(num_players, &seeded_players);

    let num_rounds = bracket::rounds_for(num_players);
    let num_matches = bracket::total_matches(num_players);
    let mut matches = Vec::with_capacity(num_matches as usize);
    for _ in 0..num_matches {
        matches.push(db.create_match(tournament_id));
    }

    let now = db.head_block_time();
    let first = bracket::first_match_in_round(num_rounds, 0);
    for (i, pair) in paired.chunks(2).enumerate() {
        let players: Vec<AccountId> = pair.iter().flatten().copied().collect();
        db.modify_match(matches[first + i], |m| m.on_initiate_match(now, players))?;
    }

    db.modify_details(details_id, |details| details.matches = matches)?;
    db.push_event(Event::TournamentStarted(events::TournamentStarted {
        tournament_id,
        number_of_matches: num_matches,
    }));
    Ok(())
}

/// Give everyone who paid into the pool their money back. This releases
/// funds the payers had locked up, so it cannot fail and no transfer
/// operations are recorded; each release leaves a refund event instead.
fn enter_registration_period_expired(
    db: &mut Database,
    tournament_id: TournamentId,
) -> Result<()> {
    log::info!("Tournament {:?} is canceled", tournament_id);
    db.modify_tournament(tournament_id, |t| {
        t.state = TournamentState::RegistrationPeriodExpired;
    })?;

    let tournament = db.tournament(tournament_id)?;
    let asset_id = tournament.options.buy_in.asset_id;
    let payers: Vec<(AccountId, u64)> = db
        .details(tournament.details_id)?
        .payers
        .iter()
        .map(|(payer, amount)| (*payer, *amount))
        .collect();
    for (payer, amount) in payers {
        let credit = i64::try_from(amount).map_err(|_| TournamentError::MathOverflow)?;
        db.adjust_balance(payer, asset_id, credit)?;
        db.push_event(Event::BuyInRefunded(events::BuyInRefunded {
            tournament_id,
            payer,
            amount,
            asset_id,
        }));
    }
    Ok(())
}

/// The final is decided: close the tournament and pay the champion.
fn enter_concluded(db: &mut Database, tournament_id: TournamentId) -> Result<()> {
    let tournament = db.tournament(tournament_id)?;
    let details = db.details(tournament.details_id)?;
    let final_id = *details.matches.first().ok_or(TournamentError::MatchNotFound)?;
    let winner = db.get_match(final_id)?.winner().ok_or(TournamentError::NoWinner)?;
    let prize_pool = tournament.prize_pool;
    let asset_id = tournament.options.buy_in.asset_id;

    let now = db.head_block_time();
    db.modify_tournament(tournament_id, |t| {
        t.state = TournamentState::Concluded;
        t.end_time = Some(now);
    })?;

    let credit = i64::try_from(prize_pool).map_err(|_| TournamentError::MathOverflow)?;
    db.adjust_balance(winner, asset_id, credit)?;
    db.push_virtual_operation(Operation::TournamentPayout(TournamentPayoutOperation {
        tournament_id,
        payout_account_id: winner,
        payout_amount: AssetAmount {
            amount: prize_pool,
            asset_id,
        },
    }));
    db.push_event(Event::TournamentConcluded(events::TournamentConcluded {
        tournament_id,
        winner,
        prize_pool,
    }));
    log::info!(
        "Tournament {:?} concluded, {:?} takes the pool of {}",
        tournament_id,
        winner,
        prize_pool
    );
    Ok(())
}
