//! End-to-end lifecycle scenarios driven through the operation layer against
//! the in-memory database.

use std::collections::BTreeSet;

use tournament_engine::bracket;
use tournament_engine::db::Database;
use tournament_engine::events::Event;
use tournament_engine::lifecycle::{self, TournamentEvent};
use tournament_engine::ops::{
    self,
    operation::{
        GameMoveOperation, Operation, TournamentCreateOperation, TournamentJoinOperation,
        TournamentLeaveOperation,
    },
};
use tournament_engine::state::{
    AccountId, AssetAmount, AssetId, GameMove, MatchId, MatchState, TournamentId,
    TournamentOptions, TournamentState,
};
use tournament_engine::TournamentError;

const ASSET: AssetId = AssetId(0);
const GENESIS: i64 = 1_000;

fn options(number_of_players: u32) -> TournamentOptions {
    TournamentOptions {
        number_of_players,
        buy_in: AssetAmount {
            amount: 10,
            asset_id: ASSET,
        },
        registration_deadline: GENESIS + 1_000,
        start_time: None,
        start_delay: Some(60),
        whitelist: BTreeSet::new(),
    }
}

fn new_db() -> Database {
    let mut db = Database::new(GENESIS);
    for account in 1..=16 {
        db.adjust_balance(AccountId(account), ASSET, 100).unwrap();
    }
    db
}

fn create(db: &mut Database, creator: u64, opts: TournamentOptions) -> TournamentId {
    ops::create_tournament::handle(
        db,
        &TournamentCreateOperation {
            creator: AccountId(creator),
            options: opts,
        },
    )
    .unwrap()
}

fn join(db: &mut Database, tournament_id: TournamentId, payer: u64, player: u64) {
    try_join(db, tournament_id, payer, player).unwrap();
}

fn try_join(
    db: &mut Database,
    tournament_id: TournamentId,
    payer: u64,
    player: u64,
) -> Result<(), TournamentError> {
    ops::join_tournament::handle(
        db,
        &TournamentJoinOperation {
            payer_account_id: AccountId(payer),
            player_account_id: AccountId(player),
            tournament_id,
        },
    )
}

fn leave(
    db: &mut Database,
    tournament_id: TournamentId,
    canceling: u64,
    player: u64,
) -> Result<(), TournamentError> {
    ops::leave_tournament::handle(
        db,
        &TournamentLeaveOperation {
            canceling_account_id: AccountId(canceling),
            player_account_id: AccountId(player),
            tournament_id,
        },
    )
}

fn game_move(
    db: &mut Database,
    tournament_id: TournamentId,
    match_id: MatchId,
    player: AccountId,
    game_move: GameMove,
) {
    ops::game_move::handle(
        db,
        &GameMoveOperation {
            tournament_id,
            match_id,
            player_account_id: player,
            game_move,
        },
    )
    .unwrap();
}

/// Drive a two-player match to completion with `players[0]` winning.
fn win_match(db: &mut Database, tournament_id: TournamentId, match_id: MatchId) -> AccountId {
    let players = db.get_match(match_id).unwrap().players.clone();
    assert_eq!(players.len(), 2);
    game_move(db, tournament_id, match_id, players[0], GameMove::Rock);
    game_move(db, tournament_id, match_id, players[1], GameMove::Scissors);
    players[0]
}

fn start(db: &mut Database, tournament_id: TournamentId) {
    let start_time = db.tournament(tournament_id).unwrap().start_time.unwrap();
    db.advance_block(start_time, [0; 32]);
    lifecycle::process_event(db, tournament_id, TournamentEvent::StartTimeArrived).unwrap();
}

fn check_invariants(db: &Database, tournament_id: TournamentId) {
    let tournament = db.tournament(tournament_id).unwrap();
    let details = db.details(tournament.details_id).unwrap();
    assert_eq!(
        tournament.registered_players as usize,
        details.registered_players.len()
    );
    assert!(tournament.registered_players <= tournament.options.number_of_players);
    assert_eq!(tournament.prize_pool, details.total_contributions());
    assert_eq!(
        tournament.prize_pool,
        u64::from(tournament.registered_players) * tournament.options.buy_in.amount
    );
    assert!(details.payers.values().all(|amount| *amount > 0));
    if tournament.state == TournamentState::InProgress {
        assert_eq!(
            details.matches.len() as u32,
            bracket::total_matches(tournament.options.number_of_players)
        );
    }
}

#[test]
fn four_player_happy_path() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(4));

    for player in 1..=4 {
        join(&mut db, tournament_id, player, player);
        check_invariants(&db, tournament_id);
    }

    let tournament = db.tournament(tournament_id).unwrap();
    assert_eq!(tournament.state, TournamentState::AwaitingStart);
    assert_eq!(tournament.prize_pool, 40);
    assert_eq!(tournament.start_time, Some(GENESIS + 60));

    start(&mut db, tournament_id);
    let tournament = db.tournament(tournament_id).unwrap();
    assert_eq!(tournament.state, TournamentState::InProgress);
    let details = db.details(tournament.details_id).unwrap();
    assert_eq!(details.matches.len(), 3);
    check_invariants(&db, tournament_id);

    // zero seed shuffles sorted [1,2,3,4] into [3,2,4,1]; seeding slots then
    // pair 3 vs 1 and 2 vs 4
    let semifinal_one = db.get_match(details.matches[1]).unwrap();
    assert_eq!(semifinal_one.players, vec![AccountId(3), AccountId(1)]);
    assert_eq!(semifinal_one.state, MatchState::InProgress);
    let semifinal_two = db.get_match(details.matches[2]).unwrap();
    assert_eq!(semifinal_two.players, vec![AccountId(2), AccountId(4)]);
    let final_match = db.get_match(details.matches[0]).unwrap();
    assert_eq!(final_match.state, MatchState::WaitingOnPreviousMatches);
    assert!(final_match.players.is_empty());
}

#[test]
fn four_player_tournament_runs_to_payout() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(4));
    for player in 1..=4 {
        join(&mut db, tournament_id, player, player);
    }
    start(&mut db, tournament_id);

    let matches = db.details_of(tournament_id).unwrap().matches.clone();
    let first_winner = win_match(&mut db, tournament_id, matches[1]);
    // the other semifinal still blocks the final
    assert_eq!(
        db.get_match(matches[0]).unwrap().state,
        MatchState::WaitingOnPreviousMatches
    );
    let second_winner = win_match(&mut db, tournament_id, matches[2]);

    let final_match = db.get_match(matches[0]).unwrap();
    assert_eq!(final_match.state, MatchState::InProgress);
    assert_eq!(final_match.players, vec![first_winner, second_winner]);

    let champion = win_match(&mut db, tournament_id, matches[0]);
    let tournament = db.tournament(tournament_id).unwrap();
    assert_eq!(tournament.state, TournamentState::Concluded);
    assert_eq!(tournament.end_time, Some(db.head_block_time()));

    // 100 initial, minus 10 buy-in, plus the 40 pool
    assert_eq!(db.balance(champion, ASSET), 130);

    let payout = db
        .history()
        .iter()
        .find_map(|op| match op {
            Operation::TournamentPayout(payout) => Some(payout),
            _ => None,
        })
        .expect("payout recorded in history");
    assert_eq!(payout.payout_account_id, champion);
    assert_eq!(payout.payout_amount.amount, 40);

    assert!(db
        .events()
        .iter()
        .any(|event| matches!(event, Event::TournamentConcluded(e) if e.winner == champion)));

    // no further play in a concluded tournament
    let result = ops::game_move::handle(
        &mut db,
        &GameMoveOperation {
            tournament_id,
            match_id: matches[0],
            player_account_id: champion,
            game_move: GameMove::Rock,
        },
    );
    assert_eq!(result, Err(TournamentError::TournamentNotInProgress));
}

#[test]
fn three_player_bracket_gives_the_top_slot_a_bye() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(3));
    for player in 1..=3 {
        join(&mut db, tournament_id, player, player);
    }
    start(&mut db, tournament_id);

    // zero seed shuffles sorted [1,2,3] into [2,3,1]: slot layout
    // [2, bye, 3, 1], so 2 advances unopposed while 3 plays 1
    let matches = db.details_of(tournament_id).unwrap().matches.clone();
    assert_eq!(matches.len(), 3);

    let bye_match = db.get_match(matches[1]).unwrap();
    assert_eq!(bye_match.players, vec![AccountId(2)]);
    assert_eq!(bye_match.state, MatchState::MatchComplete);
    assert_eq!(bye_match.winner(), Some(AccountId(2)));

    let played_match = db.get_match(matches[2]).unwrap();
    assert_eq!(played_match.players, vec![AccountId(3), AccountId(1)]);
    assert_eq!(played_match.state, MatchState::InProgress);

    // finishing the played semifinal seats the final with both winners
    let winner = win_match(&mut db, tournament_id, matches[2]);
    let final_match = db.get_match(matches[0]).unwrap();
    assert_eq!(final_match.players, vec![AccountId(2), winner]);
    assert_eq!(final_match.state, MatchState::InProgress);

    let champion = win_match(&mut db, tournament_id, matches[0]);
    assert_eq!(champion, AccountId(2));
    assert_eq!(
        db.tournament(tournament_id).unwrap().state,
        TournamentState::Concluded
    );
}

#[test]
fn two_player_bracket_is_a_single_final() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(2));
    join(&mut db, tournament_id, 1, 1);
    join(&mut db, tournament_id, 2, 2);
    start(&mut db, tournament_id);

    let matches = db.details_of(tournament_id).unwrap().matches.clone();
    assert_eq!(matches.len(), 1);
    let final_match = db.get_match(matches[0]).unwrap();
    assert_eq!(final_match.players.len(), 2);
    assert_eq!(final_match.state, MatchState::InProgress);

    win_match(&mut db, tournament_id, matches[0]);
    assert_eq!(
        db.tournament(tournament_id).unwrap().state,
        TournamentState::Concluded
    );
}

#[test]
fn eight_player_round_promotion_fills_a_whole_round_at_once() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(8));
    for player in 1..=8 {
        join(&mut db, tournament_id, player, player);
    }
    start(&mut db, tournament_id);

    let matches = db.details_of(tournament_id).unwrap().matches.clone();
    assert_eq!(matches.len(), 7);

    // first round sits at indices 3..7; complete three of its four matches
    let mut winners = Vec::new();
    for index in 3..6 {
        winners.push(win_match(&mut db, tournament_id, matches[index]));
        assert_eq!(
            db.get_match(matches[1]).unwrap().state,
            MatchState::WaitingOnPreviousMatches
        );
        assert_eq!(
            db.get_match(matches[2]).unwrap().state,
            MatchState::WaitingOnPreviousMatches
        );
    }

    // the fourth completion promotes the full semifinal round
    winners.push(win_match(&mut db, tournament_id, matches[6]));
    let semifinal_one = db.get_match(matches[1]).unwrap();
    assert_eq!(semifinal_one.players, vec![winners[0], winners[1]]);
    assert_eq!(semifinal_one.state, MatchState::InProgress);
    let semifinal_two = db.get_match(matches[2]).unwrap();
    assert_eq!(semifinal_two.players, vec![winners[2], winners[3]]);
    assert_eq!(semifinal_two.state, MatchState::InProgress);
    assert!(db.get_match(matches[0]).unwrap().players.is_empty());
}

#[test]
fn expired_registration_refunds_every_payer() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(4));
    join(&mut db, tournament_id, 1, 1);
    join(&mut db, tournament_id, 2, 5); // payer 2 backs player 5
    assert_eq!(db.balance(AccountId(1), ASSET), 90);
    assert_eq!(db.balance(AccountId(2), ASSET), 90);

    db.advance_block(GENESIS + 1_001, [0; 32]);
    lifecycle::process_event(
        &mut db,
        tournament_id,
        TournamentEvent::RegistrationDeadlinePassed,
    )
    .unwrap();

    let tournament = db.tournament(tournament_id).unwrap();
    assert_eq!(tournament.state, TournamentState::RegistrationPeriodExpired);
    assert_eq!(db.balance(AccountId(1), ASSET), 100);
    assert_eq!(db.balance(AccountId(2), ASSET), 100);

    let refunds: Vec<_> = db
        .events()
        .iter()
        .filter(|event| matches!(event, Event::BuyInRefunded(_)))
        .collect();
    assert_eq!(refunds.len(), 2);

    // the object is frozen: no further registrations or leaves
    assert_eq!(
        try_join(&mut db, tournament_id, 3, 3),
        Err(TournamentError::RegistrationClosed)
    );
    assert_eq!(
        leave(&mut db, tournament_id, 1, 1),
        Err(TournamentError::RegistrationClosed)
    );
}

#[test]
fn join_then_leave_restores_everything() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(4));

    let details_before = db.details_of(tournament_id).unwrap().clone();
    let tournament_before = db.tournament(tournament_id).unwrap().clone();

    // player paying for themselves
    join(&mut db, tournament_id, 2, 2);
    // payer backing someone else, canceled by the payer
    join(&mut db, tournament_id, 3, 7);
    check_invariants(&db, tournament_id);

    leave(&mut db, tournament_id, 2, 2).unwrap();
    leave(&mut db, tournament_id, 3, 7).unwrap();

    assert_eq!(db.details_of(tournament_id).unwrap(), &details_before);
    assert_eq!(db.tournament(tournament_id).unwrap(), &tournament_before);
    assert_eq!(db.balance(AccountId(2), ASSET), 100);
    assert_eq!(db.balance(AccountId(3), ASSET), 100);
}

#[test]
fn leave_rejects_strangers_and_unknown_payers() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(4));
    join(&mut db, tournament_id, 2, 2);
    join(&mut db, tournament_id, 3, 7);

    // account 9 never paid and is not the player
    assert_eq!(
        leave(&mut db, tournament_id, 9, 2),
        Err(TournamentError::NotPlayerOrPayer)
    );
    // player 7 cancels their own seat but holds no payer entry
    assert_eq!(
        leave(&mut db, tournament_id, 7, 7),
        Err(TournamentError::NoPayerRecord)
    );
    // nothing changed
    check_invariants(&db, tournament_id);
    assert_eq!(db.tournament(tournament_id).unwrap().registered_players, 2);

    assert_eq!(
        leave(&mut db, tournament_id, 2, 5),
        Err(TournamentError::PlayerNotRegistered)
    );
}

#[test]
fn registration_preconditions_hold() {
    let mut db = new_db();
    let mut opts = options(4);
    opts.whitelist = (1..=4).map(AccountId).collect();
    let tournament_id = create(&mut db, 1, opts);

    join(&mut db, tournament_id, 1, 1);
    assert_eq!(
        try_join(&mut db, tournament_id, 1, 1),
        Err(TournamentError::AlreadyRegistered)
    );
    assert_eq!(
        try_join(&mut db, tournament_id, 9, 9),
        Err(TournamentError::NotWhitelisted)
    );

    // a payer with an empty pocket leaves no partial registration
    db.adjust_balance(AccountId(2), ASSET, -100).unwrap();
    assert_eq!(
        try_join(&mut db, tournament_id, 2, 2),
        Err(TournamentError::InsufficientFunds)
    );
    check_invariants(&db, tournament_id);
    assert_eq!(db.tournament(tournament_id).unwrap().registered_players, 1);

    db.advance_block(GENESIS + 1_001, [0; 32]);
    assert_eq!(
        try_join(&mut db, tournament_id, 3, 3),
        Err(TournamentError::RegistrationDeadlinePassed)
    );
}

#[test]
fn absolute_start_time_is_honored() {
    let mut db = new_db();
    let mut opts = options(2);
    opts.start_time = Some(GENESIS + 500);
    opts.start_delay = None;
    let tournament_id = create(&mut db, 1, opts);
    join(&mut db, tournament_id, 1, 1);
    join(&mut db, tournament_id, 2, 2);
    assert_eq!(
        db.tournament(tournament_id).unwrap().start_time,
        Some(GENESIS + 500)
    );
}

#[test]
fn unhandled_events_are_dropped() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(4));
    join(&mut db, tournament_id, 1, 1);

    lifecycle::process_event(&mut db, tournament_id, TournamentEvent::StartTimeArrived).unwrap();
    lifecycle::process_event(&mut db, tournament_id, TournamentEvent::FinalGameCompleted)
        .unwrap();
    let tournament = db.tournament(tournament_id).unwrap();
    assert_eq!(tournament.state, TournamentState::AcceptingRegistrations);
    assert_eq!(tournament.registered_players, 1);
}

#[test]
fn identical_seeds_build_identical_brackets() {
    let mut pairings = Vec::new();
    for _ in 0..2 {
        let mut db = new_db();
        let tournament_id = create(&mut db, 1, options(8));
        for player in 1..=8 {
            join(&mut db, tournament_id, player, player);
        }
        let start_time = db.tournament(tournament_id).unwrap().start_time.unwrap();
        db.advance_block(start_time, [0xab; 32]);
        lifecycle::process_event(&mut db, tournament_id, TournamentEvent::StartTimeArrived)
            .unwrap();

        let matches = db.details_of(tournament_id).unwrap().matches.clone();
        let players: Vec<_> = matches
            .iter()
            .map(|id| db.get_match(*id).unwrap().players.clone())
            .collect();
        pairings.push(players);
    }
    assert_eq!(pairings[0], pairings[1]);
}

#[test]
fn serialized_tournaments_round_trip() {
    let mut db = new_db();
    let tournament_id = create(&mut db, 1, options(3));
    for player in 1..=3 {
        join(&mut db, tournament_id, player, player);
    }
    start(&mut db, tournament_id);

    let tournament = db.tournament(tournament_id).unwrap().clone();
    let encoded = borsh::to_vec(&tournament).unwrap();
    let decoded: tournament_engine::state::Tournament =
        borsh::BorshDeserialize::try_from_slice(&encoded).unwrap();
    assert_eq!(decoded, tournament);
    assert_eq!(decoded.state, TournamentState::InProgress);

    let details = db.details_of(tournament_id).unwrap().clone();
    let encoded = borsh::to_vec(&details).unwrap();
    let decoded: tournament_engine::state::TournamentDetails =
        borsh::BorshDeserialize::try_from_slice(&encoded).unwrap();
    assert_eq!(decoded, details);

    let game_match = db.get_match(details.matches[2]).unwrap().clone();
    let json = serde_json::to_string(&game_match).unwrap();
    let decoded: tournament_engine::state::Match = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, game_match);
}
