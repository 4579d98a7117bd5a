//! Minimal in-memory host database.
//!
//! The engine mutates chain state only through this interface: object
//! creation and modification feed an undo journal whose head checkpoint
//! drives change notifications, and balance adjustments either apply fully
//! or fail without touching anything. A consensus node embeds the engine by
//! substituting its own database behind the same surface.

use std::collections::BTreeMap;

use crate::error::{Result, TournamentError};
use crate::events::Event;
use crate::ops::operation::Operation;
use crate::require;
use crate::state::details::TournamentDetails;
use crate::state::game_match::Match;
use crate::state::object::{
    AccountId, AssetId, MatchId, ObjectId, StoredObject, TournamentDetailsId, TournamentId,
    SPACE_PROTOCOL, TYPE_MATCH, TYPE_TOURNAMENT, TYPE_TOURNAMENT_DETAILS,
};
use crate::state::tournament::{Tournament, TournamentOptions, TournamentState};

/// Per-block consensus values the engine reads.
#[derive(Clone, Debug)]
pub struct DynamicGlobalProperties {
    pub head_block_time: i64,
    /// Per-block entropy; seeds the shuffle when a tournament starts.
    pub random: [u8; 32],
}

/// One committed checkpoint's worth of object changes.
#[derive(Clone, Debug, Default)]
pub struct UndoJournal {
    pub new_ids: Vec<ObjectId>,
    /// Pre-images of objects modified this checkpoint.
    pub old_values: BTreeMap<ObjectId, StoredObject>,
    /// Pre-images of objects removed this checkpoint.
    pub removed: BTreeMap<ObjectId, StoredObject>,
}

impl UndoJournal {
    pub fn is_empty(&self) -> bool {
        self.new_ids.is_empty() && self.old_values.is_empty() && self.removed.is_empty()
    }
}

pub struct Database {
    dgp: DynamicGlobalProperties,
    balances: BTreeMap<(AccountId, AssetId), u64>,
    tournaments: BTreeMap<TournamentId, Tournament>,
    details: BTreeMap<TournamentDetailsId, TournamentDetails>,
    matches: BTreeMap<MatchId, Match>,
    /// Objects owned by other subsystems, tracked for indexing only.
    extras: BTreeMap<ObjectId, StoredObject>,
    next_tournament: u64,
    next_details: u64,
    next_match: u64,
    undo: UndoJournal,
    history: Vec<Operation>,
    events: Vec<Event>,
}

impl Database {
    pub fn new(genesis_time: i64) -> Self {
        Self {
            dgp: DynamicGlobalProperties {
                head_block_time: genesis_time,
                random: [0; 32],
            },
            balances: BTreeMap::new(),
            tournaments: BTreeMap::new(),
            details: BTreeMap::new(),
            matches: BTreeMap::new(),
            extras: BTreeMap::new(),
            next_tournament: 0,
            next_details: 0,
            next_match: 0,
            undo: UndoJournal::default(),
            history: Vec::new(),
            events: Vec::new(),
        }
    }

    // ===== BLOCK CONTEXT =====

    pub fn head_block_time(&self) -> i64 {
        self.dgp.head_block_time
    }

    pub fn dynamic_global_properties(&self) -> &DynamicGlobalProperties {
        &self.dgp
    }

    pub fn random_seed(&self) -> [u8; 32] {
        self.dgp.random
    }

    pub fn advance_block(&mut self, head_block_time: i64, random: [u8; 32]) {
        debug_assert!(head_block_time >= self.dgp.head_block_time);
        self.dgp = DynamicGlobalProperties {
            head_block_time,
            random,
        };
    }

    // ===== BALANCES =====

    pub fn balance(&self, account: AccountId, asset_id: AssetId) -> u64 {
        self.balances
            .get(&(account, asset_id))
            .copied()
            .unwrap_or(0)
    }

    /// Apply a signed balance delta. A debit that would overdraw fails
    /// before any state changes.
    pub fn adjust_balance(
        &mut self,
        account: AccountId,
        asset_id: AssetId,
        delta: i64,
    ) -> Result<()> {
        let entry = self.balances.entry((account, asset_id)).or_insert(0);
        if delta >= 0 {
            *entry = entry
                .checked_add(delta as u64)
                .ok_or(TournamentError::MathOverflow)?;
        } else {
            let debit = delta.unsigned_abs();
            require!(*entry >= debit, TournamentError::InsufficientFunds);
            *entry -= debit;
        }
        Ok(())
    }

    // ===== OBJECT CREATION =====

    pub fn create_tournament(
        &mut self,
        creator: AccountId,
        options: TournamentOptions,
    ) -> TournamentId {
        let id = TournamentId(self.next_tournament);
        self.next_tournament += 1;
        let details_id = TournamentDetailsId(self.next_details);
        self.next_details += 1;

        self.tournaments.insert(
            id,
            Tournament {
                id,
                creator,
                options,
                start_time: None,
                end_time: None,
                prize_pool: 0,
                registered_players: 0,
                details_id,
                state: TournamentState::AcceptingRegistrations,
            },
        );
        self.details
            .insert(details_id, TournamentDetails::new(details_id, id));

        self.undo.new_ids.push(ObjectId::tournament(id));
        self.undo
            .new_ids
            .push(ObjectId::tournament_details(details_id));
        id
    }

    pub fn create_match(&mut self, tournament_id: TournamentId) -> MatchId {
        let id = MatchId(self.next_match);
        self.next_match += 1;
        self.matches.insert(id, Match::new(id, tournament_id));
        self.undo.new_ids.push(ObjectId::game_match(id));
        id
    }

    // ===== TYPED ACCESS =====

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament> {
        self.tournaments
            .get(&id)
            .ok_or(TournamentError::TournamentNotFound)
    }

    pub fn details(&self, id: TournamentDetailsId) -> Result<&TournamentDetails> {
        self.details.get(&id).ok_or(TournamentError::DetailsNotFound)
    }

    pub fn details_of(&self, tournament_id: TournamentId) -> Result<&TournamentDetails> {
        let details_id = self.tournament(tournament_id)?.details_id;
        self.details(details_id)
    }

    pub fn get_match(&self, id: MatchId) -> Result<&Match> {
        self.matches.get(&id).ok_or(TournamentError::MatchNotFound)
    }

    pub fn modify_tournament<R>(
        &mut self,
        id: TournamentId,
        mutator: impl FnOnce(&mut Tournament) -> R,
    ) -> Result<R> {
        let object_id = ObjectId::tournament(id);
        let current = self
            .tournaments
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound)?;
        record_pre_image(&mut self.undo, object_id, || {
            StoredObject::Tournament(current.clone())
        });
        Ok(mutator(current))
    }

    pub fn modify_details<R>(
        &mut self,
        id: TournamentDetailsId,
        mutator: impl FnOnce(&mut TournamentDetails) -> R,
    ) -> Result<R> {
        let object_id = ObjectId::tournament_details(id);
        let current = self
            .details
            .get_mut(&id)
            .ok_or(TournamentError::DetailsNotFound)?;
        record_pre_image(&mut self.undo, object_id, || {
            StoredObject::TournamentDetails(current.clone())
        });
        Ok(mutator(current))
    }

    pub fn modify_match<R>(
        &mut self,
        id: MatchId,
        mutator: impl FnOnce(&mut Match) -> R,
    ) -> Result<R> {
        let object_id = ObjectId::game_match(id);
        let current = self
            .matches
            .get_mut(&id)
            .ok_or(TournamentError::MatchNotFound)?;
        record_pre_image(&mut self.undo, object_id, || {
            StoredObject::Match(current.clone())
        });
        Ok(mutator(current))
    }

    // ===== FOREIGN OBJECTS =====

    pub fn insert_object(&mut self, id: ObjectId, object: StoredObject) {
        self.extras.insert(id, object);
        self.undo.new_ids.push(id);
    }

    pub fn modify_object(
        &mut self,
        id: ObjectId,
        mutator: impl FnOnce(&mut StoredObject),
    ) -> Option<()> {
        let current = self.extras.get_mut(&id)?;
        record_pre_image(&mut self.undo, id, || current.clone());
        mutator(current);
        Some(())
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Option<StoredObject> {
        let removed = self.extras.remove(&id)?;
        self.undo.removed.insert(id, removed.clone());
        Some(removed)
    }

    /// Snapshot of any live object, whichever store holds it.
    pub fn find_object(&self, id: ObjectId) -> Option<StoredObject> {
        match (id.space, id.type_id) {
            (SPACE_PROTOCOL, TYPE_TOURNAMENT) => self
                .tournaments
                .get(&TournamentId(id.instance))
                .cloned()
                .map(StoredObject::Tournament),
            (SPACE_PROTOCOL, TYPE_TOURNAMENT_DETAILS) => self
                .details
                .get(&TournamentDetailsId(id.instance))
                .cloned()
                .map(StoredObject::TournamentDetails),
            (SPACE_PROTOCOL, TYPE_MATCH) => self
                .matches
                .get(&MatchId(id.instance))
                .cloned()
                .map(StoredObject::Match),
            _ => self.extras.get(&id).cloned(),
        }
    }

    // ===== UNDO CHECKPOINT =====

    pub fn undo_head(&self) -> &UndoJournal {
        &self.undo
    }

    /// Drop the head checkpoint after its notifications went out.
    pub fn commit_changes(&mut self) {
        self.undo = UndoJournal::default();
    }

    // ===== HISTORY & EVENTS =====

    pub fn push_virtual_operation(&mut self, op: Operation) {
        self.history.push(op);
    }

    pub fn history(&self) -> &[Operation] {
        &self.history
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

/// Record a modified object's pre-image once per checkpoint. Objects born in
/// this checkpoint stay in the "new" category no matter how often they are
/// touched afterwards.
fn record_pre_image(
    undo: &mut UndoJournal,
    id: ObjectId,
    snapshot: impl FnOnce() -> StoredObject,
) {
    if !undo.old_values.contains_key(&id) && !undo.new_ids.contains(&id) {
        undo.old_values.insert(id, snapshot());
    }
}
