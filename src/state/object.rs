use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ops::authority::Authority;
use crate::ops::operation::{Operation, Transaction};
use crate::state::details::TournamentDetails;
use crate::state::game_match::Match;
use crate::state::tournament::Tournament;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            BorshSerialize,
            BorshDeserialize,
            Serialize,
            Deserialize,
        )]
        pub struct $name(pub u64);
    };
}

id_type!(AccountId);
id_type!(AssetId);
id_type!(TournamentId);
id_type!(TournamentDetailsId);
id_type!(MatchId);
id_type!(KeyId);

// ===== OBJECT SPACES =====
pub const SPACE_PROTOCOL: u8 = 1;
pub const SPACE_IMPLEMENTATION: u8 = 2;

// ===== PROTOCOL OBJECT TYPES =====
pub const TYPE_ACCOUNT: u8 = 2;
pub const TYPE_ASSET: u8 = 3;
pub const TYPE_FORCE_SETTLEMENT: u8 = 4;
pub const TYPE_COMMITTEE_MEMBER: u8 = 5;
pub const TYPE_WITNESS: u8 = 6;
pub const TYPE_LIMIT_ORDER: u8 = 7;
pub const TYPE_CALL_ORDER: u8 = 8;
pub const TYPE_CUSTOM: u8 = 9;
pub const TYPE_PROPOSAL: u8 = 10;
pub const TYPE_OPERATION_HISTORY: u8 = 11;
pub const TYPE_WITHDRAW_PERMISSION: u8 = 12;
pub const TYPE_VESTING_BALANCE: u8 = 13;
pub const TYPE_WORKER: u8 = 14;
pub const TYPE_BALANCE: u8 = 15;
pub const TYPE_TOURNAMENT: u8 = 16;
pub const TYPE_TOURNAMENT_DETAILS: u8 = 17;
pub const TYPE_MATCH: u8 = 18;

// ===== IMPLEMENTATION OBJECT TYPES =====
pub const TYPE_GLOBAL_PROPERTY: u8 = 0;
pub const TYPE_DYNAMIC_GLOBAL_PROPERTY: u8 = 1;
pub const TYPE_ASSET_DYNAMIC_DATA: u8 = 3;
pub const TYPE_ASSET_BITASSET_DATA: u8 = 4;
pub const TYPE_ACCOUNT_BALANCE: u8 = 5;
pub const TYPE_ACCOUNT_STATISTICS: u8 = 6;
pub const TYPE_TRANSACTION: u8 = 7;
pub const TYPE_BLOCK_SUMMARY: u8 = 8;
pub const TYPE_ACCOUNT_TRANSACTION_HISTORY: u8 = 9;
pub const TYPE_BLINDED_BALANCE: u8 = 10;
pub const TYPE_CHAIN_PROPERTY: u8 = 11;
pub const TYPE_WITNESS_SCHEDULE: u8 = 12;
pub const TYPE_BUDGET_RECORD: u8 = 13;
pub const TYPE_SPECIAL_AUTHORITY: u8 = 14;
pub const TYPE_BUYBACK: u8 = 15;
pub const TYPE_FBA_ACCUMULATOR: u8 = 16;

/// Generic object id: `space.type.instance`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct ObjectId {
    pub space: u8,
    pub type_id: u8,
    pub instance: u64,
}

impl ObjectId {
    pub fn new(space: u8, type_id: u8, instance: u64) -> Self {
        Self {
            space,
            type_id,
            instance,
        }
    }

    pub fn tournament(id: TournamentId) -> Self {
        Self::new(SPACE_PROTOCOL, TYPE_TOURNAMENT, id.0)
    }

    pub fn tournament_details(id: TournamentDetailsId) -> Self {
        Self::new(SPACE_PROTOCOL, TYPE_TOURNAMENT_DETAILS, id.0)
    }

    pub fn game_match(id: MatchId) -> Self {
        Self::new(SPACE_PROTOCOL, TYPE_MATCH, id.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.space, self.type_id, self.instance)
    }
}

/// Snapshot of any object the database can hold, carrying the fields the
/// indexer needs to resolve owning accounts. Entity kinds with no owning
/// account are unit variants.
#[derive(Clone, Debug, PartialEq)]
pub enum StoredObject {
    // ---- protocol space ----
    Account {
        id: AccountId,
    },
    Asset {
        issuer: AccountId,
    },
    ForceSettlement {
        owner: AccountId,
    },
    CommitteeMember {
        committee_member_account: AccountId,
    },
    Witness {
        witness_account: AccountId,
    },
    LimitOrder {
        seller: AccountId,
    },
    CallOrder {
        borrower: AccountId,
    },
    Custom,
    Proposal {
        proposed_transaction: Transaction,
    },
    OperationHistory {
        op: Operation,
    },
    WithdrawPermission {
        withdraw_from_account: AccountId,
        authorized_account: AccountId,
    },
    VestingBalance {
        owner: AccountId,
    },
    Worker {
        worker_account: AccountId,
    },
    Balance,
    Tournament(Tournament),
    TournamentDetails(TournamentDetails),
    Match(Match),

    // ---- implementation space ----
    GlobalProperty,
    DynamicGlobalProperty,
    AssetDynamicData,
    AssetBitassetData,
    AccountBalance {
        owner: AccountId,
    },
    AccountStatistics {
        owner: AccountId,
    },
    Transaction {
        trx: Transaction,
    },
    BlindedBalance {
        owner: Authority,
    },
    BlockSummary,
    AccountTransactionHistory,
    ChainProperty,
    WitnessSchedule,
    BudgetRecord,
    SpecialAuthority,
    Buyback,
    FbaAccumulator,
}
