//! The protocol operation sum type.
//!
//! Every operation the chain knows appears here, whether or not this engine
//! evaluates it: the impact resolver matches exhaustively, so adding an
//! operation without deciding who it touches fails to compile. Payloads
//! carry the fields account-impact derivation needs; the four
//! tournament-family operations the engine consumes keep full payload
//! structs.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ops::authority::Authority;
use crate::state::game_match::GameMove;
use crate::state::object::{AccountId, MatchId, TournamentId};
use crate::state::tournament::{AssetAmount, TournamentOptions};

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct BlindInput {
    pub owner: Authority,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct BlindOutput {
    pub owner: Authority,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentCreateOperation {
    pub creator: AccountId,
    pub options: TournamentOptions,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentJoinOperation {
    pub payer_account_id: AccountId,
    pub player_account_id: AccountId,
    pub tournament_id: TournamentId,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentLeaveOperation {
    pub canceling_account_id: AccountId,
    pub player_account_id: AccountId,
    pub tournament_id: TournamentId,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct GameMoveOperation {
    pub tournament_id: TournamentId,
    pub match_id: MatchId,
    pub player_account_id: AccountId,
    pub game_move: GameMove,
}

/// Recorded in history on conclusion; virtual, never signed.
#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct TournamentPayoutOperation {
    pub tournament_id: TournamentId,
    pub payout_account_id: AccountId,
    pub payout_amount: AssetAmount,
}

#[derive(Clone, Debug, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub enum Operation {
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: AssetAmount,
    },
    AssetClaimFees,
    LimitOrderCreate,
    LimitOrderCancel {
        fee_paying_account: AccountId,
    },
    CallOrderUpdate,
    FillOrder {
        account_id: AccountId,
    },
    AccountCreate {
        registrar: AccountId,
        referrer: AccountId,
        owner: Authority,
        active: Authority,
    },
    AccountUpdate {
        account: AccountId,
        owner: Option<Authority>,
        active: Option<Authority>,
    },
    AccountWhitelist {
        account_to_list: AccountId,
    },
    AccountUpgrade,
    AccountTransfer {
        new_owner: AccountId,
    },
    AssetCreate,
    AssetUpdate {
        new_issuer: Option<AccountId>,
    },
    AssetUpdateBitasset,
    AssetUpdateDividend,
    AssetDividendDistribution {
        account_id: AccountId,
    },
    AssetUpdateFeedProducers,
    AssetIssue {
        issue_to_account: AccountId,
    },
    AssetReserve,
    AssetFundFeePool,
    AssetSettle,
    AssetGlobalSettle,
    AssetPublishFeed,
    WitnessCreate {
        witness_account: AccountId,
    },
    WitnessUpdate {
        witness_account: AccountId,
    },
    ProposalCreate {
        proposed_ops: Vec<Operation>,
    },
    ProposalUpdate,
    ProposalDelete,
    WithdrawPermissionCreate {
        authorized_account: AccountId,
    },
    WithdrawPermissionUpdate {
        authorized_account: AccountId,
    },
    WithdrawPermissionClaim {
        withdraw_from_account: AccountId,
    },
    WithdrawPermissionDelete {
        authorized_account: AccountId,
    },
    CommitteeMemberCreate {
        committee_member_account: AccountId,
    },
    CommitteeMemberUpdate {
        committee_member_account: AccountId,
    },
    CommitteeMemberUpdateGlobalParameters,
    VestingBalanceCreate {
        owner: AccountId,
    },
    VestingBalanceWithdraw,
    WorkerCreate,
    Custom,
    Assert,
    BalanceClaim,
    OverrideTransfer {
        from: AccountId,
        to: AccountId,
        issuer: AccountId,
    },
    TransferToBlind {
        from: AccountId,
        outputs: Vec<BlindOutput>,
    },
    BlindTransfer {
        inputs: Vec<BlindInput>,
        outputs: Vec<BlindOutput>,
    },
    TransferFromBlind {
        to: AccountId,
        inputs: Vec<BlindInput>,
    },
    AssetSettleCancel {
        account: AccountId,
    },
    FbaDistribute {
        account_id: AccountId,
    },
    SportCreate,
    SportUpdate,
    SportDelete,
    EventGroupCreate,
    EventGroupUpdate,
    EventGroupDelete,
    EventCreate,
    EventUpdate,
    EventUpdateStatus,
    BettingMarketRulesCreate,
    BettingMarketRulesUpdate,
    BettingMarketGroupCreate,
    BettingMarketGroupUpdate,
    BettingMarketCreate,
    BettingMarketUpdate,
    BetPlace,
    BettingMarketGroupResolve,
    BettingMarketGroupResolved,
    BettingMarketGroupCancelUnmatchedBets,
    BetMatched,
    BetCancel,
    BetCanceled,
    BetAdjusted,
    TournamentCreate(TournamentCreateOperation),
    TournamentJoin(TournamentJoinOperation),
    TournamentLeave(TournamentLeaveOperation),
    GameMove(GameMoveOperation),
    TournamentPayout(TournamentPayoutOperation),
    AffiliatePayout {
        affiliate: AccountId,
    },
    AffiliateReferralPayout,
}

impl Operation {
    /// Accounts whose authority a proposal of this operation would demand,
    /// plus any free-standing authorities carried in the payload.
    pub fn required_authorities(
        &self,
        accounts: &mut BTreeSet<AccountId>,
        other: &mut Vec<Authority>,
    ) {
        match self {
            Operation::Transfer { from, .. } => {
                accounts.insert(*from);
            }
            Operation::OverrideTransfer { issuer, .. } => {
                accounts.insert(*issuer);
            }
            Operation::LimitOrderCancel { fee_paying_account } => {
                accounts.insert(*fee_paying_account);
            }
            Operation::AccountCreate { registrar, .. } => {
                accounts.insert(*registrar);
            }
            Operation::AccountUpdate { account, .. } => {
                accounts.insert(*account);
            }
            Operation::TransferToBlind { from, .. } => {
                accounts.insert(*from);
            }
            Operation::TransferFromBlind { inputs, .. } => {
                other.extend(inputs.iter().map(|input| input.owner.clone()));
            }
            Operation::BlindTransfer { inputs, .. } => {
                other.extend(inputs.iter().map(|input| input.owner.clone()));
            }
            Operation::TournamentCreate(op) => {
                accounts.insert(op.creator);
            }
            Operation::TournamentJoin(op) => {
                accounts.insert(op.payer_account_id);
            }
            Operation::TournamentLeave(op) => {
                accounts.insert(op.canceling_account_id);
            }
            Operation::GameMove(op) => {
                accounts.insert(op.player_account_id);
            }
            _ => {}
        }
    }
}

/// A bundle of operations, as carried by proposal and transaction objects.
#[derive(
    Clone, Debug, Default, PartialEq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Transaction {
    pub operations: Vec<Operation>,
}
