//! Account-impact derivation for the chain indexer.
//!
//! For every operation and every stored object, compute the accounts whose
//! subscription views must be recomputed. The resolvers mutate a running set
//! so callers can accumulate impact across a whole transaction or
//! checkpoint; the tournament-leave variant depends on that (see
//! [`ImpactOptions`]).

use std::collections::BTreeSet;

use crate::ops::authority::add_authority_accounts;
use crate::ops::operation::{Operation, Transaction};
use crate::state::object::{AccountId, StoredObject};

/// Indexer behavior switches.
#[derive(Clone, Copy, Debug)]
pub struct ImpactOptions {
    /// Historical behavior: a tournament leave *removes* the canceling and
    /// player accounts from the running set, leaving them un-notified of
    /// their own leave. Turn off to insert them instead.
    pub erase_accounts_on_leave: bool,
}

impl Default for ImpactOptions {
    fn default() -> Self {
        Self {
            erase_accounts_on_leave: true,
        }
    }
}

/// Accounts whose views an operation touches.
pub fn operation_get_impacted_accounts(
    op: &Operation,
    impacted: &mut BTreeSet<AccountId>,
    options: &ImpactOptions,
) {
    match op {
        Operation::Transfer { to, .. } => {
            impacted.insert(*to);
        }
        Operation::LimitOrderCancel { fee_paying_account } => {
            impacted.insert(*fee_paying_account);
        }
        Operation::FillOrder { account_id } => {
            impacted.insert(*account_id);
        }
        Operation::AccountCreate {
            registrar,
            referrer,
            owner,
            active,
        } => {
            impacted.insert(*registrar);
            impacted.insert(*referrer);
            add_authority_accounts(impacted, owner);
            add_authority_accounts(impacted, active);
        }
        Operation::AccountUpdate {
            account,
            owner,
            active,
        } => {
            impacted.insert(*account);
            if let Some(owner) = owner {
                add_authority_accounts(impacted, owner);
            }
            if let Some(active) = active {
                add_authority_accounts(impacted, active);
            }
        }
        Operation::AccountWhitelist { account_to_list } => {
            impacted.insert(*account_to_list);
        }
        Operation::AccountTransfer { new_owner } => {
            impacted.insert(*new_owner);
        }
        Operation::AssetUpdate { new_issuer } => {
            if let Some(new_issuer) = new_issuer {
                impacted.insert(*new_issuer);
            }
        }
        Operation::AssetDividendDistribution { account_id } => {
            impacted.insert(*account_id);
        }
        Operation::AssetIssue { issue_to_account } => {
            impacted.insert(*issue_to_account);
        }
        Operation::WitnessCreate { witness_account }
        | Operation::WitnessUpdate { witness_account } => {
            impacted.insert(*witness_account);
        }
        Operation::ProposalCreate { proposed_ops } => {
            let mut other = Vec::new();
            for proposed in proposed_ops {
                proposed.required_authorities(impacted, &mut other);
            }
            for authority in &other {
                add_authority_accounts(impacted, authority);
            }
        }
        Operation::WithdrawPermissionCreate { authorized_account }
        | Operation::WithdrawPermissionUpdate { authorized_account }
        | Operation::WithdrawPermissionDelete { authorized_account } => {
            impacted.insert(*authorized_account);
        }
        Operation::WithdrawPermissionClaim {
            withdraw_from_account,
        } => {
            impacted.insert(*withdraw_from_account);
        }
        Operation::CommitteeMemberCreate {
            committee_member_account,
        }
        | Operation::CommitteeMemberUpdate {
            committee_member_account,
        } => {
            impacted.insert(*committee_member_account);
        }
        Operation::VestingBalanceCreate { owner } => {
            impacted.insert(*owner);
        }
        Operation::OverrideTransfer { from, to, issuer } => {
            impacted.insert(*to);
            impacted.insert(*from);
            impacted.insert(*issuer);
        }
        Operation::TransferToBlind { from, outputs } => {
            impacted.insert(*from);
            for output in outputs {
                add_authority_accounts(impacted, &output.owner);
            }
        }
        Operation::BlindTransfer { inputs, outputs } => {
            for input in inputs {
                add_authority_accounts(impacted, &input.owner);
            }
            for output in outputs {
                add_authority_accounts(impacted, &output.owner);
            }
        }
        Operation::TransferFromBlind { to, inputs } => {
            impacted.insert(*to);
            for input in inputs {
                add_authority_accounts(impacted, &input.owner);
            }
        }
        Operation::AssetSettleCancel { account } => {
            impacted.insert(*account);
        }
        Operation::FbaDistribute { account_id } => {
            impacted.insert(*account_id);
        }
        Operation::TournamentCreate(op) => {
            impacted.insert(op.creator);
            impacted.extend(op.options.whitelist.iter().copied());
        }
        Operation::TournamentJoin(op) => {
            impacted.insert(op.payer_account_id);
            impacted.insert(op.player_account_id);
        }
        Operation::TournamentLeave(op) => {
            if options.erase_accounts_on_leave {
                // if the account canceling the registration is not the
                // player, it must be the payer
                if op.canceling_account_id != op.player_account_id {
                    impacted.remove(&op.canceling_account_id);
                }
                impacted.remove(&op.player_account_id);
            } else {
                impacted.insert(op.canceling_account_id);
                impacted.insert(op.player_account_id);
            }
        }
        Operation::GameMove(op) => {
            impacted.insert(op.player_account_id);
        }
        Operation::TournamentPayout(op) => {
            impacted.insert(op.payout_account_id);
        }
        Operation::AffiliatePayout { affiliate } => {
            impacted.insert(*affiliate);
        }

        // Operations with no account impact
        Operation::AssetClaimFees
        | Operation::LimitOrderCreate
        | Operation::CallOrderUpdate
        | Operation::AccountUpgrade
        | Operation::AssetCreate
        | Operation::AssetUpdateBitasset
        | Operation::AssetUpdateDividend
        | Operation::AssetUpdateFeedProducers
        | Operation::AssetReserve
        | Operation::AssetFundFeePool
        | Operation::AssetSettle
        | Operation::AssetGlobalSettle
        | Operation::AssetPublishFeed
        | Operation::ProposalUpdate
        | Operation::ProposalDelete
        | Operation::CommitteeMemberUpdateGlobalParameters
        | Operation::VestingBalanceWithdraw
        | Operation::WorkerCreate
        | Operation::Custom
        | Operation::Assert
        | Operation::BalanceClaim
        | Operation::SportCreate
        | Operation::SportUpdate
        | Operation::SportDelete
        | Operation::EventGroupCreate
        | Operation::EventGroupUpdate
        | Operation::EventGroupDelete
        | Operation::EventCreate
        | Operation::EventUpdate
        | Operation::EventUpdateStatus
        | Operation::BettingMarketRulesCreate
        | Operation::BettingMarketRulesUpdate
        | Operation::BettingMarketGroupCreate
        | Operation::BettingMarketGroupUpdate
        | Operation::BettingMarketCreate
        | Operation::BettingMarketUpdate
        | Operation::BetPlace
        | Operation::BettingMarketGroupResolve
        | Operation::BettingMarketGroupResolved
        | Operation::BettingMarketGroupCancelUnmatchedBets
        | Operation::BetMatched
        | Operation::BetCancel
        | Operation::BetCanceled
        | Operation::BetAdjusted
        | Operation::AffiliateReferralPayout => {}
    }
}

pub fn transaction_get_impacted_accounts(
    tx: &Transaction,
    impacted: &mut BTreeSet<AccountId>,
    options: &ImpactOptions,
) {
    for op in &tx.operations {
        operation_get_impacted_accounts(op, impacted, options);
    }
}

/// Accounts that own a stored object.
pub fn get_relevant_accounts(
    object: &StoredObject,
    accounts: &mut BTreeSet<AccountId>,
    options: &ImpactOptions,
) {
    match object {
        StoredObject::Account { id } => {
            accounts.insert(*id);
        }
        StoredObject::Asset { issuer } => {
            accounts.insert(*issuer);
        }
        StoredObject::ForceSettlement { owner } => {
            accounts.insert(*owner);
        }
        StoredObject::CommitteeMember {
            committee_member_account,
        } => {
            accounts.insert(*committee_member_account);
        }
        StoredObject::Witness { witness_account } => {
            accounts.insert(*witness_account);
        }
        StoredObject::LimitOrder { seller } => {
            accounts.insert(*seller);
        }
        StoredObject::CallOrder { borrower } => {
            accounts.insert(*borrower);
        }
        StoredObject::Proposal {
            proposed_transaction,
        } => {
            transaction_get_impacted_accounts(proposed_transaction, accounts, options);
        }
        StoredObject::OperationHistory { op } => {
            operation_get_impacted_accounts(op, accounts, options);
        }
        StoredObject::WithdrawPermission {
            withdraw_from_account,
            authorized_account,
        } => {
            accounts.insert(*withdraw_from_account);
            accounts.insert(*authorized_account);
        }
        StoredObject::VestingBalance { owner } => {
            accounts.insert(*owner);
        }
        StoredObject::Worker { worker_account } => {
            accounts.insert(*worker_account);
        }
        StoredObject::Tournament(tournament) => {
            accounts.insert(tournament.creator);
        }
        StoredObject::TournamentDetails(details) => {
            accounts.extend(details.registered_players.iter().copied());
            accounts.extend(details.payers.keys().copied());
        }
        StoredObject::Match(game_match) => {
            accounts.extend(game_match.players.iter().copied());
        }
        StoredObject::AccountBalance { owner } | StoredObject::AccountStatistics { owner } => {
            accounts.insert(*owner);
        }
        StoredObject::Transaction { trx } => {
            transaction_get_impacted_accounts(trx, accounts, options);
        }
        StoredObject::BlindedBalance { owner } => {
            accounts.extend(owner.account_auths.keys().copied());
        }

        // Impersonal entities
        StoredObject::Custom
        | StoredObject::Balance
        | StoredObject::GlobalProperty
        | StoredObject::DynamicGlobalProperty
        | StoredObject::AssetDynamicData
        | StoredObject::AssetBitassetData
        | StoredObject::BlockSummary
        | StoredObject::AccountTransactionHistory
        | StoredObject::ChainProperty
        | StoredObject::WitnessSchedule
        | StoredObject::BudgetRecord
        | StoredObject::SpecialAuthority
        | StoredObject::Buyback
        | StoredObject::FbaAccumulator => {}
    }
}
