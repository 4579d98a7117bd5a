use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::state::object::{AccountId, KeyId};

/// Weighted permission over an account: any mix of accounts and keys whose
/// weights reach the threshold may act.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Authority {
    pub weight_threshold: u32,
    pub account_auths: BTreeMap<AccountId, u16>,
    pub key_auths: BTreeMap<KeyId, u16>,
}

impl Authority {
    /// Sole control by one account at full weight.
    pub fn single(account: AccountId) -> Self {
        Self {
            weight_threshold: 1,
            account_auths: [(account, 1)].into_iter().collect(),
            key_auths: BTreeMap::new(),
        }
    }
}

/// Collect every account participating in an authority.
pub fn add_authority_accounts(impacted: &mut BTreeSet<AccountId>, authority: &Authority) {
    impacted.extend(authority.account_auths.keys().copied());
}
