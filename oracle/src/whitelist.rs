//! Vote targets: the active whitelist and its reconciliation with the parameters.

use augury_store::OracleStore;
use augury_types::Pair;
use std::collections::BTreeSet;

use crate::collaborators::{BankKeeper, DistributionKeeper, StakingKeeper};
use crate::engine::OracleEngine;
use crate::error::OracleError;

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    pub fn whitelisted_pairs(&self) -> Result<BTreeSet<Pair>, OracleError> {
        Ok(self.store.iter_whitelisted_pairs()?.into_iter().collect())
    }

    pub fn is_whitelisted_pair(&self, pair: &Pair) -> Result<bool, OracleError> {
        Ok(self.store.is_whitelisted(pair)?)
    }

    /// Replace the active whitelist with `next` if `current` differs from it as a set.
    ///
    /// `current` is this period's working set, which may have lost pairs that failed
    /// the ballot threshold. Returns whether a rewrite happened.
    pub fn refresh_whitelist(
        &self,
        next: &[Pair],
        current: &BTreeSet<Pair>,
    ) -> Result<bool, OracleError> {
        let next_set: BTreeSet<&Pair> = next.iter().collect();
        let unchanged =
            next_set.len() == current.len() && current.iter().all(|p| next_set.contains(p));
        if unchanged {
            return Ok(false);
        }

        for pair in self.store.iter_whitelisted_pairs()? {
            self.store.delete_whitelisted_pair(&pair)?;
        }
        for pair in next_set {
            self.store.insert_whitelisted_pair(pair)?;
        }
        tracing::info!(pairs = next.len(), "whitelist refreshed");
        Ok(true)
    }
}
