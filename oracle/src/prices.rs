//! Stored prices, their expiry, and time-weighted averages over price snapshots.

use augury_store::{DatedPrice, OracleStore, PriceSnapshot};
use augury_types::{Dec, Pair, Params};

use crate::collaborators::{BankKeeper, DistributionKeeper, StakingKeeper};
use crate::context::BlockContext;
use crate::engine::OracleEngine;
use crate::error::OracleError;
use crate::events::OracleEvent;

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    /// Record a tallied price and its snapshot.
    pub(crate) fn set_price(
        &self,
        ctx: &mut BlockContext,
        pair: &Pair,
        price: Dec,
    ) -> Result<(), OracleError> {
        self.store.put_exchange_rate(
            pair,
            &DatedPrice {
                exchange_rate: price,
                created_block: ctx.height(),
                timestamp_ms: ctx.time_ms(),
            },
        )?;
        self.store.put_price_snapshot(&PriceSnapshot {
            pair: pair.clone(),
            price,
            timestamp_ms: ctx.time_ms(),
        })?;

        tracing::debug!(pair = %pair, price = %price, "price set");
        ctx.emit(OracleEvent::PriceUpdate {
            pair: pair.clone(),
            price,
            timestamp_ms: ctx.time_ms(),
        });
        Ok(())
    }

    /// Delete every price with `created_block + expiration_blocks <= height`.
    pub fn clear_expired_exchange_rates(
        &self,
        ctx: &BlockContext,
        params: &Params,
    ) -> Result<usize, OracleError> {
        let mut cleared = 0;
        for (pair, price) in self.store.iter_exchange_rates()? {
            if price.created_block.saturating_add(params.expiration_blocks) <= ctx.height() {
                self.store.delete_exchange_rate(&pair)?;
                tracing::debug!(pair = %pair, created_block = price.created_block, "price expired");
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    /// Drop snapshots that have fallen out of the TWAP lookback window.
    pub(crate) fn prune_price_snapshots(
        &self,
        ctx: &BlockContext,
        params: &Params,
    ) -> Result<usize, OracleError> {
        let cutoff = ctx.time_ms().saturating_sub(params.twap_lookback_window_ms);
        Ok(self.store.prune_price_snapshots(cutoff)?)
    }

    /// Time-weighted average price of `pair` over the lookback window ending now.
    ///
    /// Each snapshot's price holds until the next snapshot; the newest one holds until
    /// the current block time.
    pub fn exchange_rate_twap(&self, ctx: &BlockContext, pair: &Pair) -> Result<Dec, OracleError> {
        let params = self.store.get_params()?;
        let now = ctx.time_ms();
        let start = now.saturating_sub(params.twap_lookback_window_ms);
        let snapshots = self.store.price_snapshots(pair, start, now)?;

        let no_twap = |reason: &str| OracleError::NoValidTwap {
            pair: pair.clone(),
            reason: reason.to_string(),
        };
        let first = snapshots
            .first()
            .ok_or_else(|| no_twap("no snapshots in lookback window"))?;
        if snapshots.len() == 1 || first.timestamp_ms == now {
            return Ok(snapshots[snapshots.len() - 1].price);
        }

        let mut cumulative = Dec::ZERO;
        for (i, snapshot) in snapshots.iter().enumerate() {
            let until = snapshots
                .get(i + 1)
                .map_or(now, |next| next.timestamp_ms);
            let held = until.saturating_sub(snapshot.timestamp_ms);
            cumulative = snapshot
                .price
                .checked_mul_int(held)
                .and_then(|weighted| cumulative.checked_add(weighted))
                .ok_or(OracleError::Overflow("twap"))?;
        }
        cumulative
            .checked_quo_int(now - first.timestamp_ms)
            .ok_or(OracleError::Overflow("twap"))
    }
}
