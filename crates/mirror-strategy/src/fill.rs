//! Fill handling: offsetting primary-venue fills on the backing venue.

use tracing::info;

use mirror_core::{Order, OrderType, Trade};

use crate::error::{StrategyError, StrategyResult};
use crate::strategy::MirrorStrategy;

impl MirrorStrategy {
    /// Offset one primary-venue fill.
    ///
    /// The hedge side is the reverse of the fill side. Under the ledger
    /// mutex: the fill is added to the surplus, and if the uncommitted
    /// surplus warrants a hedge it is committed, submitted to the
    /// backing venue as a limit order, and settled on acceptance. On
    /// submission failure the committed amount is not released; that
    /// side stops hedging until an operator reconciles the ledger.
    pub fn handle_fill(&self, trade: &Trade) -> StrategyResult<()> {
        // a single lock serializes all fill handlers against the ledger
        let mut ledger = self.ledger.lock();

        let hedge_side = trade.side.opposite();
        ledger.add_fill(hedge_side, trade.volume);

        let constraints = self.backing_constraints();
        let min_base = constraints.min_base_volume;
        let Some(volume) =
            ledger.hedge_volume(hedge_side, min_base, constraints.volume_precision)
        else {
            let surplus = ledger.side(hedge_side);
            info!(
                trade_id = %trade.transaction_id,
                trade_base_amount = %trade.volume,
                trade_quote_amount = %(trade.volume * trade.price),
                trade_price = %trade.price,
                hedge_side = %hedge_side,
                min_base_volume = %min_base,
                surplus_total = %surplus.total,
                surplus_committed = %surplus.committed,
                "offset-skip: uncommitted surplus below half the backing minimum"
            );
            return Ok(());
        };
        ledger.commit(hedge_side, volume);

        let order = Order {
            // offsets go on the backing venue, so use its pair
            pair: self.backing_pair().clone(),
            side: hedge_side,
            order_type: OrderType::Limit,
            price: trade.price.cap_precision(constraints.price_precision),
            volume,
            timestamp_ms: None,
        };
        let surplus = *ledger.side(hedge_side);
        info!(
            trade_id = %trade.transaction_id,
            trade_base_amount = %trade.volume,
            trade_quote_amount = %(trade.volume * trade.price),
            trade_price = %trade.price,
            hedge_side = %hedge_side,
            min_base_volume = %min_base,
            surplus_total = %surplus.total,
            surplus_committed = %surplus.committed,
            order_base_amount = %order.volume,
            order_quote_amount = %(order.volume * order.price),
            order_price = %order.price,
            "offset-attempt: submitting hedge order to backing venue"
        );

        let transaction_id = match self.backing.add_order(&order) {
            Ok(Some(id)) => id,
            Ok(None) => {
                return Err(StrategyError::Offset(format!(
                    "transaction id was missing for hedge order {order:?}"
                )));
            }
            Err(e) => {
                return Err(StrategyError::Offset(format!(
                    "error submitting hedge order {order:?}: {e}"
                )));
            }
        };

        ledger.settle(hedge_side, volume);
        let surplus = *ledger.side(hedge_side);
        info!(
            trade_id = %trade.transaction_id,
            hedge_side = %hedge_side,
            min_base_volume = %min_base,
            surplus_total = %surplus.total,
            surplus_committed = %surplus.committed,
            order_base_amount = %order.volume,
            order_quote_amount = %(order.volume * order.price),
            order_price = %order.price,
            backing_transaction_id = %transaction_id,
            "offset-success: hedge order accepted by backing venue"
        );
        Ok(())
    }
}
