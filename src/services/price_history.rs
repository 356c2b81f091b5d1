//! Price history synthesis
//!
//! Each token gets an independent backward random walk over 10-minute
//! ticks. The tick at `end` is pinned to the final price; every earlier
//! tick drifts from the tick right after it.

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::models::protocol::PriceFact;
use crate::services::balance_history::step_count;
use crate::services::random_walk::perturb;

/// Matches the scale of `token_price.usd_price`
const USD_PRICE_SCALE: u32 = 18;

pub fn generate_token_prices<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    token_ids: &[i64],
    final_token_price: Decimal,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<PriceFact>> {
    let segments = step_count(start, end, config.tick_length)?;

    debug!(
        tokens = token_ids.len(),
        segments,
        %final_token_price,
        "Generating token prices"
    );

    let mut prices = Vec::with_capacity(token_ids.len() * segments as usize);
    for &token_id in token_ids {
        let mut usd_price = final_token_price;

        for delta in 0..segments {
            if delta > 0 {
                usd_price = perturb(usd_price, config.price_drift_pct, rng)?.round_dp(USD_PRICE_SCALE);
            }

            prices.push(PriceFact {
                token_id,
                usd_price,
                created_at: end - config.tick_length * delta as i32,
            });
        }
    }

    Ok(prices)
}
