//! Balance history synthesis
//!
//! Walks hourly blocks backward from the end of the range. The final block
//! is a full snapshot of every account; each earlier block re-samples a
//! small share of accounts and gives them a drifted amount. Accounts that
//! are not sampled get no row at that block, so a holding is "the most
//! recent row at or before the block".

use chrono::{DateTime, Duration, Utc};
use rand::{seq::index, Rng};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::entities::protocol_token;
use crate::error::{GeneratorError, Result};
use crate::models::protocol::{BalanceFact, NewAccount};
use crate::services::random_walk::perturb;

pub struct BalanceHistoryParams<'a> {
    pub protocol_tokens: &'a [protocol_token::Model],
    pub tokens_per_account: usize,
    pub final_token_amount: Decimal,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Distinct random indices into a population, failing instead of truncating
/// when more are requested than exist.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, population: usize, amount: usize) -> Result<Vec<usize>> {
    if amount > population {
        return Err(GeneratorError::SampleTooLarge {
            requested: amount,
            population,
        });
    }

    Ok(index::sample(rng, population, amount).into_vec())
}

/// Number of whole-or-partial `step`s between `start` and `end`.
pub fn step_count(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Result<i64> {
    if end < start {
        return Err(GeneratorError::InvalidTimeRange);
    }

    let span = (end - start).num_milliseconds() as u64;
    let step = step.num_milliseconds().max(1) as u64;
    Ok(span.div_ceil(step) as i64)
}

/// Appends balance facts to each account's `balance_history`.
pub fn generate_balance_history<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    params: &BalanceHistoryParams<'_>,
    accounts: &mut [NewAccount],
    rng: &mut R,
) -> Result<()> {
    let final_block = step_count(params.start, params.end, config.block_length)?;
    let changing_accounts = config.changing_accounts(accounts.len());

    debug!(
        final_block,
        accounts = accounts.len(),
        changing_accounts,
        tokens_per_account = params.tokens_per_account,
        "Generating balance history"
    );

    let everyone: Vec<usize> = (0..accounts.len()).collect();
    append_balances(
        params,
        accounts,
        &everyone,
        params.final_token_amount,
        params.end,
        final_block,
        rng,
    )?;

    let mut token_amount = params.final_token_amount;
    for block in (0..final_block).rev() {
        token_amount = perturb(token_amount, config.balance_drift_pct, rng)?.round();
        let created_at = params.end - config.block_length * (final_block - block) as i32;

        let selected = sample_indices(rng, accounts.len(), changing_accounts)?;
        append_balances(params, accounts, &selected, token_amount, created_at, block, rng)?;
    }

    Ok(())
}

fn append_balances<R: Rng + ?Sized>(
    params: &BalanceHistoryParams<'_>,
    accounts: &mut [NewAccount],
    selected: &[usize],
    amount: Decimal,
    created_at: DateTime<Utc>,
    block: i64,
    rng: &mut R,
) -> Result<()> {
    for &account_idx in selected {
        let held = sample_indices(rng, params.protocol_tokens.len(), params.tokens_per_account)?;

        let account = &mut accounts[account_idx];
        for token_idx in held {
            account.balance_history.push(BalanceFact {
                protocol_token_id: params.protocol_tokens[token_idx].id,
                amount,
                created_at,
                created_at_block: block,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};
    use rust_decimal_macros::dec;
    use std::collections::{BTreeMap, HashSet};

    fn protocol_tokens(n: i64) -> Vec<protocol_token::Model> {
        (1..=n)
            .map(|id| protocol_token::Model {
                id,
                protocol_id: 1,
                token_id: 100 + id,
            })
            .collect()
    }

    fn accounts(n: usize) -> Vec<NewAccount> {
        (0..n).map(|i| NewAccount::new(format!("{:040x}", i))).collect()
    }

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
    }

    /// block -> set of account indices with a row at that block
    fn coverage(accounts: &[NewAccount]) -> BTreeMap<i64, HashSet<usize>> {
        let mut blocks: BTreeMap<i64, HashSet<usize>> = BTreeMap::new();
        for (idx, account) in accounts.iter().enumerate() {
            for fact in &account.balance_history {
                blocks.entry(fact.created_at_block).or_default().insert(idx);
            }
        }
        blocks
    }

    #[test]
    fn test_step_count() {
        let end = end();
        assert_eq!(step_count(end - Duration::hours(2), end, Duration::hours(1)).unwrap(), 2);
        assert_eq!(step_count(end - Duration::minutes(61), end, Duration::hours(1)).unwrap(), 2);
        assert_eq!(step_count(end, end, Duration::hours(1)).unwrap(), 0);
        assert_eq!(step_count(end - Duration::hours(2), end, Duration::minutes(10)).unwrap(), 12);
        assert!(matches!(
            step_count(end, end - Duration::hours(1), Duration::hours(1)),
            Err(GeneratorError::InvalidTimeRange)
        ));
    }

    #[test]
    fn test_sample_indices_rejects_oversized_sample() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample_indices(&mut rng, 3, 4).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::SampleTooLarge {
                requested: 4,
                population: 3
            }
        ));
    }

    #[test]
    fn test_sample_indices_are_distinct() {
        let mut rng = StdRng::seed_from_u64(2);
        let picked = sample_indices(&mut rng, 10, 10).unwrap();
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_final_block_covers_every_account() {
        let config = GeneratorConfig::default();
        let tokens = protocol_tokens(20);
        let mut accounts = accounts(100);
        let mut rng = StdRng::seed_from_u64(42);

        let params = BalanceHistoryParams {
            protocol_tokens: &tokens,
            tokens_per_account: 1,
            final_token_amount: dec!(100),
            start: end() - Duration::hours(24),
            end: end(),
        };
        generate_balance_history(&config, &params, &mut accounts, &mut rng).unwrap();

        let blocks = coverage(&accounts);
        assert_eq!(blocks.len(), 25);
        assert_eq!(blocks[&24].len(), 100);
        for block in 0..24 {
            assert_eq!(blocks[&block].len(), 5, "block {}", block);
        }

        for account in &accounts {
            let last = account
                .balance_history
                .iter()
                .find(|f| f.created_at_block == 24)
                .unwrap();
            assert_eq!(last.amount, dec!(100));
            assert_eq!(last.created_at, end());
        }
    }

    #[test]
    fn test_small_population_changes_entirely() {
        let config = GeneratorConfig::default();
        let tokens = protocol_tokens(10);
        let mut accounts = accounts(10);
        let mut rng = StdRng::seed_from_u64(3);

        let params = BalanceHistoryParams {
            protocol_tokens: &tokens,
            tokens_per_account: 1,
            final_token_amount: dec!(100),
            start: end() - Duration::hours(2),
            end: end(),
        };
        generate_balance_history(&config, &params, &mut accounts, &mut rng).unwrap();

        let blocks = coverage(&accounts);
        assert_eq!(blocks.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(blocks.values().all(|covered| covered.len() == 10));
    }

    #[test]
    fn test_amounts_walk_from_the_following_block() {
        let config = GeneratorConfig::default();
        let tokens = protocol_tokens(10);
        let mut accounts = accounts(10);
        let mut rng = StdRng::seed_from_u64(4);

        let params = BalanceHistoryParams {
            protocol_tokens: &tokens,
            tokens_per_account: 1,
            final_token_amount: dec!(100),
            start: end() - Duration::hours(48),
            end: end(),
        };
        generate_balance_history(&config, &params, &mut accounts, &mut rng).unwrap();

        let by_block: BTreeMap<i64, Decimal> = accounts[0]
            .balance_history
            .iter()
            .map(|f| (f.created_at_block, f.amount))
            .collect();

        for block in 0..48 {
            let amount = by_block[&block];
            let next = by_block[&(block + 1)];
            assert!(amount >= (next * dec!(0.85)).floor(), "block {}", block);
            assert!(amount <= (next * dec!(1.15)).ceil(), "block {}", block);
            assert!(amount >= Decimal::ZERO);
            assert_eq!(amount, amount.trunc());
        }
    }

    #[test]
    fn test_block_timestamps_step_back_hourly() {
        let config = GeneratorConfig::default();
        let tokens = protocol_tokens(10);
        let mut accounts = accounts(5);
        let mut rng = StdRng::seed_from_u64(6);

        let params = BalanceHistoryParams {
            protocol_tokens: &tokens,
            tokens_per_account: 2,
            final_token_amount: dec!(100),
            start: end() - Duration::hours(3),
            end: end(),
        };
        generate_balance_history(&config, &params, &mut accounts, &mut rng).unwrap();

        for fact in accounts.iter().flat_map(|a| &a.balance_history) {
            assert_eq!(
                fact.created_at,
                end() - Duration::hours(3 - fact.created_at_block)
            );
        }
        // two distinct tokens per account per block
        let first = &accounts[0].balance_history;
        let at_final: HashSet<_> = first
            .iter()
            .filter(|f| f.created_at_block == 3)
            .map(|f| f.protocol_token_id)
            .collect();
        assert_eq!(at_final.len(), 2);
    }

    #[test]
    fn test_too_many_tokens_per_account_fails() {
        let config = GeneratorConfig::default();
        let tokens = protocol_tokens(2);
        let mut accounts = accounts(3);
        let mut rng = StdRng::seed_from_u64(5);

        let params = BalanceHistoryParams {
            protocol_tokens: &tokens,
            tokens_per_account: 3,
            final_token_amount: dec!(100),
            start: end() - Duration::hours(1),
            end: end(),
        };
        let result = generate_balance_history(&config, &params, &mut accounts, &mut rng);

        assert!(matches!(result, Err(GeneratorError::SampleTooLarge { .. })));
    }
}
