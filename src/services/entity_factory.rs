//! Builds the unsaved protocol / token / account graph.

use rand::Rng;
use std::ops::RangeInclusive;

use crate::config::GeneratorConfig;
use crate::models::protocol::{NewAccount, NewProtocol, NewToken};

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Wallet addresses are 20 random bytes, hex encoded
const WALLET_ADDRESS_BYTES: usize = 20;

pub struct EntityFactory {
    config: GeneratorConfig,
    token_number: usize,
}

impl EntityFactory {
    /// Draws the per-instance token count from `config.token_count`.
    pub fn new<R: Rng + ?Sized>(config: GeneratorConfig, rng: &mut R) -> Self {
        let token_number = rng.gen_range(config.token_count.clone());
        Self {
            config,
            token_number,
        }
    }

    pub fn token_number(&self) -> usize {
        self.token_number
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate_protocol_with_tokens<R: Rng + ?Sized>(&self, rng: &mut R) -> NewProtocol {
        let name = generate_name(rng, self.config.protocol_name_len.clone());

        let tokens = (0..self.token_number)
            .map(|_| NewToken {
                name: generate_name(rng, self.config.token_name_len.clone()),
                symbol: generate_name(rng, self.config.token_symbol_len.clone()).to_uppercase(),
                decimals: rng.gen_range(self.config.token_decimals.clone()),
            })
            .collect();

        NewProtocol { name, tokens }
    }

    /// Address collisions are not checked; the unique index on
    /// `account.wallet_address` would reject one.
    pub fn generate_accounts<R: Rng + ?Sized>(&self, accounts_number: usize, rng: &mut R) -> Vec<NewAccount> {
        (0..accounts_number)
            .map(|_| {
                let mut bytes = [0u8; WALLET_ADDRESS_BYTES];
                rng.fill(&mut bytes[..]);
                NewAccount::new(hex::encode(bytes))
            })
            .collect()
    }
}

/// Random ASCII-letter string with a length drawn from `len`.
pub fn generate_name<R: Rng + ?Sized>(rng: &mut R, len: RangeInclusive<usize>) -> String {
    let name_len = rng.gen_range(len);
    (0..name_len)
        .map(|_| ASCII_LETTERS[rng.gen_range(0..ASCII_LETTERS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn factory(seed: u64) -> (EntityFactory, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let factory = EntityFactory::new(GeneratorConfig::default(), &mut rng);
        (factory, rng)
    }

    #[test]
    fn test_generate_name() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let name = generate_name(&mut rng, 4..=10);
            assert!((4..=10).contains(&name.len()));
            assert!(name.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_token_number_within_configured_range() {
        for seed in 0..50 {
            let (factory, _) = factory(seed);
            assert!((10..=50).contains(&factory.token_number()));
        }
    }

    #[test]
    fn test_generate_protocol_with_tokens() {
        let (factory, mut rng) = factory(5);

        for _ in 0..3 {
            let protocol = factory.generate_protocol_with_tokens(&mut rng);
            assert_eq!(protocol.tokens.len(), factory.token_number());
            assert_eq!(protocol.name.len(), 5);

            for token in &protocol.tokens {
                assert!((4..=7).contains(&token.name.len()));
                assert!((3..=4).contains(&token.symbol.len()));
                assert!(token.symbol.chars().all(|c| c.is_ascii_uppercase()));
                assert!((1..=20).contains(&token.decimals));
            }
        }
    }

    #[test]
    fn test_generate_accounts() {
        let (factory, mut rng) = factory(8);
        let accounts = factory.generate_accounts(100, &mut rng);

        assert_eq!(accounts.len(), 100);
        assert!(accounts.iter().all(|a| a.wallet_address.len() == 40));
        assert!(accounts
            .iter()
            .all(|a| a.wallet_address.chars().all(|c| c.is_ascii_hexdigit())));
        assert!(accounts.iter().all(|a| a.balance_history.is_empty()));

        let unique: HashSet<_> = accounts.iter().map(|a| &a.wallet_address).collect();
        assert_eq!(unique.len(), 100);
    }
}
