//! `SeaORM` Entity prelude

pub use super::account::Entity as Account;
pub use super::account_balance_history::Entity as AccountBalanceHistory;
pub use super::protocol::Entity as Protocol;
pub use super::protocol_token::Entity as ProtocolToken;
pub use super::token::Entity as Token;
pub use super::token_price::Entity as TokenPrice;
pub use super::tvl_history::Entity as TvlHistory;
