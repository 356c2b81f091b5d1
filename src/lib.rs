// src/lib.rs

pub mod config;
pub mod error;

pub mod entities {
    pub mod prelude;
    pub mod account;
    pub mod account_balance_history;
    pub mod protocol;
    pub mod protocol_token;
    pub mod token;
    pub mod token_price;
    pub mod tvl_history;
}

pub mod services {
    pub mod random_walk;
    pub mod entity_factory;
    pub mod balance_history;
    pub mod price_history;
    pub mod store;
    pub mod tvl_history;
    pub mod protocol_data_generator;
    pub mod protocol_deposit;
}

pub mod models {
    pub mod command;
    pub mod protocol;
}

pub mod handlers {
    pub mod shell;
}
