use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Protocol::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Protocol::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Protocol::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Token names and symbols are random short strings, so they are not unique
        manager
            .create_table(
                Table::create()
                    .table(Token::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Token::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Token::Name).string_len(64).not_null())
                    .col(ColumnDef::new(Token::Symbol).string_len(16).not_null())
                    .col(ColumnDef::new(Token::Decimals).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProtocolToken::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProtocolToken::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProtocolToken::ProtocolId).big_integer().not_null())
                    .col(ColumnDef::new(ProtocolToken::TokenId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_protocol_token_protocol")
                            .from(ProtocolToken::Table, ProtocolToken::ProtocolId)
                            .to(Protocol::Table, Protocol::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_protocol_token_token")
                            .from(ProtocolToken::Table, ProtocolToken::TokenId)
                            .to(Token::Table, Token::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Account::WalletAddress)
                            .string_len(42)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccountBalanceHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountBalanceHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccountBalanceHistory::ProtocolTokenId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountBalanceHistory::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        // uint256 range
                        ColumnDef::new(AccountBalanceHistory::Amount)
                            .decimal_len(78, 0)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountBalanceHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountBalanceHistory::CreatedAtBlock)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_balance_history_protocol_token")
                            .from(
                                AccountBalanceHistory::Table,
                                AccountBalanceHistory::ProtocolTokenId,
                            )
                            .to(ProtocolToken::Table, ProtocolToken::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_balance_history_account")
                            .from(AccountBalanceHistory::Table, AccountBalanceHistory::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TokenPrice::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TokenPrice::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TokenPrice::TokenId).big_integer().not_null())
                    .col(
                        ColumnDef::new(TokenPrice::UsdPrice)
                            .decimal_len(78, 18)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TokenPrice::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_token_price_token")
                            .from(TokenPrice::Table, TokenPrice::TokenId)
                            .to(Token::Table, Token::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TvlHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TvlHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TvlHistory::ProtocolTokenId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TvlHistory::Amount).decimal_len(78, 0).not_null())
                    .col(
                        ColumnDef::new(TvlHistory::AmountUsd)
                            .decimal_len(78, 18)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TvlHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TvlHistory::CreatedAtBlock)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tvl_history_protocol_token")
                            .from(TvlHistory::Table, TvlHistory::ProtocolTokenId)
                            .to(ProtocolToken::Table, ProtocolToken::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Foreign keys plus the columns the windowed join and max-block lookup scan
        manager
            .create_index(
                Index::create()
                    .name("idx_protocol_token_protocol_id")
                    .table(ProtocolToken::Table)
                    .col(ProtocolToken::ProtocolId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_protocol_token_token_id")
                    .table(ProtocolToken::Table)
                    .col(ProtocolToken::TokenId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_account_balance_history_protocol_token_id")
                    .table(AccountBalanceHistory::Table)
                    .col(AccountBalanceHistory::ProtocolTokenId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_account_balance_history_account_id")
                    .table(AccountBalanceHistory::Table)
                    .col(AccountBalanceHistory::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_account_balance_history_created_at")
                    .table(AccountBalanceHistory::Table)
                    .col(AccountBalanceHistory::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_account_balance_history_created_at_block")
                    .table(AccountBalanceHistory::Table)
                    .col(AccountBalanceHistory::CreatedAtBlock)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_token_price_token_id")
                    .table(TokenPrice::Table)
                    .col(TokenPrice::TokenId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_token_price_created_at")
                    .table(TokenPrice::Table)
                    .col(TokenPrice::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tvl_history_protocol_token_id")
                    .table(TvlHistory::Table)
                    .col(TvlHistory::ProtocolTokenId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tvl_history_created_at")
                    .table(TvlHistory::Table)
                    .col(TvlHistory::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tvl_history_created_at_block")
                    .table(TvlHistory::Table)
                    .col(TvlHistory::CreatedAtBlock)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TvlHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TokenPrice::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountBalanceHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProtocolToken::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Token::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Protocol::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Protocol {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Token {
    Table,
    Id,
    Name,
    Symbol,
    Decimals,
}

#[derive(Iden)]
enum ProtocolToken {
    Table,
    Id,
    ProtocolId,
    TokenId,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
    WalletAddress,
}

#[derive(Iden)]
enum AccountBalanceHistory {
    Table,
    Id,
    ProtocolTokenId,
    AccountId,
    Amount,
    CreatedAt,
    CreatedAtBlock,
}

#[derive(Iden)]
enum TokenPrice {
    Table,
    Id,
    TokenId,
    UsdPrice,
    CreatedAt,
}

#[derive(Iden)]
enum TvlHistory {
    Table,
    Id,
    ProtocolTokenId,
    Amount,
    AmountUsd,
    CreatedAt,
    CreatedAtBlock,
}
