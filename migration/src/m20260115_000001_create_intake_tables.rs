use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscribers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subscribers::Id).integer().auto_increment().primary_key())
                    .col(ColumnDef::new(Subscribers::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Subscribers::Email).string_len(200).not_null())
                    .col(ColumnDef::new(Subscribers::Phone).string_len(50).not_null())
                    .col(ColumnDef::new(Subscribers::TelegramUsername).string_len(200).null())
                    .col(ColumnDef::new(Subscribers::TelegramId).big_integer().null().unique_key())
                    .col(ColumnDef::new(Subscribers::Lang).string_len(8).not_null().default("ar"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TradingAccounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TradingAccounts::Id).integer().auto_increment().primary_key())
                    .col(ColumnDef::new(TradingAccounts::SubscriberId).integer().not_null())
                    .col(ColumnDef::new(TradingAccounts::BrokerName).string_len(100).not_null())
                    .col(ColumnDef::new(TradingAccounts::AccountNumber).string_len(100).not_null())
                    .col(ColumnDef::new(TradingAccounts::Password).string_len(100).not_null())
                    .col(ColumnDef::new(TradingAccounts::Server).string_len(100).not_null())
                    .col(ColumnDef::new(TradingAccounts::InitialBalance).decimal_len(18, 2).null())
                    .col(ColumnDef::new(TradingAccounts::CurrentBalance).decimal_len(18, 2).null())
                    .col(ColumnDef::new(TradingAccounts::Withdrawals).decimal_len(18, 2).null())
                    .col(ColumnDef::new(TradingAccounts::CopyStartDate).date().null())
                    .col(ColumnDef::new(TradingAccounts::Agent).string_len(100).null())
                    .col(ColumnDef::new(TradingAccounts::ExpectedReturn).string_len(100).null())
                    .col(
                        ColumnDef::new(TradingAccounts::CreatedAt)
                            .timestamp()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(TradingAccounts::Status)
                            .string_len(20)
                            .not_null()
                            .default("under_review"),
                    )
                    .col(ColumnDef::new(TradingAccounts::RejectionReason).string_len(255).null())
                    .index(
                        Index::create()
                            .name("idx_accounts_status")
                            .table(TradingAccounts::Table)
                            .col(TradingAccounts::Status),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_subscriber")
                            .from(TradingAccounts::Table, TradingAccounts::SubscriberId)
                            .to(Subscribers::Table, Subscribers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccountPerformances::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AccountPerformances::Id).integer().auto_increment().primary_key())
                    .col(
                        ColumnDef::new(AccountPerformances::TradingAccountId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AccountPerformances::Name).string_len(200).not_null())
                    .col(ColumnDef::new(AccountPerformances::Email).string_len(200).not_null())
                    .col(ColumnDef::new(AccountPerformances::Phone).string_len(50).not_null())
                    .col(ColumnDef::new(AccountPerformances::TelegramUsername).string_len(200).null())
                    .col(ColumnDef::new(AccountPerformances::InitialBalance).decimal_len(18, 2).null())
                    .col(ColumnDef::new(AccountPerformances::AchievedReturn).string_len(50).null())
                    .col(ColumnDef::new(AccountPerformances::CopyDuration).string_len(50).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performances_account")
                            .from(AccountPerformances::Table, AccountPerformances::TradingAccountId)
                            .to(TradingAccounts::Table, TradingAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccountPerformances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TradingAccounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subscribers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Subscribers {
    Table,
    Id,
    Name,
    Email,
    Phone,
    TelegramUsername,
    TelegramId,
    Lang,
}

#[derive(DeriveIden)]
enum TradingAccounts {
    Table,
    Id,
    SubscriberId,
    BrokerName,
    AccountNumber,
    Password,
    Server,
    InitialBalance,
    CurrentBalance,
    Withdrawals,
    CopyStartDate,
    Agent,
    ExpectedReturn,
    CreatedAt,
    Status,
    RejectionReason,
}

#[derive(DeriveIden)]
enum AccountPerformances {
    Table,
    Id,
    TradingAccountId,
    Name,
    Email,
    Phone,
    TelegramUsername,
    InitialBalance,
    AchievedReturn,
    CopyDuration,
}
