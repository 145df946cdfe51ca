//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: account owners, unique by normalized email
//! - `categories`: movement labels, unique by normalized name
//! - `credit_cards`: card labels owned by a user
//! - `accounts`: bank accounts with a cash balance, unique by normalized number
//! - `movements`: income/expense records referencing the entities above

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum CreditCards {
    Table,
    Id,
    Name,
    LastFourDigits,
    StatementClose,
    MaxPaymentDue,
    UserId,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Bank,
    AccountNumber,
    Balance,
    UserId,
}

#[derive(Iden)]
enum Movements {
    Table,
    Id,
    Kind,
    Amount,
    Date,
    Note,
    UserId,
    CategoryId,
    CreditCardId,
    AccountId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-name-unique")
                    .table(Categories::Table)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CreditCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CreditCards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CreditCards::Name).string().not_null())
                    .col(
                        ColumnDef::new(CreditCards::LastFourDigits)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CreditCards::StatementClose)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CreditCards::MaxPaymentDue)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CreditCards::UserId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-credit_cards-user_id")
                            .from(CreditCards::Table, CreditCards::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Bank).string().not_null())
                    .col(ColumnDef::new(Accounts::AccountNumber).string().not_null())
                    .col(ColumnDef::new(Accounts::Balance).double().not_null())
                    .col(ColumnDef::new(Accounts::UserId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-user_id")
                            .from(Accounts::Table, Accounts::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-account_number-unique")
                    .table(Accounts::Table)
                    .col(Accounts::AccountNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movements::Kind).string().not_null())
                    .col(ColumnDef::new(Movements::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Movements::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Movements::Note).string())
                    .col(ColumnDef::new(Movements::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Movements::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Movements::CreditCardId).big_integer())
                    .col(ColumnDef::new(Movements::AccountId).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movements-user_id")
                            .from(Movements::Table, Movements::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movements-category_id")
                            .from(Movements::Table, Movements::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movements-credit_card_id")
                            .from(Movements::Table, Movements::CreditCardId)
                            .to(CreditCards::Table, CreditCards::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-movements-account_id")
                            .from(Movements::Table, Movements::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-movements-user_id")
                    .table(Movements::Table)
                    .col(Movements::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CreditCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
