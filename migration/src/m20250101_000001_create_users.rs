use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(20)
                            .not_null()
                            .default("user"),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::Premium).string().null())
                    .col(
                        ColumnDef::new(Users::PremiumExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Users::StripeCustomerId).string().null())
                    .col(ColumnDef::new(Users::StripePaymentMethodId).string().null())
                    .col(ColumnDef::new(Users::StripeSubscriptionId).string().null())
                    .col(ColumnDef::new(Users::GoogleId).string().null())
                    .col(ColumnDef::new(Users::ProfileImage).string().null())
                    .col(ColumnDef::new(Users::Bio).text().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create user_liked_songs table
        manager
            .create_table(
                Table::create()
                    .table(UserLikedSongs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserLikedSongs::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserLikedSongs::TrackId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserLikedSongs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserLikedSongs::UserId)
                            .col(UserLikedSongs::TrackId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_stripe_subscription")
                    .table(Users::Table)
                    .col(Users::StripeSubscriptionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLikedSongs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    IsActive,
    Premium,
    PremiumExpiresAt,
    StripeCustomerId,
    StripePaymentMethodId,
    StripeSubscriptionId,
    GoogleId,
    ProfileImage,
    Bio,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserLikedSongs {
    Table,
    UserId,
    TrackId,
    CreatedAt,
}
