use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::ArtistId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::IdProofUrl)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(VerificationRequests::Feedback).text().null())
                    .col(
                        ColumnDef::new(VerificationRequests::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(VerificationRequests::ReviewedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_verification_requests_status")
                    .table(VerificationRequests::Table)
                    .col(VerificationRequests::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerificationRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum VerificationRequests {
    Table,
    Id,
    ArtistId,
    IdProofUrl,
    Status,
    Feedback,
    SubmittedAt,
    ReviewedAt,
}
