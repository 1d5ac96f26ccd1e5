use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Genres::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Genres::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Genres::IsBlocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Genres::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Genres::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Albums::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Albums::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Albums::Name).string().not_null())
                    .col(ColumnDef::new(Albums::Description).text().null())
                    .col(ColumnDef::new(Albums::ArtistId).uuid().not_null())
                    .col(ColumnDef::new(Albums::CoverImage).string().null())
                    // JSON array of track ids, ordered
                    .col(
                        ColumnDef::new(Albums::TrackIds)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Albums::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Albums::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tracks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tracks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tracks::Title).string().not_null())
                    .col(ColumnDef::new(Tracks::ArtistId).uuid().not_null())
                    .col(
                        ColumnDef::new(Tracks::Genres)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Tracks::AlbumId).uuid().null())
                    .col(ColumnDef::new(Tracks::FileUrl).string().not_null())
                    .col(ColumnDef::new(Tracks::ImageUrl).string().null())
                    .col(ColumnDef::new(Tracks::DurationSeconds).integer().null())
                    .col(
                        ColumnDef::new(Tracks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tracks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 监听者集合：主键保证同一用户只记录一次
        manager
            .create_table(
                Table::create()
                    .table(TrackListeners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TrackListeners::TrackId).uuid().not_null())
                    .col(ColumnDef::new(TrackListeners::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(TrackListeners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(TrackListeners::TrackId)
                            .col(TrackListeners::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        // 每首歌每月一行播放计数
        manager
            .create_table(
                Table::create()
                    .table(TrackPlayHistory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TrackPlayHistory::TrackId).uuid().not_null())
                    .col(ColumnDef::new(TrackPlayHistory::Year).integer().not_null())
                    .col(ColumnDef::new(TrackPlayHistory::Month).integer().not_null())
                    .col(
                        ColumnDef::new(TrackPlayHistory::Plays)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(TrackPlayHistory::TrackId)
                            .col(TrackPlayHistory::Year)
                            .col(TrackPlayHistory::Month),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracks_artist")
                    .table(Tracks::Table)
                    .col(Tracks::ArtistId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_albums_artist")
                    .table(Albums::Table)
                    .col(Albums::ArtistId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrackPlayHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrackListeners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tracks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Albums::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    Name,
    IsBlocked,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Albums {
    Table,
    Id,
    Name,
    Description,
    ArtistId,
    CoverImage,
    TrackIds,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tracks {
    Table,
    Id,
    Title,
    ArtistId,
    Genres,
    AlbumId,
    FileUrl,
    ImageUrl,
    DurationSeconds,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TrackListeners {
    Table,
    TrackId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TrackPlayHistory {
    Table,
    TrackId,
    Year,
    Month,
    Plays,
}
