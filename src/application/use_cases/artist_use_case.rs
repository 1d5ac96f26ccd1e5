// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::auth_use_case::AuthUseCase;
use super::subscription_use_case::SubscriptionUseCase;
use crate::application::dto::auth_dto::{AuthSession, LoginRequest, RegisterRequest, VerifyOtpRequest};
use crate::application::dto::catalog_dto::{
    AlbumDto, CreateAlbumRequest, TrackDto, UpdateAlbumRequest, UpdateTrackRequest,
    UploadTrackRequest,
};
use crate::application::dto::payment_dto::{ArtistMonetizationDto, PayoutDto};
use crate::application::dto::user_dto::{UpdateProfileRequest, UserDto};
use crate::application::dto::verification_dto::VerificationStatusDto;
use crate::domain::models::album::Album;
use crate::domain::models::genre::normalize_genre_name;
use crate::domain::models::monetization::{cents_to_dollars, TrackMonetization};
use crate::domain::models::track::{BillingPeriod, NewTrack, Track, TrackChanges};
use crate::domain::models::user::UserRole;
use crate::domain::models::verification::VerificationRequest;
use crate::domain::repositories::album_repository::AlbumRepository;
use crate::domain::repositories::genre_repository::GenreRepository;
use crate::domain::repositories::track_repository::TrackRepository;
use crate::domain::repositories::verification_repository::VerificationRepository;
use crate::domain::services::storage_service::{StorageService, UploadedFile};
use crate::utils::errors::{DomainError, DomainResult};

/// 艺术家用例：歌曲与专辑管理、收益、提现与身份认证
pub struct ArtistUseCase {
    auth: Arc<AuthUseCase>,
    subscriptions: Arc<SubscriptionUseCase>,
    tracks: Arc<dyn TrackRepository>,
    albums: Arc<dyn AlbumRepository>,
    genres: Arc<dyn GenreRepository>,
    verifications: Arc<dyn VerificationRepository>,
    storage: Arc<dyn StorageService>,
}

impl ArtistUseCase {
    pub fn new(
        auth: Arc<AuthUseCase>,
        subscriptions: Arc<SubscriptionUseCase>,
        tracks: Arc<dyn TrackRepository>,
        albums: Arc<dyn AlbumRepository>,
        genres: Arc<dyn GenreRepository>,
        verifications: Arc<dyn VerificationRepository>,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        Self {
            auth,
            subscriptions,
            tracks,
            albums,
            genres,
            verifications,
            storage,
        }
    }

    pub fn auth(&self) -> &AuthUseCase {
        &self.auth
    }

    pub async fn register(&self, dto: RegisterRequest) -> DomainResult<()> {
        self.auth.register(UserRole::Artist, dto).await
    }

    pub async fn verify_otp(&self, dto: VerifyOtpRequest) -> DomainResult<UserDto> {
        self.auth.verify_otp(UserRole::Artist, dto).await
    }

    pub async fn login(&self, dto: LoginRequest) -> DomainResult<AuthSession> {
        self.auth.login(UserRole::Artist, dto).await
    }

    pub async fn refresh(&self, refresh_token: Option<&str>) -> DomainResult<AuthSession> {
        self.auth.refresh(UserRole::Artist, refresh_token).await
    }

    pub async fn profile(&self, artist_id: Uuid) -> DomainResult<UserDto> {
        self.auth.profile(artist_id).await
    }

    pub async fn update_profile(
        &self,
        artist_id: Uuid,
        dto: UpdateProfileRequest,
        image: Option<UploadedFile>,
    ) -> DomainResult<UserDto> {
        self.auth.update_profile(artist_id, dto, image).await
    }

    /// 上传歌曲：校验流派、上传音频与封面，并追加到所属专辑末尾
    pub async fn upload_track(
        &self,
        artist_id: Uuid,
        dto: UploadTrackRequest,
        audio: Option<UploadedFile>,
        image: Option<UploadedFile>,
    ) -> DomainResult<TrackDto> {
        dto.validate()?;
        let (Some(audio), Some(image)) = (
            audio.filter(|f| !f.is_empty()),
            image.filter(|f| !f.is_empty()),
        ) else {
            return Err(DomainError::Validation(
                "Audio file and cover image are required".to_string(),
            ));
        };

        let genres = self.check_genres(&dto.genres).await?;
        let album = match dto.album_id {
            Some(album_id) => Some(self.owned_album(artist_id, album_id).await?),
            None => None,
        };

        let file_url = self.storage.upload("tracks", audio).await?;
        let image_url = self.storage.upload("track-covers", image).await?;

        let track = self
            .tracks
            .create(NewTrack {
                title: dto.title.trim().to_string(),
                artist_id,
                genres,
                album_id: album.as_ref().map(|a| a.id),
                file_url,
                image_url: Some(image_url),
                duration_seconds: None,
            })
            .await?;

        if let Some(mut album) = album {
            album.tracks.push(track.id);
            album.updated_at = Utc::now().fixed_offset();
            self.albums.update(&album).await?;
        }

        info!("Artist {} uploaded track {}", artist_id, track.id);
        Ok(track.into())
    }

    pub async fn update_track(
        &self,
        artist_id: Uuid,
        track_id: Uuid,
        dto: UpdateTrackRequest,
        audio: Option<UploadedFile>,
        image: Option<UploadedFile>,
    ) -> DomainResult<TrackDto> {
        dto.validate()?;
        let track = self.owned_track(artist_id, track_id).await?;

        let mut changes = TrackChanges {
            title: dto.title.map(|t| t.trim().to_string()),
            ..Default::default()
        };
        if let Some(genres) = dto.genres {
            changes.genres = Some(self.check_genres(&genres).await?);
        }

        if let Some(new_album) = dto.album_id {
            if new_album != track.album_id {
                if let Some(album_id) = new_album {
                    let mut album = self.owned_album(artist_id, album_id).await?;
                    album.tracks.push(track.id);
                    album.updated_at = Utc::now().fixed_offset();
                    self.albums.update(&album).await?;
                }
                if let Some(old_id) = track.album_id {
                    self.detach_from_album(old_id, track.id).await?;
                }
                changes.album_id = Some(new_album);
            }
        }

        if let Some(audio) = audio.filter(|f| !f.is_empty()) {
            changes.file_url = Some(self.storage.upload("tracks", audio).await?);
        }
        if let Some(image) = image.filter(|f| !f.is_empty()) {
            changes.image_url = Some(self.storage.upload("track-covers", image).await?);
        }

        Ok(self.tracks.update(track.id, changes).await?.into())
    }

    pub async fn delete_track(&self, artist_id: Uuid, track_id: Uuid) -> DomainResult<()> {
        let track = self.owned_track(artist_id, track_id).await?;
        if let Some(album_id) = track.album_id {
            self.detach_from_album(album_id, track.id).await?;
        }
        self.tracks.delete(track.id).await?;
        info!("Artist {} deleted track {}", artist_id, track_id);
        Ok(())
    }

    pub async fn my_tracks(&self, artist_id: Uuid) -> DomainResult<Vec<TrackDto>> {
        let tracks = self.tracks.find_by_artist(artist_id).await?;
        Ok(tracks.into_iter().map(Into::into).collect())
    }

    pub async fn create_album(
        &self,
        artist_id: Uuid,
        dto: CreateAlbumRequest,
        cover: Option<UploadedFile>,
    ) -> DomainResult<AlbumDto> {
        dto.validate()?;
        let cover_image = match cover.filter(|f| !f.is_empty()) {
            Some(file) => Some(self.storage.upload("album-covers", file).await?),
            None => None,
        };
        let album = Album::new(
            artist_id,
            dto.name.trim().to_string(),
            dto.description.filter(|d| !d.trim().is_empty()),
            cover_image,
        );
        Ok(self.albums.create(&album).await?.into())
    }

    pub async fn my_albums(&self, artist_id: Uuid) -> DomainResult<Vec<AlbumDto>> {
        let albums = self.albums.find_by_artist(artist_id).await?;
        Ok(albums.into_iter().map(Into::into).collect())
    }

    pub async fn update_album(
        &self,
        artist_id: Uuid,
        album_id: Uuid,
        dto: UpdateAlbumRequest,
        cover: Option<UploadedFile>,
    ) -> DomainResult<AlbumDto> {
        dto.validate()?;
        let mut album = self.owned_album(artist_id, album_id).await?;
        if let Some(name) = dto.name {
            album.name = name.trim().to_string();
        }
        if let Some(description) = dto.description {
            album.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(file) = cover.filter(|f| !f.is_empty()) {
            album.cover_image = Some(self.storage.upload("album-covers", file).await?);
        }
        album.updated_at = Utc::now().fixed_offset();
        Ok(self.albums.update(&album).await?.into())
    }

    /// 删除专辑，歌曲保留但不再属于任何专辑
    pub async fn delete_album(&self, artist_id: Uuid, album_id: Uuid) -> DomainResult<()> {
        let album = self.owned_album(artist_id, album_id).await?;
        let detached = self.tracks.clear_album(album.id).await?;
        self.albums.delete(album.id).await?;
        info!("Artist {} deleted album {} ({} tracks detached)", artist_id, album_id, detached);
        Ok(())
    }

    pub async fn monetization(&self, artist_id: Uuid) -> DomainResult<ArtistMonetizationDto> {
        let period = BillingPeriod::current();
        let per_play_cents = self.subscriptions.options().per_play_cents;
        let tracks: Vec<TrackMonetization> = self
            .tracks
            .find_by_artist(artist_id)
            .await?
            .iter()
            .map(|track| TrackMonetization::compute(track, period, per_play_cents))
            .collect();

        let total_plays: i64 = tracks.iter().map(|t| t.total_plays).sum();
        let monthly_plays: i64 = tracks.iter().map(|t| t.monthly_plays).sum();
        Ok(ArtistMonetizationDto {
            period: period.label(),
            per_play_rate: cents_to_dollars(per_play_cents),
            total_plays,
            monthly_plays,
            total_revenue: cents_to_dollars(total_plays * per_play_cents),
            monthly_revenue: cents_to_dollars(monthly_plays * per_play_cents),
            tracks,
        })
    }

    /// 按当月播放数发起提现
    pub async fn payout(&self, artist_id: Uuid) -> DomainResult<PayoutDto> {
        let artist = self.auth.load(artist_id).await?;
        let period = BillingPeriod::current();
        let monthly_plays: i64 = self
            .tracks
            .find_by_artist(artist_id)
            .await?
            .iter()
            .map(|track| track.plays_in(period))
            .sum();

        self.subscriptions
            .payout_checkout(&artist, monthly_plays, period)
            .await
    }

    /// 提交身份认证，只有被拒绝后才能重新提交
    pub async fn submit_verification(
        &self,
        artist_id: Uuid,
        id_document: Option<UploadedFile>,
    ) -> DomainResult<VerificationStatusDto> {
        let Some(document) = id_document.filter(|f| !f.is_empty()) else {
            return Err(DomainError::Validation("ID document is required".to_string()));
        };
        if let Some(existing) = self.verifications.find_by_artist(artist_id).await? {
            if !existing.can_resubmit() {
                return Err(DomainError::Conflict(format!(
                    "Verification request is already {}",
                    existing.status
                )));
            }
        }

        let url = self.storage.upload("verification", document).await?;
        let request = self
            .verifications
            .upsert(&VerificationRequest::new(artist_id, url))
            .await?;
        info!("Artist {} submitted verification {}", artist_id, request.id);
        Ok(request.into())
    }

    pub async fn verification_status(&self, artist_id: Uuid) -> DomainResult<VerificationStatusDto> {
        Ok(self
            .verifications
            .find_by_artist(artist_id)
            .await?
            .map(Into::into)
            .unwrap_or_else(VerificationStatusDto::unsubmitted))
    }

    /// 规范化流派名称并确认存在且未被屏蔽
    async fn check_genres(&self, names: &[String]) -> DomainResult<Vec<String>> {
        let mut genres: Vec<String> = Vec::with_capacity(names.len());
        for raw in names {
            let name = normalize_genre_name(raw);
            if name.is_empty() || genres.contains(&name) {
                continue;
            }
            let genre = self
                .genres
                .find_by_name(&name)
                .await?
                .ok_or_else(|| DomainError::Validation(format!("Genre '{}' does not exist", name)))?;
            if genre.is_blocked {
                return Err(DomainError::Validation(format!("Genre '{}' is blocked", genre.name)));
            }
            genres.push(genre.name);
        }
        if genres.is_empty() {
            return Err(DomainError::Validation(
                "At least one genre is required".to_string(),
            ));
        }
        Ok(genres)
    }

    async fn owned_track(&self, artist_id: Uuid, track_id: Uuid) -> DomainResult<Track> {
        let track = self
            .tracks
            .find_by_id(track_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Track not found".to_string()))?;
        if track.artist_id != artist_id {
            return Err(DomainError::Forbidden("You do not own this track".to_string()));
        }
        Ok(track)
    }

    async fn owned_album(&self, artist_id: Uuid, album_id: Uuid) -> DomainResult<Album> {
        let album = self
            .albums
            .find_by_id(album_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Album not found".to_string()))?;
        if album.artist_id != artist_id {
            return Err(DomainError::Forbidden("You do not own this album".to_string()));
        }
        Ok(album)
    }

    async fn detach_from_album(&self, album_id: Uuid, track_id: Uuid) -> DomainResult<()> {
        if let Some(mut album) = self.albums.find_by_id(album_id).await? {
            album.tracks.retain(|id| *id != track_id);
            album.updated_at = Utc::now().fixed_offset();
            self.albums.update(&album).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "artist_use_case_test.rs"]
mod tests;
