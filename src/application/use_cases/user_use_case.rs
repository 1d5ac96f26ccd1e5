// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::auth_use_case::AuthUseCase;
use super::subscription_use_case::SubscriptionUseCase;
use crate::application::dto::auth_dto::{
    AuthSession, ChangePasswordRequest, EmailRequest, GoogleLoginRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest, VerifyOtpRequest,
};
use crate::application::dto::catalog_dto::{
    AlbumDetailDto, AlbumDto, ArtistDetailDto, LikeDto, SearchResultDto, TrackDto,
};
use crate::application::dto::payment_dto::{CheckoutRequest, CheckoutResponse};
use crate::application::dto::playlist_dto::{
    CreatePlaylistRequest, PlaylistDetailDto, PlaylistDto, UpdatePlaylistRequest,
};
use crate::application::dto::promotion_dto::{BannerDto, CouponCheckDto, CouponCodeRequest};
use crate::application::dto::user_dto::{ArtistDto, UpdateProfileRequest, UserDto};
use crate::domain::models::payment::Plan;
use crate::domain::models::playlist::Playlist;
use crate::domain::models::track::{Track, TrackFilter};
use crate::domain::models::user::UserRole;
use crate::domain::repositories::album_repository::AlbumRepository;
use crate::domain::repositories::banner_repository::BannerRepository;
use crate::domain::repositories::playlist_repository::PlaylistRepository;
use crate::domain::repositories::track_repository::TrackRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::storage_service::{StorageService, UploadedFile};
use crate::utils::errors::{DomainError, DomainResult};
use crate::utils::pagination::{Page, PageQuery};

/// 搜索每类结果的上限
const SEARCH_LIMIT: u64 = 10;

/// 普通用户用例：账号、喜欢、播放列表、曲库浏览与订阅
pub struct UserUseCase {
    auth: Arc<AuthUseCase>,
    subscriptions: Arc<SubscriptionUseCase>,
    users: Arc<dyn UserRepository>,
    tracks: Arc<dyn TrackRepository>,
    albums: Arc<dyn AlbumRepository>,
    playlists: Arc<dyn PlaylistRepository>,
    banners: Arc<dyn BannerRepository>,
    storage: Arc<dyn StorageService>,
}

impl UserUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth: Arc<AuthUseCase>,
        subscriptions: Arc<SubscriptionUseCase>,
        users: Arc<dyn UserRepository>,
        tracks: Arc<dyn TrackRepository>,
        albums: Arc<dyn AlbumRepository>,
        playlists: Arc<dyn PlaylistRepository>,
        banners: Arc<dyn BannerRepository>,
        storage: Arc<dyn StorageService>,
    ) -> Self {
        Self {
            auth,
            subscriptions,
            users,
            tracks,
            albums,
            playlists,
            banners,
            storage,
        }
    }

    pub async fn register(&self, dto: RegisterRequest) -> DomainResult<()> {
        self.auth.register(UserRole::User, dto).await
    }

    pub async fn verify_otp(&self, dto: VerifyOtpRequest) -> DomainResult<UserDto> {
        self.auth.verify_otp(UserRole::User, dto).await
    }

    pub async fn resend_otp(&self, dto: EmailRequest) -> DomainResult<()> {
        self.auth.resend_otp(dto).await
    }

    pub async fn login(&self, dto: LoginRequest) -> DomainResult<AuthSession> {
        self.auth.login(UserRole::User, dto).await
    }

    pub async fn google_login(&self, dto: GoogleLoginRequest) -> DomainResult<AuthSession> {
        self.auth.google_login(dto).await
    }

    pub async fn refresh(&self, refresh_token: Option<&str>) -> DomainResult<AuthSession> {
        self.auth.refresh(UserRole::User, refresh_token).await
    }

    pub async fn forgot_password(&self, dto: EmailRequest) -> DomainResult<()> {
        self.auth.forgot_password(dto).await
    }

    pub async fn reset_password(&self, dto: ResetPasswordRequest) -> DomainResult<()> {
        self.auth.reset_password(dto).await
    }

    pub async fn profile(&self, user_id: Uuid) -> DomainResult<UserDto> {
        self.auth.profile(user_id).await
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        dto: UpdateProfileRequest,
        image: Option<UploadedFile>,
    ) -> DomainResult<UserDto> {
        self.auth.update_profile(user_id, dto, image).await
    }

    pub async fn change_password(&self, user_id: Uuid, dto: ChangePasswordRequest) -> DomainResult<()> {
        self.auth.change_password(user_id, dto).await
    }

    /// 切换喜欢状态，返回切换后的状态
    pub async fn toggle_like(&self, user_id: Uuid, track_id: Uuid) -> DomainResult<LikeDto> {
        self.find_track(track_id).await?;
        let liked = self.users.toggle_like(user_id, track_id).await?;
        debug!("User {} {} track {}", user_id, if liked { "liked" } else { "unliked" }, track_id);
        Ok(LikeDto { track_id, liked })
    }

    pub async fn liked_songs(&self, user_id: Uuid) -> DomainResult<Vec<TrackDto>> {
        let ids = self.users.liked_track_ids(user_id).await?;
        self.tracks_dto(&ids).await
    }

    pub async fn create_playlist(&self, user_id: Uuid, dto: CreatePlaylistRequest) -> DomainResult<PlaylistDto> {
        dto.validate()?;
        let playlist = Playlist::new(
            user_id,
            dto.name.trim().to_string(),
            dto.description.filter(|d| !d.trim().is_empty()),
        );
        let playlist = self.playlists.create(&playlist).await?;
        info!("User {} created playlist {}", user_id, playlist.id);
        Ok(playlist.into())
    }

    pub async fn my_playlists(&self, user_id: Uuid, query: &PageQuery) -> DomainResult<Page<PlaylistDto>> {
        let (items, total) = self.playlists.list_by_user(user_id, query).await?;
        Ok(Page::new(items, total, query).map(Into::into))
    }

    pub async fn get_playlist(&self, playlist_id: Uuid) -> DomainResult<PlaylistDetailDto> {
        let playlist = self.find_playlist(playlist_id).await?;
        let track_details = self.tracks_dto(&playlist.tracks).await?;
        Ok(PlaylistDetailDto {
            playlist: playlist.into(),
            track_details,
        })
    }

    pub async fn update_playlist(
        &self,
        user_id: Uuid,
        playlist_id: Uuid,
        dto: UpdatePlaylistRequest,
        image: Option<UploadedFile>,
    ) -> DomainResult<PlaylistDto> {
        dto.validate()?;
        let mut playlist = self.owned_playlist(user_id, playlist_id).await?;
        if let Some(name) = dto.name {
            playlist.name = name.trim().to_string();
        }
        if let Some(description) = dto.description {
            playlist.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(image) = image.filter(|f| !f.is_empty()) {
            playlist.image_url = Some(self.storage.upload("playlists", image).await?);
        }
        playlist.updated_at = Utc::now().fixed_offset();
        Ok(self.playlists.update(&playlist).await?.into())
    }

    pub async fn delete_playlist(&self, user_id: Uuid, playlist_id: Uuid) -> DomainResult<()> {
        let playlist = self.owned_playlist(user_id, playlist_id).await?;
        self.playlists.delete(playlist.id).await?;
        Ok(())
    }

    pub async fn add_track_to_playlist(
        &self,
        user_id: Uuid,
        playlist_id: Uuid,
        track_id: Uuid,
    ) -> DomainResult<PlaylistDto> {
        let mut playlist = self.owned_playlist(user_id, playlist_id).await?;
        self.find_track(track_id).await?;
        if !playlist.add_track(track_id) {
            return Err(DomainError::Conflict("Track already in playlist".to_string()));
        }
        playlist.updated_at = Utc::now().fixed_offset();
        Ok(self.playlists.update(&playlist).await?.into())
    }

    pub async fn remove_track_from_playlist(
        &self,
        user_id: Uuid,
        playlist_id: Uuid,
        track_id: Uuid,
    ) -> DomainResult<PlaylistDto> {
        let mut playlist = self.owned_playlist(user_id, playlist_id).await?;
        if !playlist.remove_track(track_id) {
            return Err(DomainError::NotFound("Track not in playlist".to_string()));
        }
        playlist.updated_at = Utc::now().fixed_offset();
        Ok(self.playlists.update(&playlist).await?.into())
    }

    pub async fn albums(&self, query: &PageQuery) -> DomainResult<Page<AlbumDto>> {
        let (items, total) = self.albums.list(query).await?;
        Ok(Page::new(items, total, query).map(Into::into))
    }

    pub async fn album(&self, album_id: Uuid) -> DomainResult<AlbumDetailDto> {
        let album = self
            .albums
            .find_by_id(album_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Album not found".to_string()))?;
        let artist = self.users.find_by_id(album.artist_id).await?.map(ArtistDto::from);
        let track_details = self.tracks_dto(&album.tracks).await?;
        Ok(AlbumDetailDto {
            album: album.into(),
            artist,
            track_details,
        })
    }

    pub async fn artists(&self, query: &PageQuery) -> DomainResult<Page<ArtistDto>> {
        let (items, total) = self.users.list_by_role(UserRole::Artist, query).await?;
        Ok(Page::new(items, total, query).map(Into::into))
    }

    pub async fn artist(&self, artist_id: Uuid) -> DomainResult<ArtistDetailDto> {
        let artist = self
            .users
            .find_by_id(artist_id)
            .await?
            .filter(|user| user.role == UserRole::Artist)
            .ok_or_else(|| DomainError::NotFound("Artist not found".to_string()))?;
        let tracks = self.tracks.find_by_artist(artist.id).await?;
        let albums = self.albums.find_by_artist(artist.id).await?;
        Ok(ArtistDetailDto {
            artist: artist.into(),
            tracks: tracks.into_iter().map(Into::into).collect(),
            albums: albums.into_iter().map(Into::into).collect(),
        })
    }

    /// 同时在歌曲、专辑和艺术家中搜索，每类最多返回若干条
    pub async fn search(&self, term: Option<&str>) -> DomainResult<SearchResultDto> {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(SearchResultDto {
                tracks: Vec::new(),
                albums: Vec::new(),
                artists: Vec::new(),
            });
        };
        let query = PageQuery {
            page: Some(1),
            limit: Some(SEARCH_LIMIT),
            search: Some(term.to_string()),
        };

        let filter = TrackFilter {
            search: Some(term.to_string()),
            ..Default::default()
        };
        let (tracks, _) = self.tracks.list(&filter, &query).await?;
        let (albums, _) = self.albums.list(&query).await?;
        let (artists, _) = self.users.list_by_role(UserRole::Artist, &query).await?;

        Ok(SearchResultDto {
            tracks: tracks.into_iter().map(Into::into).collect(),
            albums: albums.into_iter().map(Into::into).collect(),
            artists: artists.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn active_banners(&self) -> DomainResult<Vec<BannerDto>> {
        let banners = self.banners.list_active().await?;
        Ok(banners.into_iter().map(Into::into).collect())
    }

    pub async fn plans(&self) -> DomainResult<Vec<Plan>> {
        self.subscriptions.plans().await
    }

    pub async fn verify_coupon(&self, user_id: Uuid, dto: CouponCodeRequest) -> DomainResult<CouponCheckDto> {
        self.subscriptions.verify_coupon(user_id, dto).await
    }

    pub async fn checkout(&self, user_id: Uuid, dto: CheckoutRequest) -> DomainResult<CheckoutResponse> {
        self.subscriptions.checkout(user_id, dto).await
    }

    pub async fn cancel_subscription(&self, user_id: Uuid) -> DomainResult<UserDto> {
        self.subscriptions.cancel_subscription(user_id).await
    }

    /// 按给定顺序加载歌曲，已删除的歌曲被跳过
    async fn tracks_dto(&self, ids: &[Uuid]) -> DomainResult<Vec<TrackDto>> {
        let tracks = self.tracks.find_by_ids(ids).await?;
        Ok(tracks.into_iter().map(Into::into).collect())
    }

    async fn find_track(&self, track_id: Uuid) -> DomainResult<Track> {
        self.tracks
            .find_by_id(track_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Track not found".to_string()))
    }

    async fn find_playlist(&self, playlist_id: Uuid) -> DomainResult<Playlist> {
        self.playlists
            .find_by_id(playlist_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Playlist not found".to_string()))
    }

    async fn owned_playlist(&self, user_id: Uuid, playlist_id: Uuid) -> DomainResult<Playlist> {
        let playlist = self.find_playlist(playlist_id).await?;
        if playlist.user_id != user_id {
            return Err(DomainError::Forbidden("You do not own this playlist".to_string()));
        }
        Ok(playlist)
    }
}

#[cfg(test)]
#[path = "user_use_case_test.rs"]
mod tests;
