//! Raider.IO enrichment
//!
//! Fetches the guild profile from the Raider.IO API and folds the
//! per-character data into the stored roster. User-assigned specs and
//! roles are never overwritten; only unassigned members pick up the
//! active spec reported by Raider.IO.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use roster_common::{AppError, RaiderIoConfig};
use roster_core::{Role, RosterData, RosterMember};

use crate::dto::RaiderIoSyncResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

// ============================================================================
// API client
// ============================================================================

/// Guild profile response, limited to the fields the sync uses.
#[derive(Debug, Clone, Deserialize)]
pub struct RioGuildProfile {
    pub members: Vec<RioGuildMember>,
    pub last_crawled_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RioGuildMember {
    pub character: RioCharacter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RioCharacter {
    pub name: String,
    pub active_spec_name: Option<String>,
    pub active_spec_role: Option<String>,
    pub profile_url: Option<String>,
    pub last_crawled_at: Option<String>,
}

/// Thin HTTP client for the Raider.IO guild profile endpoint.
#[derive(Debug, Clone)]
pub struct RaiderIoClient {
    http: Client,
    config: RaiderIoConfig,
}

impl RaiderIoClient {
    pub fn new(config: RaiderIoConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Fetch the guild profile with the members field expanded.
    #[instrument(skip(self), fields(guild = %self.config.guild_name))]
    pub async fn fetch_guild_profile(&self) -> ServiceResult<RioGuildProfile> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            ServiceError::App(AppError::Config(
                "RAIDERIO_API_KEY not found in environment variables".to_string(),
            ))
        })?;

        let url = format!("{}/guilds/profile", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_key", api_key),
                ("region", self.config.region.as_str()),
                ("realm", self.config.realm.as_str()),
                ("name", self.config.guild_name.as_str()),
                ("fields", "members"),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::App(AppError::ExternalService(e.to_string())))?;

        if !response.status().is_success() {
            return Err(ServiceError::App(AppError::ExternalService(format!(
                "Raider.IO API error: {}",
                response.status()
            ))));
        }

        let profile: RioGuildProfile = response
            .json()
            .await
            .map_err(|_| {
                ServiceError::App(AppError::ExternalService(
                    "Invalid response from Raider.IO API".to_string(),
                ))
            })?;

        info!(members = profile.members.len(), "Fetched guild profile from Raider.IO");
        Ok(profile)
    }
}

// ============================================================================
// Enrichment
// ============================================================================

/// Counters from folding Raider.IO data into a member list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichStats {
    pub updated: usize,
    pub roles_updated: usize,
    pub rio_members_found: usize,
}

/// Fold Raider.IO character data into `members`, matching by
/// case-insensitive name.
///
/// Assigned `mainSpec`/`mainRole` values are left alone; unassigned ones
/// are filled from the active spec when Raider.IO reports one.
pub fn enrich_members(members: &mut [RosterMember], profile: &RioGuildProfile) -> EnrichStats {
    let by_name: std::collections::HashMap<String, &RioCharacter> = profile
        .members
        .iter()
        .map(|m| (m.character.name.to_lowercase(), &m.character))
        .collect();

    let mut stats = EnrichStats {
        rio_members_found: by_name.len(),
        ..EnrichStats::default()
    };

    for member in members.iter_mut() {
        let Some(character) = by_name.get(&member.name.to_lowercase()) else {
            continue;
        };
        stats.updated += 1;

        if member.main_role.is_none() {
            if let Some(role) = character
                .active_spec_role
                .as_deref()
                .and_then(Role::from_rio)
            {
                member.main_role = Some(role);
                stats.roles_updated += 1;
            }
        }
        if member.main_spec.is_none() {
            member.main_spec.clone_from(&character.active_spec_name);
        }

        member
            .rio_active_spec_name
            .clone_from(&character.active_spec_name);
        member
            .rio_active_spec_role
            .clone_from(&character.active_spec_role);
        member.rio_profile_url.clone_from(&character.profile_url);
        member
            .rio_last_crawled
            .clone_from(&character.last_crawled_at);
    }

    stats
}

// ============================================================================
// Service
// ============================================================================

/// Raider.IO sync service
pub struct RaiderIoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RaiderIoService<'a> {
    /// Create a new RaiderIoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch the guild profile and fold it into the stored roster.
    #[instrument(skip(self))]
    pub async fn sync(&self) -> ServiceResult<RaiderIoSyncResponse> {
        let profile = self.ctx.raider_io().fetch_guild_profile().await?;
        self.apply_profile(&profile).await
    }

    /// Apply an already-fetched profile to the stored roster.
    pub async fn apply_profile(&self, profile: &RioGuildProfile) -> ServiceResult<RaiderIoSyncResponse> {
        let mut current = self.ctx.store().load().await?;
        let stats = enrich_members(&mut current.members, profile);

        let last_updated = if current.last_updated > 0 {
            current.last_updated
        } else {
            Utc::now().timestamp()
        };
        let data = RosterData::new(current.members, last_updated);
        self.ctx.store().save(&data).await?;

        info!(
            updated = stats.updated,
            roles_updated = stats.roles_updated,
            "Roster enriched from Raider.IO"
        );

        Ok(RaiderIoSyncResponse {
            success: true,
            updated_count: stats.updated,
            role_updated_count: stats.roles_updated,
            total_members: data.member_count(),
            rio_members_found: stats.rio_members_found,
            last_crawled: profile.last_crawled_at.clone(),
        })
    }
}
