//! Profile Service
//!
//! Read and write operations over bio profiles: public lookups, the
//! owner's own view, partial updates, deletion, and the directory listing.

use validator::Validate;

use crate::database::store::{SealVisibility, UserStore};
use crate::models::auth::SessionContext;
use crate::models::requests::UpdateProfileRequest;
use crate::models::user::{Profile, ProfileChanges};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::validation_error;

/// Hard cap on the directory listing size
const LIST_LIMIT: i64 = 100;

/// Profile read/write service over the user record store
#[derive(Clone)]
pub struct ProfileService {
    store: UserStore,
}

impl ProfileService {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    /// Public profile lookup by username. Pending seals are hidden.
    pub async fn get(&self, username: &str) -> AppResult<Profile> {
        let record = self
            .store
            .find_by_username(username.trim(), SealVisibility::VerifiedOnly)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

        Ok(record.into())
    }

    /// The caller's own profile, including pending seals awaiting confirmation
    pub async fn get_own(&self, session: &SessionContext) -> AppResult<Profile> {
        let record = self
            .store
            .find_by_id(session.user_id, SealVisibility::IncludePending)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

        Ok(record.into())
    }

    /// Apply a partial profile update and return the updated record.
    ///
    /// Absent fields are untouched; a provided link set replaces all stored
    /// links.
    pub async fn update(
        &self,
        session: &SessionContext,
        request: UpdateProfileRequest,
    ) -> AppResult<Profile> {
        request.validate().map_err(validation_error)?;

        let changes = ProfileChanges {
            display_name: request.display_name,
            bio: request.bio,
            avatar_url: request.avatar_url,
            links: request.links,
        };

        self.store.update_profile(session.user_id, &changes).await?;

        let record = self
            .store
            .find_by_id(session.user_id, SealVisibility::IncludePending)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

        log::info!("Profile updated: {}", record.username);

        Ok(record.into())
    }

    /// Delete the caller's account and everything attached to it
    pub async fn delete(&self, session: &SessionContext) -> AppResult<()> {
        let removed = self.store.delete(session.user_id).await?;
        if !removed {
            return Err(AppError::NotFound("User profile not found".to_string()));
        }

        log::info!("Account deleted: {}", session.username);
        Ok(())
    }

    /// Directory listing of all users, capped at a fixed limit.
    /// Only verified seals are included.
    pub async fn list_all(&self) -> AppResult<Vec<Profile>> {
        let records = self
            .store
            .list_all(LIST_LIMIT, SealVisibility::VerifiedOnly)
            .await?;

        Ok(records.into_iter().map(Profile::from).collect())
    }
}
