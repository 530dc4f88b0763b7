//! Attestation (Seal) Service
//!
//! The state machine governing how one account vouches for another's work
//! experience. A seal starts Pending and may only transition to Verified,
//! which is terminal.

use uuid::Uuid;
use validator::Validate;

use crate::database::store::{SealVisibility, UserStore};
use crate::models::auth::SessionContext;
use crate::models::requests::SealRequest;
use crate::models::user::{AccountKind, Experience, NewExperience, SealStatus};
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation::validation_error;

/// Trust model for seal creation.
///
/// `Authorized` is the production design: authenticated, company-only,
/// pending-by-default. `Open` is the unauthenticated demo variant that
/// records already-verified seals under a fixed demo issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SealMode {
    Open,
    #[default]
    Authorized,
}

impl SealMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(SealMode::Open),
            "authorized" => Some(SealMode::Authorized),
            _ => None,
        }
    }
}

/// Fixed issuer identity used in open (demo) mode
const DEMO_ISSUER_ID: &str = "demo_company";
const DEMO_ISSUER_NAME: &str = "Demo Company";
const DEMO_ISSUER_AVATAR: &str = "https://api.dicebear.com/8.x/icons/svg?seed=demo";

/// Seal issuance and confirmation over the user record store
#[derive(Clone)]
pub struct SealService {
    store: UserStore,
    mode: SealMode,
}

impl SealService {
    pub fn new(store: UserStore, mode: SealMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> SealMode {
        self.mode
    }

    /// Create a seal against a person's profile.
    ///
    /// In authorized mode the caller must be an authenticated company
    /// account and the seal starts Pending. In open mode no authentication
    /// is required and the seal is recorded as Verified under the demo
    /// issuer. Duplicate requests produce duplicate entries; there is no
    /// deduplication key.
    pub async fn request_seal(
        &self,
        session: Option<&SessionContext>,
        request: SealRequest,
    ) -> AppResult<Experience> {
        request.validate().map_err(validation_error)?;

        let (issuer_id, issuer_name, issuer_avatar, status) = match self.mode {
            SealMode::Authorized => {
                let session = session.ok_or_else(|| {
                    AppError::Unauthorized("Authentication required to seal a bio".to_string())
                })?;

                let issuer = self
                    .store
                    .find_by_id(session.user_id, SealVisibility::VerifiedOnly)
                    .await?
                    .ok_or_else(|| {
                        AppError::Unauthorized("Issuer account no longer exists".to_string())
                    })?;

                if issuer.account_kind != AccountKind::Company {
                    return Err(AppError::Policy(
                        "Only company accounts can seal a bio".to_string(),
                    ));
                }

                (
                    issuer.id.to_string(),
                    issuer.display_name,
                    Some(issuer.avatar_url).filter(|url| !url.is_empty()),
                    SealStatus::Pending,
                )
            }
            SealMode::Open => (
                DEMO_ISSUER_ID.to_string(),
                DEMO_ISSUER_NAME.to_string(),
                Some(DEMO_ISSUER_AVATAR.to_string()),
                SealStatus::Verified,
            ),
        };

        let target = self
            .store
            .find_by_username(request.person_handle.trim(), SealVisibility::VerifiedOnly)
            .await?
            .ok_or_else(|| AppError::NotFound("Target user profile not found".to_string()))?;

        if target.account_kind != AccountKind::Person {
            return Err(AppError::Policy(
                "Bios can only be sealed for personal accounts".to_string(),
            ));
        }

        let experience = self
            .store
            .add_experience(
                target.id,
                &NewExperience {
                    role: request.role,
                    period: request.period,
                    description: request.description,
                    sealed_by_org_id: issuer_id,
                    sealed_by_org_name: issuer_name,
                    sealed_by_org_avatar_url: issuer_avatar,
                    status,
                },
            )
            .await?;

        log::info!(
            "Seal created for {} by {} ({})",
            target.username,
            experience.sealed_by_org_name,
            experience.status.as_str()
        );

        Ok(experience)
    }

    /// Confirm a pending seal on the caller's own profile, transitioning it
    /// to Verified. Confirming an already-verified seal is a no-op.
    pub async fn confirm_seal(
        &self,
        session: &SessionContext,
        experience_id: Uuid,
    ) -> AppResult<Experience> {
        let (owner_id, experience) = self
            .store
            .find_experience(experience_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Seal not found".to_string()))?;

        if owner_id != session.user_id {
            return Err(AppError::Policy(
                "Only the profile owner can confirm a seal".to_string(),
            ));
        }

        if experience.status == SealStatus::Verified {
            return Ok(experience);
        }

        self.store.mark_experience_verified(experience_id).await
    }
}
