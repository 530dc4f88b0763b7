//! User Record Store
//!
//! Persistence for users, profiles, social links, and experience seals.
//! Each read reconstructs a full [`UserRecord`] by joining the user,
//! profile, links, and experience rows.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{
    AccountKind, Experience, NewExperience, NewUser, ProfileChanges, SealStatus, SocialLinks,
    UserRecord,
};
use crate::utils::error::{AppError, AppResult};

/// Which experience seals a record read should include
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealVisibility {
    /// Publicly visible reads: verified seals only
    VerifiedOnly,
    /// Owner/administrative reads: pending seals included
    IncludePending,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: Option<String>,
    account_kind: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    display_name: String,
    bio: String,
    avatar_url: String,
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    icon: String,
    url: String,
}

#[derive(sqlx::FromRow)]
struct ExperienceRow {
    id: Uuid,
    user_id: Uuid,
    role: String,
    period: String,
    description: Option<String>,
    sealed_by_org_id: String,
    sealed_by_org_name: String,
    sealed_by_org_avatar_url: Option<String>,
    status: String,
    sealed_at: DateTime<Utc>,
}

impl ExperienceRow {
    fn into_experience(self) -> AppResult<Experience> {
        let status = SealStatus::parse(&self.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown seal status '{}'", self.status)))?;

        Ok(Experience {
            id: self.id,
            role: self.role,
            period: self.period,
            description: self.description,
            sealed_by_org_id: self.sealed_by_org_id,
            sealed_by_org_name: self.sealed_by_org_name,
            sealed_by_org_avatar_url: self.sealed_by_org_avatar_url,
            status,
            sealed_at: self.sealed_at,
        })
    }
}

/// PostgreSQL-backed user record store
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a full user record by username
    pub async fn find_by_username(
        &self,
        username: &str,
        visibility: SealVisibility,
    ) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, account_kind, created_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row, visibility).await?)),
            None => Ok(None),
        }
    }

    /// Look up a full user record by id
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        visibility: SealVisibility,
    ) -> AppResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, account_kind, created_at \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row, visibility).await?)),
            None => Ok(None),
        }
    }

    /// Create a user with its profile sub-record atomically.
    ///
    /// A duplicate username surfaces as [`AppError::Conflict`].
    pub async fn create(&self, user: &NewUser) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, account_kind, created_at) \
             VALUES ($1, $2, $3, $4, NOW())",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.account_kind.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.constraint() == Some("users_username_key") => {
                AppError::Conflict("Username already taken".to_string())
            }
            _ => AppError::Database(e),
        })?;

        sqlx::query(
            "INSERT INTO profiles (user_id, display_name, bio, avatar_url) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id)
        .bind(&user.display_name)
        .bind(&user.bio)
        .bind(&user.avatar_url)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// List up to `limit` user records in a stable order
    pub async fn list_all(
        &self,
        limit: i64,
        visibility: SealVisibility,
    ) -> AppResult<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, account_kind, created_at \
             FROM users ORDER BY created_at, id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(self.hydrate(row, visibility).await?);
        }
        Ok(records)
    }

    /// Apply a partial profile update.
    ///
    /// Only provided fields change; an empty change set is a no-op. A
    /// provided link set replaces all stored links.
    pub async fn update_profile(&self, user_id: Uuid, changes: &ProfileChanges) -> AppResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE profiles SET \
                 display_name = COALESCE($2, display_name), \
                 bio = COALESCE($3, bio), \
                 avatar_url = COALESCE($4, avatar_url) \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(&changes.display_name)
        .bind(&changes.bio)
        .bind(&changes.avatar_url)
        .execute(&mut *tx)
        .await?;

        if let Some(links) = &changes.links {
            sqlx::query("DELETE FROM links WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

            for (sort_order, (icon, url)) in links.entries().into_iter().enumerate() {
                sqlx::query(
                    "INSERT INTO links (id, user_id, icon, url, sort_order) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(Uuid::new_v4())
                .bind(user_id)
                .bind(icon)
                .bind(url)
                .bind(sort_order as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a user, cascading to profile, links, and experiences.
    ///
    /// Returns whether a row was actually removed.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append an experience seal to the target user's record
    pub async fn add_experience(
        &self,
        user_id: Uuid,
        experience: &NewExperience,
    ) -> AppResult<Experience> {
        let row = sqlx::query_as::<_, ExperienceRow>(
            "INSERT INTO experiences \
                 (id, user_id, role, period, description, sealed_by_org_id, \
                  sealed_by_org_name, sealed_by_org_avatar_url, status, sealed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW()) \
             RETURNING id, user_id, role, period, description, sealed_by_org_id, \
                       sealed_by_org_name, sealed_by_org_avatar_url, status, sealed_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&experience.role)
        .bind(&experience.period)
        .bind(&experience.description)
        .bind(&experience.sealed_by_org_id)
        .bind(&experience.sealed_by_org_name)
        .bind(&experience.sealed_by_org_avatar_url)
        .bind(experience.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.into_experience()
    }

    /// Look up an experience seal by id, returning the owning user id with it
    pub async fn find_experience(
        &self,
        experience_id: Uuid,
    ) -> AppResult<Option<(Uuid, Experience)>> {
        let row = sqlx::query_as::<_, ExperienceRow>(
            "SELECT id, user_id, role, period, description, sealed_by_org_id, \
                    sealed_by_org_name, sealed_by_org_avatar_url, status, sealed_at \
             FROM experiences WHERE id = $1",
        )
        .bind(experience_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let owner = row.user_id;
                Ok(Some((owner, row.into_experience()?)))
            }
            None => Ok(None),
        }
    }

    /// Transition a pending seal to verified (terminal state)
    pub async fn mark_experience_verified(&self, experience_id: Uuid) -> AppResult<Experience> {
        let row = sqlx::query_as::<_, ExperienceRow>(
            "UPDATE experiences SET status = 'verified' WHERE id = $1 \
             RETURNING id, user_id, role, period, description, sealed_by_org_id, \
                       sealed_by_org_name, sealed_by_org_avatar_url, status, sealed_at",
        )
        .bind(experience_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Seal not found".to_string()))?;

        row.into_experience()
    }

    async fn hydrate(&self, row: UserRow, visibility: SealVisibility) -> AppResult<UserRecord> {
        let account_kind = AccountKind::parse(&row.account_kind).ok_or_else(|| {
            AppError::Internal(format!("Unknown account kind '{}'", row.account_kind))
        })?;

        let profile = sqlx::query_as::<_, ProfileRow>(
            "SELECT display_name, bio, avatar_url FROM profiles WHERE user_id = $1",
        )
        .bind(row.id)
        .fetch_optional(&self.pool)
        .await?;

        let link_rows = sqlx::query_as::<_, LinkRow>(
            "SELECT icon, url FROM links WHERE user_id = $1 ORDER BY sort_order",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        let experience_query = match visibility {
            SealVisibility::VerifiedOnly => {
                "SELECT id, user_id, role, period, description, sealed_by_org_id, \
                        sealed_by_org_name, sealed_by_org_avatar_url, status, sealed_at \
                 FROM experiences WHERE user_id = $1 AND status = 'verified' \
                 ORDER BY sealed_at, id"
            }
            SealVisibility::IncludePending => {
                "SELECT id, user_id, role, period, description, sealed_by_org_id, \
                        sealed_by_org_name, sealed_by_org_avatar_url, status, sealed_at \
                 FROM experiences WHERE user_id = $1 \
                 ORDER BY sealed_at, id"
            }
        };

        let experience_rows = sqlx::query_as::<_, ExperienceRow>(experience_query)
            .bind(row.id)
            .fetch_all(&self.pool)
            .await?;

        let mut experiences = Vec::with_capacity(experience_rows.len());
        for experience_row in experience_rows {
            experiences.push(experience_row.into_experience()?);
        }

        let links = SocialLinks::from_entries(
            link_rows
                .iter()
                .map(|link| (link.icon.as_str(), link.url.clone())),
        );

        let (display_name, bio, avatar_url) = match profile {
            Some(profile) => (profile.display_name, profile.bio, profile.avatar_url),
            // Profile row missing is tolerated; fall back to the handle.
            None => (row.username.clone(), String::new(), String::new()),
        };

        Ok(UserRecord {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            account_kind,
            display_name,
            bio,
            avatar_url,
            links,
            experiences,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, kind: AccountKind) -> NewUser {
        NewUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: Some("abcd:ef01".to_string()),
            account_kind: kind,
            display_name: username.to_string(),
            bio: "Welcome!".to_string(),
            avatar_url: format!("https://api.dicebear.com/8.x/lorelei/svg?seed={}", username),
        }
    }

    fn new_experience(status: SealStatus) -> NewExperience {
        NewExperience {
            role: "Engineer".to_string(),
            period: "2023-2024".to_string(),
            description: Some("Platform work".to_string()),
            sealed_by_org_id: Uuid::new_v4().to_string(),
            sealed_by_org_name: "AcmeCo".to_string(),
            sealed_by_org_avatar_url: None,
            status,
        }
    }

    #[sqlx::test]
    async fn test_create_and_find_by_username(pool: PgPool) {
        let store = UserStore::new(pool);
        let user = new_user("alice", AccountKind::Person);

        store.create(&user).await.unwrap();

        let record = store
            .find_by_username("alice", SealVisibility::VerifiedOnly)
            .await
            .unwrap()
            .expect("user exists");

        assert_eq!(record.id, user.id);
        assert_eq!(record.username, "alice");
        assert_eq!(record.account_kind, AccountKind::Person);
        assert_eq!(record.display_name, "alice");
        assert_eq!(record.bio, "Welcome!");
        assert!(record.experiences.is_empty());
    }

    #[sqlx::test]
    async fn test_find_missing_user(pool: PgPool) {
        let store = UserStore::new(pool);

        let result = store
            .find_by_username("ghost", SealVisibility::VerifiedOnly)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[sqlx::test]
    async fn test_duplicate_username_conflict(pool: PgPool) {
        let store = UserStore::new(pool);
        store
            .create(&new_user("alice", AccountKind::Person))
            .await
            .unwrap();

        let result = store.create(&new_user("alice", AccountKind::Company)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Exactly one record exists afterwards
        let all = store
            .list_all(100, SealVisibility::VerifiedOnly)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[sqlx::test]
    async fn test_update_profile_partial(pool: PgPool) {
        let store = UserStore::new(pool);
        let user = new_user("alice", AccountKind::Person);
        store.create(&user).await.unwrap();

        store
            .update_profile(
                user.id,
                &ProfileChanges {
                    bio: Some("new bio".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let record = store
            .find_by_id(user.id, SealVisibility::VerifiedOnly)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.bio, "new bio");
        // Untouched fields keep their values
        assert_eq!(record.display_name, "alice");
        assert_eq!(record.avatar_url, user.avatar_url);
    }

    #[sqlx::test]
    async fn test_update_profile_empty_changes_noop(pool: PgPool) {
        let store = UserStore::new(pool);
        let user = new_user("alice", AccountKind::Person);
        store.create(&user).await.unwrap();

        store
            .update_profile(user.id, &ProfileChanges::default())
            .await
            .unwrap();

        let record = store
            .find_by_id(user.id, SealVisibility::VerifiedOnly)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.bio, "Welcome!");
    }

    #[sqlx::test]
    async fn test_links_replace_wholesale(pool: PgPool) {
        let store = UserStore::new(pool);
        let user = new_user("alice", AccountKind::Person);
        store.create(&user).await.unwrap();

        store
            .update_profile(
                user.id,
                &ProfileChanges {
                    links: Some(SocialLinks {
                        github: Some("https://github.com/alice".to_string()),
                        twitter: Some("https://twitter.com/alice".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // A second update with a different set replaces everything
        store
            .update_profile(
                user.id,
                &ProfileChanges {
                    links: Some(SocialLinks {
                        website: Some("https://alice.dev".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let record = store
            .find_by_id(user.id, SealVisibility::VerifiedOnly)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.links.website.as_deref(), Some("https://alice.dev"));
        assert!(record.links.github.is_none());
        assert!(record.links.twitter.is_none());
    }

    #[sqlx::test]
    async fn test_omitting_links_preserves_them(pool: PgPool) {
        let store = UserStore::new(pool);
        let user = new_user("alice", AccountKind::Person);
        store.create(&user).await.unwrap();

        store
            .update_profile(
                user.id,
                &ProfileChanges {
                    links: Some(SocialLinks {
                        github: Some("https://github.com/alice".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        store
            .update_profile(
                user.id,
                &ProfileChanges {
                    bio: Some("updated".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let record = store
            .find_by_id(user.id, SealVisibility::VerifiedOnly)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            record.links.github.as_deref(),
            Some("https://github.com/alice")
        );
    }

    #[sqlx::test]
    async fn test_delete_cascades_and_reports(pool: PgPool) {
        let store = UserStore::new(pool);
        let user = new_user("alice", AccountKind::Person);
        store.create(&user).await.unwrap();
        store
            .add_experience(user.id, &new_experience(SealStatus::Verified))
            .await
            .unwrap();

        assert!(store.delete(user.id).await.unwrap());
        // Second delete finds nothing
        assert!(!store.delete(user.id).await.unwrap());

        let record = store
            .find_by_username("alice", SealVisibility::VerifiedOnly)
            .await
            .unwrap();
        assert!(record.is_none());

        let all = store
            .list_all(100, SealVisibility::VerifiedOnly)
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[sqlx::test]
    async fn test_experience_visibility(pool: PgPool) {
        let store = UserStore::new(pool);
        let user = new_user("alice", AccountKind::Person);
        store.create(&user).await.unwrap();

        store
            .add_experience(user.id, &new_experience(SealStatus::Pending))
            .await
            .unwrap();
        store
            .add_experience(user.id, &new_experience(SealStatus::Verified))
            .await
            .unwrap();

        let public = store
            .find_by_id(user.id, SealVisibility::VerifiedOnly)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(public.experiences.len(), 1);
        assert_eq!(public.experiences[0].status, SealStatus::Verified);

        let owner = store
            .find_by_id(user.id, SealVisibility::IncludePending)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(owner.experiences.len(), 2);
    }

    #[sqlx::test]
    async fn test_mark_experience_verified(pool: PgPool) {
        let store = UserStore::new(pool);
        let user = new_user("alice", AccountKind::Person);
        store.create(&user).await.unwrap();

        let pending = store
            .add_experience(user.id, &new_experience(SealStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.status, SealStatus::Pending);

        let verified = store.mark_experience_verified(pending.id).await.unwrap();
        assert_eq!(verified.status, SealStatus::Verified);
        assert_eq!(verified.id, pending.id);

        let (owner, found) = store
            .find_experience(pending.id)
            .await
            .unwrap()
            .expect("seal exists");
        assert_eq!(owner, user.id);
        assert_eq!(found.status, SealStatus::Verified);
    }

    #[sqlx::test]
    async fn test_mark_missing_experience(pool: PgPool) {
        let store = UserStore::new(pool);
        let result = store.mark_experience_verified(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[sqlx::test]
    async fn test_list_all_respects_limit(pool: PgPool) {
        let store = UserStore::new(pool);
        for i in 0..5 {
            store
                .create(&new_user(&format!("user_{}", i), AccountKind::Person))
                .await
                .unwrap();
        }

        let limited = store
            .list_all(3, SealVisibility::VerifiedOnly)
            .await
            .unwrap();
        assert_eq!(limited.len(), 3);

        let all = store
            .list_all(100, SealVisibility::VerifiedOnly)
            .await
            .unwrap();
        assert_eq!(all.len(), 5);
    }
}
