//! The current user's profile: a single row at a fixed identity.

use crate::errors::ApiError;
use crate::validation::{BlankAsNone, Required};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveValue::{Set, Unchanged},
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utoipa::ToSchema;

pub const CURRENT_PROFILE_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "user_profiles")]
#[schema(as = UserProfile)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct ProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    #[serde_as(as = "BlankAsNone")]
    pub join_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileInput {
    fn into_active_model(self, existing: Option<&Model>) -> Result<ActiveModel, ApiError> {
        let mut required = Required::new();
        let name = required.text("name", self.name);
        let email = required.text("email", self.email);
        required.finish()?;

        let now = Utc::now();
        Ok(ActiveModel {
            id: match existing {
                Some(_) => Unchanged(CURRENT_PROFILE_ID),
                None => Set(CURRENT_PROFILE_ID),
            },
            name: Set(name),
            email: Set(email.trim().to_string()),
            phone: Set(self.phone),
            position: Set(self.position),
            department: Set(self.department),
            join_date: Set(self.join_date),
            address: Set(self.address),
            bio: Set(self.bio),
            avatar: Set(self.avatar),
            created_at: existing.map_or(Set(now), |existing| Unchanged(existing.created_at)),
            updated_at: Set(now),
        })
    }
}

/// # Errors
///
/// `NotFound` until the profile has been written once.
pub async fn current(db: &DatabaseConnection) -> Result<Model, ApiError> {
    Entity::find_by_id(CURRENT_PROFILE_ID)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile", None))
}

/// Replaces the profile, creating it on first write.
///
/// # Errors
///
/// `ValidationFailed` when name or email is missing; store errors otherwise.
pub async fn replace(db: &DatabaseConnection, input: ProfileInput) -> Result<Model, ApiError> {
    let existing = Entity::find_by_id(CURRENT_PROFILE_ID).one(db).await?;
    let active = input.into_active_model(existing.as_ref())?;
    let model = if existing.is_some() {
        active.update(db).await?
    } else {
        active.insert(db).await?
    };
    tracing::info!(created = existing.is_none(), "Profile saved");
    Ok(model)
}
