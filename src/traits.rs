use crate::errors::ApiError;
use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, FromQueryResult, IntoActiveModel, Order, QueryOrder, entity::prelude::*,
};
use serde::{Serialize, de::DeserializeOwned};

/// Converts a request payload into an active model.
///
/// The same payload type serves both create and full-record replace:
/// required fields are checked, defaults substituted and derived fields
/// computed in both paths.
pub trait RecordInput<ModelType, ActiveModelType> {
    /// Active model for a brand-new row (identity left to the store).
    ///
    /// # Errors
    ///
    /// `ApiError::ValidationFailed` when a required field is missing, or
    /// `ApiError::BadRequest` for unparsable values.
    fn into_new(self) -> Result<ActiveModelType, ApiError>;

    /// Active model replacing every writable field of `existing`.
    ///
    /// # Errors
    ///
    /// Same as [`RecordInput::into_new`], plus `ApiError::InvalidTransition`
    /// when the payload asks for a status change the lifecycle forbids.
    fn replace(self, existing: ModelType) -> Result<ActiveModelType, ApiError>;
}

/// A collection of rows exposed through the generic CRUD routes.
///
/// Implemented directly on each entity's `Model`, which doubles as the wire
/// representation.
#[async_trait]
pub trait Record: Sized + Send + Sync + Serialize + FromQueryResult + 'static
where
    Self: IntoActiveModel<Self::ActiveModelType>,
{
    type EntityType: EntityTrait<Model = Self> + Sync;
    type ColumnType: ColumnTrait + std::fmt::Debug;
    type ActiveModelType: ActiveModelTrait<Entity = Self::EntityType>
        + ActiveModelBehavior
        + Send
        + Sync;
    type Input: RecordInput<Self, Self::ActiveModelType> + DeserializeOwned + Send + Sync;

    const ID_COLUMN: Self::ColumnType;
    /// Column listed newest-first by [`Record::get_all`].
    const ORDER_COLUMN: Self::ColumnType;
    const RESOURCE_NAME_SINGULAR: &'static str;
    /// Also the path segment under `/api`.
    const RESOURCE_NAME_PLURAL: &'static str;
    /// Human label used in response messages, e.g. "Leave request".
    const DISPLAY_NAME: &'static str;

    fn id(&self) -> i32;

    /// Fills denormalized fields the caller left out (e.g. the employee name
    /// copied onto attendance rows). Runs before create and replace.
    async fn resolve_snapshots(
        _db: &DatabaseConnection,
        _input: &mut Self::Input,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn get_all(db: &DatabaseConnection) -> Result<Vec<Self>, ApiError> {
        let models = Self::EntityType::find()
            .order_by(Self::ORDER_COLUMN, Order::Desc)
            .order_by(Self::ID_COLUMN, Order::Desc)
            .all(db)
            .await?;
        Ok(models)
    }

    async fn get_one(db: &DatabaseConnection, id: i32) -> Result<Self, ApiError> {
        Self::EntityType::find()
            .filter(Self::ID_COLUMN.eq(id))
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::DISPLAY_NAME, Some(id.to_string())))
    }

    async fn create(db: &DatabaseConnection, mut input: Self::Input) -> Result<Self, ApiError> {
        Self::resolve_snapshots(db, &mut input).await?;
        let active_model = input.into_new()?;
        let model = active_model.insert(db).await?;
        tracing::info!(
            resource = Self::RESOURCE_NAME_SINGULAR,
            id = model.id(),
            "Record created"
        );
        Ok(model)
    }

    /// Full-record replace. Unknown identities yield `NotFound`.
    async fn update(
        db: &DatabaseConnection,
        id: i32,
        mut input: Self::Input,
    ) -> Result<Self, ApiError> {
        let existing = Self::get_one(db, id).await?;
        Self::resolve_snapshots(db, &mut input).await?;
        let active_model = input.replace(existing)?;
        let updated = active_model.update(db).await?;
        tracing::info!(
            resource = Self::RESOURCE_NAME_SINGULAR,
            id,
            "Record replaced"
        );
        Ok(updated)
    }

    /// Deletes by identity and returns the number of rows removed. Deleting
    /// an identity that does not exist is not an error, and rows in other
    /// tables that reference this one are left in place.
    async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, ApiError> {
        let res = Self::EntityType::delete_many()
            .filter(Self::ID_COLUMN.eq(id))
            .exec(db)
            .await?;
        tracing::info!(
            resource = Self::RESOURCE_NAME_SINGULAR,
            id,
            rows = res.rows_affected,
            "Record deleted"
        );
        Ok(res.rows_affected)
    }
}
