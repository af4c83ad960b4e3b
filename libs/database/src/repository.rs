//! Generic repository over SeaORM entities.
//!
//! Domain crates wrap [`BaseRepository`] for the common CRUD plumbing and
//! drop down to `db()` for entity-specific queries.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};

/// Thin CRUD wrapper around a [`DatabaseConnection`] for a single entity.
///
/// # Example
/// ```ignore
/// use database::BaseRepository;
///
/// struct PgRoleRepository {
///     base: BaseRepository<entity::Entity>,
/// }
/// ```
#[derive(Debug)]
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: EntityTrait> BaseRepository<E>
where
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Access the underlying connection for entity-specific queries.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a new row and return the stored model.
    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.insert(&self.db).await
    }

    /// Fetch a row by primary key.
    pub async fn find_by_id(
        &self,
        id: impl Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send,
    ) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    /// Fetch all rows of the entity.
    pub async fn find_all(&self) -> Result<Vec<E::Model>, DbErr> {
        E::find().all(&self.db).await
    }

    /// Apply an update and return the stored model.
    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.update(&self.db).await
    }

    /// Delete a row by primary key, returning the number of rows removed.
    pub async fn delete_by_id(
        &self,
        id: impl Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send,
    ) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
