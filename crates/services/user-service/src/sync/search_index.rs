//! Search index synchronization backed by a denormalized SeaORM table.

use async_trait::async_trait;
use common::AppError;
use domain::UserProjection;
use sea_orm::{
    sea_query::OnConflict, DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait,
};
use uuid::Uuid;

use crate::repository::entities::search_document;
use crate::sync::SecondaryStoreSync;

/// Keeps the `search_documents` table in step with the primary store.
#[derive(Clone)]
pub struct SearchIndexSync {
    db: DatabaseConnection,
}

impl SearchIndexSync {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Read-merge-write: preserve previously indexed extended attributes
    /// that the incoming projection does not carry.
    async fn merged(&self, incoming: &UserProjection) -> Result<UserProjection, AppError> {
        let existing = search_document::Entity::find_by_id(incoming.id)
            .one(&self.db)
            .await?;
        Ok(match existing {
            Some(model) => UserProjection::from(model).merged_with(incoming),
            None => incoming.clone(),
        })
    }
}

#[async_trait]
impl SecondaryStoreSync for SearchIndexSync {
    fn name(&self) -> &'static str {
        "search-index"
    }

    async fn upsert(&self, projection: &UserProjection) -> Result<(), AppError> {
        let merged = self.merged(projection).await?;
        let active = search_document::ActiveModel::from(&merged);
        search_document::Entity::insert(active)
            .on_conflict(
                OnConflict::column(search_document::Column::Id)
                    .update_columns([
                        search_document::Column::Name,
                        search_document::Column::Email,
                        search_document::Column::Age,
                        search_document::Column::PhoneNumber,
                        search_document::Column::Address,
                        search_document::Column::IsActive,
                        search_document::Column::CreatedAt,
                        search_document::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn remove(&self, user_id: Uuid) -> Result<(), AppError> {
        search_document::Entity::delete_by_id(user_id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn bulk_upsert(&self, projections: &[UserProjection]) -> Result<usize, AppError> {
        for projection in projections {
            self.upsert(projection).await?;
        }
        Ok(projections.len())
    }

    async fn reconcile_all(&self, projections: &[UserProjection]) -> Result<usize, AppError> {
        // Clear and rebuild atomically so readers never observe a
        // half-reconciled index.
        let txn = self.db.begin().await?;
        search_document::Entity::delete_many().exec(&txn).await?;
        let rows: Vec<search_document::ActiveModel> =
            projections.iter().map(search_document::ActiveModel::from).collect();
        search_document::Entity::insert_many(rows)
            .on_empty_do_nothing()
            .exec(&txn)
            .await?;
        txn.commit().await?;

        let count = search_document::Entity::find().count(&self.db).await?;
        Ok(count as usize)
    }
}
