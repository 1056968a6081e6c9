use chrono::{DateTime, Utc};
use domain::UserProjection;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "search_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserProjection {
    fn from(model: Model) -> Self {
        UserProjection {
            id: model.id,
            name: model.name,
            email: model.email,
            age: model.age,
            phone_number: model.phone_number,
            address: model.address,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&UserProjection> for ActiveModel {
    fn from(doc: &UserProjection) -> Self {
        use sea_orm::ActiveValue::Set;
        ActiveModel {
            id: Set(doc.id),
            name: Set(doc.name.clone()),
            email: Set(doc.email.clone()),
            age: Set(doc.age),
            phone_number: Set(doc.phone_number.clone()),
            address: Set(doc.address.clone()),
            is_active: Set(doc.is_active),
            created_at: Set(doc.created_at),
            updated_at: Set(doc.updated_at),
        }
    }
}
