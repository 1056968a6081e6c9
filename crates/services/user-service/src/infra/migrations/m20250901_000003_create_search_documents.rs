use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchDocuments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchDocuments::Name).string().not_null())
                    .col(ColumnDef::new(SearchDocuments::Email).string().not_null())
                    .col(ColumnDef::new(SearchDocuments::Age).integer())
                    .col(ColumnDef::new(SearchDocuments::PhoneNumber).string())
                    .col(ColumnDef::new(SearchDocuments::Address).string())
                    .col(ColumnDef::new(SearchDocuments::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(SearchDocuments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SearchDocuments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_search_documents_name")
                    .table(SearchDocuments::Table)
                    .col(SearchDocuments::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_search_documents_email")
                    .table(SearchDocuments::Table)
                    .col(SearchDocuments::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchDocuments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchDocuments {
    Table,
    Id,
    Name,
    Email,
    Age,
    PhoneNumber,
    Address,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
