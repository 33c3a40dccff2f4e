//! Attachment entity for SeaORM.
//!
//! Photos linked to a work log. (work_log_id, file_key) is unique and serves
//! as the idempotency key for the confirm step.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attachments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub work_log_id: i64,
    pub file_key: String,
    pub original_filename: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_log::Entity",
        from = "Column::WorkLogId",
        to = "super::work_log::Column::Id"
    )]
    WorkLog,
}

impl Related<super::work_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
