use sea_orm::entity::prelude::*;
use sea_orm::Set;
use uuid::Uuid;

/// `certificate_id` is a plain lookup key. Clients don't own certificates,
/// so there is no foreign key relation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub certificate_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for certgate_common::Client {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            certificate_id: model.certificate_id,
        }
    }
}

impl From<certgate_common::Client> for ActiveModel {
    fn from(client: certgate_common::Client) -> Self {
        Self {
            id: Set(client.id),
            certificate_id: Set(client.certificate_id),
        }
    }
}
