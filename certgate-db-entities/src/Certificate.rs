use sea_orm::entity::prelude::*;
use sea_orm::Set;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "certificates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub certificate_pem_encoded: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for certgate_common::Certificate {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            certificate_pem_encoded: model.certificate_pem_encoded,
        }
    }
}

impl From<certgate_common::Certificate> for ActiveModel {
    fn from(certificate: certgate_common::Certificate) -> Self {
        Self {
            id: Set(certificate.id),
            certificate_pem_encoded: Set(certificate.certificate_pem_encoded),
        }
    }
}
