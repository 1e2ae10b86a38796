use depot_core::{measure, CoreError, Product};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Product")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "Id")]
    pub id: i64,
    #[sea_orm(column_name = "Name")]
    pub name: String,
    #[sea_orm(column_name = "Description")]
    pub description: Option<String>,
    #[sea_orm(column_name = "Weight")]
    pub weight: Option<String>,
    #[sea_orm(column_name = "Height")]
    pub height: Option<String>,
    #[sea_orm(column_name = "Width")]
    pub width: Option<String>,
    #[sea_orm(column_name = "Length")]
    pub length: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Product {
    type Error = CoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Product {
            id: model.id,
            name: model.name,
            description: model.description,
            weight: measure::decode("Weight", model.weight.as_deref())?,
            height: measure::decode("Height", model.height.as_deref())?,
            width: measure::decode("Width", model.width.as_deref())?,
            length: measure::decode("Length", model.length.as_deref())?,
        })
    }
}
