use depot_core::Order;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Order")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "Id")]
    pub id: i64,
    #[sea_orm(column_name = "Status")]
    pub status: String,
    #[sea_orm(column_name = "CreatedDate")]
    pub created_date: DateTimeUtc,
    #[sea_orm(column_name = "UpdatedDate")]
    pub updated_date: DateTimeUtc,
    #[sea_orm(column_name = "ProductId")]
    pub product_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(model: Model) -> Self {
        Order {
            id: model.id,
            status: model.status,
            created_date: model.created_date,
            updated_date: model.updated_date,
            product_id: model.product_id,
        }
    }
}
