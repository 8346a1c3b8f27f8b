use sea_orm::entity::prelude::*;

/// Stored alert row. `row_id` is the surrogate primary key; `alert_id` is
/// the logical alert id and is deliberately not unique because historical
/// imports wrote duplicate copies.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub row_id: String,
    pub alert_id: String,
    pub report_id: Option<String>,
    pub case_number: Option<String>,
    pub alert_type: String,
    pub description: String,
    pub alert_date: Option<Date>,
    pub workflow_status: String,
    pub resolved_at: Option<DateTimeWithTimeZone>,
    pub resolution_notes: Option<String>,
    pub metadata_json: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
