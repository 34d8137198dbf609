//! Website visit entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Page view record, inserted best-effort for analytics.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "website_visit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Visited path.
    pub path: String,

    /// Reported user agent, if any.
    #[sea_orm(nullable)]
    pub user_agent: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
