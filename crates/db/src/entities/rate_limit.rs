//! Rate limit entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rate limit record, keyed by submitter identity.
///
/// In practice all anonymous submissions share a single key, so the limiter
/// is global rather than per-visitor. The keyed schema keeps that an open
/// product decision instead of baking it in.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "rate_limit")]
pub struct Model {
    /// Submitter key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,

    /// When this submitter last had a post accepted.
    pub last_post_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
