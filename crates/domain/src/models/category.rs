//! Category domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category. Names are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
