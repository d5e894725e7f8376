//! backend/src/domain/models/child.rs

use serde::{Deserialize, Serialize};

use crate::storage::CsvRecord;

/// A child registered under a parent, one row of `children.csv`.
/// (parent_id, name) is unique across the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    #[serde(rename = "ParentID")]
    pub parent_id: String,
    #[serde(rename = "ChildName")]
    pub name: String,
    #[serde(rename = "Gender")]
    pub gender: String,
}

impl CsvRecord for Child {
    const FILE_NAME: &'static str = "children.csv";
    const HEADERS: &'static [&'static str] = &["ParentID", "ChildName", "Gender"];
}
