//! Menu summary as listed by the menu picker

use serde::{Deserialize, Serialize};

use super::entity::MenuId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSummary {
    pub id: MenuId,
    pub name: String,
}
