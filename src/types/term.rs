//! Term types for the vocabulary graph

use serde::{Deserialize, Serialize};

use super::{default_user, is_default_user, is_zero};

/// Vocabulary entry; the reasoning engine only ever reads its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(
        rename = "createdBy",
        default = "default_user",
        skip_serializing_if = "is_default_user"
    )]
    pub created_by: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "is_zero")]
    pub created_at: u64,
}

impl Term {
    /// Create a new term with default values
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            definition: None,
            created_by: String::new(),
            created_at: 0,
        }
    }

    /// Create a new term with a definition
    pub fn with_definition(
        id: impl Into<String>,
        name: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            definition: Some(definition.into()),
            ..Self::new(id, name)
        }
    }
}
