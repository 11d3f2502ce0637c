//! Relation types for the term graph

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{default_user, is_default_user, is_zero};

/// Relation vocabulary
///
/// The six standard types drive the closure rules. Any other string is kept
/// verbatim as [`RelationType::Other`] and never matches a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationType {
    Broader,
    Narrower,
    PartOf,
    HasPart,
    Equivalent,
    Related,
    Other(String),
}

impl RelationType {
    /// Types for which "A→B and B→C implies A→C" holds
    pub const TRANSITIVE: &'static [RelationType] = &[
        RelationType::Broader,
        RelationType::Narrower,
        RelationType::PartOf,
        RelationType::HasPart,
        RelationType::Related,
    ];

    /// Types that are undirected in meaning although stored directed
    pub const SYMMETRIC: &'static [RelationType] =
        &[RelationType::Equivalent, RelationType::Related];

    pub fn as_str(&self) -> &str {
        match self {
            RelationType::Broader => "broader",
            RelationType::Narrower => "narrower",
            RelationType::PartOf => "part_of",
            RelationType::HasPart => "has_part",
            RelationType::Equivalent => "equivalent",
            RelationType::Related => "related",
            RelationType::Other(name) => name,
        }
    }

    /// The inverse type, if this type has one (`broader↔narrower`, `part_of↔has_part`)
    pub fn inverse(&self) -> Option<RelationType> {
        match self {
            RelationType::Broader => Some(RelationType::Narrower),
            RelationType::Narrower => Some(RelationType::Broader),
            RelationType::PartOf => Some(RelationType::HasPart),
            RelationType::HasPart => Some(RelationType::PartOf),
            _ => None,
        }
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, RelationType::Other(_))
    }
}

impl From<&str> for RelationType {
    fn from(value: &str) -> Self {
        match value {
            "broader" => RelationType::Broader,
            "narrower" => RelationType::Narrower,
            "part_of" => RelationType::PartOf,
            "has_part" => RelationType::HasPart,
            "equivalent" => RelationType::Equivalent,
            "related" => RelationType::Related,
            other => RelationType::Other(other.to_string()),
        }
    }
}

impl From<String> for RelationType {
    fn from(value: String) -> Self {
        match RelationType::from(value.as_str()) {
            RelationType::Other(_) => RelationType::Other(value),
            standard => standard,
        }
    }
}

impl From<RelationType> for String {
    fn from(value: RelationType) -> Self {
        match value {
            RelationType::Other(name) => name,
            standard => standard.as_str().to_string(),
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored relation between two terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: String,
    #[serde(rename = "sourceTermId")]
    pub source_term_id: String,
    #[serde(rename = "targetTermId")]
    pub target_term_id: String,
    #[serde(rename = "relationType")]
    pub relation_type: RelationType,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(
        rename = "createdBy",
        default = "default_user",
        skip_serializing_if = "is_default_user"
    )]
    pub created_by: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "is_zero")]
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

fn default_confidence() -> f64 {
    1.0
}

impl Relation {
    /// Create a relation with an explicit id
    pub fn new(
        id: impl Into<String>,
        source_term_id: impl Into<String>,
        target_term_id: impl Into<String>,
        relation_type: impl Into<RelationType>,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            source_term_id: source_term_id.into(),
            target_term_id: target_term_id.into(),
            relation_type: relation_type.into(),
            confidence,
            created_by: String::new(),
            created_at: 0,
            metadata: None,
        }
    }

    /// Key enforcing storage uniqueness
    pub fn unique_key(&self) -> (&str, &str, &RelationType) {
        (&self.source_term_id, &self.target_term_id, &self.relation_type)
    }
}

/// Request to create a relation; the store assigns id and timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRelation {
    #[serde(rename = "sourceTermId")]
    pub source_term_id: String,
    #[serde(rename = "targetTermId")]
    pub target_term_id: String,
    #[serde(rename = "relationType")]
    pub relation_type: RelationType,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(rename = "createdBy", default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

impl NewRelation {
    pub fn new(
        source_term_id: impl Into<String>,
        target_term_id: impl Into<String>,
        relation_type: impl Into<RelationType>,
        confidence: f64,
    ) -> Self {
        Self {
            source_term_id: source_term_id.into(),
            target_term_id: target_term_id.into(),
            relation_type: relation_type.into(),
            confidence,
            created_by: String::new(),
            metadata: None,
        }
    }
}

/// Which side of a term to read relations from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Outgoing,
    Incoming,
    Both,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outgoing" => Ok(Direction::Outgoing),
            "incoming" => Ok(Direction::Incoming),
            "both" => Ok(Direction::Both),
            other => Err(format!(
                "unknown direction '{}', expected outgoing, incoming or both",
                other
            )),
        }
    }
}
