//! Persisted client model.

use chrono::{DateTime, Utc};

/// Whether a client is a natural person or an organization.
///
/// The wire format uses the registry's two-letter codes ("PF"/"PJ").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonType {
    Individual,
    Organization,
}

impl PersonType {
    /// Parse the wire code. Unrecognized values map to `None` so that a
    /// sloppy extraction never fails a whole record.
    pub fn from_wire(code: &str) -> Option<Self> {
        match code.trim() {
            "PF" => Some(Self::Individual),
            "PJ" => Some(Self::Organization),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Individual => "PF",
            Self::Organization => "PJ",
        }
    }
}

/// Client category, assigned once when the client is first created.
///
/// Existing clients keep their stored category even if the classification
/// policy changes later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientCategory {
    #[default]
    General,
    Government,
    Concessionaire,
}

impl ClientCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Government => "Government",
            Self::Concessionaire => "Concessionaire",
        }
    }

    /// Parse a stored category column.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "General" => Some(Self::General),
            "Government" => Some(Self::Government),
            "Concessionaire" => Some(Self::Concessionaire),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client as persisted in the datastore.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: i64,
    pub legal_name: String,
    pub person_type: Option<String>,
    /// Digits-only natural key; at most one client per tax id.
    pub tax_id: String,
    pub responsible_name: Option<String>,
    pub category: ClientCategory,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A client about to be inserted.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub legal_name: String,
    pub person_type: Option<String>,
    pub tax_id: String,
    pub responsible_name: Option<String>,
    pub category: ClientCategory,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
}
