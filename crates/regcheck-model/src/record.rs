//! Derived records fed to the scorer.

use serde::{Deserialize, Serialize};

/// The normalized comparison keys shared by customers and registry rows.
///
/// `name`, `street_core` and `municipality` are always present (possibly
/// empty); `postal_code` and `house_number` are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchKeys {
    pub name: String,
    pub street_core: String,
    pub municipality: String,
    pub postal_code: Option<String>,
    pub house_number: Option<String>,
}

/// One customer row after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Position in the input slice.
    pub row_index: usize,
    pub customer_id: Option<String>,
    /// Up to three name/info fields joined with single spaces.
    pub display_name: String,
    pub street: String,
    pub city: String,
    /// Raw postal field as given.
    pub postal_raw: String,
    pub keys: MatchKeys,
}

/// One registry body row after normalization. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryCandidate {
    pub source_name: String,
    /// Position within the data body (after the header row).
    pub body_index: usize,
    pub name: Option<String>,
    pub via: Option<String>,
    pub number: Option<String>,
    pub municipality: Option<String>,
    pub center_code: Option<String>,
    pub last_authorization_date: Option<String>,
    pub service_offering: Option<String>,
    pub keys: MatchKeys,
}
