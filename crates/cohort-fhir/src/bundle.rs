//! Search bundle wire structures

use serde::{Deserialize, Serialize};

/// A `searchset` Bundle as returned by the patient search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub bundle_type: Option<String>,

    /// Total matches across all pages, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Ids of the matched resources, in bundle order.
    ///
    /// A matched resource without an id yields `None`; callers decide how
    /// unresolved identifiers are treated.
    pub fn resource_ids(&self) -> Vec<Option<String>> {
        self.entry
            .iter()
            .map(|entry| entry.resource.as_ref().and_then(|patient| patient.id.clone()))
            .collect()
    }
}

/// One entry of a search bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Patient>,
}

/// The slice of a Patient resource the engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
