//! Group wire structures for cohort results

use serde::{Deserialize, Serialize};

/// A Group resource holding a computed patient cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    /// Server-assigned id, present once the resource is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub group_type: String,

    pub actual: bool,

    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member: Vec<GroupMember>,
}

impl Group {
    /// An actual `person` group whose quantity matches its member list.
    pub fn person(member: Vec<GroupMember>) -> Self {
        Self {
            resource_type: "Group".to_string(),
            id: None,
            group_type: "person".to_string(),
            actual: true,
            quantity: member.len() as u32,
            member,
        }
    }
}

/// One member of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub entity: Reference,
}

impl From<Reference> for GroupMember {
    fn from(entity: Reference) -> Self {
        Self { entity }
    }
}

/// A literal resource reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    /// Reference to a Patient resource by id.
    pub fn patient(id: &str) -> Self {
        Self {
            reference: format!("Patient/{}", id),
        }
    }
}
