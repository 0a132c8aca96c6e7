//! Location Hub API wire types
//!
//! Every endpoint wraps its payload as `{success, data: {<list>: [...]}}`.

use serde::{Deserialize, Deserializer};

use crate::model::AdministrativeEntity;

#[derive(Debug, Clone, Deserialize)]
pub struct HubResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatesData {
    #[serde(default)]
    pub states: Vec<HubEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistrictsData {
    #[serde(default)]
    pub districts: Vec<HubEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TalukasData {
    #[serde(default)]
    pub talukas: Vec<HubEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VillagesData {
    #[serde(default)]
    pub villages: Vec<HubEntity>,
}

/// A single listing entry. Which parent field is present depends on the endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HubEntity {
    #[serde(default, deserialize_with = "deserialize_code")]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
}

impl HubEntity {
    /// Entity whose parent is reported in `state_name` (district listings).
    pub fn into_district(self) -> AdministrativeEntity {
        AdministrativeEntity {
            code: self.code,
            name: self.name,
            parent_name: self.state_name,
        }
    }

    /// Entity whose parent is reported in `district_name` (taluka listings).
    pub fn into_taluka(self) -> AdministrativeEntity {
        AdministrativeEntity {
            code: self.code,
            name: self.name,
            parent_name: self.district_name,
        }
    }

    /// States and villages carry no parent reference the resolver relies on.
    pub fn into_entity(self) -> AdministrativeEntity {
        AdministrativeEntity {
            code: self.code,
            name: self.name,
            parent_name: None,
        }
    }
}

/// Codes arrive as strings from some endpoints and as numbers from others.
fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
