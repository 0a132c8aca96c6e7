//! Core location types shared by the matcher, the cascade and the clients.

use serde::{Deserialize, Serialize};

/// One level of the administrative hierarchy, ordered root first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    State,
    District,
    Taluka,
    Village,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::State, Tier::District, Tier::Taluka, Tier::Village];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn parent(self) -> Option<Tier> {
        match self {
            Self::State => None,
            Self::District => Some(Self::State),
            Self::Taluka => Some(Self::District),
            Self::Village => Some(Self::Taluka),
        }
    }

    pub fn child(self) -> Option<Tier> {
        match self {
            Self::State => Some(Self::District),
            Self::District => Some(Self::Taluka),
            Self::Taluka => Some(Self::Village),
            Self::Village => None,
        }
    }

    /// Every tier below this one, nearest first.
    pub fn descendants(self) -> &'static [Tier] {
        match self {
            Self::State => &[Self::District, Self::Taluka, Self::Village],
            Self::District => &[Self::Taluka, Self::Village],
            Self::Taluka => &[Self::Village],
            Self::Village => &[],
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::State => write!(f, "state"),
            Self::District => write!(f, "district"),
            Self::Taluka => write!(f, "taluka"),
            Self::Village => write!(f, "village"),
        }
    }
}

/// A node of the hierarchy as returned by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrativeEntity {
    /// Opaque directory code. Village listings may omit it.
    pub code: Option<String>,
    pub name: String,
    /// Name of the owning entity one tier up, when the service reports it.
    pub parent_name: Option<String>,
}

impl AdministrativeEntity {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            name: name.into(),
            parent_name: None,
        }
    }

    pub fn with_parent(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_name = Some(parent_name.into());
        self
    }
}

/// The address fields owned by the enclosing form. All values are names, not codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelection {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub taluka: String,
    #[serde(default)]
    pub village: String,
    #[serde(default)]
    pub pincode: String,
}

impl LocationSelection {
    pub fn get(&self, tier: Tier) -> &str {
        match tier {
            Tier::State => &self.state,
            Tier::District => &self.district,
            Tier::Taluka => &self.taluka,
            Tier::Village => &self.village,
        }
    }

    pub fn set(&mut self, tier: Tier, value: String) {
        match tier {
            Tier::State => self.state = value,
            Tier::District => self.district = value,
            Tier::Taluka => self.taluka = value,
            Tier::Village => self.village = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_chain() {
        assert_eq!(Tier::State.parent(), None);
        assert_eq!(Tier::Taluka.parent(), Some(Tier::District));
        assert_eq!(Tier::Taluka.child(), Some(Tier::Village));
        assert_eq!(Tier::Village.child(), None);
        assert_eq!(
            Tier::State.descendants(),
            &[Tier::District, Tier::Taluka, Tier::Village]
        );
        assert!(Tier::Village.descendants().is_empty());
    }

    #[test]
    fn test_selection_field_access() {
        let mut selection = LocationSelection::default();
        selection.set(Tier::Taluka, "Haveli".to_string());
        assert_eq!(selection.get(Tier::Taluka), "Haveli");
        assert_eq!(selection.taluka, "Haveli");
        assert_eq!(selection.get(Tier::State), "");
    }

    #[test]
    fn test_selection_deserializes_partial_form() {
        let selection: LocationSelection =
            serde_json::from_str(r#"{"state":"Goa","pincode":"403001"}"#).unwrap();
        assert_eq!(selection.state, "Goa");
        assert_eq!(selection.pincode, "403001");
        assert!(selection.village.is_empty());
    }
}
