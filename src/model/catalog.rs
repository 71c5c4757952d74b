//! Service catalog - the selectable services with fixed prices
//!
//! The catalog is loaded once at startup from an external file and is
//! read-only for the rest of the session. Line items reference entries
//! by id; prices and descriptions are always resolved through here.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry
pub type ServiceId = u64;

/// One selectable service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub id: ServiceId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

/// The full service catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub services: Vec<ServiceEntry>,
}

impl Catalog {
    /// Look up an entry by id
    pub fn get(&self, id: ServiceId) -> Option<&ServiceEntry> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog {
            services: vec![
                ServiceEntry {
                    id: 1,
                    name: "Consulta general".to_string(),
                    price: 100.0,
                    description: "Revisión básica".to_string(),
                },
                ServiceEntry {
                    id: 2,
                    name: "Vacunación".to_string(),
                    price: 250.0,
                    description: String::new(),
                },
            ],
        }
    }

    #[test]
    fn test_get_by_id() {
        let catalog = sample();
        assert_eq!(catalog.get(2).map(|s| s.price), Some(250.0));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let json = r#"{"services": [{"id": 1, "name": "Baño", "price": 150.0}]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.services[0].description, "");
    }
}
