//! Catalog loading services

use crate::model::Catalog;
use std::fs;
use std::path::Path;

/// Load and parse the service catalog file
///
/// The format is picked by extension: `.yml`/`.yaml` parses as YAML,
/// anything else as JSON. Entries are sorted by name for display.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read catalog file {}: {}", path.display(), e))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
        .unwrap_or(false);

    let mut catalog: Catalog = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse catalog YAML: {}", e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse catalog JSON: {}", e))?
    };

    catalog
        .services
        .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_json_catalog_sorted_by_name() {
        let path = write_temp(
            "cotiza-tui-catalog-test.json",
            r#"{"services": [
                {"id": 2, "name": "Vacunación", "price": 250.0, "description": "Refuerzo anual"},
                {"id": 1, "name": "Consulta general", "price": 100.0}
            ]}"#,
        );

        let catalog = load_catalog(&path).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.services[0].name, "Consulta general");
        assert_eq!(catalog.services[1].price, 250.0);
    }

    #[test]
    fn test_load_yaml_catalog() {
        let path = write_temp(
            "cotiza-tui-catalog-test.yml",
            "services:\n  - id: 1\n    name: Baño medicado\n    price: 150.5\n",
        );

        let catalog = load_catalog(&path).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.services[0].price, 150.5);
        assert_eq!(catalog.services[0].description, "");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_catalog("/nonexistent/services.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let path = write_temp("cotiza-tui-catalog-bad.json", "{not json");
        assert!(load_catalog(&path).is_err());
    }
}
