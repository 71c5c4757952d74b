//! CSV export of the current quotation

use crate::model::{Catalog, Quote};
use chrono::Local;
use std::path::{Path, PathBuf};

/// File name for a new export, timestamped to avoid collisions
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "cotizacion-{}.csv",
        Local::now().format("%Y%m%d-%H%M%S")
    ))
}

/// Write the quotation as CSV: one record per line item plus summary rows
pub fn export_quote<P: AsRef<Path>>(
    path: P,
    quote: &Quote,
    catalog: &Catalog,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path.as_ref())
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    writer
        .write_record(["Servicio", "Cantidad", "Precio unitario", "Subtotal"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for item in &quote.items {
        writer
            .write_record([
                item.service_name(catalog).to_string(),
                item.quantity.to_string(),
                format!("{:.2}", item.unit_price(catalog)),
                format!("{:.2}", item.subtotal(catalog)),
            ])
            .map_err(|e| format!("Failed to write CSV row: {}", e))?;
    }

    let summary: [[String; 4]; 3] = [
        [
            String::new(),
            String::new(),
            "Subtotal".to_string(),
            format!("{:.2}", quote.subtotal(catalog)),
        ],
        [
            String::new(),
            String::new(),
            "Descuento %".to_string(),
            format!("{:.2}", quote.discount.effective_percent()),
        ],
        [
            String::new(),
            String::new(),
            "Total".to_string(),
            format!("{:.2}", quote.total(catalog)),
        ],
    ];
    for record in &summary {
        writer
            .write_record(record)
            .map_err(|e| format!("Failed to write CSV summary: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush CSV file: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceEntry;
    use std::env;
    use std::fs;

    fn catalog() -> Catalog {
        Catalog {
            services: vec![
                ServiceEntry {
                    id: 1,
                    name: "Consulta general".to_string(),
                    price: 100.0,
                    description: String::new(),
                },
                ServiceEntry {
                    id: 2,
                    name: "Cirugía menor".to_string(),
                    price: 250.0,
                    description: String::new(),
                },
            ],
        }
    }

    #[test]
    fn test_export_writes_rows_and_summary() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.generate_rows(2);
        quote.set_service(0, 1);
        quote.set_quantity(0, "2");
        quote.set_service(1, 2);
        quote.set_discount_enabled(true);
        quote.set_discount_percent("10");

        let path = env::temp_dir().join("cotiza-tui-export-test.csv");
        export_quote(&path, &quote, &catalog).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines[0], "Servicio,Cantidad,Precio unitario,Subtotal");
        assert_eq!(lines[1], "Consulta general,2,100.00,200.00");
        assert_eq!(lines[2], "Cirugía menor,1,250.00,250.00");
        assert!(lines.contains(&",,Subtotal,450.00"));
        assert!(lines.contains(&",,Descuento %,10.00"));
        assert!(lines.contains(&",,Total,405.00"));
    }

    #[test]
    fn test_default_export_path_has_csv_extension() {
        let path = default_export_path();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));
    }
}
