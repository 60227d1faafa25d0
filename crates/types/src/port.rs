//! World Port Index rows.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// One row of the `wpi` table.
///
/// Rows have no identifier; they serialize positionally as
/// `[longitude, latitude, port_name, country]`. Every column is nullable in
/// the imported table; missing values serialize as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub name: Option<String>,
    pub country: Option<String>,
}

type Row = (Option<f64>, Option<f64>, Option<String>, Option<String>);

impl From<Row> for Port {
    fn from((longitude, latitude, name, country): Row) -> Self {
        Self {
            longitude,
            latitude,
            name,
            country,
        }
    }
}

impl Serialize for Port {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_tuple(4)?;
        row.serialize_element(&self.longitude)?;
        row.serialize_element(&self.latitude)?;
        row.serialize_element(&self.name)?;
        row.serialize_element(&self.country)?;
        row.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_serializes_as_row() {
        let port = Port::from((Some(4.29), Some(51.9), Some("ROTTERDAM".to_string()), Some("NL".to_string())));
        let json = serde_json::to_value(&port).unwrap();
        assert_eq!(json, serde_json::json!([4.29, 51.9, "ROTTERDAM", "NL"]));
    }

    #[test]
    fn test_port_missing_columns_serialize_as_null() {
        let port = Port::from((None, Some(45.9), None, None));
        let json = serde_json::to_string(&port).unwrap();
        assert_eq!(json, "[null,45.9,null,null]");
    }
}
