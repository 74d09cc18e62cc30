//! Built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Report title (default: "Liturgical Calendar")
    pub title: String,

    /// Output file name without extension (default: "ordo_out")
    pub output_filename: String,

    /// Output format (default: "console")
    pub output_format: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            title: "Liturgical Calendar".to_string(),
            output_filename: "ordo_out".to_string(),
            output_format: "console".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to a TOML value for merging
    pub fn to_value(&self) -> toml::Value {
        let mut output = toml::Table::new();
        output.insert("filename".into(), self.output_filename.clone().into());
        output.insert("format".into(), self.output_format.clone().into());

        let mut root = toml::Table::new();
        root.insert("title".into(), self.title.clone().into());
        root.insert("output".into(), toml::Value::Table(output));
        toml::Value::Table(root)
    }
}
