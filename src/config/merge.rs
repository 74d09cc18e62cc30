//! Configuration layer merging
//!
//! Layers are merged in order, later layers winning:
//! - Tables: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)

use toml::Value;

/// Deep merge two TOML values.
///
/// Merge semantics:
/// - Tables: deep-merge by key (recursive)
/// - Arrays: REPLACE (second wins entirely)
/// - Scalars: override (second wins)
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(mut base_map), Value::Table(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged);
            }
            Value::Table(base_map)
        }

        // Arrays: REPLACE (no concatenation)
        (Value::Array(_), overlay @ Value::Array(_)) => overlay,

        (_, overlay) => overlay,
    }
}

/// Merge multiple config layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers
        .into_iter()
        .fold(Value::Table(toml::Table::new()), deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Value {
        Value::Table(toml::from_str(s).unwrap())
    }

    #[test]
    fn test_scalar_override() {
        let result = deep_merge(parse("year = 2024"), parse("year = 2025"));
        assert_eq!(result["year"].as_integer(), Some(2025));
    }

    #[test]
    fn test_table_deep_merge() {
        let base = parse(
            r#"
            [output]
            format = "console"
            filename = "ordo_out"
            "#,
        );
        let overlay = parse(
            r#"
            [output]
            format = "json"
            "#,
        );
        let result = deep_merge(base, overlay);

        assert_eq!(result["output"]["format"].as_str(), Some("json"));
        assert_eq!(result["output"]["filename"].as_str(), Some("ordo_out"));
    }

    #[test]
    fn test_array_replace() {
        let base = parse(r#"extensions = ["A", "B", "C"]"#);
        let overlay = parse(r#"extensions = ["X"]"#);
        let result = deep_merge(base, overlay);

        let extensions = result["extensions"].as_array().unwrap();
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions[0].as_str(), Some("X"));
    }

    #[test]
    fn test_merge_layers() {
        let builtin = parse(
            r#"
            title = "Liturgical Calendar"
            [output]
            format = "console"
            "#,
        );
        let file = parse(r#"title = "Ordo 2025""#);
        let cli = parse(
            r#"
            [output]
            format = "json"
            "#,
        );

        let result = merge_layers(vec![builtin, file, cli]);

        assert_eq!(result["title"].as_str(), Some("Ordo 2025"));
        assert_eq!(result["output"]["format"].as_str(), Some("json"));
    }
}
