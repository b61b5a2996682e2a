use anyhow::{Context, Result};
use station_traffic::engine::encoding::ViewConfig;

/// Loads marker radius ranges from a JSON file at `path`.
///
/// Missing keys fall back to the defaults:
/// ```json
/// {
///   "unfiltered_radius": { "min": 0.0, "max": 25.0 },
///   "filtered_radius": { "min": 3.0, "max": 50.0 }
/// }
/// ```
pub fn load_view_config(path: Option<&str>) -> Result<ViewConfig> {
    let Some(path) = path else {
        return Ok(ViewConfig::default());
    };
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading view config {path}"))?;
    let config: ViewConfig =
        serde_json::from_str(&content).with_context(|| format!("parsing view config {path}"))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(load_view_config(None).unwrap(), ViewConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = format!("{}/station_traffic_view.json", env::temp_dir().display());
        fs::write(&path, r#"{"unfiltered_radius":{"min":1.0,"max":30.0}}"#).unwrap();

        let config = load_view_config(Some(&path)).unwrap();
        assert_eq!(config.unfiltered_radius.max, 30.0);
        assert_eq!(config.filtered_radius.min, 3.0);

        fs::remove_file(&path).unwrap();
    }
}
