//! Loading [`InspectorOptions`] from a TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use inspector_model::InspectorOptions;
use tracing::debug;

/// Read options from `path`, or the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<InspectorOptions> {
    let Some(path) = path else {
        return Ok(InspectorOptions::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let options =
        parse_options(&text).with_context(|| format!("parse config {}", path.display()))?;
    debug!(config = %path.display(), ?options, "loaded options");
    Ok(options)
}

pub fn parse_options(text: &str) -> Result<InspectorOptions> {
    let options: InspectorOptions = toml::from_str(text)?;
    options.validate()?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspector_model::{CopyFormat, RecomputePolicy};

    #[test]
    fn missing_path_gives_defaults() {
        let options = load_options(None).unwrap();
        assert_eq!(options, InspectorOptions::default());
    }

    #[test]
    fn parses_every_field() {
        let options = parse_options(
            r#"
recompute = "state_only"
copy_format = "compact"
hidden_categories = ["errors"]
"#,
        )
        .unwrap();
        assert_eq!(options.recompute, RecomputePolicy::StateOnly);
        assert_eq!(options.copy_format, CopyFormat::Compact);
        assert!(options.is_hidden("errors"));
        assert!(!options.is_hidden("server"));
    }

    #[test]
    fn hiding_an_entity_category_is_rejected() {
        let err = parse_options(r#"hidden_categories = ["components"]"#).unwrap_err();
        assert!(err.to_string().contains("components"));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(parse_options(r#"recompute = "sometimes""#).is_err());
    }
}
