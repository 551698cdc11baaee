//! YAML-based map loading.
//!
//! Color and alias maps can be built programmatically through
//! [`ViewMap::insert`], or loaded from YAML documents:
//!
//! ```yaml
//! # colors
//! warn: "#E5C07B"
//! error: "#E06C75"
//! ```
//!
//! ```yaml
//! # aliases
//! b:
//!   open: "**"
//!   close: "**"
//! ```
//!
//! # Example
//!
//! ```rust
//! use zerofmt::colors_from_yaml;
//!
//! let colors = colors_from_yaml("warn: \"#E5C07B\"\nerror: \"#E06C75\"\n").unwrap();
//! assert_eq!(colors.get_str("warn").map(String::as_str), Some("#E5C07B"));
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use zerofmt_view::ViewMap;

use crate::error::{FormatError, Result};

#[derive(Debug, Deserialize)]
struct AliasDef {
    open: String,
    close: String,
}

/// Loads a color map from a flat `name: literal` YAML mapping.
pub fn colors_from_yaml(source: &str) -> Result<ViewMap<String>> {
    let entries: HashMap<String, String> =
        serde_yaml::from_str(source).map_err(|err| FormatError::Config(err.to_string()))?;
    Ok(entries.into_iter().collect())
}

/// Loads an alias map from a `name: {open, close}` YAML mapping.
pub fn aliases_from_yaml(source: &str) -> Result<ViewMap<(String, String)>> {
    let entries: HashMap<String, AliasDef> =
        serde_yaml::from_str(source).map_err(|err| FormatError::Config(err.to_string()))?;
    Ok(entries
        .into_iter()
        .map(|(name, def)| (name, (def.open, def.close)))
        .collect())
}
