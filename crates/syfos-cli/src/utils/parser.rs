use crate::config::defaults::MATERIALS;
use syfos::core::models::parameters::MaterialProperties;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE (e.g., 'probe.tip-radius=2e-8').")]
    InvalidKeyValue(String),

    #[error("Unknown material '{0}'. Run 'syfos materials' to list the available presets.")]
    UnknownMaterial(String),

    #[error("Component '{component}' cannot be empty in '{input}'.")]
    EmptyComponent {
        component: &'static str,
        input: String,
    },
}

/// Splits `KEY=VALUE` at the first `=`. Both sides are trimmed.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidKeyValue(input.to_string()))?;
    let (key, value) = (key.trim(), value.trim());

    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            input: input.to_string(),
        });
    }
    if value.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "value",
            input: input.to_string(),
        });
    }
    Ok((key, value))
}

/// Lowercases a material name and joins its words with `-`, so 'Silicon Dioxide',
/// 'silicon_dioxide' and 'silicon-dioxide' all resolve to the same preset.
pub fn normalize_material_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn parse_material(name: &str) -> Result<MaterialProperties, ParseError> {
    MATERIALS
        .get(normalize_material_name(name).as_str())
        .copied()
        .ok_or_else(|| ParseError::UnknownMaterial(name.to_string()))
}
