//! Editable parameter sets loaded from JSON.
//!
//! A parameter file is a flat JSON object mapping field labels to initial
//! values. Labels keep the order they have in the file.

use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

/// Default parameter file looked up by the form demo.
pub const DEFAULT_PARAMS_FILE: &str = "sys_params.json";

/// Parameter file errors.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid parameter file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Parameter file must contain a JSON object")]
    NotAnObject,
    #[error("Parameter '{0}' must be a string, number, boolean or null")]
    UnsupportedValue(String),
}

/// Result type for parameter operations.
pub type ParamsResult<T> = Result<T, ParamsError>;

/// One labeled, editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub label: String,
    pub value: String,
}

/// Ordered label → text mapping backing the parameter form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    fields: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a parameter set from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ParamsResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let params = Self::from_json(&json)?;
        log::info!("Loaded {} parameters from {}", params.len(), path.display());
        Ok(params)
    }

    /// Parse a parameter set from JSON text.
    pub fn from_json(json: &str) -> ParamsResult<Self> {
        let Value::Object(map) = serde_json::from_str::<Value>(json)? else {
            return Err(ParamsError::NotAnObject);
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> ParamsResult<Self> {
        let mut params = Self::new();
        for (label, value) in map {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ParamsError::UnsupportedValue(label));
                }
            };
            params.set(label, text);
        }
        Ok(params)
    }

    /// Set a field's text, appending the field if the label is new.
    pub fn set(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.fields.iter_mut().find(|p| p.label == label) {
            Some(field) => field.value = value,
            None => self.fields.push(Parameter { label, value }),
        }
    }

    /// Current text of a field.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.value.as_str())
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.fields.iter()
    }

    /// Mutable fields in insertion order, for binding to text inputs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Parameter> {
        self.fields.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// One `"<label>: <value>"` line per field, in insertion order.
    pub fn render_lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|p| format!("{}: {}", p.label, p.value))
            .collect()
    }

    /// The rendered lines joined with newlines.
    pub fn render_text(&self) -> String {
        self.render_lines().join("\n")
    }
}
