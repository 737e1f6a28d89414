//! Argument-vector construction for yutu invocations.

use std::fmt;

use crate::config::Config;

/// A single named parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Absent,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::Absent => Ok(()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Absent)
    }
}

impl ParamValue {
    /// Interpret a `key=value` literal from the command line.
    ///
    /// Only canonical integers become `Int`; `007` or `+44` stay text so the
    /// argv carries exactly what was typed.
    pub fn parse_literal(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => match raw.parse::<i64>() {
                Ok(n) if n.to_string() == raw => Self::Int(n),
                _ => Self::Str(raw.to_string()),
            },
        }
    }
}

/// Insertion-ordered parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn str(self, key: &str, value: impl Into<String>) -> Self {
        self.with(key, ParamValue::Str(value.into()))
    }

    pub fn flag(self, key: &str, value: bool) -> Self {
        self.with(key, ParamValue::Bool(value))
    }

    pub fn int(self, key: &str, value: i64) -> Self {
        self.with(key, ParamValue::Int(value))
    }

    pub fn opt<T: Into<String>>(self, key: &str, value: Option<T>) -> Self {
        self.with(key, value.map(|v| ParamValue::Str(v.into())))
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One yutu call before it is turned into argv.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub resource: String,
    pub action: String,
    pub output: String,
    pub max_results: Option<u32>,
    pub params: Params,
}

impl Invocation {
    pub fn new(resource: &str, action: &str) -> Self {
        Self {
            resource: resource.to_string(),
            action: action.to_string(),
            output: "json".to_string(),
            max_results: None,
            params: Params::new(),
        }
    }

    pub fn output(mut self, format: &str) -> Self {
        self.output = format.to_string();
        self
    }

    pub fn max_results(mut self, n: Option<u32>) -> Self {
        self.max_results = n;
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn expects_json(&self) -> bool {
        self.output == "json"
    }
}

/// Flag-name alias for a given resource/action.
fn alias(resource: &str, action: &str, key: &str) -> Option<&'static str> {
    match (resource, action, key) {
        // yutu's search takes `--types`, callers naturally say `type`.
        ("search", "list", "type") => Some("types"),
        _ => None,
    }
}

fn flag_name(resource: &str, action: &str, key: &str) -> String {
    alias(resource, action, key).unwrap_or(key).replace('_', "-")
}

/// Build the full argv: `[exe, resource, action, --output, fmt, (--maxResults n), flags...]`.
pub fn build_args(cfg: &Config, inv: &Invocation) -> Vec<String> {
    let mut argv = vec![
        cfg.cli_path.to_string_lossy().into_owned(),
        inv.resource.clone(),
        inv.action.clone(),
        "--output".to_string(),
        inv.output.clone(),
    ];

    match inv.max_results {
        Some(n) => argv.extend(["--maxResults".to_string(), n.to_string()]),
        None if cfg.max_results_default == 0 => {
            argv.extend(["--maxResults".to_string(), "0".to_string()])
        }
        None => {}
    }

    for (key, value) in inv.params.iter() {
        let flag = format!("--{}", flag_name(&inv.resource, &inv.action, key));
        match value {
            ParamValue::Absent | ParamValue::Bool(false) => continue,
            ParamValue::Bool(true) => argv.extend([flag, "true".to_string()]),
            other => argv.extend([flag, other.to_string()]),
        }
    }

    argv
}
