use crate::errors::{ConfigError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A theme token value: either a single scalar (e.g. a color) or an
/// ordered fallback stack (e.g. a font family chain, first match wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Value(String),
    Stack(Vec<String>),
}

impl TokenValue {
    /// View the value as a fallback slice; a scalar is a one-element stack.
    pub fn as_slice(&self) -> &[String] {
        match self {
            TokenValue::Value(v) => std::slice::from_ref(v),
            TokenValue::Stack(v) => v.as_slice(),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(v: &str) -> Self {
        TokenValue::Value(v.to_string())
    }
}

impl From<Vec<&str>> for TokenValue {
    fn from(v: Vec<&str>) -> Self {
        TokenValue::Stack(v.into_iter().map(String::from).collect())
    }
}

/// Token map within one theme category (token name -> value)
pub type TokenMap = IndexMap<String, TokenValue>;

/// Theme extensions: category name -> token map
pub type ThemeExtend = IndexMap<String, TokenMap>;

/// Tailwind configuration descriptor
///
/// The three top-level fields mirror `tailwind.config.js`: `content`,
/// `theme.extend` and `plugins`. Loaded once per build invocation and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigDescriptor {
    /// Content globs to scan for class usage
    pub content: Vec<String>,

    /// Theme configuration
    pub theme: ThemeSection,

    /// Plugin references, resolved by the consuming build tool
    pub plugins: Vec<String>,
}

/// Theme section of the descriptor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeSection {
    /// Additive overrides merged into the built-in theme
    pub extend: ThemeExtend,
}

impl Default for ConfigDescriptor {
    fn default() -> Self {
        let mut font_family = TokenMap::new();
        font_family.insert(
            "anton".to_string(),
            vec!["anton", "ui-sans-serif", "system-ui", "sans-serif"].into(),
        );
        font_family.insert(
            "sans".to_string(),
            vec![
                "inter",
                "ui-sans-serif",
                "system-ui",
                "sans-serif",
                "Apple Color Emoji",
                "Segoe UI Emoji",
                "Segoe UI Symbol",
                "Noto Color Emoji",
            ]
            .into(),
        );

        let mut extend = ThemeExtend::new();
        extend.insert("fontFamily".to_string(), font_family);

        Self {
            content: vec!["./crates/**/*.rs".to_string()],
            theme: ThemeSection { extend },
            plugins: Vec::new(),
        }
    }
}

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding, pointing at the offending field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl Finding {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ConfigDescriptor {
    /// Content globs, verbatim and in declaration order
    pub fn content_globs(&self) -> &[String] {
        &self.content
    }

    /// Look up a theme extension token. `None` means the descriptor does
    /// not extend that token and the consumer keeps its built-in default.
    pub fn theme_token(&self, category: &str, token: &str) -> Option<&TokenValue> {
        self.theme.extend.get(category)?.get(token)
    }

    /// Plugin references, verbatim. Empty means "no additional plugins".
    pub fn plugin_refs(&self) -> &[String] {
        &self.plugins
    }

    /// Load a descriptor from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load a descriptor from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a descriptor from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ConfigError {
            message: format!("Failed to parse JSON config: {}", e),
        })
    }

    /// Parse a descriptor from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a descriptor from a file (auto-detect format by extension)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ConfigError::ConfigError {
                message: format!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Serialize the descriptor to pretty JSON
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize the descriptor to compact JSON
    pub fn to_compact_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Lint the descriptor against the contract the build tool expects.
    ///
    /// Returns every finding rather than stopping at the first. Duplicated
    /// content globs are wasteful but not invalid, so they come back as
    /// warnings; everything else listed here is an error.
    pub fn validate(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        let mut seen_globs = std::collections::HashSet::new();
        for (i, pattern) in self.content.iter().enumerate() {
            let field = format!("content[{}]", i);
            if pattern.is_empty() {
                findings.push(Finding::error(&field, "content glob must not be empty"));
                continue;
            }
            if let Err(e) = glob::Pattern::new(pattern) {
                findings.push(Finding::error(
                    &field,
                    format!("invalid glob pattern '{}': {}", pattern, e),
                ));
            }
            if !seen_globs.insert(pattern.as_str()) {
                findings.push(Finding::warning(
                    &field,
                    format!("duplicate content glob '{}'", pattern),
                ));
            }
        }

        for (category, tokens) in &self.theme.extend {
            for (token, value) in tokens {
                let field = format!("theme.extend.{}.{}", category, token);
                match value {
                    TokenValue::Value(v) if v.is_empty() => {
                        findings.push(Finding::error(&field, "token value must not be empty"));
                    }
                    TokenValue::Stack(stack) if stack.is_empty() => {
                        findings.push(Finding::error(
                            &field,
                            "fallback sequence must not be empty",
                        ));
                    }
                    TokenValue::Stack(stack) => {
                        for (i, entry) in stack.iter().enumerate() {
                            if entry.is_empty() {
                                findings.push(Finding::error(
                                    format!("{}[{}]", field, i),
                                    "fallback entry must not be empty",
                                ));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        for (i, plugin) in self.plugins.iter().enumerate() {
            if plugin.is_empty() {
                findings.push(Finding::error(
                    format!("plugins[{}]", i),
                    "plugin reference must not be empty",
                ));
            }
        }

        findings
    }

    /// Validate and fail on the first error-level finding
    pub fn ensure_valid(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|f| f.severity == Severity::Error)
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed(errors.join("; ")))
        }
    }
}
