//! Settings for the integration engine.
//!
//! Read from a TOML document with two optional sections; every key is optional and falls back
//! to the default:
//!
//! ```toml
//! [logging]
//! level = "debug"        # off, error, warn, info, debug, trace
//! console = true
//! file = "integration.log"
//!
//! [integration]
//! constant = "C"         # name of the constant of integration
//! quadrature_degree = 20 # Gauss-Legendre nodes for numerical cross-checks
//! ```

use crate::Utils::logger;
use crate::symbolic::symbolic_definite_integral::{IntegrationEngine, IntegrationError};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_integration::BuiltinRules;
use crate::symbolic::symbolic_simplify::SimplifyVisitor;
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    log_level: LevelFilter,
    log_to_console: bool,
    log_file: Option<PathBuf>,
    constant_name: String,
    quadrature_degree: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            log_level: LevelFilter::Info,
            log_to_console: true,
            log_file: None,
            constant_name: "C".to_string(),
            quadrature_degree: 20,
        }
    }
}

impl EngineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn log_to_console(&self) -> bool {
        self.log_to_console
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Name of the constant of integration used by [`EngineSettings::rules`] and
    /// [`EngineSettings::engine`]. `SimplifyVisitor` and `Expr::eval` build their own
    /// `BuiltinRules::default()`, so `Integral` nodes they rewrite always get `C`.
    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }

    pub fn quadrature_degree(&self) -> usize {
        self.quadrature_degree
    }

    pub fn set_log_level(&mut self, level: LevelFilter) {
        self.log_level = level;
    }

    pub fn set_console_logging(&mut self, enabled: bool) {
        self.log_to_console = enabled;
    }

    pub fn set_log_file<P: Into<PathBuf>>(&mut self, path: Option<P>) {
        self.log_file = path.map(Into::into);
    }

    /// Rejects an empty name, the constant must be a variable leaf.
    pub fn set_constant_name(&mut self, name: &str) -> Result<(), String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("constant of integration needs a name".to_string());
        }
        self.constant_name = name.to_string();
        Ok(())
    }

    /// Gauss-Legendre rules need at least 2 nodes.
    pub fn set_quadrature_degree(&mut self, degree: usize) -> Result<(), String> {
        if degree < 2 {
            return Err(format!("quadrature degree must be at least 2, got {}", degree));
        }
        self.quadrature_degree = degree;
        Ok(())
    }

    pub fn from_toml_str(input: &str) -> Result<Self, String> {
        let table: Table = input
            .parse()
            .map_err(|e| format!("invalid settings document: {}", e))?;
        let mut settings = EngineSettings::default();
        reject_unknown(&table, None, &["logging", "integration"])?;

        if let Some(logging) = section(&table, "logging")? {
            reject_unknown(logging, Some("logging"), &["level", "console", "file"])?;
            if let Some(level) = string_key(logging, "logging", "level")? {
                settings.log_level = level
                    .parse()
                    .map_err(|_| format!("unknown log level '{}'", level))?;
            }
            if let Some(console) = logging.get("console") {
                settings.log_to_console = console
                    .as_bool()
                    .ok_or_else(|| "logging.console must be a boolean".to_string())?;
            }
            if let Some(file) = string_key(logging, "logging", "file")? {
                settings.log_file = Some(PathBuf::from(file));
            }
        }

        if let Some(integration) = section(&table, "integration")? {
            reject_unknown(integration, Some("integration"), &["constant", "quadrature_degree"])?;
            if let Some(constant) = string_key(integration, "integration", "constant")? {
                settings.set_constant_name(constant)?;
            }
            if let Some(degree) = integration.get("quadrature_degree") {
                let degree = degree
                    .as_integer()
                    .and_then(|d| usize::try_from(d).ok())
                    .ok_or_else(|| {
                        "integration.quadrature_degree must be a non-negative integer".to_string()
                    })?;
                settings.set_quadrature_degree(degree)?;
            }
        }
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read settings file {}: {}", path.display(), e))?;
        Self::from_toml_str(&content)
    }

    /// The built-in rules with the configured constant of integration.
    pub fn rules(&self) -> BuiltinRules {
        BuiltinRules::with_constant(&self.constant_name)
    }

    pub fn engine(&self) -> IntegrationEngine<SimplifyVisitor, BuiltinRules> {
        IntegrationEngine::new(SimplifyVisitor, self.rules())
    }

    /// Gauss-Legendre estimate with the configured number of nodes.
    pub fn quadrature(
        &self,
        expr: &Expr,
        var: &str,
        lower: f64,
        upper: f64,
    ) -> Result<f64, IntegrationError> {
        expr.quadrature(var, lower, upper, self.quadrature_degree)
    }

    pub fn init_logger(&self) -> Result<(), String> {
        logger::init_logger(self)
    }
}

fn reject_unknown(table: &Table, section: Option<&str>, known: &[&str]) -> Result<(), String> {
    match table.keys().find(|key| !known.contains(&key.as_str())) {
        None => Ok(()),
        Some(key) => match section {
            Some(section) => Err(format!("unknown key {}.{}", section, key)),
            None => Err(format!("unknown section [{}]", key)),
        },
    }
}

fn section<'a>(table: &'a Table, name: &str) -> Result<Option<&'a Table>, String> {
    match table.get(name) {
        None => Ok(None),
        Some(Value::Table(section)) => Ok(Some(section)),
        Some(_) => Err(format!("[{}] must be a table", name)),
    }
}

fn string_key<'a>(table: &'a Table, section: &str, key: &str) -> Result<Option<&'a str>, String> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| format!("{}.{} must be a string", section, key)),
    }
}
