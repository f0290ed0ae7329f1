//! different utility modules used throughout the project
/// logger initialisation from engine settings
pub mod logger;
/// engine settings: logging, constant of integration, quadrature degree; loadable from TOML
pub mod settings;
