// ==========================================
// SteelWorks Operations - configuration layer
// ==========================================
// Connection settings and diagnostics switches, read from the environment.
// Nothing else in the reporting core depends on the environment.
// ==========================================

pub mod settings;

pub use settings::{
    env_keys, load_dotenv, ConfigError, DatabaseSettings, PerfSettings, StoreLocation,
};
