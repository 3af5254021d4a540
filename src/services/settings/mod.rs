// Settings service
// TOML-backed engine configuration

mod service;

pub use service::SettingsService;
