mod settings;

use config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{ClientSettings, ProtocolSettings, ServerSettings, Settings};

/// Prefix for environment overrides, e.g. `NSQLINK_SERVER__PORT=4151`.
pub const ENV_PREFIX: &str = "NSQLINK";

/// Loads the configuration from `config/default` and the environment,
/// merged over default values.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Same as [`load_config`] with an explicit file base name. The file is
/// optional and may use any format the `config` crate recognises by extension.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge(Settings::default()))
}
