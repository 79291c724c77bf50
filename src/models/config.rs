use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::domain::gallery::DEFAULT_MAX_GALLERY_IMAGES;
use crate::repository::{DEFAULT_MAX_PRODUCTS, StoreLimits};

/// Optional YAML file read before any override.
pub const DEFAULT_CONFIG_FILE: &str = "config/default.yaml";
/// Environment variable naming an extra YAML file.
pub const CONFIG_FILE_ENV: &str = "APP_CONFIG";
/// Prefix of the `APP__*` environment overrides.
pub const ENV_PREFIX: &str = "APP";

/// Configuration options specific to the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Title echoed in every catalog listing.
    #[serde(default = "default_catalog_title")]
    pub catalog_title: String,
    /// Maximum number of active products in the store.
    #[serde(default = "default_max_products")]
    pub max_products: usize,
    /// Maximum number of images per gallery.
    #[serde(default = "default_max_gallery_images")]
    pub max_gallery_images: usize,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_catalog_title() -> String {
    "Catálogo de Productos".to_string()
}

fn default_max_products() -> usize {
    DEFAULT_MAX_PRODUCTS
}

fn default_max_gallery_images() -> usize {
    DEFAULT_MAX_GALLERY_IMAGES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            catalog_title: default_catalog_title(),
            max_products: default_max_products(),
            max_gallery_images: default_max_gallery_images(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from `config/default.yaml`, the file named by
    /// `APP_CONFIG` and `APP__*` environment variables, in that order.
    pub fn load() -> Result<Self, ConfigError> {
        let extra = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_from(extra.as_deref())
    }

    /// Same as [`ServerConfig::load`] with an explicit extra file.
    pub fn load_from(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::new(path, FileFormat::Yaml).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let server_config: ServerConfig = settings.try_deserialize()?;
        if server_config.max_products == 0 || server_config.max_gallery_images == 0 {
            return Err(ConfigError::Message(
                "store limits must be greater than zero".to_string(),
            ));
        }
        Ok(server_config)
    }

    pub fn store_limits(&self) -> StoreLimits {
        StoreLimits {
            max_products: self.max_products,
            max_gallery_images: self.max_gallery_images,
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }
}
