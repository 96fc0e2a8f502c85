use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

use dugi_di::{ContainerBuilder, TypeDescriptor, TypeInfo};

use crate::{config::Config, errors::ConfigError};

struct ConfigEntry {
    value: Arc<dyn Any + Send + Sync + 'static>,
    descriptor: TypeDescriptor,
}

/// A provider to register all configs.
///
/// Configs can be registered and retrieved based on type.
#[derive(Default)]
pub struct ConfigProvider {
    configs: HashMap<TypeId, ConfigEntry>,
    order: Vec<TypeId>,
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a config with specified type, if it was added
    pub fn get_config<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.clone().downcast().ok())
    }

    /// Retrieve a config with specified type.
    ///
    /// If the config type is not available, it will return [`ConfigError::Missing`]
    pub fn require_config<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ConfigError> {
        self.get_config()
            .ok_or_else(|| ConfigError::Missing(TypeInfo::of::<T>()))
    }

    /// Add a config to the registry.
    ///
    /// If the config type is already registered, it will return
    /// [`ConfigError::AlreadyRegistered`]
    pub fn add_config<T: Send + Sync + 'static>(
        &mut self,
        config: T,
    ) -> Result<&mut Self, ConfigError> {
        let type_id = TypeId::of::<T>();

        if self.configs.contains_key(&type_id) {
            return Err(ConfigError::AlreadyRegistered(TypeInfo::of::<T>()));
        }

        let value = Arc::new(config);
        let entry = ConfigEntry {
            descriptor: Config::descriptor(value.clone()),
            value,
        };
        self.configs.insert(type_id, entry);
        self.order.push(type_id);

        tracing::debug!("Added config {}", TypeInfo::of::<T>());
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Send + Sync + 'static>(
        &mut self,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(c) => self.add_config(c),
            None => Ok(self),
        }
    }

    /// Registers a `Config<T>` recipe for every added config, in the order they were added
    pub fn register_into(&self, mut builder: ContainerBuilder) -> ContainerBuilder {
        for type_id in &self.order {
            if let Some(entry) = self.configs.get(type_id) {
                builder = builder.register_descriptor(entry.descriptor.clone());
            }
        }
        builder
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dugi_di::{Container, Describe};

    #[derive(Debug, PartialEq)]
    struct ServerConfig {
        host: String,
        port: u16,
    }

    struct LogConfig {
        level: &'static str,
    }

    #[derive(Describe, Default)]
    struct Server {
        #[inject(registry)]
        config: Option<Config<ServerConfig>>,
    }

    fn server_config() -> ServerConfig {
        ServerConfig {
            host: "localhost".to_string(),
            port: 8080,
        }
    }

    #[test]
    fn adds_and_retrieves_configs() {
        let mut provider = ConfigProvider::new();
        provider
            .add_config(server_config())
            .unwrap()
            .add_config(LogConfig { level: "info" })
            .unwrap();

        assert_eq!(provider.len(), 2);
        assert_eq!(*provider.get_config::<ServerConfig>().unwrap(), server_config());
        assert_eq!(provider.require_config::<LogConfig>().unwrap().level, "info");
    }

    #[test]
    fn rejects_duplicate_configs() {
        let mut provider = ConfigProvider::new();
        provider.add_config(server_config()).unwrap();

        let error = provider.add_config(server_config()).err().unwrap();
        assert_eq!(
            error,
            ConfigError::AlreadyRegistered(TypeInfo::of::<ServerConfig>())
        );
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn missing_configs() {
        let mut provider = ConfigProvider::new();
        provider.maybe_add_config::<LogConfig>(None).unwrap();

        assert!(provider.is_empty());
        assert!(provider.get_config::<LogConfig>().is_none());
        assert_eq!(
            provider.require_config::<LogConfig>().err(),
            Some(ConfigError::Missing(TypeInfo::of::<LogConfig>()))
        );
    }

    #[test]
    fn injects_registered_configs() {
        let mut provider = ConfigProvider::new();
        provider.add_config(server_config()).unwrap();

        let container = provider
            .register_into(Container::builder())
            .register::<Server>()
            .build()
            .unwrap();

        let server = container.resolve::<Server>().unwrap();
        assert_eq!(server.config.unwrap().port, 8080);
    }

    #[test]
    fn server_without_config_fails_validation() {
        let provider = ConfigProvider::new();
        let errors = provider
            .register_into(Container::builder())
            .register::<Server>()
            .build()
            .unwrap_err();
        assert_eq!(errors.errors.len(), 1);
    }
}
