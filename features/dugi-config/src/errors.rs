use dugi_di::TypeInfo;

/// Errors when registering or requiring a config
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config of this type was added
    #[error("Config '{0}' is not known")]
    Missing(TypeInfo),
    /// A config of this type was added before
    #[error("Config '{0}' is already registered")]
    AlreadyRegistered(TypeInfo),
}
