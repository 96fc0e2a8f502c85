use std::{fmt, ops::Deref, sync::Arc};

use dugi_di::TypeDescriptor;

/// A wrapper type to allow for config injections
///
/// Every config added to a [ConfigProvider](crate::provider::ConfigProvider) is registered
/// as a recipe for `Config<T>`. Resolved instances share the same config value.
///
/// # Example
/// ```rust
/// use dugi_config::{config::Config, provider::ConfigProvider};
/// use dugi_di::{Container, Describe};
///
/// pub struct ShelfSettings {
///     capacity: usize,
/// }
///
/// #[derive(Describe, Default)]
/// pub struct Shelf {
///     #[inject(registry)]
///     settings: Option<Config<ShelfSettings>>,
/// }
///
/// let mut provider = ConfigProvider::new();
/// provider.add_config(ShelfSettings { capacity: 12 }).unwrap();
///
/// let container = provider
///     .register_into(Container::builder())
///     .register::<Shelf>()
///     .build()
///     .unwrap();
///
/// let shelf = container.resolve::<Shelf>().unwrap();
/// assert_eq!(shelf.settings.unwrap().capacity, 12);
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}

impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> Clone for Config<T> {
    fn clone(&self) -> Self {
        Config {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Config").field(&self.inner).finish()
    }
}

impl<T> Config<T> {
    pub fn new(config: T) -> Self {
        Config {
            inner: Arc::new(config),
        }
    }

    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Send + Sync + 'static> Config<T> {
    /// Recipe for `Config<T>` handing out clones of `inner`
    pub(crate) fn descriptor(inner: Arc<T>) -> TypeDescriptor {
        TypeDescriptor::builder::<Config<T>>()
            .default_constructor(move || Config {
                inner: inner.clone(),
            })
            .build()
    }
}
