use std::fmt::Debug;

use crate::{
    builder::ContainerBuilder,
    descriptor::{Describe, TypeDescriptor},
    errors::{ConstructionError, ResolveError},
    registry::Registry,
    resolver::{InjectionResolver, ResolutionChain},
    types::{Injectable, Instance, TypeInfo},
};

/// Entry point for resolving fully populated instances
///
/// A container only holds recipes. Every call to [Container::resolve] builds a new,
/// independent object graph owned by the caller, so a container can be shared
/// between threads freely.
#[derive(Clone, Default)]
pub struct Container {
    registry: Registry,
}
impl Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .finish()
    }
}

impl Container {
    /// Container without registered recipes, resolving self describing types only
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub fn with_registry(registry: Registry) -> Self {
        Container { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Builds a new `T` and all of its dependencies
    ///
    /// A registered recipe for `T` takes precedence over [Describe::describe]
    pub fn resolve<T: Describe>(&self) -> Result<T, ResolveError> {
        let descriptor = match self.registry.lookup(&TypeInfo::of::<T>()) {
            Some(registered) => registered.clone(),
            None => T::describe(),
        };

        self.resolve_typed(&descriptor)
    }

    /// Builds a new `T` from its registered recipe
    pub fn resolve_registered<T: Injectable>(&self) -> Result<T, ResolveError> {
        let requested = TypeInfo::of::<T>();
        let descriptor = self
            .registry
            .lookup(&requested)
            .cloned()
            .ok_or(ConstructionError::Unregistered(requested))?;

        self.resolve_typed(&descriptor)
    }

    /// Builds an instance of any descriptor
    pub fn resolve_descriptor(&self, descriptor: &TypeDescriptor) -> Result<Instance, ResolveError> {
        tracing::debug!("Resolving {}", descriptor.info());

        let mut chain = ResolutionChain::new();
        let result = InjectionResolver::new(&self.registry).resolve(descriptor, &mut chain);

        match &result {
            Ok(_) => tracing::debug!("Resolved {}", descriptor.info()),
            Err(error) => tracing::error!("Failed to resolve {}: {}", descriptor.info(), error),
        }

        result
    }

    fn resolve_typed<T: Injectable>(&self, descriptor: &TypeDescriptor) -> Result<T, ResolveError> {
        let instance = self.resolve_descriptor(descriptor)?;
        instance.downcast::<T>().map_err(|instance| {
            ConstructionError::WrongProduct {
                expected: TypeInfo::of::<T>(),
                actual: instance.info(),
            }
            .into()
        })
    }
}
