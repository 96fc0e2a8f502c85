use crate::{
    container::Container,
    dependency_graph::{DependencyGraph, DependencyGraphErrors},
    descriptor::{Describe, TypeDescriptor},
    registry::Registry,
};

/// Collects recipes and validates them into a [Container]
///
/// Registering is optional: self describing types resolve on an empty container.
/// Registered recipes override the ones a type declares for its dependencies,
/// and are the only source for `Registered` injection points.
pub struct ContainerBuilder {
    /// Registered recipes
    pub(crate) registered_descriptors: Vec<TypeDescriptor>,
}
impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerBuilder {
    pub fn new() -> Self {
        ContainerBuilder {
            registered_descriptors: Vec::new(),
        }
    }
}
impl ContainerBuilder {
    pub fn register<T: Describe>(self) -> Self {
        self.register_descriptor(T::describe())
    }

    pub fn register_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.registered_descriptors.push(descriptor);
        self
    }

    /// Checks the dependency graph and freezes the registry
    ///
    /// Fails if a type is registered twice, a registered-only dependency is missing,
    /// a reachable type has no zero-argument constructor, or the types form a cycle
    pub fn build(self) -> Result<Container, DependencyGraphErrors> {
        let ContainerBuilder {
            registered_descriptors,
        } = self;

        tracing::debug!(
            "Building container with {} registered recipes",
            registered_descriptors.len()
        );

        let graph = DependencyGraph::new(&registered_descriptors)?;
        if let Err(errors) = graph.check() {
            tracing::error!("{errors}");
            return Err(errors);
        }

        tracing::debug!(
            "Dependency graph valid [{} registered, {} reachable]",
            registered_descriptors.len(),
            graph.len()
        );

        Ok(Container::with_registry(Registry::new(
            registered_descriptors,
            graph,
        )))
    }
}
