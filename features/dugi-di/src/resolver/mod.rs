use crate::{
    descriptor::{InjectionPoint, Recipe, TypeDescriptor},
    errors::{ConstructionError, InjectionError, ResolveError},
    instance_builder,
    registry::Registry,
    types::Instance,
};

pub mod chain;

pub use chain::ResolutionChain;

/// Fills the injection points of freshly built instances
///
/// Dependencies are built recursively, recipes are taken from the registry first
/// and from the injection point second.
pub struct InjectionResolver<'r> {
    registry: &'r Registry,
}

impl<'r> InjectionResolver<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        InjectionResolver { registry }
    }

    /// Builds `descriptor` and populates all of its injection points
    pub fn resolve(
        &self,
        descriptor: &TypeDescriptor,
        chain: &mut ResolutionChain,
    ) -> Result<Instance, ResolveError> {
        chain.enter(descriptor.info())?;

        let result = instance_builder::build(descriptor)
            .map_err(ResolveError::from)
            .and_then(|instance| self.inject(instance, descriptor, chain));

        chain.leave();
        result
    }

    /// Populates the injection points of `instance` in declaration order
    ///
    /// The instance is dropped on the first failure.
    pub fn inject(
        &self,
        mut instance: Instance,
        descriptor: &TypeDescriptor,
        chain: &mut ResolutionChain,
    ) -> Result<Instance, ResolveError> {
        for point in descriptor.injection_points() {
            tracing::trace!(
                "Injecting '{}' of {} with {}",
                point.name(),
                point.owner(),
                point.target()
            );

            let dependency = self.resolve_point(point, chain)?;
            point
                .assign(&mut instance, dependency)
                .map_err(|error| InjectionError::assign(point, error))?;
        }

        Ok(instance)
    }

    fn resolve_point(
        &self,
        point: &InjectionPoint,
        chain: &mut ResolutionChain,
    ) -> Result<Instance, ResolveError> {
        let Some(descriptor) = self.recipe_for(point) else {
            let missing = ConstructionError::Unregistered(point.target());
            return Err(InjectionError::dependency(point, missing.into()).into());
        };

        match self.resolve(&descriptor, chain) {
            Ok(instance) => Ok(instance),
            // Cycles concern the whole chain, they are reported once at the top
            Err(ResolveError::CyclicDependency(cycle)) => Err(cycle.into()),
            Err(error) => Err(InjectionError::dependency(point, error).into()),
        }
    }

    fn recipe_for(&self, point: &InjectionPoint) -> Option<TypeDescriptor> {
        if let Some(registered) = self.registry.lookup(&point.target()) {
            return Some(registered.clone());
        }

        match point.recipe() {
            Recipe::Described(describe) => Some(describe()),
            Recipe::Registered => None,
        }
    }
}
