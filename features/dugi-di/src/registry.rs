use std::{any::TypeId, collections::HashMap, fmt::Debug, sync::Arc};

use crate::{dependency_graph::DependencyGraph, descriptor::TypeDescriptor, types::TypeInfo};

/// Maps requested types to their construction recipes
///
/// Holds recipes only, never instances. Immutable once built by the [crate::builder::ContainerBuilder].
#[derive(Clone, Default)]
pub struct Registry(Arc<RegistryInner>);
#[derive(Default)]
struct RegistryInner {
    recipes: HashMap<TypeId, TypeDescriptor>,
    /// Registration order
    order: Vec<TypeInfo>,
    graph: DependencyGraph,
}

impl Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.0.order.iter().map(|info| info.type_name))
            .finish()
    }
}

impl Registry {
    pub(crate) fn new(descriptors: Vec<TypeDescriptor>, graph: DependencyGraph) -> Self {
        let order = descriptors.iter().map(TypeDescriptor::info).collect();
        let recipes = descriptors
            .into_iter()
            .map(|descriptor| (descriptor.info().type_id, descriptor))
            .collect();

        Registry(Arc::new(RegistryInner {
            recipes,
            order,
            graph,
        }))
    }

    /// Recipe registered for the requested type
    pub fn lookup(&self, info: &TypeInfo) -> Option<&TypeDescriptor> {
        self.0.recipes.get(&info.type_id)
    }

    pub fn contains(&self, info: &TypeInfo) -> bool {
        self.0.recipes.contains_key(&info.type_id)
    }

    /// Registered recipes in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.0
            .order
            .iter()
            .filter_map(|info| self.0.recipes.get(&info.type_id))
    }

    pub fn len(&self) -> usize {
        self.0.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.recipes.is_empty()
    }

    /// The validated graph of registered and reachable types
    pub fn graph(&self) -> &DependencyGraph {
        &self.0.graph
    }
}
