use std::{
    any::TypeId,
    collections::{HashMap, HashSet},
};

use thiserror::Error;

use crate::{
    descriptor::{Recipe, TypeDescriptor},
    errors::join_chain,
    types::TypeInfo,
};

/// Graph of every registered type and every type reachable from them
/// Used to report broken recipes before anything is resolved
#[derive(Default)]
pub struct DependencyGraph {
    entries: Vec<DependencyGraphEntry>,
    index: HashMap<TypeId, usize>,
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for entry in &self.entries {
            let dependencies: Vec<_> = entry
                .dependencies
                .iter()
                .map(|dependency| dependency.target.type_name)
                .collect();
            map.entry(&entry.info.type_name, &dependencies);
        }
        map.finish()
    }
}

impl DependencyGraph {
    /// Builds the graph from registered recipes
    ///
    /// Types reachable through self describing injection points are discovered and added as well.
    pub fn new(registered: &[TypeDescriptor]) -> Result<Self, DependencyGraphErrors> {
        let mut graph = DependencyGraph::default();
        let mut errors = Vec::new();

        for descriptor in registered {
            if let Err(error) = graph.add(descriptor, true) {
                errors.push(error);
            }
        }

        if !errors.is_empty() {
            return Err(DependencyGraphErrors { errors });
        }

        // Entries grow while we walk them, discovered types are visited too
        let mut next = 0;
        while next < graph.entries.len() {
            let discovered: Vec<TypeDescriptor> = graph.entries[next]
                .dependencies
                .iter()
                .filter(|dependency| !graph.index.contains_key(&dependency.target.type_id))
                .filter_map(|dependency| match dependency.recipe {
                    Recipe::Described(describe) => Some(describe()),
                    Recipe::Registered => None,
                })
                .collect();

            for descriptor in discovered {
                // Two points of one type may target the same dependency
                if !graph.index.contains_key(&descriptor.info().type_id) {
                    graph.add(&descriptor, false)?;
                }
            }
            next += 1;
        }

        Ok(graph)
    }

    fn add(
        &mut self,
        descriptor: &TypeDescriptor,
        registered: bool,
    ) -> Result<(), DependencyGraphError> {
        let info = descriptor.info();
        if self.index.contains_key(&info.type_id) {
            return Err(DependencyGraphError::Duplicate(info));
        }

        let dependencies = descriptor
            .injection_points()
            .iter()
            .map(|point| DependencyInfo {
                point: point.name(),
                target: point.target(),
                recipe: point.recipe(),
            })
            .collect();

        self.index.insert(info.type_id, self.entries.len());
        self.entries.push(DependencyGraphEntry {
            info,
            registered,
            constructible: descriptor.is_constructible(),
            dependencies,
        });

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, info: &TypeInfo) -> bool {
        self.index.contains_key(&info.type_id)
    }

    /// Returns true if the type was registered, false if it was only discovered
    pub fn is_registered(&self, info: &TypeInfo) -> bool {
        self.entry(info).is_some_and(|entry| entry.registered)
    }

    /// Direct dependencies of a type, in declaration order
    pub fn dependencies_of(&self, info: &TypeInfo) -> Option<Vec<TypeInfo>> {
        self.entry(info).map(|entry| {
            entry
                .dependencies
                .iter()
                .map(|dependency| dependency.target)
                .collect()
        })
    }

    fn entry(&self, info: &TypeInfo) -> Option<&DependencyGraphEntry> {
        self.index.get(&info.type_id).map(|index| &self.entries[*index])
    }

    /// Validate the graph
    ///
    /// Returns a list of all issues
    pub fn check(&self) -> Result<(), DependencyGraphErrors> {
        let mut checked = HashSet::new();
        let mut errors = Vec::new();
        for entry in &self.entries {
            let mut dependency_chain = Vec::new();
            check_recurse(
                self,
                &mut checked,
                &mut errors,
                &mut dependency_chain,
                entry,
            );
        }

        if !errors.is_empty() {
            return Err(DependencyGraphErrors { errors });
        }

        return Ok(());

        fn check_recurse(
            graph: &DependencyGraph,
            checked: &mut HashSet<TypeId>,
            errors: &mut Vec<DependencyGraphError>,
            dependency_chain: &mut Vec<TypeInfo>,
            entry: &DependencyGraphEntry,
        ) {
            // Circular Dependency Check
            if let Some(start) = dependency_chain.iter().position(|info| *info == entry.info) {
                let mut chain = dependency_chain[start..].to_vec();
                chain.push(entry.info);
                errors.push(DependencyGraphError::CircularDependency { chain });
                return;
            }

            // Skip other checks if already checked
            if !checked.insert(entry.info.type_id) {
                return;
            };

            if !entry.constructible {
                errors.push(DependencyGraphError::NotConstructible(entry.info));
            }

            dependency_chain.push(entry.info);

            for dependency in &entry.dependencies {
                let Some(next_entry) = graph.entry(&dependency.target) else {
                    errors.push(DependencyGraphError::MissingRecipe {
                        point: dependency.point,
                        dependency: dependency.target,
                        required_by: entry.info,
                    });
                    continue;
                };

                check_recurse(graph, checked, errors, dependency_chain, next_entry);
            }

            dependency_chain.pop();
        }
    }
}

struct DependencyGraphEntry {
    info: TypeInfo,
    registered: bool,
    constructible: bool,
    dependencies: Vec<DependencyInfo>,
}

struct DependencyInfo {
    point: &'static str,
    target: TypeInfo,
    recipe: Recipe,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyGraphError {
    #[error("A Type has been registered twice: '{0}'")]
    Duplicate(TypeInfo),
    #[error("'{required_by}' needs '{dependency}' for '{point}' but it is not registered")]
    MissingRecipe {
        point: &'static str,
        dependency: TypeInfo,
        required_by: TypeInfo,
    },
    #[error("'{0}' has no zero-argument constructor")]
    NotConstructible(TypeInfo),
    #[error("A Circular Dependency exists: {}", join_chain(.chain))]
    CircularDependency { chain: Vec<TypeInfo> },
}
impl From<DependencyGraphError> for DependencyGraphErrors {
    fn from(error: DependencyGraphError) -> Self {
        DependencyGraphErrors {
            errors: vec![error],
        }
    }
}
impl std::fmt::Display for DependencyGraphErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut display = Vec::new();
        display.push("The dependency graph had one or more errors:".to_string());
        for error in &self.errors {
            display.push(format!("- {}", error));
        }
        f.write_str(&display.join("\n"))
    }
}

#[derive(Error, Debug, Clone)]
pub struct DependencyGraphErrors {
    pub errors: Vec<DependencyGraphError>,
}
