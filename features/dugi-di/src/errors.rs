use thiserror::Error;

use crate::{
    descriptor::InjectionPoint,
    types::{DynError, TypeInfo},
};

/// Any error `Container::resolve` can return
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),
    #[error(transparent)]
    Injection(#[from] InjectionError),
    #[error(transparent)]
    CyclicDependency(#[from] CyclicDependencyError),
}

impl ResolveError {
    /// Follows nested injection failures down to the error that started them
    pub fn root_cause(&self) -> &ResolveError {
        match self {
            ResolveError::Injection(InjectionError {
                fault: InjectionFault::Dependency(inner),
                ..
            }) => inner.root_cause(),
            other => other,
        }
    }

    /// Names of the injection points leading to the root cause, outermost first
    pub fn injection_path(&self) -> Vec<&'static str> {
        let mut path = Vec::new();
        let mut current = self;
        while let ResolveError::Injection(error) = current {
            path.push(error.point);
            match &error.fault {
                InjectionFault::Dependency(inner) => current = inner,
                InjectionFault::Assign(_) => break,
            }
        }
        path
    }
}

/// Errors while instantiating a type
#[derive(Error, Debug)]
pub enum ConstructionError {
    /// Only zero-argument constructors are used for resolution
    #[error("'{0}' has no zero-argument constructor")]
    NoDefaultConstructor(TypeInfo),
    /// Neither the registry nor the injection point knows how to build the type
    #[error("No recipe for '{0}': it is not registered and does not describe itself")]
    Unregistered(TypeInfo),
    /// The constructor itself returned an error, available as the source
    #[error("Constructor of '{type_info}' failed")]
    ConstructorFailed {
        type_info: TypeInfo,
        #[source]
        error: DynError,
    },
    #[error("Constructor for '{expected}' produced a '{actual}'")]
    WrongProduct {
        expected: TypeInfo,
        actual: TypeInfo,
    },
    #[error(
        "Constructor of '{type_info}' takes ({}) but was called with ({})",
        join_names(.expected),
        join_names(.actual)
    )]
    ArgumentMismatch {
        type_info: TypeInfo,
        expected: Vec<TypeInfo>,
        actual: Vec<TypeInfo>,
    },
}

/// A dependency could not be put into an injection point
#[derive(Error, Debug)]
#[error("Failed to inject '{point}' of '{owner}' (expects '{target}')")]
pub struct InjectionError {
    /// Type declaring the injection point
    pub owner: TypeInfo,
    /// Name of the injection point
    pub point: &'static str,
    /// Declared type of the injection point
    pub target: TypeInfo,
    #[source]
    pub fault: InjectionFault,
}

impl InjectionError {
    pub(crate) fn assign(point: &InjectionPoint, error: AssignError) -> Self {
        Self::new(point, InjectionFault::Assign(error))
    }

    pub(crate) fn dependency(point: &InjectionPoint, error: ResolveError) -> Self {
        Self::new(point, InjectionFault::Dependency(Box::new(error)))
    }

    fn new(point: &InjectionPoint, fault: InjectionFault) -> Self {
        InjectionError {
            owner: point.owner(),
            point: point.name(),
            target: point.target(),
            fault,
        }
    }
}

#[derive(Error, Debug)]
pub enum InjectionFault {
    /// The setter refused the value
    #[error(transparent)]
    Assign(#[from] AssignError),
    /// Building the dependency failed
    #[error(transparent)]
    Dependency(Box<ResolveError>),
}

/// Errors raised by an injection point setter
#[derive(Error, Debug)]
pub enum AssignError {
    #[error("Setter expects '{expected}' but received '{actual}'")]
    TypeMismatch {
        expected: TypeInfo,
        actual: TypeInfo,
    },
    #[error("Setter belongs to '{owner}' but the instance holds a '{actual}'")]
    WrongOwner { owner: TypeInfo, actual: TypeInfo },
    #[error("Setter rejected the value")]
    Rejected(#[source] DynError),
}

/// Resolution re-entered a type that is still being built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Circular dependency: {}", join_chain(.chain))]
pub struct CyclicDependencyError {
    /// Every type on the resolution chain, ending with the re-entered one
    pub chain: Vec<TypeInfo>,
}

impl CyclicDependencyError {
    /// The type which was requested while already being resolved
    pub fn repeated(&self) -> Option<TypeInfo> {
        self.chain.last().copied()
    }
}

pub(crate) fn join_names(types: &[TypeInfo]) -> String {
    types
        .iter()
        .map(|info| info.type_name)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn join_chain(chain: &[TypeInfo]) -> String {
    chain
        .iter()
        .map(|info| info.type_name)
        .collect::<Vec<_>>()
        .join(" -> ")
}
