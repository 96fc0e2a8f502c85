//! Type descriptors: the metadata the container consumes instead of runtime reflection.
//!
//! A [TypeDescriptor] lists the constructors of a type and its injection points.
//! It is produced once per type, either by hand or by `#[derive(Describe)]`.

use std::{convert::Infallible, fmt::Debug, marker::PhantomData, sync::Arc};

use crate::{
    errors::{AssignError, ConstructionError},
    types::{DynError, Injectable, Instance, TypeInfo},
};

type Invoke = dyn Fn(Vec<Instance>) -> Result<Instance, ConstructionError> + Send + Sync;
type Setter = dyn Fn(&mut Instance, Instance) -> Result<(), AssignError> + Send + Sync;

/// Implemented by every type the container can construct
///
/// Usually derived:
/// ```
/// use dugi_di::Describe;
///
/// #[derive(Describe, Default)]
/// struct BookRepository;
///
/// #[derive(Describe, Default)]
/// struct BookService {
///     #[inject]
///     repository: Option<BookRepository>,
/// }
///
/// let service = dugi_di::Container::new().resolve::<BookService>().unwrap();
/// assert!(service.repository.is_some());
/// ```
pub trait Describe: Injectable {
    fn describe() -> TypeDescriptor;
}

/// A way to construct a type, with the types of its parameters
#[derive(Clone)]
pub struct Constructor {
    product: TypeInfo,
    params: Vec<TypeInfo>,
    invoke: Arc<Invoke>,
}

impl Debug for Constructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<_> = self.params.iter().map(|param| param.type_name).collect();
        f.debug_struct("Constructor")
            .field("product", &self.product.type_name)
            .field("params", &params)
            .finish()
    }
}

impl Constructor {
    /// Zero-argument constructor
    pub fn new<T: Injectable>(make: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self::fallible(move || Ok::<_, Infallible>(make()))
    }

    /// Zero-argument constructor which may fail
    pub fn fallible<T, E>(make: impl Fn() -> Result<T, E> + Send + Sync + 'static) -> Self
    where
        T: Injectable,
        E: Into<DynError>,
    {
        let product = TypeInfo::of::<T>();
        Constructor {
            product,
            params: Vec::new(),
            invoke: Arc::new(move |_: Vec<Instance>| {
                make()
                    .map(Instance::new)
                    .map_err(|error| ConstructionError::ConstructorFailed {
                        type_info: product,
                        error: error.into(),
                    })
            }),
        }
    }

    /// Single argument constructor
    pub fn with_arg<A, T>(make: impl Fn(A) -> T + Send + Sync + 'static) -> Self
    where
        A: Injectable,
        T: Injectable,
    {
        let product = TypeInfo::of::<T>();
        let params = vec![TypeInfo::of::<A>()];
        let expected = params.clone();
        Constructor {
            product,
            params,
            invoke: Arc::new(move |args: Vec<Instance>| {
                let actual: Vec<_> = args.iter().map(Instance::info).collect();
                let mismatch = || ConstructionError::ArgumentMismatch {
                    type_info: product,
                    expected: expected.clone(),
                    actual: actual.clone(),
                };

                let mut args = args.into_iter();
                let arg = args.next().ok_or_else(mismatch)?;
                let arg = arg.downcast::<A>().map_err(|_| mismatch())?;
                Ok(Instance::new(make(arg)))
            }),
        }
    }

    /// Constructor working on erased instances
    ///
    /// Used by descriptor providers which only know types at runtime.
    /// The arguments are checked against `params` before `invoke` is called.
    pub fn erased(
        product: TypeInfo,
        params: Vec<TypeInfo>,
        invoke: impl Fn(Vec<Instance>) -> Result<Instance, DynError> + Send + Sync + 'static,
    ) -> Self {
        Constructor {
            product,
            params,
            invoke: Arc::new(move |args: Vec<Instance>| {
                invoke(args).map_err(|error| ConstructionError::ConstructorFailed {
                    type_info: product,
                    error,
                })
            }),
        }
    }

    /// The type this constructor declares to produce
    pub fn product(&self) -> TypeInfo {
        self.product
    }

    pub fn params(&self) -> &[TypeInfo] {
        &self.params
    }

    /// Returns true for zero-argument constructors
    pub fn is_default(&self) -> bool {
        self.params.is_empty()
    }

    /// Calls the constructor
    ///
    /// Fails with [ConstructionError::ArgumentMismatch] if `args` do not match [Constructor::params]
    pub fn invoke(&self, args: Vec<Instance>) -> Result<Instance, ConstructionError> {
        let matches = args.len() == self.params.len()
            && args
                .iter()
                .zip(&self.params)
                .all(|(arg, param)| arg.info().type_id == param.type_id);

        if !matches {
            return Err(ConstructionError::ArgumentMismatch {
                type_info: self.product,
                expected: self.params.clone(),
                actual: args.iter().map(Instance::info).collect(),
            });
        }

        (self.invoke)(args)
    }
}

/// Where the container finds the recipe for an injection point's target
#[derive(Debug, Clone, Copy)]
pub enum Recipe {
    /// The target describes itself, registered recipes still take precedence
    Described(fn() -> TypeDescriptor),
    /// The target must be registered in the container
    Registered,
}

/// A member of a type which is populated by the container
#[derive(Clone)]
pub struct InjectionPoint {
    owner: TypeInfo,
    name: &'static str,
    target: TypeInfo,
    recipe: Recipe,
    setter: Arc<Setter>,
}

impl Debug for InjectionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("owner", &self.owner.type_name)
            .field("name", &self.name)
            .field("target", &self.target.type_name)
            .field("recipe", &self.recipe)
            .finish()
    }
}

impl InjectionPoint {
    /// Injection point working on erased instances
    pub fn erased(
        owner: TypeInfo,
        name: &'static str,
        target: TypeInfo,
        recipe: Recipe,
        setter: impl Fn(&mut Instance, Instance) -> Result<(), AssignError> + Send + Sync + 'static,
    ) -> Self {
        InjectionPoint {
            owner,
            name,
            target,
            recipe,
            setter: Arc::new(setter),
        }
    }

    fn typed<T, D, E>(
        name: &'static str,
        recipe: Recipe,
        set: impl Fn(&mut T, D) -> Result<(), E> + Send + Sync + 'static,
    ) -> Self
    where
        T: Injectable,
        D: Injectable,
        E: Into<DynError>,
    {
        let owner = TypeInfo::of::<T>();
        let target = TypeInfo::of::<D>();
        Self::erased(owner, name, target, recipe, move |instance, value| {
            let value = value
                .downcast::<D>()
                .map_err(|value| AssignError::TypeMismatch {
                    expected: target,
                    actual: value.info(),
                })?;

            let actual = instance.info();
            let this = instance
                .downcast_mut::<T>()
                .ok_or(AssignError::WrongOwner { owner, actual })?;

            set(this, value).map_err(|error| AssignError::Rejected(error.into()))
        })
    }

    /// Type declaring this injection point
    pub fn owner(&self) -> TypeInfo {
        self.owner
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the dependency
    pub fn target(&self) -> TypeInfo {
        self.target
    }

    pub fn recipe(&self) -> Recipe {
        self.recipe
    }

    /// Puts `value` into `instance` through the setter
    pub fn assign(&self, instance: &mut Instance, value: Instance) -> Result<(), AssignError> {
        (self.setter)(instance, value)
    }
}

/// Metadata describing how to construct a type and which members require injection
///
/// Cheap to clone, immutable once built.
#[derive(Clone)]
pub struct TypeDescriptor(Arc<TypeDescriptorInner>);
struct TypeDescriptorInner {
    info: TypeInfo,
    constructors: Vec<Constructor>,
    injection_points: Vec<InjectionPoint>,
}

impl Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("info", &self.0.info.type_name)
            .field("constructors", &self.0.constructors)
            .field("injection_points", &self.0.injection_points)
            .finish()
    }
}

impl TypeDescriptor {
    pub fn builder<T: Injectable>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder::new()
    }

    /// Descriptor for a type constructed through [Default] without injection points
    pub fn of_default<T: Injectable + Default>() -> TypeDescriptor {
        Self::builder::<T>().default_constructor(T::default).build()
    }

    pub fn info(&self) -> TypeInfo {
        self.0.info
    }

    pub fn constructors(&self) -> &[Constructor] {
        &self.0.constructors
    }

    /// Injection points in declaration order
    pub fn injection_points(&self) -> &[InjectionPoint] {
        &self.0.injection_points
    }

    pub fn injection_point(&self, name: &str) -> Option<&InjectionPoint> {
        self.0
            .injection_points
            .iter()
            .find(|point| point.name == name)
    }

    /// The zero-argument constructor, if the type has one
    pub fn default_constructor(&self) -> Option<&Constructor> {
        self.0.constructors.iter().find(|c| c.is_default())
    }

    /// The constructor taking exactly `params`
    pub fn constructor_for(&self, params: &[TypeInfo]) -> Option<&Constructor> {
        self.0
            .constructors
            .iter()
            .find(|constructor| constructor.params == params)
    }

    /// Returns true if the container is able to build the type
    pub fn is_constructible(&self) -> bool {
        self.default_constructor().is_some()
    }
}

/// Builds a [TypeDescriptor] for `T`
pub struct TypeDescriptorBuilder<T> {
    constructors: Vec<Constructor>,
    injection_points: Vec<InjectionPoint>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Injectable> Default for TypeDescriptorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Injectable> TypeDescriptorBuilder<T> {
    pub fn new() -> Self {
        TypeDescriptorBuilder {
            constructors: Vec::new(),
            injection_points: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Adds any constructor
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Adds the zero-argument constructor used by the container
    pub fn default_constructor(self, make: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.constructor(Constructor::new(make))
    }

    /// Adds a zero-argument constructor which may fail
    pub fn try_default_constructor<E: Into<DynError>>(
        self,
        make: impl Fn() -> Result<T, E> + Send + Sync + 'static,
    ) -> Self {
        self.constructor(Constructor::fallible(make))
    }

    /// Declares an injection point whose target describes itself
    pub fn inject<D: Describe>(
        self,
        name: &'static str,
        set: impl Fn(&mut T, D) + Send + Sync + 'static,
    ) -> Self {
        self.try_inject(name, move |this, value: D| {
            set(this, value);
            Ok::<_, Infallible>(())
        })
    }

    /// Declares an injection point with a setter which may reject the value
    pub fn try_inject<D: Describe, E: Into<DynError>>(
        self,
        name: &'static str,
        set: impl Fn(&mut T, D) -> Result<(), E> + Send + Sync + 'static,
    ) -> Self {
        self.injection_point(InjectionPoint::typed(
            name,
            Recipe::Described(D::describe),
            set,
        ))
    }

    /// Declares an injection point whose target must be registered in the container
    pub fn inject_registered<D: Injectable>(
        self,
        name: &'static str,
        set: impl Fn(&mut T, D) + Send + Sync + 'static,
    ) -> Self {
        self.injection_point(InjectionPoint::typed(
            name,
            Recipe::Registered,
            move |this, value: D| {
                set(this, value);
                Ok::<_, Infallible>(())
            },
        ))
    }

    /// Adds a prebuilt injection point
    pub fn injection_point(mut self, point: InjectionPoint) -> Self {
        self.injection_points.push(point);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor(Arc::new(TypeDescriptorInner {
            info: TypeInfo::of::<T>(),
            constructors: self.constructors,
            injection_points: self.injection_points,
        }))
    }
}
