//! Creates instances through their zero-argument constructor.
//!
//! Injection points are left untouched, see [crate::resolver].

use crate::{descriptor::TypeDescriptor, errors::ConstructionError, types::Instance};

/// Invokes the zero-argument constructor of `descriptor`
pub fn build(descriptor: &TypeDescriptor) -> Result<Instance, ConstructionError> {
    let info = descriptor.info();
    let constructor = descriptor
        .default_constructor()
        .ok_or(ConstructionError::NoDefaultConstructor(info))?;

    let instance = constructor.invoke(Vec::new())?;

    // Erased constructors are free to return anything
    if instance.info() != info {
        return Err(ConstructionError::WrongProduct {
            expected: info,
            actual: instance.info(),
        });
    }

    tracing::trace!("Constructed instance of {}", info);
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{descriptor::Constructor, types::TypeInfo};

    #[derive(Default, Debug, PartialEq)]
    struct Counter(u32);

    #[test]
    fn builds_through_default_constructor() {
        let descriptor = TypeDescriptor::builder::<Counter>()
            .constructor(Constructor::with_arg(Counter))
            .default_constructor(|| Counter(1))
            .build();

        let counter = build(&descriptor).unwrap().downcast::<Counter>().unwrap();
        assert_eq!(counter, Counter(1));
    }

    #[test]
    fn requires_zero_argument_constructor() {
        let descriptor = TypeDescriptor::builder::<Counter>()
            .constructor(Constructor::with_arg(Counter))
            .build();

        let error = build(&descriptor).unwrap_err();
        assert!(matches!(
            error,
            ConstructionError::NoDefaultConstructor(info) if info == TypeInfo::of::<Counter>()
        ));
    }

    #[test]
    fn reports_constructor_failure() {
        let descriptor = TypeDescriptor::builder::<Counter>()
            .try_default_constructor(|| Err::<Counter, _>("counter overflow"))
            .build();

        let error = build(&descriptor).unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("Constructor of '{}' failed", TypeInfo::of::<Counter>())
        );
        // The cause is only printed once, through the source chain
        let source = std::error::Error::source(&error).unwrap();
        assert_eq!(source.to_string(), "counter overflow");
    }

    #[test]
    fn rejects_wrong_product() {
        let descriptor = TypeDescriptor::builder::<Counter>()
            .constructor(Constructor::erased(
                TypeInfo::of::<Counter>(),
                Vec::new(),
                |_| Ok(Instance::new("not a counter")),
            ))
            .build();

        let error = build(&descriptor).unwrap_err();
        assert!(matches!(
            error,
            ConstructionError::WrongProduct { expected, actual }
                if expected == TypeInfo::of::<Counter>() && actual == TypeInfo::of::<&str>()
        ));
    }
}
