use std::any::{Any, TypeId};

/// Boxed error returned by user supplied constructors and setters
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Resolved graphs are owned by the caller and may be moved to other threads,
/// so anything the container constructs needs to be Send + 'static
pub trait Injectable: Send + 'static {}
impl<T: Send + 'static> Injectable for T {}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Type name without module paths, `alloc::vec::Vec<dugi::books::Book>` becomes `Vec<Book>`
    pub fn short_name(&self) -> String {
        let mut short = String::with_capacity(self.type_name.len());
        let mut path = String::new();

        for c in self.type_name.chars() {
            if c.is_alphanumeric() || c == '_' || c == ':' {
                path.push(c);
            } else {
                push_last_segment(&mut short, &path);
                path.clear();
                short.push(c);
            }
        }
        push_last_segment(&mut short, &path);

        short
    }
}

fn push_last_segment(short: &mut String, path: &str) {
    match path.rfind("::") {
        Some(index) => short.push_str(&path[index + 2..]),
        None => short.push_str(path),
    }
}

/// A freshly constructed value, owned by whoever requested it
pub struct Instance {
    info: TypeInfo,
    value: Box<dyn Any + Send>,
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.info.type_name).finish()
    }
}

impl Instance {
    pub fn new<T: Injectable>(value: T) -> Self {
        Instance {
            info: TypeInfo::of::<T>(),
            value: Box::new(value),
        }
    }

    /// Type of the contained value
    pub fn info(&self) -> TypeInfo {
        self.info
    }

    pub fn is<T: Injectable>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Takes the value out, handing the instance back if it holds another type
    pub fn downcast<T: Injectable>(self) -> Result<T, Instance> {
        let Instance { info, value } = self;
        match value.downcast::<T>() {
            Ok(downcasted) => Ok(*downcasted),
            Err(value) => Err(Instance { info, value }),
        }
    }

    pub fn downcast_ref<T: Injectable>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    pub fn downcast_mut<T: Injectable>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut()
    }
}
