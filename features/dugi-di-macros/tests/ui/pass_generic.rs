use dugi_di::{Container, Describe, TypeDescriptor};

#[derive(Describe, Default)]
struct Leaf;

// The impl gets bounds for the parameters its points need
#[derive(Describe, Default)]
struct Holder<T> {
    #[inject]
    inner: Option<T>,
}

#[derive(Describe)]
#[describe(constructor = "Labeled::empty")]
struct Labeled<L> {
    #[inject(registry)]
    label: Option<L>,
    #[inject]
    leaf: Option<Box<Leaf>>,
}

impl<L> Labeled<L> {
    fn empty() -> Self {
        Labeled {
            label: None,
            leaf: None,
        }
    }
}

fn main() {
    let holder = Container::new().resolve::<Holder<Leaf>>().unwrap();
    assert!(holder.inner.is_some());

    let nested = Container::new().resolve::<Holder<Holder<Leaf>>>().unwrap();
    assert!(nested.inner.unwrap().inner.is_some());

    let container = Container::builder()
        .register_descriptor(TypeDescriptor::of_default::<String>())
        .build()
        .unwrap();
    let labeled = container.resolve::<Labeled<String>>().unwrap();
    assert_eq!(labeled.label.as_deref(), Some(""));
    assert!(labeled.leaf.is_some());
}
