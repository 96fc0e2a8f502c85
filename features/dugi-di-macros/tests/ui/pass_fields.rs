use dugi_di::{Container, Describe, Recipe, TypeInfo};

#[derive(Describe, Default)]
struct Paper;

#[derive(Describe, Default)]
struct Ink(u8);

// Tuple fields are named by their index
#[derive(Describe, Default)]
struct Printer(#[inject] Option<Paper>, #[inject] Ink);

#[derive(Describe)]
#[describe(constructor = "Office::empty")]
struct Office {
    #[inject]
    r#type: Option<Printer>,
    #[inject(registry)]
    label: Option<String>,
}

impl Office {
    fn empty() -> Self {
        Office {
            r#type: None,
            label: None,
        }
    }
}

fn main() {
    let descriptor = <Office as Describe>::describe();
    let names: Vec<_> = descriptor
        .injection_points()
        .iter()
        .map(|point| point.name())
        .collect();
    assert_eq!(names, ["type", "label"]);
    assert!(matches!(
        descriptor.injection_points()[1].recipe(),
        Recipe::Registered
    ));
    assert_eq!(
        descriptor.injection_points()[0].target(),
        TypeInfo::of::<Printer>()
    );

    let printer = Container::new().resolve::<Printer>().unwrap();
    assert!(printer.0.is_some());
    assert_eq!((printer.1).0, 0);

    let container = Container::builder()
        .register_descriptor(dugi_di::TypeDescriptor::of_default::<String>())
        .build()
        .unwrap();
    let office = container.resolve::<Office>().unwrap();
    assert!(office.r#type.is_some());
    assert_eq!(office.label.as_deref(), Some(""));
}
