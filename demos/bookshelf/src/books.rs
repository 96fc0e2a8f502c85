use dugi_config::Config;
use dugi_di::{Constructor, Describe, TypeDescriptor};

/// A book with a private title and subtitle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    subtitle: String,
}

impl Book {
    pub fn new(title: String) -> Self {
        Book {
            title,
            subtitle: String::new(),
        }
    }

    pub fn untitled() -> Self {
        Book::new("untitled".to_string())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }
}

// Written by hand: Book has a second constructor, and its subtitle is only writable
// through the injection point setter.
impl Describe for Book {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>()
            .default_constructor(Book::untitled)
            .constructor(Constructor::with_arg(Book::new))
            .inject_registered("subtitle", |book: &mut Book, subtitle: String| {
                book.subtitle = subtitle;
            })
            .build()
    }
}

#[derive(Describe, Default, Debug)]
pub struct BookRepository {
    books: Vec<Book>,
}

impl BookRepository {
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Settings of the shelf served by [BookService]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfSettings {
    pub name: String,
    pub capacity: usize,
}

impl Default for ShelfSettings {
    fn default() -> Self {
        ShelfSettings {
            name: "main".to_string(),
            capacity: 10,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ShelfError {
    #[error("Shelf '{name}' is full (capacity {capacity})")]
    Full { name: String, capacity: usize },
    #[error("BookService has no {0}, it was not resolved by a container")]
    MissingDependency(&'static str),
}

#[derive(Describe, Default)]
pub struct BookService {
    #[inject]
    book_repository: Option<BookRepository>,
    #[inject(registry)]
    settings: Option<Config<ShelfSettings>>,
}

impl BookService {
    pub fn book_repository(&self) -> Option<&BookRepository> {
        self.book_repository.as_ref()
    }

    pub fn settings(&self) -> Option<&ShelfSettings> {
        self.settings.as_deref()
    }

    /// Puts a book on the shelf, returns the number of shelved books
    pub fn shelve(&mut self, book: Book) -> Result<usize, ShelfError> {
        let settings = self
            .settings
            .as_deref()
            .ok_or(ShelfError::MissingDependency("ShelfSettings"))?;
        let repository = self
            .book_repository
            .as_mut()
            .ok_or(ShelfError::MissingDependency("BookRepository"))?;

        if repository.len() >= settings.capacity {
            return Err(ShelfError::Full {
                name: settings.name.clone(),
                capacity: settings.capacity,
            });
        }

        tracing::debug!("Shelving '{}' on '{}'", book.title(), settings.name);
        repository.add(book);
        Ok(repository.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dugi_config::ConfigProvider;
    use dugi_di::{Container, Instance, TypeInfo};

    fn container(settings: ShelfSettings) -> Container {
        let mut provider = ConfigProvider::new();
        provider.add_config(settings).unwrap();
        provider
            .register_into(Container::builder())
            .register::<BookService>()
            .build()
            .unwrap()
    }

    #[test]
    fn resolved_service_shelves_books() {
        let mut service = container(ShelfSettings::default())
            .resolve::<BookService>()
            .unwrap();

        assert!(service.book_repository().unwrap().is_empty());
        assert_eq!(service.shelve(Book::new("Dune".to_string())), Ok(1));
        assert_eq!(
            service.book_repository().unwrap().books(),
            [Book::new("Dune".to_string())]
        );
    }

    #[test]
    fn full_shelf_rejects_books() {
        let settings = ShelfSettings {
            name: "tiny".to_string(),
            capacity: 1,
        };
        let mut service = container(settings).resolve::<BookService>().unwrap();

        service.shelve(Book::untitled()).unwrap();
        assert_eq!(
            service.shelve(Book::untitled()),
            Err(ShelfError::Full {
                name: "tiny".to_string(),
                capacity: 1
            })
        );
    }

    #[test]
    fn unresolved_service_has_no_dependencies() {
        let mut service = BookService::default();
        assert_eq!(
            service.shelve(Book::untitled()),
            Err(ShelfError::MissingDependency("ShelfSettings"))
        );
    }

    #[test]
    fn book_subtitle_is_set_through_descriptor() {
        let descriptor = Book::describe();
        assert_eq!(descriptor.constructors().len(), 2);

        let mut book = descriptor
            .constructor_for(&[TypeInfo::of::<String>()])
            .unwrap()
            .invoke(vec![Instance::new("bBook".to_string())])
            .unwrap();
        assert_eq!(book.downcast_ref::<Book>().unwrap().title(), "bBook");
        assert_eq!(book.downcast_ref::<Book>().unwrap().subtitle(), "");

        descriptor
            .injection_point("subtitle")
            .unwrap()
            .assign(&mut book, Instance::new("BBBB".to_string()))
            .unwrap();
        let book = book.downcast::<Book>().unwrap();
        assert_eq!(book.title(), "bBook");
        assert_eq!(book.subtitle(), "BBBB");
    }
}
