use super::{BookId, ValidationError};

/// Catalog entry for a single physical book.
///
/// `borrowed` mirrors the lending history: it is true exactly while an open
/// borrowing record exists for this book. Only the lending workflow flips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub isbn: String,
    pub borrowed: bool,
}

impl Book {
    /// Builds a freshly stored book. New books are always on the shelf.
    pub fn register(id: BookId, details: NewBook) -> Self {
        Self {
            id,
            title: details.title,
            author: details.author,
            publication_year: details.publication_year,
            isbn: details.isbn,
            borrowed: false,
        }
    }

    /// Replaces every descriptive field and keeps `id` and `borrowed`.
    pub fn with_details(self, details: NewBook) -> Self {
        Self {
            title: details.title,
            author: details.author,
            publication_year: details.publication_year,
            isbn: details.isbn,
            ..self
        }
    }
}

/// Validated descriptive fields of a book, without identity or lending state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    title: String,
    author: String,
    publication_year: i32,
    isbn: String,
}

impl NewBook {
    pub fn new(
        title: &str,
        author: &str,
        publication_year: i32,
        isbn: &str,
    ) -> Result<Self, ValidationError> {
        let title = required("title", title)?;
        let author = required("author", author)?;

        if !(1..=9999).contains(&publication_year) {
            return Err(ValidationError::PublicationYearOutOfRange(publication_year));
        }

        Ok(Self {
            title,
            author,
            publication_year,
            isbn: required("isbn", isbn)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }
}

/// Trims `value` and rejects it when nothing is left.
pub(super) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(trimmed.to_string())
}
