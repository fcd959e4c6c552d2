use serde::{Deserialize, Serialize};

/// A catalogue entry persisted in the `books` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Server-generated identifier, immutable after creation
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub language: String,
    pub price: f64,
    pub is_available: bool,
    pub description: String,
}

/// Request payload for creating a book.
///
/// Absent fields decode to their zero value; nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub language: String,
    pub price: f64,
    pub is_available: bool,
    pub description: String,
}

/// Request payload for overwriting every field of an existing book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub language: String,
    pub price: f64,
    pub is_available: bool,
    pub description: String,
}

impl Book {
    /// Combine a freshly assigned identifier with the submitted fields.
    pub fn from_create(id: String, request: CreateBook) -> Self {
        Self {
            id,
            title: request.title,
            author: request.author,
            publisher: request.publisher,
            language: request.language,
            price: request.price,
            is_available: request.is_available,
            description: request.description,
        }
    }

    /// Replace every field except the identifier.
    pub fn overwrite(&mut self, request: UpdateBook) {
        self.title = request.title;
        self.author = request.author;
        self.publisher = request.publisher;
        self.language = request.language;
        self.price = request.price;
        self.is_available = request.is_available;
        self.description = request.description;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn book_serializes_with_snake_case_fields() {
        let book = Book {
            id: "b1".to_string(),
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            publisher: "Secker & Warburg".to_string(),
            language: "English".to_string(),
            price: 8.99,
            is_available: true,
            description: String::new(),
        };

        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "id": "b1",
                "title": "1984",
                "author": "George Orwell",
                "publisher": "Secker & Warburg",
                "language": "English",
                "price": 8.99,
                "is_available": true,
                "description": ""
            })
        );
    }

    #[test]
    fn missing_request_fields_take_zero_values() {
        let request: CreateBook = serde_json::from_value(json!({"title": "Dune"})).unwrap();
        assert_eq!(
            request,
            CreateBook {
                title: "Dune".to_string(),
                ..CreateBook::default()
            }
        );
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let result = serde_json::from_value::<UpdateBook>(json!({"price": "cheap"}));
        assert!(result.is_err());
    }

    #[test]
    fn overwrite_keeps_identifier_and_replaces_the_rest() {
        let mut book = Book::from_create(
            "b1".to_string(),
            CreateBook {
                title: "Old".to_string(),
                description: "long blurb".to_string(),
                price: 10.0,
                ..CreateBook::default()
            },
        );

        book.overwrite(UpdateBook {
            title: "New".to_string(),
            ..UpdateBook::default()
        });

        assert_eq!(book.id, "b1");
        assert_eq!(book.title, "New");
        assert_eq!(book.description, "");
        assert_eq!(book.price, 0.0);
    }
}
