//! Builder for metadata records.

use crate::{DataCategory, DatasetMetadata};
use chrono::{DateTime, Utc};

/// Fluent builder for [`DatasetMetadata`].
///
/// `file_hash` and `size_bytes` are left empty; the content store fills them
/// in when the dataset is persisted.
///
/// # Example
///
/// ```rust
/// use market_core::{DataCategory, MetadataBuilder};
///
/// let metadata = MetadataBuilder::new("Census microdata", DataCategory::Survey)
///     .description("Anonymized 2022 census extract")
///     .license("ODbL-1.0")
///     .build();
/// ```
#[derive(Debug)]
pub struct MetadataBuilder {
    title: String,
    data_type: DataCategory,
    description: String,
    keywords: Vec<String>,
    authors: Vec<String>,
    creation_date: Option<DateTime<Utc>>,
    license: Option<String>,
    price_tokens: f64,
}

impl MetadataBuilder {
    /// Creates a new builder with the required fields.
    pub fn new(title: impl Into<String>, data_type: DataCategory) -> Self {
        Self {
            title: title.into(),
            data_type,
            description: String::new(),
            keywords: Vec::new(),
            authors: Vec::new(),
            creation_date: None,
            license: None,
            price_tokens: 0.0,
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a keyword.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Adds multiple keywords.
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords.extend(keywords);
        self
    }

    /// Adds an author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Adds multiple authors.
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.authors.extend(authors);
        self
    }

    /// Sets the creation timestamp; defaults to now.
    pub fn creation_date(mut self, when: DateTime<Utc>) -> Self {
        self.creation_date = Some(when);
        self
    }

    /// Sets the license string.
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Sets the asking price in tokens.
    pub fn price_tokens(mut self, price: f64) -> Self {
        self.price_tokens = price;
        self
    }

    /// Builds the metadata record.
    ///
    /// # Panics
    ///
    /// Panics if the license is not set or the price is negative.
    pub fn build(self) -> DatasetMetadata {
        assert!(
            self.price_tokens >= 0.0,
            "price_tokens must be non-negative"
        );
        DatasetMetadata {
            title: self.title,
            description: self.description,
            data_type: self.data_type,
            keywords: self.keywords,
            authors: self.authors,
            creation_date: self.creation_date.unwrap_or_else(Utc::now),
            license: self.license.expect("license is required"),
            file_hash: String::new(),
            size_bytes: 0,
            price_tokens: self.price_tokens,
        }
    }
}
