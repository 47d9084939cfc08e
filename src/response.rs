//! Listing and error envelopes.
//!
//! Both codecs read and write these next to single resources: a query result
//! is a [`Resources`] listing and a failed request carries one or more
//! [`ScimErrorResponse`]s.

use std::fmt;

/// A page of resources returned by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Resources<T> {
    items: Vec<T>,
    total_results: u64,
    items_per_page: u64,
    start_index: u64,
}

impl<T> Resources<T> {
    /// A complete listing: every item on one page starting at index 1.
    pub fn new(items: Vec<T>) -> Self {
        let count = items.len() as u64;
        Self {
            items,
            total_results: count,
            items_per_page: count,
            start_index: 1,
        }
    }

    /// One page of a larger result set.
    pub fn with_paging(items: Vec<T>, total_results: u64, start_index: u64) -> Self {
        let items_per_page = items.len() as u64;
        Self {
            items,
            total_results,
            items_per_page,
            start_index,
        }
    }

    pub fn set_items_per_page(&mut self, items_per_page: u64) {
        self.items_per_page = items_per_page;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    /// 1-based index of the first item of this page.
    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Resources<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Classification of an error response by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidResource,
    UnsupportedOperation,
    ResourceNotFound,
    ResourceConflict,
    ServerError,
    Other,
}

/// One entry of an `Errors` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScimErrorResponse {
    pub code: u16,
    pub description: Option<String>,
}

impl ScimErrorResponse {
    pub fn new(code: u16, description: Option<String>) -> Self {
        Self { code, description }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.code {
            400 => ErrorKind::InvalidResource,
            403 => ErrorKind::UnsupportedOperation,
            404 => ErrorKind::ResourceNotFound,
            409 => ErrorKind::ResourceConflict,
            500 => ErrorKind::ServerError,
            _ => ErrorKind::Other,
        }
    }
}

impl fmt::Display for ScimErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{} {}", self.code, description),
            None => write!(f, "{}", self.code),
        }
    }
}
