//! Response envelopes
//!
//! Every resource response shares the fields in [`Object`]. List responses
//! additionally carry [`PageObject`] metadata. Resources compose these as a
//! flattened field rather than duplicating them.

use crate::types::{Id, ObjectType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Common fields of every resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// When the resource's data last changed
    #[serde(default)]
    pub data_updated_at: Option<DateTime<Utc>>,

    /// Resource identifier (absent on collections)
    #[serde(default)]
    pub id: Id,

    /// Resource kind discriminator
    #[serde(default, rename = "object")]
    pub object_type: Option<ObjectType>,

    /// Canonical URL of the resource
    #[serde(default)]
    pub url: String,

    /// `ETag` response header, usable as `If-None-Match` later
    #[serde(skip)]
    pub etag: Option<String>,

    /// `Last-Modified` response header, usable as `If-Modified-Since` later
    #[serde(skip)]
    pub last_modified: Option<DateTime<Utc>>,

    /// Set when the server answered 304 Not Modified
    #[serde(skip)]
    pub not_modified: bool,
}

/// Pagination links of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pages {
    /// Fully-qualified URL of the next page; absent on the last page
    #[serde(default)]
    pub next_url: Option<String>,

    /// Fully-qualified URL of the previous page
    #[serde(default)]
    pub previous_url: Option<String>,

    #[serde(default)]
    pub per_page: i64,
}

impl Pages {
    /// Next page URL, treating an empty string like an absent one
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Common fields of every list response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageObject {
    #[serde(flatten)]
    pub object: Object,

    /// Total number of resources matching the filters, across all pages
    #[serde(default)]
    pub total_count: i64,

    #[serde(default)]
    pub pages: Pages,
}

/// A single page of resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(flatten)]
    pub page: PageObject,

    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: PageObject::default(),
            data: Vec::new(),
        }
    }
}

/// A decode target that exposes the common envelope
///
/// The engine uses this to fill in conditional-fetch metadata and to check
/// the `object` discriminator against what the caller asked for.
pub trait ApiObject {
    /// The shared envelope
    fn object(&self) -> &Object;

    /// Mutable access to the shared envelope
    fn object_mut(&mut self) -> &mut Object;

    /// Object types this target accepts; empty accepts anything
    fn expected_object_types() -> &'static [ObjectType] {
        &[]
    }
}

impl ApiObject for Object {
    fn object(&self) -> &Object {
        self
    }

    fn object_mut(&mut self) -> &mut Object {
        self
    }
}

impl ApiObject for PageObject {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    fn expected_object_types() -> &'static [ObjectType] {
        &[ObjectType::Collection]
    }
}

impl<T> ApiObject for Page<T> {
    fn object(&self) -> &Object {
        &self.page.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.page.object
    }

    fn expected_object_types() -> &'static [ObjectType] {
        &[ObjectType::Collection]
    }
}
