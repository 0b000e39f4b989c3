//! Page Data Structures
//!
//! This module defines the `Page` record and the input types used to create and
//! partially update it.
//!
//! # Architecture
//!
//! - **Store-assigned IDs**: `id` is a sequential integer assigned by the store on
//!   creation and never changes afterwards
//! - **Forest hierarchy**: `parent_id` optionally points at another page; it is not
//!   validated, so dangling references are legal
//! - **Explicit defaults**: omitted optional fields are filled from [`PageDefaults`]
//!   at creation time. An empty string is a value, not an omission.
//!
//! # Examples
//!
//! ```rust
//! use pagedeck_core::models::{NewPage, PageDefaults};
//!
//! let page = NewPage::new("Projects")
//!     .with_parent(1)
//!     .with_agent("assistant")
//!     .into_page(7, &PageDefaults::default());
//!
//! assert_eq!(page.id, 7);
//! assert_eq!(page.parent_id, Some(1));
//! assert_eq!(page.status, "active");
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned to a page by its store
pub type PageId = u64;

/// A node in the (possibly forest-shaped) page hierarchy.
///
/// # Fields
///
/// - `id`: Unique, store-assigned, immutable after creation
/// - `title`: Display label
/// - `parent_id`: Optional reference to another page (`None` means this page is a root)
/// - `agent`: Tag naming the automation agent associated with the page
/// - `idb` / `turso`: String-valued flags ("enabled" / "disabled"), not validated
/// - `status`: Lifecycle label ("active", "draft", "inactive", ...), not validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,

    pub title: String,

    /// Parent page ID (serialized as `parentid`, `parentId` accepted on input)
    #[serde(rename = "parentid", alias = "parentId", default)]
    pub parent_id: Option<PageId>,

    pub agent: String,

    pub idb: String,

    pub turso: String,

    pub status: String,
}

impl Page {
    /// Check if this page is a root (has no parent reference)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Fallback values applied to optional page fields that were omitted on creation.
///
/// Exactly four fields have defaults; `title` is required and `parent_id`
/// defaults to "no parent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDefaults {
    pub agent: String,
    pub idb: String,
    pub turso: String,
    pub status: String,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            agent: "default".to_string(),
            idb: "disabled".to_string(),
            turso: "disabled".to_string(),
            status: "active".to_string(),
        }
    }
}

/// Fields for creating a page (everything except `id`).
///
/// `None` means "omitted" and is replaced by the matching [`PageDefaults`] value.
/// `Some(String::new())` is kept as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPage {
    pub title: String,

    #[serde(rename = "parentid", alias = "parentId", default)]
    pub parent_id: Option<PageId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idb: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turso: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl NewPage {
    /// Create a root page input with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent_id: PageId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    pub fn with_idb(mut self, idb: impl Into<String>) -> Self {
        self.idb = Some(idb.into());
        self
    }

    pub fn with_turso(mut self, turso: impl Into<String>) -> Self {
        self.turso = Some(turso.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Materialize the page under `id`, filling omitted fields from `defaults`
    pub fn into_page(self, id: PageId, defaults: &PageDefaults) -> Page {
        Page {
            id,
            title: self.title,
            parent_id: self.parent_id,
            agent: self.agent.unwrap_or_else(|| defaults.agent.clone()),
            idb: self.idb.unwrap_or_else(|| defaults.idb.clone()),
            turso: self.turso.unwrap_or_else(|| defaults.turso.clone()),
            status: self.status.unwrap_or_else(|| defaults.status.clone()),
        }
    }
}

/// Custom deserializer for `Option<Option<T>>` fields
///
/// Distinguishes an absent field (handled by `#[serde(default)]`) from an explicit
/// `null`, which becomes `Some(None)`.
fn deserialize_optional_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Partial page update (shallow merge)
///
/// Only provided fields are changed; everything else is preserved verbatim.
///
/// # Double-Option Pattern for `parent_id`
///
/// - `None`: Don't change parent_id
/// - `Some(None)`: Clear parent_id (page becomes a root)
/// - `Some(Some(id))`: Point parent_id at `id`
///
/// # Examples
///
/// ```rust
/// use pagedeck_core::models::PageUpdate;
///
/// let update = PageUpdate::new().with_status("archived");
/// assert!(!update.is_empty());
/// assert!(update.title.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        rename = "parentid",
        alias = "parentId",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub parent_id: Option<Option<PageId>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idb: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turso: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PageUpdate {
    /// Create a new empty PageUpdate
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Reparent (`Some(id)`) or detach into a root (`None`)
    pub fn with_parent(mut self, parent_id: Option<PageId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    pub fn with_idb(mut self, idb: impl Into<String>) -> Self {
        self.idb = Some(idb.into());
        self
    }

    pub fn with_turso(mut self, turso: impl Into<String>) -> Self {
        self.turso = Some(turso.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Check if update contains any changes
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.parent_id.is_none()
            && self.agent.is_none()
            && self.idb.is_none()
            && self.turso.is_none()
            && self.status.is_none()
    }

    /// Merge the supplied fields over `page`. The page `id` is never touched.
    pub fn apply_to(&self, page: &mut Page) {
        if let Some(title) = &self.title {
            page.title = title.clone();
        }
        if let Some(parent_id) = self.parent_id {
            page.parent_id = parent_id;
        }
        if let Some(agent) = &self.agent {
            page.agent = agent.clone();
        }
        if let Some(idb) = &self.idb {
            page.idb = idb.clone();
        }
        if let Some(turso) = &self.turso {
            page.turso = turso.clone();
        }
        if let Some(status) = &self.status {
            page.status = status.clone();
        }
    }
}

/// Development seed data: five pages forming two root trees
pub fn sample_pages() -> Vec<Page> {
    let page = |id, title: &str, parent_id, agent: &str, idb: &str, turso: &str, status: &str| {
        Page {
            id,
            title: title.to_string(),
            parent_id,
            agent: agent.to_string(),
            idb: idb.to_string(),
            turso: turso.to_string(),
            status: status.to_string(),
        }
    };

    vec![
        page(1, "Home Page", None, "default", "enabled", "disabled", "active"),
        page(2, "Projects", Some(1), "assistant", "enabled", "enabled", "active"),
        page(3, "Notes", Some(1), "default", "disabled", "enabled", "draft"),
        page(4, "Tasks", Some(1), "coder", "enabled", "disabled", "active"),
        page(5, "Archive", None, "default", "disabled", "disabled", "inactive"),
    ]
}
