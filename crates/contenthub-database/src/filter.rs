//! Listing filters shared by the store backends.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use contenthub_core::types::SortDirection;

/// Restrict a category listing by parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParentFilter {
    /// No restriction.
    #[default]
    Any,
    /// Only root categories.
    Root,
    /// Only direct children of the given category.
    Children(Uuid),
}

impl ParentFilter {
    /// Parse the `parent` query value: `root`, a UUID, or empty.
    ///
    /// Returns `None` for a value that is neither.
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            None | Some("") => Some(Self::Any),
            Some("root") => Some(Self::Root),
            Some(raw) => Uuid::parse_str(raw).ok().map(Self::Children),
        }
    }

    /// Whether a row with this parent passes the filter.
    pub fn matches(&self, parent_id: Option<Uuid>) -> bool {
        match self {
            Self::Any => true,
            Self::Root => parent_id.is_none(),
            Self::Children(id) => parent_id == Some(*id),
        }
    }
}

/// Sort key for category and tag listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaxonomyOrder {
    /// By display name.
    Name,
    /// By creation time.
    CreatedAt,
    /// By `sort_order`.
    #[default]
    SortOrder,
}

impl TaxonomyOrder {
    /// Parse the `order_by` query value. Unknown keys fall back to
    /// `sort_order` ascending, so the direction is reported alongside.
    pub fn parse(value: Option<&str>, direction: SortDirection) -> (Self, SortDirection) {
        match value.map(str::trim) {
            Some("name") => (Self::Name, direction),
            Some("created_at") => (Self::CreatedAt, direction),
            Some("order") | None | Some("") => (Self::SortOrder, direction),
            Some(_) => (Self::SortOrder, SortDirection::Asc),
        }
    }

    /// The column this key sorts on.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::SortOrder => "sort_order",
        }
    }
}

/// Filter for the category admin listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// Case-insensitive substring over name, description, and slug.
    pub search: Option<String>,
    /// `Some(true)` for active only, `Some(false)` for inactive only.
    pub is_active: Option<bool>,
    /// Parent restriction.
    pub parent: ParentFilter,
    /// Sort key.
    pub order_by: TaxonomyOrder,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Filter for the tag admin listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagFilter {
    /// Case-insensitive substring over name, description, and slug.
    pub search: Option<String>,
    /// Active flag restriction.
    pub is_active: Option<bool>,
    /// Sort key.
    pub order_by: TaxonomyOrder,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Parse the `status` query value.
pub fn parse_status(value: Option<&str>) -> Option<bool> {
    match value.map(str::trim) {
        Some("active") => Some(true),
        Some("inactive") => Some(false),
        _ => None,
    }
}

/// Case-insensitive containment used by the in-memory backend.
pub(crate) fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Normalize a search term; blank input means no search.
pub(crate) fn search_term(search: &Option<String>) -> Option<&str> {
    search.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_filter_parse() {
        assert_eq!(ParentFilter::parse(None), Some(ParentFilter::Any));
        assert_eq!(ParentFilter::parse(Some("root")), Some(ParentFilter::Root));
        let id = Uuid::new_v4();
        assert_eq!(
            ParentFilter::parse(Some(&id.to_string())),
            Some(ParentFilter::Children(id))
        );
        assert_eq!(ParentFilter::parse(Some("nope")), None);
    }

    #[test]
    fn test_unknown_order_falls_back_to_sort_order_asc() {
        let (order, dir) = TaxonomyOrder::parse(Some("slug; DROP"), SortDirection::Desc);
        assert_eq!(order, TaxonomyOrder::SortOrder);
        assert_eq!(dir, SortDirection::Asc);
        let (order, dir) = TaxonomyOrder::parse(Some("name"), SortDirection::Desc);
        assert_eq!(order, TaxonomyOrder::Name);
        assert_eq!(dir, SortDirection::Desc);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(Some("active")), Some(true));
        assert_eq!(parse_status(Some("inactive")), Some(false));
        assert_eq!(parse_status(Some("all")), None);
    }
}
