//! Project and image addressing rules.
//!
//! Images have no identity of their own: outside the store they are reached
//! only through their parent's id and their position in the parent's image
//! sequence. [`ImageIndex`] is the single way to turn a raw path segment into
//! such a position and to resolve it against a slice.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Content type served when an image was stored without one.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Public address used when no deployment-specific base URL is configured.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://eyob-portfolio-backend.vercel.app";

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Parse a project id taken verbatim from a request path.
///
/// A malformed id is not a lookup miss: it surfaces as an internal error,
/// the same way any other unexpected store failure does.
pub fn parse_project_id(raw: &str) -> Result<DbId, CoreError> {
    raw.parse::<DbId>()
        .map_err(|_| CoreError::Internal(format!("Invalid project id \"{raw}\"")))
}

/// Zero-based position of an image within its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageIndex(usize);

impl ImageIndex {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    /// Parse a raw path segment into an index.
    ///
    /// Only canonical decimal integers address an image: `"0"`, `"7"`, `"12"`.
    /// Signs, whitespace, leading zeros and anything non-numeric address
    /// nothing and yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && (raw == "0" || !raw.starts_with('0'));
        if !canonical {
            return None;
        }
        raw.parse().ok().map(Self)
    }

    pub fn position(self) -> usize {
        self.0
    }

    /// Resolve the index against an ordered image sequence.
    pub fn get<T>(self, images: &[T]) -> Option<&T> {
        images.get(self.0)
    }
}

impl std::fmt::Display for ImageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Response framing
// ---------------------------------------------------------------------------

/// Publicly dereferenceable URL of one project image.
///
/// A trailing slash on `base_url` is ignored so `https://host/` and
/// `https://host` produce the same URL.
pub fn image_url(base_url: &str, project_id: DbId, index: ImageIndex) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/api/projects/{project_id}/images/{index}")
}

/// The stored content type, or [`DEFAULT_IMAGE_CONTENT_TYPE`] when absent
/// or empty.
pub fn content_type_or_default(content_type: Option<&str>) -> &str {
    content_type
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
}

/// `Content-Disposition` value for serving an image inline.
pub fn inline_disposition(filename: &str) -> String {
    format!("inline; filename=\"{filename}\"")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
