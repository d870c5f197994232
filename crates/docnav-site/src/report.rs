//! Verification results.

use docnav_storage::StorageError;
use docnav_tree::ValidationError;

/// Site check error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Navigation does not match the content.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// A static asset referenced by the config is missing.
    #[error("Missing asset: {0}")]
    MissingAsset(String),
    /// Content could not be read.
    #[error("{0}")]
    Storage(#[from] StorageError),
}

/// Outcome of [`Site::verify`](crate::Site::verify).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Navigation entries whose content is missing, in document order.
    pub errors: Vec<ValidationError>,
    /// Content pages no navigation entry reaches, sorted by slug.
    pub orphans: Vec<String>,
    /// Logo path if the asset doesn't exist.
    pub missing_logo: Option<String>,
}

impl VerifyReport {
    /// Whether the navigation and assets fully match the content.
    ///
    /// Orphans do not count as failures.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && self.missing_logo.is_none()
    }

    /// Halt on the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first navigation error, or the missing logo.
    pub fn into_result(mut self) -> Result<Self, SiteError> {
        if !self.errors.is_empty() {
            return Err(SiteError::Validation(self.errors.swap_remove(0)));
        }
        if let Some(logo) = self.missing_logo.take() {
            return Err(SiteError::MissingAsset(logo));
        }
        Ok(self)
    }
}
