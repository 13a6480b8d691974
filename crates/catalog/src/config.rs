//! Catalog configuration (environment-driven).

/// Default directory prefix for product image uploads.
pub const DEFAULT_UPLOAD_PREFIX: &str = "products";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Leading path segment for uploaded product images.
    pub upload_prefix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            upload_prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Read `RENTSHOP_UPLOAD_PREFIX`, falling back to [`DEFAULT_UPLOAD_PREFIX`].
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`CatalogConfig::from_env`] with an explicit variable source.
    ///
    /// Surrounding whitespace and slashes are stripped; a value that is empty
    /// afterwards counts as unset.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let upload_prefix = var("RENTSHOP_UPLOAD_PREFIX")
            .map(|v| v.trim().trim_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                tracing::debug!("RENTSHOP_UPLOAD_PREFIX not set; using {DEFAULT_UPLOAD_PREFIX}");
                DEFAULT_UPLOAD_PREFIX.to_string()
            });

        Self { upload_prefix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(value: Option<&str>) -> impl Fn(&str) -> Option<String> {
        let value = value.map(str::to_string);
        move |key: &str| {
            assert_eq!(key, "RENTSHOP_UPLOAD_PREFIX");
            value.clone()
        }
    }

    #[test]
    fn unset_prefix_uses_default() {
        assert_eq!(CatalogConfig::from_vars(vars(None)), CatalogConfig::default());
    }

    #[test]
    fn prefix_is_trimmed() {
        let config = CatalogConfig::from_vars(vars(Some("  /media/listings/ ")));
        assert_eq!(config.upload_prefix, "media/listings");
    }

    #[test]
    fn blank_prefix_falls_back_to_default() {
        for blank in ["", "   ", "/", " // "] {
            let config = CatalogConfig::from_vars(vars(Some(blank)));
            assert_eq!(config.upload_prefix, DEFAULT_UPLOAD_PREFIX, "{blank:?}");
        }
    }

    #[test]
    fn from_env_always_yields_a_usable_prefix() {
        let config = CatalogConfig::from_env();
        assert!(!config.upload_prefix.is_empty());
        assert!(!config.upload_prefix.starts_with('/'));
    }
}
