//! Error types for sprout_core

use thiserror::Error;

/// Why required assets could not be loaded
///
/// The readiness gate never propagates this: it is logged and treated as
/// completion so a broken font or image cannot keep the app on its splash.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetLoadFailure {
    /// Asset file does not exist
    #[error("asset not found: {path}")]
    NotFound { path: String },

    /// Asset could not be read
    #[error("failed to read asset {path}: {message}")]
    Io { path: String, message: String },

    /// Asset was read but is not a valid font/image
    #[error("failed to decode asset {path}: {reason}")]
    Decode { path: String, reason: String },

    /// Generic failure reported by a loader
    #[error("asset loading failed: {0}")]
    Other(String),
}

impl AssetLoadFailure {
    /// Build a failure from an I/O error on `path`
    pub fn from_io(path: impl Into<String>, err: &std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => AssetLoadFailure::NotFound { path },
            _ => AssetLoadFailure::Io {
                path,
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(
            AssetLoadFailure::from_io("fonts/a.ttf", &err),
            AssetLoadFailure::NotFound {
                path: "fonts/a.ttf".to_string()
            }
        );

        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let failure = AssetLoadFailure::from_io("fonts/a.ttf", &err);
        assert!(matches!(failure, AssetLoadFailure::Io { .. }));
        assert!(failure.to_string().contains("fonts/a.ttf"));
    }
}
