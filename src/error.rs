// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors reported by the wheel engine and its collaborators.
///
/// All of these are non-fatal: a failed operation is aborted and the
/// engine state is left exactly as it was before the call.
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid wheel definition (zero segments, unreadable file, bad TOML).
    Config(String),
    /// A spin request that cannot be honored (bad index, unknown label,
    /// non-positive speed).
    Spin(String),
    /// An image reference could not be decoded or read.
    Image(String),
    /// The audio device or stream could not be set up.
    Audio(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Spin(e) => write!(f, "Spin Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Audio(e) => write!(f, "Audio Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_config_error() {
        let err = Error::Config("no segments".to_string());
        assert_eq!(format!("{}", err), "Config Error: no segments");
    }

    #[test]
    fn display_formats_spin_error() {
        let err = Error::Spin("speed must be positive".into());
        assert_eq!(format!("{}", err), "Spin Error: speed must be positive");
    }

    #[test]
    fn from_io_error_produces_config_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Config(message) => assert!(message.contains("boom")),
            _ => panic!("expected Config variant"),
        }
    }

    #[test]
    fn from_toml_error_produces_config_variant() {
        let parse_err = toml::from_str::<toml::Value>("= not toml").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
