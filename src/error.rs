//! Error types for the menu system
//!
//! This module defines error types for construction and validation
//! ([`BuilderError`]), character display operations ([`Error`]) and saving or
//! loading menu state ([`PersistError`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors while building configuration, numbers and lists
//! - [`Error`] - Runtime errors during character display operations
//! - [`PersistError`] - Errors while saving or loading menu state
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level GPIO errors
//!
//! ## Example
//!
//! ```
//! use synthmenu::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // A single line can't show a menu
//! let result = Dimensions::new(16, 1);
//! assert!(result.is_err());
//! ```

use crate::interface::LcdInterface;

/// Errors that can occur when driving a character display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: LcdInterface> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`LcdInterface`] implementation.
    Interface(I::Error),
    /// Cursor position outside the display
    InvalidPosition {
        /// Requested column
        column: u8,
        /// Requested line
        line: u8,
    },
}

impl<I: LcdInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidPosition { column, line } => {
                write!(f, "Invalid cursor position: column {column}, line {line}")
            }
        }
    }
}

impl<I: LcdInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration or items
///
/// These errors occur before anything is drawn.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid character display dimensions
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Characters per line requested
        columns: u8,
        /// Number of lines requested
        lines: u8,
    },
    /// Graphic display too short to show a title and two items
    TooFewLines {
        /// Number of item lines that would fit
        lines: u32,
    },
    /// Graphic display too narrow for a row and the scrollbar
    TooNarrow {
        /// Width of the display in pixels
        width: u32,
    },
    /// Number range is empty or not finite
    InvalidRange {
        /// Lower bound requested
        minimum: f32,
        /// Upper bound requested
        maximum: f32,
    },
    /// Step is zero, negative or not finite
    InvalidStep {
        /// Step requested
        step: f32,
    },
    /// Smoothing exponent of zero
    InvalidSmoothing,
    /// List without entries
    EmptyList,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { columns, lines } => write!(
                f,
                "Invalid dimensions {columns}x{lines} (columns {}..={}, lines {}..={})",
                crate::config::MIN_COLUMNS,
                crate::config::MAX_COLUMNS,
                crate::config::MIN_LINES,
                crate::config::MAX_LINES,
            ),
            Self::TooFewLines { lines } => {
                write!(f, "Display fits {lines} item lines, at least 2 are required")
            }
            Self::TooNarrow { width } => {
                write!(f, "Display is {width} pixels wide, too narrow for menu rows")
            }
            Self::InvalidRange { minimum, maximum } => {
                write!(f, "Invalid range: minimum {minimum}, maximum {maximum}")
            }
            Self::InvalidStep { step } => write!(f, "Invalid step: {step}"),
            Self::InvalidSmoothing => write!(f, "Smoothing exponent must be at least 1"),
            Self::EmptyList => write!(f, "List must have at least one entry"),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors that can occur when saving or loading menu state
#[derive(Debug)]
pub enum PersistError {
    /// File path without a `.json` extension
    InvalidExtension,
    /// Nothing to save
    Empty,
    /// JSON document that is not an object
    NotAnObject,
    /// Malformed JSON or serialization failure
    Json(serde_json::Error),
    /// File system error
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl core::fmt::Display for PersistError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidExtension => write!(f, "File path must have a .json extension"),
            Self::Empty => write!(f, "Menu has no data to save"),
            Self::NotAnObject => write!(f, "Menu data must be a JSON object"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            #[cfg(feature = "std")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl core::error::Error for PersistError {}

impl From<serde_json::Error> for PersistError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PersistError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}
