//! Character display configuration types and builder

pub use crate::error::BuilderError;
use crate::command;

/// Fewest characters per line supported
pub const MIN_COLUMNS: u8 = 8;
/// Most characters per line supported by a single controller
pub const MAX_COLUMNS: u8 = 40;
/// Fewest lines: the menu needs a heading line and a value line
pub const MIN_LINES: u8 = 2;
/// Most lines supported
pub const MAX_LINES: u8 = 4;

/// Character display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Characters per line
    pub columns: u8,
    /// Number of lines
    pub lines: u8,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - columns is outside `MIN_COLUMNS..=MAX_COLUMNS`
    /// - lines is outside `MIN_LINES..=MAX_LINES`
    pub fn new(columns: u8, lines: u8) -> Result<Self, BuilderError> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns)
            || !(MIN_LINES..=MAX_LINES).contains(&lines)
        {
            return Err(BuilderError::InvalidDimensions { columns, lines });
        }
        Ok(Self { columns, lines })
    }

    /// Width of the group title on the heading line
    ///
    /// A quarter of the line minus the `:` separator.
    pub fn group_width(&self) -> usize {
        usize::from(self.columns / 4).saturating_sub(1)
    }

    /// Width of the item title on the heading line
    pub fn item_width(&self) -> usize {
        usize::from(self.columns) - self.group_width() - 1
    }

    /// DDRAM address of the first character of `line`
    ///
    /// Lines 3 and 4 continue lines 1 and 2 in DDRAM.
    pub fn row_offset(&self, line: u8) -> Option<u8> {
        match line {
            0 => Some(0),
            1 => Some(command::LINE_2_OFFSET),
            2 => Some(self.columns),
            3 => Some(command::LINE_2_OFFSET + self.columns),
            _ => None,
        }
        .filter(|_| line < self.lines)
    }
}

/// Character display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Show the underline cursor
    pub cursor: bool,
    /// Blink the cursor position
    pub blink: bool,
    /// Use the 5x10 dot font (single line panels only)
    pub tall_font: bool,
}

impl Config {
    /// Function set instruction for a 4-bit bus
    pub fn function_set(&self) -> u8 {
        let mut function = command::FUNCTION_SET;
        if self.dimensions.lines > 1 {
            function |= command::LINES_2;
        }
        if self.tall_font {
            function |= command::DOTS_5X10;
        }
        function
    }

    /// Display control instruction with the display on or off
    pub fn display_control(&self, on: bool) -> u8 {
        let mut control = command::DISPLAY_CONTROL;
        if on {
            control |= command::DISPLAY_ON;
        }
        if self.cursor {
            control |= command::CURSOR_ON;
        }
        if self.blink {
            control |= command::BLINK_ON;
        }
        control
    }
}

/// Builder for constructing character display configuration
///
/// # Example
///
/// ```rust
/// use synthmenu::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(16, 2) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert!(!config.cursor);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    cursor: bool,
    blink: bool,
    tall_font: bool,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Show the underline cursor
    pub fn cursor(mut self, cursor: bool) -> Self {
        self.cursor = cursor;
        self
    }

    /// Blink the cursor position
    pub fn blink(mut self, blink: bool) -> Self {
        self.blink = blink;
        self
    }

    /// Use the 5x10 dot font
    pub fn tall_font(mut self, tall_font: bool) -> Self {
        self.tall_font = tall_font;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            cursor: self.cursor,
            blink: self.blink,
            tall_font: self.tall_font,
        })
    }
}
