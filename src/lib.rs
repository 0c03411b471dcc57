//! Synthesizer-style parameter menus for embedded displays
//!
//! A menu library for small devices, built around a tree of items (numbers,
//! switches, lists, text, waveforms, envelopes) that is navigated with a few
//! buttons or a touch wheel and rendered on a character LCD or a pixel display.
//!
//! ## Features
//!
//! - `no_std` compatible (needs `alloc`)
//! - `embedded-hal` v1.0 support for HD44780 character LCDs and push buttons
//! - `embedded-graphics` renderer for OLEDs such as the SSD1306 (with `graphics` feature)
//! - Preset groups for envelopes, LFOs, filters, waveforms and patches
//! - JSON persistence of every value, to a string or (with `std`) a file
//!
//! ## Usage
//!
//! ```rust
//! use synthmenu::{Group, Input, Item, Menu, Number};
//!
//! let detune = match Number::builder("Detune").step(0.5).build() {
//!     Ok(number) => number,
//!     Err(_) => return,
//! };
//! let mut menu = Menu::new("Synth", [
//!     Item::from(Group::new("Osc", [Item::from(detune)])),
//!     Item::from(Group::mix("Mix")),
//! ]);
//!
//! // Enter "Osc", then "Detune", then step the value up
//! assert!(menu.handle(Input::Select));
//! assert!(menu.handle(Input::Select));
//! assert!(menu.handle(Input::Next));
//! assert_eq!(menu.selected().label(), "0.5");
//!
//! // Leave the value and the group again
//! menu.handle(Input::Back);
//! menu.handle(Input::Back);
//! assert!(menu.is_root());
//! ```
//!
//! Every operation returns `true` when something visible changed; redraw with
//! [`CharacterDisplay::draw`] or `GraphicMenu::draw` at that point.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// HD44780 command definitions
pub mod command;
/// Character display configuration types and builder
pub mod config;
/// Persisted menu state
pub mod data;
/// Character display operations
pub mod display;
/// Error types for the crate
pub mod error;
/// Button and control inputs
pub mod input;
/// Hardware interface abstraction
pub mod interface;
/// Menu items
pub mod item;
/// Menu navigation and persistence
pub mod menu;
/// Capacitive touch wheel input
pub mod touch;

/// Colour schemes for the graphic renderer (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod theme;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{Builder, Config, Dimensions, MAX_COLUMNS, MAX_LINES, MIN_COLUMNS, MIN_LINES};
pub use data::Data;
pub use display::{CharacterDisplay, compose_lines};
pub use error::{BuilderError, Error, PersistError};
pub use input::{Button, ButtonPad, DEFAULT_DEBOUNCE_MS, Input};
pub use interface::InterfaceError;
pub use interface::{DEFAULT_COMMAND_DELAY_US, Interface, LcdInterface};
pub use item::{
    Action, ActionHandler, Bool, CHARACTERS, Char, Group, GroupKind, Item, List, Number,
    NumberBuilder, Selection, Shape, Title, UpdateHandler, Value, WaveformList,
};
pub use menu::Menu;
pub use touch::{Direction, PAD_COUNT, PadReading, TouchWheel, TouchWheelRotary, WheelEvent};

#[cfg(feature = "graphics")]
pub use graphics::GraphicMenu;
#[cfg(feature = "graphics")]
pub use theme::Theme;
