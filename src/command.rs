//! HD44780 instruction set
//!
//! Instructions are written with RS low, character data with RS high. Each
//! instruction byte is the base command ORed with its flag bits.
//!
//! ## Example
//!
//! ```rust,no_run
//! use synthmenu::{command, Interface, LcdInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let mut interface = Interface::new(MockPin, MockPin, MockPin, MockPin, MockPin, MockPin);
//! // Display on, cursor and blink off
//! let _ = interface.write_command(command::DISPLAY_CONTROL | command::DISPLAY_ON, &mut delay);
//!
//! // Move to the start of the second line
//! let _ = interface.write_command(command::SET_DDRAM_ADDR | 0x40, &mut delay);
//! ```

/// Clear display (0x01)
///
/// Fills DDRAM with spaces and returns the cursor home. Takes up to 1.52 ms.
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Return home (0x02)
///
/// Moves the cursor to the first position and undoes any shift.
pub const RETURN_HOME: u8 = 0x02;

/// Entry mode set (0x04)
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Entry mode flag: cursor moves right after each character
pub const ENTRY_LEFT: u8 = 0x02;

/// Entry mode flag: shift the display instead of the cursor
pub const ENTRY_SHIFT: u8 = 0x01;

/// Display on/off control (0x08)
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Display control flag: display on
pub const DISPLAY_ON: u8 = 0x04;

/// Display control flag: underline cursor visible
pub const CURSOR_ON: u8 = 0x02;

/// Display control flag: blinking block cursor
pub const BLINK_ON: u8 = 0x01;

/// Cursor or display shift (0x10)
pub const CURSOR_SHIFT: u8 = 0x10;

/// Function set (0x20)
///
/// Selects bus width, line count and font. Only valid during initialisation.
pub const FUNCTION_SET: u8 = 0x20;

/// Function set flag: 8-bit bus
pub const MODE_8BIT: u8 = 0x10;

/// Function set flag: two (or four) line display
pub const LINES_2: u8 = 0x08;

/// Function set flag: 5x10 dot font
pub const DOTS_5X10: u8 = 0x04;

/// Set CGRAM address (0x40), ORed with a 6-bit address
pub const SET_CGRAM_ADDR: u8 = 0x40;

/// Set DDRAM address (0x80), ORed with a 7-bit address
pub const SET_DDRAM_ADDR: u8 = 0x80;

/// DDRAM address of the second line
pub const LINE_2_OFFSET: u8 = 0x40;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_fit_their_command() {
        assert_eq!(ENTRY_MODE_SET | ENTRY_LEFT | ENTRY_SHIFT, 0x07);
        assert_eq!(DISPLAY_CONTROL | DISPLAY_ON | CURSOR_ON | BLINK_ON, 0x0F);
        assert_eq!(FUNCTION_SET | MODE_8BIT | LINES_2 | DOTS_5X10, 0x3C);
    }
}
