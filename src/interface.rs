//! Hardware interface abstraction
//!
//! This module provides the [`LcdInterface`] trait and the [`Interface`] struct
//! for talking to an HD44780-compatible controller over its 4-bit parallel bus.
//!
//! ## Hardware Requirements
//!
//! The 4-bit bus needs 6 GPIO outputs:
//! - **RS**: Register select (low = instruction, high = character data)
//! - **EN**: Enable strobe, data is latched on the falling edge
//! - **D4..D7**: Upper data lines
//!
//! RW is expected to be tied to ground; the busy flag is never read, fixed
//! delays are used instead.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use synthmenu::{Interface, LcdInterface};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // Create interface with RS, EN and D4..D7
//! let mut interface = Interface::new(MockPin, MockPin, MockPin, MockPin, MockPin, MockPin);
//!
//! // Switch the controller to 4-bit mode
//! let _ = interface.initialize(&mut delay);
//!
//! // Write a character
//! let _ = interface.write_data(b'A', &mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the hardware interface to an HD44780 controller
///
/// This trait abstracts over different bus implementations, allowing the
/// [`CharacterDisplay`](crate::display::CharacterDisplay) to work with the
/// provided 4-bit GPIO [`Interface`] or with a custom one (I2C backpack,
/// shift register).
pub trait LcdInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Bring the controller into a known bus mode after power up
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Write an instruction byte (RS low)
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn write_command<D: DelayNs>(
        &mut self,
        command: u8,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error>;

    /// Write a character byte (RS high)
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    fn write_data<D: DelayNs>(&mut self, data: u8, delay: &mut D)
    -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Settling time after a command or character, in microseconds
pub const DEFAULT_COMMAND_DELAY_US: u32 = 100;

/// 4-bit parallel interface implementation
///
/// Implements [`LcdInterface`] for embedded-hal v1.0 output pins.
///
/// ## Type Parameters
///
/// * `RS` - Register select pin implementing [`OutputPin`]
/// * `EN` - Enable pin implementing [`OutputPin`]
/// * `D4`..`D7` - Data pins implementing [`OutputPin`]
#[derive(Debug)]
pub struct Interface<RS, EN, D4, D5, D6, D7> {
    rs: RS,
    en: EN,
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
    /// Settling time after each byte in microseconds
    command_delay_us: u32,
}

impl<RS, EN, D4, D5, D6, D7, PinErr> Interface<RS, EN, D4, D5, D6, D7>
where
    RS: OutputPin<Error = PinErr>,
    EN: OutputPin<Error = PinErr>,
    D4: OutputPin<Error = PinErr>,
    D5: OutputPin<Error = PinErr>,
    D6: OutputPin<Error = PinErr>,
    D7: OutputPin<Error = PinErr>,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `rs` - Register select pin
    /// * `en` - Enable pin
    /// * `d4`..`d7` - Upper four data lines
    pub fn new(rs: RS, en: EN, d4: D4, d5: D5, d6: D6, d7: D7) -> Self {
        Self {
            rs,
            en,
            d4,
            d5,
            d6,
            d7,
            command_delay_us: DEFAULT_COMMAND_DELAY_US,
        }
    }

    /// Set the settling time after each byte in microseconds
    ///
    /// Default is 100 µs. Slow clones of the controller may need more.
    pub fn set_command_delay(&mut self, delay_us: u32) -> &mut Self {
        self.command_delay_us = delay_us;
        self
    }

    /// Get the settling time after each byte in microseconds
    pub fn command_delay(&self) -> u32 {
        self.command_delay_us
    }

    /// Give the pins back
    pub fn release(self) -> (RS, EN, D4, D5, D6, D7) {
        (self.rs, self.en, self.d4, self.d5, self.d6, self.d7)
    }

    fn pulse_enable<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), PinErr> {
        self.en.set_low()?;
        delay.delay_us(1);
        self.en.set_high()?;
        delay.delay_us(1);
        self.en.set_low()?;
        delay.delay_us(self.command_delay_us);
        Ok(())
    }

    fn write_nibble<D: DelayNs>(&mut self, nibble: u8, delay: &mut D) -> InterfaceResult<(), PinErr> {
        self.d4.set_state(PinState::from(nibble & 0x01 != 0))?;
        self.d5.set_state(PinState::from(nibble & 0x02 != 0))?;
        self.d6.set_state(PinState::from(nibble & 0x04 != 0))?;
        self.d7.set_state(PinState::from(nibble & 0x08 != 0))?;
        self.pulse_enable(delay)
    }

    fn write_byte<D: DelayNs>(
        &mut self,
        value: u8,
        data: bool,
        delay: &mut D,
    ) -> InterfaceResult<(), PinErr> {
        self.rs.set_state(PinState::from(data))?;
        self.write_nibble(value >> 4, delay)?;
        self.write_nibble(value & 0x0F, delay)
    }
}

impl<RS, EN, D4, D5, D6, D7, PinErr> LcdInterface for Interface<RS, EN, D4, D5, D6, D7>
where
    RS: OutputPin<Error = PinErr>,
    EN: OutputPin<Error = PinErr>,
    D4: OutputPin<Error = PinErr>,
    D5: OutputPin<Error = PinErr>,
    D6: OutputPin<Error = PinErr>,
    D7: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        // Power-on wait, then the 8-bit reset sequence ending in 4-bit mode
        delay.delay_ms(50);
        self.rs.set_low().map_err(InterfaceError::Pin)?;
        self.en.set_low().map_err(InterfaceError::Pin)?;
        self.write_nibble(0x03, delay).map_err(InterfaceError::Pin)?;
        delay.delay_us(4_500);
        self.write_nibble(0x03, delay).map_err(InterfaceError::Pin)?;
        delay.delay_us(4_500);
        self.write_nibble(0x03, delay).map_err(InterfaceError::Pin)?;
        delay.delay_us(150);
        self.write_nibble(0x02, delay).map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn write_command<D: DelayNs>(
        &mut self,
        command: u8,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        self.write_byte(command, false, delay)
            .map_err(InterfaceError::Pin)
    }

    fn write_data<D: DelayNs>(
        &mut self,
        data: u8,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        self.write_byte(data, true, delay).map_err(InterfaceError::Pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::convert::Infallible;

    /// Pin levels, plus RS and D4..D7 latched on every falling edge of EN
    #[derive(Default)]
    struct Bus {
        levels: [bool; 6],
        latched: Vec<(bool, u8)>,
    }

    struct MockPin {
        bus: Rc<RefCell<Bus>>,
        line: usize,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let mut bus = self.bus.borrow_mut();
            if self.line == 1 && bus.levels[1] {
                let nibble = (2..6)
                    .filter(|&line| bus.levels[line])
                    .fold(0u8, |acc, line| acc | 1 << (line - 2));
                let rs = bus.levels[0];
                bus.latched.push((rs, nibble));
            }
            bus.levels[self.line] = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.bus.borrow_mut().levels[self.line] = true;
            Ok(())
        }
    }

    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn interface() -> (
        Interface<MockPin, MockPin, MockPin, MockPin, MockPin, MockPin>,
        Rc<RefCell<Bus>>,
    ) {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let pin = |line| MockPin {
            bus: Rc::clone(&bus),
            line,
        };
        let interface = Interface::new(pin(0), pin(1), pin(2), pin(3), pin(4), pin(5));
        (interface, bus)
    }

    fn latched(bus: &Rc<RefCell<Bus>>) -> Vec<(bool, u8)> {
        bus.borrow().latched.clone()
    }

    #[test]
    fn test_default_command_delay() {
        let (mut interface, _) = interface();
        assert_eq!(interface.command_delay(), DEFAULT_COMMAND_DELAY_US);
        interface.set_command_delay(200);
        assert_eq!(interface.command_delay(), 200);
    }

    #[test]
    fn test_initialize_sequence() {
        let (mut interface, bus) = interface();
        let mut delay = MockDelay { total_ns: 0 };
        interface.initialize(&mut delay).unwrap();
        assert_eq!(
            latched(&bus),
            alloc::vec![(false, 0x03), (false, 0x03), (false, 0x03), (false, 0x02)]
        );
        assert!(delay.total_ns >= 59_000_000);
    }

    #[test]
    fn test_bytes_are_sent_high_nibble_first() {
        let (mut interface, bus) = interface();
        let mut delay = MockDelay { total_ns: 0 };
        interface.write_command(0x28, &mut delay).unwrap();
        interface.write_data(b'A', &mut delay).unwrap();
        assert_eq!(
            latched(&bus),
            alloc::vec![(false, 0x2), (false, 0x8), (true, 0x4), (true, 0x1)]
        );
    }
}
