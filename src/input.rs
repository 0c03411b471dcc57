//! Control inputs
//!
//! [`Input`] is what a [`Menu`](crate::Menu) understands. [`Button`] debounces
//! a single push button and [`ButtonPad`] turns four of them into inputs.
//!
//! Time is passed in by the caller as a millisecond counter, so the debouncer
//! works with any timer (SysTick, RTC, `Instant` on a host).
//!
//! ## Example
//!
//! ```
//! use synthmenu::{Button, Input};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::InputPin;
//! # struct Pin(bool);
//! # impl embedded_hal::digital::ErrorType for Pin { type Error = Infallible; }
//! # impl InputPin for Pin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(self.0) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(!self.0) }
//! # }
//! let mut button = Button::new(Pin(false));
//! let _ = button.update(0);
//! let _ = button.update(20);
//! assert!(button.fell());
//! assert!(button.pressed());
//! ```

use alloc::vec::Vec;

use embedded_hal::digital::InputPin;

/// Control input understood by [`Menu::handle`](crate::Menu::handle)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Previous entry, or step down on a value
    Previous,
    /// Next entry, or step up on a value
    Next,
    /// Enter the current entry
    Select,
    /// Go back one level
    Back,
    /// Step the selected value up
    Increment,
    /// Step the selected value down
    Decrement,
}

/// Default time a level must be stable before it is reported
pub const DEFAULT_DEBOUNCE_MS: u32 = 10;

/// Debounced push button
///
/// The pin is expected to idle high (pull-up, button to ground), so a press
/// is a falling edge.
#[derive(Debug)]
pub struct Button<P> {
    pin: P,
    interval_ms: u32,
    state: bool,
    raw: bool,
    changed_at: u32,
    fell: bool,
    rose: bool,
}

impl<P: InputPin> Button<P> {
    /// Button with the default 10 ms debounce interval
    pub fn new(pin: P) -> Self {
        Self::with_interval(pin, DEFAULT_DEBOUNCE_MS)
    }

    /// Button with a custom debounce interval
    pub fn with_interval(pin: P, interval_ms: u32) -> Self {
        Self {
            pin,
            interval_ms,
            state: true,
            raw: true,
            changed_at: 0,
            fell: false,
            rose: false,
        }
    }

    /// Sample the pin
    ///
    /// Call regularly; edges are reported until the next call.
    ///
    /// # Errors
    ///
    /// Returns the pin error if the pin can't be read.
    pub fn update(&mut self, now_ms: u32) -> Result<(), P::Error> {
        let raw = self.pin.is_high()?;
        self.fell = false;
        self.rose = false;
        if raw != self.raw {
            self.raw = raw;
            self.changed_at = now_ms;
        } else if raw != self.state && now_ms.wrapping_sub(self.changed_at) >= self.interval_ms {
            self.state = raw;
            self.fell = !raw;
            self.rose = raw;
        }
        Ok(())
    }

    /// Stable level went from high to low on the last update
    pub fn fell(&self) -> bool {
        self.fell
    }

    /// Stable level went from low to high on the last update
    pub fn rose(&self) -> bool {
        self.rose
    }

    /// Stable level
    pub fn value(&self) -> bool {
        self.state
    }

    /// Whether the button is held down
    pub fn pressed(&self) -> bool {
        !self.state
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

/// Four buttons mapped to menu inputs
#[derive(Debug)]
pub struct ButtonPad<P> {
    previous: Button<P>,
    next: Button<P>,
    select: Button<P>,
    back: Button<P>,
}

impl<P: InputPin> ButtonPad<P> {
    /// Pad from four pins, debounced with the default interval
    pub fn new(previous: P, next: P, select: P, back: P) -> Self {
        Self {
            previous: Button::new(previous),
            next: Button::new(next),
            select: Button::new(select),
            back: Button::new(back),
        }
    }

    /// Sample every button and return the inputs pressed since the last poll
    ///
    /// # Errors
    ///
    /// Returns the first pin error.
    pub fn poll(&mut self, now_ms: u32) -> Result<Vec<Input>, P::Error> {
        let mut inputs = Vec::new();
        for (button, input) in [
            (&mut self.previous, Input::Previous),
            (&mut self.next, Input::Next),
            (&mut self.select, Input::Select),
            (&mut self.back, Input::Back),
        ] {
            button.update(now_ms)?;
            if button.fell() {
                inputs.push(input);
            }
        }
        Ok(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;
    use core::convert::Infallible;

    #[derive(Clone)]
    struct MockPin(Rc<Cell<bool>>);

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0.get())
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0.get())
        }
    }

    fn pin() -> (MockPin, Rc<Cell<bool>>) {
        let level = Rc::new(Cell::new(true));
        (MockPin(Rc::clone(&level)), level)
    }

    #[test]
    fn test_press_is_reported_after_interval() {
        let (pin, level) = pin();
        let mut button = Button::new(pin);
        level.set(false);
        button.update(100).unwrap();
        assert!(!button.fell());
        button.update(105).unwrap();
        assert!(!button.fell());
        button.update(110).unwrap();
        assert!(button.fell());
        assert!(button.pressed());
        button.update(120).unwrap();
        assert!(!button.fell());
    }

    #[test]
    fn test_bounce_is_ignored() {
        let (pin, level) = pin();
        let mut button = Button::with_interval(pin, 5);
        for now in 0..4 {
            level.set(now % 2 == 1);
            button.update(now).unwrap();
        }
        level.set(true);
        button.update(20).unwrap();
        assert!(!button.fell());
        assert!(!button.pressed());
    }

    #[test]
    fn test_release_is_a_rising_edge() {
        let (pin, level) = pin();
        let mut button = Button::new(pin);
        level.set(false);
        button.update(0).unwrap();
        button.update(10).unwrap();
        level.set(true);
        button.update(20).unwrap();
        button.update(30).unwrap();
        assert!(button.rose());
        assert!(button.value());
    }

    #[test]
    fn test_pad_maps_buttons() {
        let (previous, _) = pin();
        let (next, next_level) = pin();
        let (select, _) = pin();
        let (back, back_level) = pin();
        let mut pad = ButtonPad::new(previous, next, select, back);
        next_level.set(false);
        back_level.set(false);
        assert!(pad.poll(0).unwrap().is_empty());
        assert_eq!(pad.poll(10).unwrap(), vec![Input::Next, Input::Back]);
        assert!(pad.poll(20).unwrap().is_empty());
    }
}
