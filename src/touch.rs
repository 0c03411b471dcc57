//! Capacitive touch wheels and sliders
//!
//! Three touch pads laid out around a circle (or along a line) are read by the
//! caller, e.g. from an ADC or a touch peripheral, and handed over as
//! [`PadReading`]s. [`TouchWheel`] turns them into a position, and
//! [`TouchWheelRotary`] turns positions over time into menu events.
//!
//! ## Example
//!
//! ```
//! use synthmenu::{PadReading, TouchWheel};
//!
//! let wheel = TouchWheel::slider();
//! let idle = PadReading::new(90, 100);
//! let touched = PadReading::new(200, 100);
//!
//! assert_eq!(wheel.position(&[idle, idle, idle]), None);
//! assert_eq!(wheel.position(&[touched, touched, idle]), Some(0.25));
//! ```

use alloc::vec::Vec;

/// Pads in a wheel
pub const PAD_COUNT: usize = 3;

fn abs(value: f32) -> f32 {
    if value < 0.0 { -value } else { value }
}

/// Wrap into `0..1`
fn wrap(value: f32) -> f32 {
    let value = value % 1.0;
    if value < 0.0 { value + 1.0 } else { value }
}

/// Raw touch measurement of one pad
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PadReading {
    /// Current measurement
    pub raw: u16,
    /// Untouched level; readings above it count as touched
    pub threshold: u16,
}

impl PadReading {
    /// Reading from a measurement and its threshold
    pub fn new(raw: u16, threshold: u16) -> Self {
        Self { raw, threshold }
    }

    /// Amount above the threshold, relative to the threshold
    ///
    /// Negative when untouched.
    pub fn strength(&self) -> f32 {
        (f32::from(self.raw) - f32::from(self.threshold)) / f32::from(self.threshold.max(1))
    }
}

/// Position sensor made from three touch pads
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchWheel {
    scale: f32,
    offset: f32,
    wrap: bool,
}

impl Default for TouchWheel {
    fn default() -> Self {
        let scale = 1.0 / PAD_COUNT as f32;
        Self::new(scale, -scale / 2.0, true)
    }
}

impl TouchWheel {
    /// Wheel with an explicit sector size and rotation
    ///
    /// `scale` is the share of the circle covered by one pad, `offset` rotates
    /// the result. A wheel that doesn't `wrap` ignores touches bridging the
    /// last and the first pad.
    pub fn new(scale: f32, offset: f32, wrap: bool) -> Self {
        Self {
            scale,
            offset,
            wrap,
        }
    }

    /// Linear slider: two sectors, no wrap
    pub fn slider() -> Self {
        Self::new(0.5, 0.0, false)
    }

    /// Position in `0..1`, or `None` when not touched
    pub fn position(&self, pads: &[PadReading; PAD_COUNT]) -> Option<f32> {
        let [a, b, c] = pads.map(|pad| pad.strength());
        let between = |sector: f32, from: f32, to: f32| {
            let total = from + to;
            let share = if total > 0.0 { to / total } else { 0.5 };
            self.scale * (sector + share)
        };

        let position = if a >= 0.0 && b >= 0.0 {
            between(0.0, a, b)
        } else if b >= 0.0 && c >= 0.0 {
            between(1.0, b, c)
        } else if c >= 0.0 && a >= 0.0 && self.wrap {
            between(2.0, c, a)
        } else if a > 0.0 && b <= 0.0 && c <= 0.0 {
            0.0
        } else if a <= 0.0 && b > 0.0 && c <= 0.0 {
            self.scale
        } else if a <= 0.0 && b <= 0.0 && c > 0.0 && self.wrap {
            2.0 * self.scale
        } else {
            return None;
        };
        Some(wrap(position + self.offset))
    }
}

/// Direction of a tap on the wheel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Around a quarter turn
    Left,
    /// Around half a turn
    Down,
    /// Around three quarters of a turn
    Right,
    /// Around the top
    Up,
}

impl Direction {
    /// Direction of a wheel position
    pub fn from_position(position: f32) -> Self {
        if abs(position - 0.25) < 0.125 {
            Self::Left
        } else if abs(position - 0.5) < 0.125 {
            Self::Down
        } else if abs(position - 0.75) < 0.125 {
            Self::Right
        } else {
            Self::Up
        }
    }
}

/// Event produced by [`TouchWheelRotary::update`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelEvent {
    /// Finger moved one step anticlockwise
    Increment,
    /// Finger moved one step clockwise
    Decrement,
    /// Short tap
    Press(Direction),
    /// Touch held past the long press duration without moving
    LongPress(Direction),
    /// Touch that stepped ended, with the net number of steps
    StepRelease(i32),
}

/// Default step size as a share of a full turn
pub const DEFAULT_STEP_SIZE: f32 = 0.2;
/// Default shortest touch counted as a press
pub const DEFAULT_SHORT_PRESS_MS: u32 = 50;
/// Default shortest touch counted as a long press
pub const DEFAULT_LONG_PRESS_MS: u32 = 200;

/// Touch wheel used as a rotary encoder with four direction buttons
#[derive(Clone, Debug)]
pub struct TouchWheelRotary {
    wheel: TouchWheel,
    step_size: f32,
    short_press_ms: u32,
    long_press_ms: u32,
    /// Position at the last step, `None` while untouched
    anchor: Option<f32>,
    started_at: u32,
    stepped: bool,
    steps: i32,
}

impl Default for TouchWheelRotary {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_SIZE, DEFAULT_SHORT_PRESS_MS, DEFAULT_LONG_PRESS_MS)
    }
}

impl TouchWheelRotary {
    /// Rotary wheel with custom step size and press durations
    ///
    /// The step size is kept within `0.01..=0.25`, the long press is at least
    /// 10 ms longer than the short press.
    pub fn new(step_size: f32, short_press_ms: u32, long_press_ms: u32) -> Self {
        let short_press_ms = short_press_ms.max(10);
        Self {
            wheel: TouchWheel::new(0.333, -0.333 / 2.0, true),
            step_size: step_size.max(0.01).min(0.25),
            short_press_ms,
            long_press_ms: long_press_ms.max(short_press_ms + 10),
            anchor: None,
            started_at: 0,
            stepped: false,
            steps: 0,
        }
    }

    /// Replace the position sensor
    pub fn with_wheel(mut self, wheel: TouchWheel) -> Self {
        self.wheel = wheel;
        self
    }

    /// Step size after clamping
    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    /// Whether a touch is in progress
    pub fn is_touched(&self) -> bool {
        self.anchor.is_some()
    }

    /// Feed the latest pad readings
    pub fn update(&mut self, pads: &[PadReading; PAD_COUNT], now_ms: u32) -> Vec<WheelEvent> {
        let position = self.wheel.position(pads);
        self.update_position(position, now_ms)
    }

    /// Feed a position directly, `None` when untouched
    pub fn update_position(&mut self, position: Option<f32>, now_ms: u32) -> Vec<WheelEvent> {
        let mut events = Vec::new();
        match (self.anchor, position) {
            (None, None) => {}
            (None, Some(position)) => {
                self.anchor = Some(position);
                self.started_at = now_ms;
                self.stepped = false;
                self.steps = 0;
            }
            (Some(anchor), None) => {
                self.anchor = None;
                let held = now_ms.wrapping_sub(self.started_at);
                if self.stepped {
                    events.push(WheelEvent::StepRelease(self.steps));
                } else if held > self.short_press_ms {
                    let direction = Direction::from_position(anchor);
                    events.push(if held > self.long_press_ms {
                        WheelEvent::LongPress(direction)
                    } else {
                        WheelEvent::Press(direction)
                    });
                }
            }
            (Some(anchor), Some(position)) => {
                self.anchor = Some(self.step(anchor, position, &mut events));
            }
        }
        if !events.is_empty() {
            log::trace!("touch wheel: {events:?}");
        }
        events
    }

    /// Emit steps between `anchor` and `position`, returning the new anchor
    fn step(&mut self, mut anchor: f32, position: f32, events: &mut Vec<WheelEvent>) -> f32 {
        let mut unwrapped = position;
        if abs(position - anchor) > 0.5 {
            if position > anchor && anchor < 0.5 {
                unwrapped -= 1.0;
            } else if position < anchor && anchor > 0.5 {
                unwrapped += 1.0;
            }
        }
        if abs(unwrapped - anchor) <= self.step_size {
            return anchor;
        }
        while unwrapped - anchor > self.step_size {
            self.stepped = true;
            self.steps -= 1;
            anchor += self.step_size;
            events.push(WheelEvent::Decrement);
        }
        while anchor - unwrapped > self.step_size {
            self.stepped = true;
            self.steps += 1;
            anchor -= self.step_size;
            events.push(WheelEvent::Increment);
        }
        wrap(anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const IDLE: PadReading = PadReading {
        raw: 100,
        threshold: 100,
    };

    fn touched(raw: u16) -> PadReading {
        PadReading::new(raw, 100)
    }

    #[test]
    fn test_strength() {
        assert_eq!(touched(150).strength(), 0.5);
        assert_eq!(touched(50).strength(), -0.5);
        assert_eq!(PadReading::new(5, 0).strength(), 5.0);
    }

    #[test]
    fn test_untouched_wheel() {
        let wheel = TouchWheel::default();
        assert_eq!(wheel.position(&[touched(0), touched(0), touched(0)]), None);
    }

    #[test]
    fn test_single_pad_positions() {
        let wheel = TouchWheel::new(0.25, 0.0, true);
        assert_eq!(wheel.position(&[touched(150), touched(0), touched(0)]), Some(0.0));
        assert_eq!(wheel.position(&[touched(0), touched(150), touched(0)]), Some(0.25));
        assert_eq!(wheel.position(&[touched(0), touched(0), touched(150)]), Some(0.5));
    }

    #[test]
    fn test_two_pad_interpolation() {
        let wheel = TouchWheel::new(0.25, 0.0, true);
        let position = wheel.position(&[touched(0), touched(150), touched(250)]);
        assert_eq!(position, Some(0.25 * (1.0 + 1.5 / 2.0)));
    }

    #[test]
    fn test_offset_wraps_below_zero() {
        let wheel = TouchWheel::new(0.25, -0.125, true);
        assert_eq!(wheel.position(&[touched(150), touched(0), touched(0)]), Some(0.875));
    }

    #[test]
    fn test_slider_ignores_wrapping_pads() {
        let slider = TouchWheel::slider();
        assert_eq!(slider.position(&[touched(150), touched(0), touched(150)]), None);
        assert_eq!(slider.position(&[touched(0), touched(0), touched(150)]), None);
        assert_eq!(slider.position(&[touched(0), IDLE, touched(150)]), Some(0.0));
    }

    #[test]
    fn test_direction_from_position() {
        assert_eq!(Direction::from_position(0.25), Direction::Left);
        assert_eq!(Direction::from_position(0.5), Direction::Down);
        assert_eq!(Direction::from_position(0.8), Direction::Right);
        assert_eq!(Direction::from_position(0.95), Direction::Up);
        assert_eq!(Direction::from_position(0.05), Direction::Up);
    }

    #[test]
    fn test_step_size_is_clamped() {
        assert_eq!(TouchWheelRotary::new(1.0, 50, 200).step_size(), 0.25);
        assert_eq!(TouchWheelRotary::new(0.0, 50, 200).step_size(), 0.01);
    }

    #[test]
    fn test_tap_and_long_press() {
        let mut rotary = TouchWheelRotary::default();
        assert!(rotary.update_position(Some(0.25), 0).is_empty());
        assert!(rotary.is_touched());
        assert_eq!(
            rotary.update_position(None, 100),
            vec![WheelEvent::Press(Direction::Left)]
        );
        assert!(!rotary.is_touched());

        rotary.update_position(Some(0.5), 1000);
        assert_eq!(
            rotary.update_position(None, 1500),
            vec![WheelEvent::LongPress(Direction::Down)]
        );
    }

    #[test]
    fn test_short_touch_is_ignored() {
        let mut rotary = TouchWheelRotary::default();
        rotary.update_position(Some(0.25), 0);
        assert!(rotary.update_position(None, 20).is_empty());
    }

    #[test]
    fn test_steps_and_release() {
        let mut rotary = TouchWheelRotary::new(0.1, 50, 200);
        rotary.update_position(Some(0.5), 0);
        assert_eq!(
            rotary.update_position(Some(0.25), 10),
            vec![WheelEvent::Increment, WheelEvent::Increment]
        );
        assert_eq!(
            rotary.update_position(Some(0.45), 20),
            vec![WheelEvent::Decrement]
        );
        assert_eq!(
            rotary.update_position(None, 500),
            vec![WheelEvent::StepRelease(1)]
        );
    }

    #[test]
    fn test_steps_across_the_top() {
        let mut rotary = TouchWheelRotary::new(0.1, 50, 200);
        rotary.update_position(Some(0.05), 0);
        let events = rotary.update_position(Some(0.9), 10);
        assert_eq!(events, vec![WheelEvent::Increment]);
    }
}
