//! Numeric values

use alloc::{boxed::Box, format, string::String};

use super::{Title, UpdateHandler, Value};
use crate::error::BuilderError;

/// Bisection steps used to invert the smoothing curve
const ROOT_ITERATIONS: usize = 32;

/// Round half away from zero
pub(crate) fn round(value: f32) -> i32 {
    if value < 0.0 {
        (value - 0.5) as i32
    } else {
        (value + 0.5) as i32
    }
}

fn power(base: f32, exponent: u8) -> f32 {
    (0..exponent).fold(1.0, |acc, _| acc * base)
}

/// Inverse of [`power`] on `0..=1`
fn root(value: f32, exponent: u8) -> f32 {
    if exponent <= 1 || value <= 0.0 || value >= 1.0 {
        return value.max(0.0).min(1.0);
    }
    let (mut low, mut high) = (0.0f32, 1.0f32);
    for _ in 0..ROOT_ITERATIONS {
        let middle = (low + high) / 2.0;
        if power(middle, exponent) < value {
            low = middle;
        } else {
            high = middle;
        }
    }
    (low + high) / 2.0
}

/// A numeric value with a range, step and display format
///
/// The value is stored as a raw position. Without smoothing the raw position
/// is the value itself. With a smoothing exponent `s > 1` the raw position
/// moves linearly through `0..=1` and the value follows
/// `raw^s * (maximum - minimum) + minimum`, which gives finer control at the
/// low end (envelope times, filter cutoff). Steps always apply to the raw
/// position.
///
/// ## Example
///
/// ```
/// use synthmenu::Number;
///
/// let mut coarse = match Number::builder("Coarse")
///     .step(1.0)
///     .minimum(-36.0)
///     .maximum(36.0)
///     .show_sign(true)
///     .decimals(0)
///     .build()
/// {
///     Ok(number) => number,
///     Err(_) => return,
/// };
/// assert_eq!(coarse.label(), "0");
/// coarse.increment();
/// assert_eq!(coarse.label(), "+1");
/// ```
pub struct Number {
    title: Title,
    step: f32,
    default: f32,
    raw: f32,
    minimum: f32,
    maximum: f32,
    smoothing: u8,
    looping: bool,
    show_sign: bool,
    decimals: u8,
    prepend: String,
    append: String,
    handler: Option<UpdateHandler>,
}

impl core::fmt::Debug for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Number")
            .field("title", &self.title)
            .field("raw", &self.raw)
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("step", &self.step)
            .field("smoothing", &self.smoothing)
            .finish_non_exhaustive()
    }
}

impl Number {
    /// Start building a number with the default settings
    ///
    /// Defaults: step 0.1, range 0..=1, default 0, no smoothing, no looping,
    /// one decimal.
    pub fn builder(title: impl Into<Title>) -> NumberBuilder {
        NumberBuilder::new(title.into())
    }

    /// Builder preset for a percentage (0..=1, step 0.01)
    pub fn percentage(title: impl Into<Title>) -> NumberBuilder {
        Self::builder(title).step(0.01)
    }

    /// Builder preset for a duration in seconds
    ///
    /// 0.001..=4.0 s, step 0.025, cubic smoothing, three decimals, `s` suffix.
    pub fn time(title: impl Into<Title>) -> NumberBuilder {
        Self::builder(title)
            .step(0.025)
            .default(0.001)
            .minimum(0.001)
            .maximum(4.0)
            .smoothing(3)
            .decimals(3)
            .append("s")
    }

    /// Title of the number
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Whether a smoothing curve is applied
    pub fn is_smoothed(&self) -> bool {
        self.smoothing > 1
    }

    fn raw_minimum(&self) -> f32 {
        if self.is_smoothed() { 0.0 } else { self.minimum }
    }

    fn raw_maximum(&self) -> f32 {
        if self.is_smoothed() { 1.0 } else { self.maximum }
    }

    fn to_raw(&self, value: f32) -> f32 {
        let value = value.max(self.minimum).min(self.maximum);
        if self.is_smoothed() {
            root((value - self.minimum) / (self.maximum - self.minimum), self.smoothing)
        } else {
            value
        }
    }

    /// Raw position (the persisted state)
    pub fn raw(&self) -> f32 {
        self.raw
    }

    /// Current value in display units
    pub fn value(&self) -> f32 {
        if self.is_smoothed() {
            power(self.raw, self.smoothing) * (self.maximum - self.minimum) + self.minimum
        } else {
            self.raw
        }
    }

    /// Raw position normalised to `0..=1`
    pub fn relative_value(&self) -> f32 {
        let span = self.raw_maximum() - self.raw_minimum();
        if span > 0.0 {
            (self.raw - self.raw_minimum()) / span
        } else {
            0.0
        }
    }

    /// Set the value in display units, clamped to the range
    ///
    /// Returns `true` if the raw position changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        self.set_raw(self.to_raw(value))
    }

    /// Set the raw position, clamped to the raw range
    ///
    /// Returns `true` if the raw position changed.
    pub fn set_raw(&mut self, raw: f32) -> bool {
        if raw.is_nan() {
            return false;
        }
        let raw = raw.max(self.raw_minimum()).min(self.raw_maximum());
        if raw == self.raw {
            return false;
        }
        self.raw = raw;
        true
    }

    /// Lower bound in display units
    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    /// Upper bound in display units
    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// Step applied to the raw position
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Default raw position
    pub fn default_raw(&self) -> f32 {
        self.default
    }

    /// Whether stepping past an end wraps around
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub(crate) fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Change the default and move the value to it
    pub(crate) fn set_default(&mut self, value: f32) {
        self.default = self.to_raw(value);
        self.raw = self.default;
    }

    /// Number of decimals shown in the label
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Change the number of decimals shown in the label
    pub fn set_decimals(&mut self, decimals: u8) {
        self.decimals = decimals;
    }

    /// Step up; wraps to the minimum when looping
    pub fn increment(&mut self) -> bool {
        let maximum = self.raw_maximum();
        let next = self.raw + self.step;
        let next = if self.looping && next > maximum {
            self.raw_minimum()
        } else {
            next.min(maximum)
        };
        self.set_raw(next)
    }

    /// Step down; wraps to the maximum when looping
    pub fn decrement(&mut self) -> bool {
        let minimum = self.raw_minimum();
        let next = self.raw - self.step;
        let next = if self.looping && next < minimum {
            self.raw_maximum()
        } else {
            next.max(minimum)
        };
        self.set_raw(next)
    }

    /// Back to the default
    pub fn reset(&mut self) -> bool {
        self.set_raw(self.default)
    }

    /// Formatted value with prefix and suffix
    pub fn label(&self) -> String {
        let value = self.value();
        let body = if self.decimals == 0 {
            let whole = round(value);
            if self.show_sign && whole > 0 {
                format!("+{whole}")
            } else {
                format!("{whole}")
            }
        } else {
            let places = usize::from(self.decimals);
            let text = format!("{value:.places$}");
            let unsigned = text.trim_start_matches('-');
            if unsigned.bytes().all(|b| b == b'0' || b == b'.') {
                String::from(unsigned)
            } else if self.show_sign && value > 0.0 {
                format!("+{text}")
            } else {
                text
            }
        };
        format!("{}{}{}", self.prepend, body, self.append)
    }

    pub(crate) fn handler_mut(&mut self) -> Option<&mut UpdateHandler> {
        self.handler.as_mut()
    }

    /// Install the handler called when the value changes through [`Item`](super::Item)
    pub fn set_update_handler(&mut self, handler: UpdateHandler) {
        self.handler = Some(handler);
    }
}

/// Builder for [`Number`]
///
/// The default is given in display units and clamped into the range.
#[must_use]
pub struct NumberBuilder {
    title: Title,
    step: f32,
    default: f32,
    minimum: f32,
    maximum: f32,
    smoothing: u8,
    looping: bool,
    show_sign: bool,
    decimals: u8,
    prepend: String,
    append: String,
    handler: Option<UpdateHandler>,
}

impl NumberBuilder {
    fn new(title: Title) -> Self {
        Self {
            title,
            step: 0.1,
            default: 0.0,
            minimum: 0.0,
            maximum: 1.0,
            smoothing: 1,
            looping: false,
            show_sign: false,
            decimals: 1,
            prepend: String::new(),
            append: String::new(),
            handler: None,
        }
    }

    /// Set the step (raw units)
    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Set the default value
    ///
    /// Given in display units. With smoothing the default is converted to a
    /// raw position, so a default equal to the minimum starts at raw `0`.
    pub fn default(mut self, default: f32) -> Self {
        self.default = default;
        self
    }

    /// Set the lower bound
    pub fn minimum(mut self, minimum: f32) -> Self {
        self.minimum = minimum;
        self
    }

    /// Set the upper bound
    pub fn maximum(mut self, maximum: f32) -> Self {
        self.maximum = maximum;
        self
    }

    /// Set the smoothing exponent (1 = linear)
    pub fn smoothing(mut self, exponent: u8) -> Self {
        self.smoothing = exponent;
        self
    }

    /// Wrap around when stepping past either end
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Show a `+` in front of positive values
    pub fn show_sign(mut self, show_sign: bool) -> Self {
        self.show_sign = show_sign;
        self
    }

    /// Set the number of decimals in the label (0 = integer)
    pub fn decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    /// Text placed before the value
    pub fn prepend(mut self, text: &str) -> Self {
        self.prepend = String::from(text);
        self
    }

    /// Text placed after the value
    pub fn append(mut self, text: &str) -> Self {
        self.append = String::from(text);
        self
    }

    /// Handler called with the new value on every change
    pub fn on_update(mut self, handler: impl FnMut(&Value) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Build the number
    ///
    /// # Errors
    ///
    /// - [`BuilderError::InvalidRange`] unless `minimum < maximum` (both finite)
    /// - [`BuilderError::InvalidStep`] unless the step is finite and positive
    /// - [`BuilderError::InvalidSmoothing`] if the exponent is 0
    pub fn build(self) -> Result<Number, BuilderError> {
        if !self.minimum.is_finite() || !self.maximum.is_finite() || self.minimum >= self.maximum
        {
            return Err(BuilderError::InvalidRange {
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(BuilderError::InvalidStep { step: self.step });
        }
        if self.smoothing == 0 {
            return Err(BuilderError::InvalidSmoothing);
        }
        Ok(self.assemble())
    }

    /// Build without validation, for presets known to be valid
    pub(crate) fn assemble(self) -> Number {
        let default = self.default;
        let mut number = Number {
            title: self.title,
            step: self.step,
            default: 0.0,
            raw: 0.0,
            minimum: self.minimum,
            maximum: self.maximum,
            smoothing: self.smoothing.max(1),
            looping: self.looping,
            show_sign: self.show_sign,
            decimals: self.decimals,
            prepend: self.prepend,
            append: self.append,
            handler: self.handler,
        };
        number.set_default(default);
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(builder: NumberBuilder) -> Number {
        builder.build().unwrap()
    }

    #[test]
    fn test_defaults() {
        let n = number(Number::builder("N"));
        assert_eq!(n.value(), 0.0);
        assert_eq!(n.label(), "0.0");
        assert_eq!(n.step(), 0.1);
        assert!(!n.is_smoothed());
    }

    #[test]
    fn test_increment_clamps_at_maximum() {
        let mut n = number(Number::builder("N").step(0.5));
        assert!(n.increment());
        assert!(n.increment());
        assert_eq!(n.value(), 1.0);
        assert!(!n.increment());
        assert_eq!(n.value(), 1.0);
    }

    #[test]
    fn test_decrement_clamps_at_minimum() {
        let mut n = number(Number::builder("N").step(0.5));
        assert!(!n.decrement());
        assert_eq!(n.value(), 0.0);
    }

    #[test]
    fn test_looping_wraps_both_ways() {
        let mut n = number(
            Number::builder("Patch")
                .step(1.0)
                .maximum(3.0)
                .looping(true)
                .decimals(0),
        );
        assert!(n.decrement());
        assert_eq!(n.value(), 3.0);
        assert!(n.increment());
        assert_eq!(n.value(), 0.0);
    }

    #[test]
    fn test_reset_returns_false_at_default() {
        let mut n = number(Number::builder("N").step(0.5).default(0.5));
        assert!(!n.reset());
        n.increment();
        assert!(n.reset());
        assert_eq!(n.value(), 0.5);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut n = number(Number::builder("Pan").minimum(-1.0));
        assert!(n.set_value(-4.0));
        assert_eq!(n.value(), -1.0);
        assert!(!n.set_value(-2.0));
    }

    #[test]
    fn test_smoothing_curve() {
        let mut n = number(
            Number::builder("Rate")
                .maximum(32.0)
                .step(0.5)
                .smoothing(2),
        );
        assert_eq!(n.raw(), 0.0);
        n.increment();
        assert_eq!(n.raw(), 0.5);
        assert_eq!(n.value(), 8.0);
        assert_eq!(n.relative_value(), 0.5);
    }

    #[test]
    fn test_smoothed_set_value_inverts_curve() {
        let mut n = number(Number::builder("Rate").maximum(32.0).smoothing(2));
        n.set_value(8.0);
        assert!(n.raw() > 0.4999 && n.raw() < 0.5001);
        assert!(n.value() > 7.99 && n.value() < 8.01);
    }

    #[test]
    fn test_smoothed_default_is_display_units() {
        let n = number(Number::builder("Frequency").default(1.0).smoothing(3));
        assert_eq!(n.raw(), 1.0);
        assert_eq!(n.value(), 1.0);
    }

    #[test]
    fn test_label_sign_and_decimals() {
        let mut n = number(
            Number::builder("Bend")
                .step(0.5)
                .minimum(-2.0)
                .maximum(2.0)
                .show_sign(true)
                .decimals(2),
        );
        assert_eq!(n.label(), "0.00");
        n.increment();
        assert_eq!(n.label(), "+0.50");
        n.set_value(-1.5);
        assert_eq!(n.label(), "-1.50");
    }

    #[test]
    fn test_label_never_signs_zero() {
        let mut n = number(
            Number::builder("Fine")
                .minimum(-1.0)
                .show_sign(true)
                .decimals(1),
        );
        n.set_value(-0.01);
        assert_eq!(n.label(), "0.0");
        n.set_value(0.01);
        assert_eq!(n.label(), "0.0");
    }

    #[test]
    fn test_label_prepend_append() {
        let n = number(
            Number::builder("Gain")
                .default(0.5)
                .prepend("x")
                .append("dB"),
        );
        assert_eq!(n.label(), "x0.5dB");
    }

    #[test]
    fn test_build_rejects_empty_range() {
        let result = Number::builder("N").minimum(1.0).maximum(1.0).build();
        assert!(matches!(result, Err(BuilderError::InvalidRange { .. })));
    }

    #[test]
    fn test_build_rejects_bad_step() {
        let result = Number::builder("N").step(0.0).build();
        assert!(matches!(result, Err(BuilderError::InvalidStep { .. })));
        let result = Number::builder("N").step(f32::NAN).build();
        assert!(matches!(result, Err(BuilderError::InvalidStep { .. })));
    }

    #[test]
    fn test_build_rejects_zero_smoothing() {
        let result = Number::builder("N").smoothing(0).build();
        assert!(matches!(result, Err(BuilderError::InvalidSmoothing)));
    }

    #[test]
    fn test_time_preset() {
        let mut t = Number::time("Attack").build().unwrap();
        assert_eq!(t.raw(), 0.0);
        assert_eq!(t.label(), "0.001s");
        t.set_raw(1.0);
        assert_eq!(t.label(), "4.000s");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round(0.5), 1);
        assert_eq!(round(-0.5), -1);
        assert_eq!(round(1.49), 1);
    }
}
