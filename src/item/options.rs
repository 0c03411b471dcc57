//! Number-backed choice items: switches, lists, characters and waveforms

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use super::{Number, Title, round};
use crate::error::BuilderError;

/// Characters available to [`Char`] items, in stepping order
pub const CHARACTERS: &str = " abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!-_#$%&+@~^,.`*?()=|/\\[]{}<>";

fn character_count() -> usize {
    CHARACTERS.len()
}

/// Index of the raw position of an integer-stepped number
fn index_of(number: &Number) -> usize {
    round(number.raw()).max(0) as usize
}

fn index_number(title: Title, count: usize, looping: bool) -> Number {
    Number::builder(title)
        .step(1.0)
        .maximum(count.saturating_sub(1) as f32)
        .looping(looping)
        .decimals(0)
        .assemble()
}

/// On/off switch
#[derive(Debug)]
pub struct Bool {
    number: Number,
    labels: (String, String),
}

impl Bool {
    /// Switch that starts off, labelled `Off`/`On`
    pub fn new(title: impl Into<Title>) -> Self {
        Self {
            number: index_number(title.into(), 2, false),
            labels: (String::from("Off"), String::from("On")),
        }
    }

    /// Change the default state, and the current state with it
    pub fn default(mut self, on: bool) -> Self {
        self.number.set_default(f32::from(u8::from(on)));
        self
    }

    /// Toggle around when stepping past either end
    pub fn looping(mut self, looping: bool) -> Self {
        self.number.set_looping(looping);
        self
    }

    /// Replace the `Off`/`On` labels
    pub fn labels(mut self, off: &str, on: &str) -> Self {
        self.labels = (String::from(off), String::from(on));
        self
    }

    /// Whether the switch is on
    pub fn is_on(&self) -> bool {
        self.number.raw() != 0.0
    }

    /// Switch on or off
    pub fn set(&mut self, on: bool) -> bool {
        self.number.set_raw(f32::from(u8::from(on)))
    }

    /// Label of the current state
    pub fn label(&self) -> &str {
        if self.is_on() { &self.labels.1 } else { &self.labels.0 }
    }

    /// Underlying number
    pub fn number(&self) -> &Number {
        &self.number
    }

    pub(crate) fn number_mut(&mut self) -> &mut Number {
        &mut self.number
    }
}

/// Choice from a fixed list of labels
#[derive(Debug)]
pub struct List {
    number: Number,
    labels: Vec<String>,
}

impl List {
    /// List over `labels`, looping by default
    ///
    /// # Errors
    ///
    /// [`BuilderError::EmptyList`] if there are no labels.
    pub fn new<S: Into<String>>(
        title: impl Into<Title>,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Self, BuilderError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(BuilderError::EmptyList);
        }
        Ok(Self {
            number: index_number(title.into(), labels.len(), true),
            labels,
        })
    }

    /// Change the default entry, and the current entry with it
    pub fn default(mut self, index: usize) -> Self {
        self.number.set_default(index as f32);
        self
    }

    /// Stop at either end instead of wrapping
    pub fn looping(mut self, looping: bool) -> Self {
        self.number.set_looping(looping);
        self
    }

    /// Index of the selected entry
    pub fn index(&self) -> usize {
        index_of(&self.number)
    }

    /// Select an entry, clamped to the list
    pub fn select(&mut self, index: i32) -> bool {
        self.number.set_raw(index as f32)
    }

    /// Label of the selected entry
    pub fn label(&self) -> &str {
        self.labels.get(self.index()).map_or("", String::as_str)
    }

    /// All labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Underlying number
    pub fn number(&self) -> &Number {
        &self.number
    }

    pub(crate) fn number_mut(&mut self) -> &mut Number {
        &mut self.number
    }
}

/// Single character from [`CHARACTERS`]
#[derive(Debug)]
pub struct Char {
    number: Number,
}

impl Char {
    /// Character item starting at the space
    pub fn new(title: impl Into<Title>) -> Self {
        Self {
            number: index_number(title.into(), character_count(), true),
        }
    }

    /// Position of the character in [`CHARACTERS`]
    pub fn index(&self) -> usize {
        index_of(&self.number)
    }

    /// Current character
    pub fn character(&self) -> char {
        CHARACTERS
            .as_bytes()
            .get(self.index())
            .map_or(' ', |byte| char::from(*byte))
    }

    /// Current character as text
    pub fn label(&self) -> String {
        self.character().to_string()
    }

    /// Set the character; unknown characters are ignored
    pub fn set_char(&mut self, character: char) -> bool {
        CHARACTERS
            .find(character)
            .is_some_and(|index| self.number.set_raw(index as f32))
    }

    /// Set the position, wrapping around the character set
    pub fn set_index(&mut self, index: i32) -> bool {
        let index = index.rem_euclid(character_count() as i32);
        self.number.set_raw(index as f32)
    }

    /// Underlying number
    pub fn number(&self) -> &Number {
        &self.number
    }

    pub(crate) fn number_mut(&mut self) -> &mut Number {
        &mut self.number
    }
}

/// Amplitude of generated shapes
const PEAK: f32 = 32767.0;

/// Evenly spaced samples from `start` to `stop` inclusive
fn ramp(start: f32, stop: f32, count: usize) -> impl Iterator<Item = i16> {
    let span = count.saturating_sub(1).max(1) as f32;
    (0..count).map(move |i| (start + (stop - start) * i as f32 / span) as i16)
}

/// Sine of `x` in `0..2π` by the Bhaskara approximation
fn sine(x: f32) -> f32 {
    let pi = core::f32::consts::PI;
    let (x, sign) = if x > pi { (x - pi, -1.0) } else { (x, 1.0) };
    let product = x * (pi - x);
    sign * 16.0 * product / (5.0 * pi * pi - 4.0 * product)
}

/// Named single-cycle waveform
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    /// Name shown as the label
    pub name: String,
    /// Signed 16-bit samples
    pub samples: Vec<i16>,
}

impl Shape {
    /// Shape from existing samples
    pub fn new(name: &str, samples: Vec<i16>) -> Self {
        Self {
            name: String::from(name),
            samples,
        }
    }

    /// Sine cycle starting at zero
    pub fn sine(length: usize) -> Self {
        let tau = 2.0 * core::f32::consts::PI;
        let samples = (0..length)
            .map(|i| (sine(tau * i as f32 / length as f32) * PEAK) as i16)
            .collect();
        Self::new("Sine", samples)
    }

    /// Falling ramp from the top to the bottom
    pub fn saw(length: usize) -> Self {
        Self::new("Saw", ramp(PEAK, -PEAK, length).collect())
    }

    /// Rising then falling ramp
    pub fn triangle(length: usize) -> Self {
        let half = length / 2;
        let samples = ramp(-PEAK, PEAK, half)
            .chain(ramp(PEAK, -PEAK, half))
            .collect();
        Self::new("Triangle", samples)
    }

    /// High half then low half
    pub fn square(length: usize) -> Self {
        let half = length / 2;
        let mut samples = alloc::vec![PEAK as i16; half];
        samples.resize(half * 2, -PEAK as i16);
        Self::new("Square", samples)
    }
}

/// Choice from a list of waveform shapes
#[derive(Debug)]
pub struct WaveformList {
    number: Number,
    shapes: Vec<Shape>,
}

impl WaveformList {
    /// List over `shapes`, looping
    ///
    /// # Errors
    ///
    /// [`BuilderError::EmptyList`] if there are no shapes.
    pub fn new(title: impl Into<Title>, shapes: Vec<Shape>) -> Result<Self, BuilderError> {
        if shapes.is_empty() {
            return Err(BuilderError::EmptyList);
        }
        Ok(Self {
            number: index_number(title.into(), shapes.len(), true),
            shapes,
        })
    }

    /// Index of the selected shape
    pub fn index(&self) -> usize {
        index_of(&self.number)
    }

    /// Select a shape, clamped to the list
    pub fn select(&mut self, index: i32) -> bool {
        self.number.set_raw(index as f32)
    }

    /// Selected shape
    pub fn shape(&self) -> Option<&Shape> {
        self.shapes.get(self.index())
    }

    /// Samples of the selected shape
    pub fn samples(&self) -> &[i16] {
        self.shape().map_or(&[], |shape| shape.samples.as_slice())
    }

    /// Name of the selected shape
    pub fn label(&self) -> &str {
        self.shape().map_or("", |shape| shape.name.as_str())
    }

    /// All shapes
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Underlying number
    pub fn number(&self) -> &Number {
        &self.number
    }

    pub(crate) fn number_mut(&mut self) -> &mut Number {
        &mut self.number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_character_set_size() {
        assert_eq!(CHARACTERS.len(), 91);
        assert!(CHARACTERS.is_ascii());
    }

    #[test]
    fn test_bool_labels() {
        let mut switch = Bool::new("Gate").labels("Lo", "Hi");
        assert_eq!(switch.label(), "Lo");
        assert!(switch.number_mut().increment());
        assert_eq!(switch.label(), "Hi");
        assert!(!switch.number_mut().increment());
    }

    #[test]
    fn test_bool_default_on() {
        let mut switch = Bool::new("Gate").default(true);
        assert!(switch.is_on());
        assert!(switch.set(false));
        assert!(switch.number_mut().reset());
        assert!(switch.is_on());
    }

    #[test]
    fn test_list_wraps() {
        let mut list = List::new("Type", ["Low Pass", "High Pass", "Band Pass"]).unwrap();
        assert_eq!(list.label(), "Low Pass");
        assert!(list.number_mut().decrement());
        assert_eq!(list.label(), "Band Pass");
        assert!(list.number_mut().increment());
        assert_eq!(list.index(), 0);
    }

    #[test]
    fn test_list_select_clamps() {
        let mut list = List::new("Type", ["A", "B"]).unwrap();
        assert!(list.select(5));
        assert_eq!(list.label(), "B");
        assert!(list.select(-1));
        assert_eq!(list.label(), "A");
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let result = List::new("Type", Vec::<String>::new());
        assert!(matches!(result, Err(BuilderError::EmptyList)));
        let result = WaveformList::new("Waveform", Vec::new());
        assert!(matches!(result, Err(BuilderError::EmptyList)));
    }

    #[test]
    fn test_single_entry_list() {
        let mut list = List::new("Only", ["One"]).unwrap();
        assert!(!list.number_mut().increment());
        assert!(!list.number_mut().decrement());
        assert_eq!(list.label(), "One");
    }

    #[test]
    fn test_char_wraps_around_set() {
        let mut c = Char::new("1");
        assert_eq!(c.character(), ' ');
        assert!(c.number_mut().decrement());
        assert_eq!(c.character(), '>');
        assert!(c.set_index(-90));
        assert_eq!(c.character(), 'a');
        assert!(c.set_char('Z'));
        assert_eq!(c.label(), "Z");
        assert!(!c.set_char('é'));
    }

    #[test]
    fn test_shapes() {
        assert_eq!(Shape::saw(3).samples, vec![32767, 0, -32767]);
        assert_eq!(Shape::square(4).samples, vec![32767, 32767, -32767, -32767]);
        assert_eq!(
            Shape::triangle(4).samples,
            vec![-32767, 32767, 32767, -32767]
        );
        let sine = Shape::sine(4).samples;
        assert_eq!(sine[0], 0);
        assert!(sine[1] > 32000);
        assert!(sine[3] < -32000);
    }

    #[test]
    fn test_waveform_list_samples() {
        let mut list = WaveformList::new("Waveform", vec![Shape::saw(4), Shape::square(4)]).unwrap();
        assert_eq!(list.label(), "Saw");
        assert!(list.select(1));
        assert_eq!(list.label(), "Square");
        assert_eq!(list.samples(), &[32767, 32767, -32767, -32767]);
    }
}
