use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use super::{Char, Item, List, Number, Shape, Title, UpdateHandler, Value, WaveformList};
use crate::{data::Data, error::BuilderError};

/// Index of the loop start inside a waveform group
const LOOP_START: usize = 1;
/// Index of the loop end inside a waveform group
const LOOP_END: usize = 2;

/// Flavour of a [`Group`]
///
/// Preset groups keep their children in a fixed order, which the renderers
/// rely on (e.g. the envelope outline reads the times and levels by
/// position).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    /// Plain list of items
    Plain,
    /// Text editor made of [`Char`] items
    Text,
    /// Waveform choice with loop points
    Waveform,
    /// Attack/release envelope
    ArEnvelope,
    /// Attack/decay/sustain/release envelope
    AdsrEnvelope,
    /// Low frequency oscillator
    Lfo,
    /// Filter settings
    Filter,
    /// Level and pan
    Mix,
    /// Pitch settings
    Tune,
    /// Patch number and name
    Patch,
}

impl GroupKind {
    /// Name of the kind, used for computed titles
    pub fn name(self) -> &'static str {
        match self {
            Self::Plain => "Group",
            Self::Text => "String",
            Self::Waveform => "Waveform",
            Self::ArEnvelope => "AREnvelope",
            Self::AdsrEnvelope => "ADSREnvelope",
            Self::Lfo => "LFO",
            Self::Filter => "Filter",
            Self::Mix => "Mix",
            Self::Tune => "Tune",
            Self::Patch => "Patch",
        }
    }

    /// Whether the kind is one of the envelopes
    pub fn is_envelope(self) -> bool {
        matches!(self, Self::ArEnvelope | Self::AdsrEnvelope)
    }
}

/// Ordered collection of items with a cursor
///
/// ## Example
///
/// ```
/// use synthmenu::{Action, Group, Item};
///
/// let mut group = Group::new("Main", [
///     Item::from(Action::empty("One")),
///     Item::from(Action::empty("Two")),
/// ])
/// .looping(true);
///
/// assert!(group.next());
/// assert!(group.next());
/// assert_eq!(group.index(), 0);
/// ```
pub struct Group {
    title: Title,
    items: Vec<Item>,
    index: usize,
    looping: bool,
    kind: GroupKind,
    handler: Option<UpdateHandler>,
}

impl core::fmt::Debug for Group {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Group")
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("index", &self.index)
            .field("looping", &self.looping)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl Group {
    /// Plain group of `items`
    pub fn new(title: impl Into<Title>, items: impl IntoIterator<Item = Item>) -> Self {
        Self::with_kind(title.into(), GroupKind::Plain, items.into_iter().collect())
    }

    fn with_kind(title: Title, kind: GroupKind, items: Vec<Item>) -> Self {
        Self {
            title,
            items,
            index: 0,
            looping: false,
            kind,
            handler: None,
        }
    }

    /// Wrap around when navigating past either end
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Text editor of `length` characters titled `1` to `length`
    pub fn text(title: impl Into<Title>, length: usize) -> Self {
        let items = (1..=length)
            .map(|position| Item::from(Char::new(position.to_string())))
            .collect();
        Self::with_kind(title.into(), GroupKind::Text, items)
    }

    /// Waveform choice with `Loop Start` and `Loop End` percentages
    ///
    /// # Errors
    ///
    /// [`BuilderError::EmptyList`] if there are no shapes.
    pub fn waveform(title: impl Into<Title>, shapes: Vec<Shape>) -> Result<Self, BuilderError> {
        let items = alloc::vec![
            Item::from(WaveformList::new("Waveform", shapes)?),
            Item::percentage("Loop Start"),
            Item::Percentage(Number::percentage("Loop End").default(1.0).assemble()),
        ];
        Ok(Self::with_kind(title.into(), GroupKind::Waveform, items))
    }

    /// Attack time, sustain level and release time
    pub fn ar_envelope(title: impl Into<Title>) -> Self {
        let items = alloc::vec![
            Item::time("Attack Time"),
            Item::from(Number::builder("Sustain Level").step(0.05).assemble()),
            Item::time("Release Time"),
        ];
        Self::with_kind(title.into(), GroupKind::ArEnvelope, items)
    }

    /// Attack time and level, decay time, sustain level and release time
    pub fn adsr_envelope(title: impl Into<Title>) -> Self {
        let items = alloc::vec![
            Item::time("Attack Time"),
            Item::from(
                Number::builder("Attack Level")
                    .default(1.0)
                    .step(0.05)
                    .assemble()
            ),
            Item::time("Decay Time"),
            Item::from(
                Number::builder("Sustain Level")
                    .default(0.75)
                    .step(0.05)
                    .assemble()
            ),
            Item::time("Release Time"),
        ];
        Self::with_kind(title.into(), GroupKind::AdsrEnvelope, items)
    }

    /// LFO depth and rate
    pub fn lfo(title: impl Into<Title>) -> Self {
        let items = alloc::vec![
            Item::from(
                Number::builder("Depth")
                    .step(0.01)
                    .maximum(0.5)
                    .smoothing(2)
                    .assemble()
            ),
            Item::from(
                Number::builder("Rate")
                    .step(0.01)
                    .maximum(32.0)
                    .smoothing(2)
                    .assemble()
            ),
        ];
        Self::with_kind(title.into(), GroupKind::Lfo, items)
    }

    /// Filter type, frequency and resonance
    pub fn filter(title: impl Into<Title>) -> Self {
        let kinds = ["Low Pass", "High Pass", "Band Pass"];
        let mut items = Vec::with_capacity(3);
        if let Ok(list) = List::new("Type", kinds) {
            items.push(Item::from(list));
        }
        items.push(Item::from(
            Number::builder("Frequency")
                .default(1.0)
                .step(0.01)
                .smoothing(3)
                .assemble(),
        ));
        items.push(Item::from(Number::builder("Resonance").assemble()));
        Self::with_kind(title.into(), GroupKind::Filter, items)
    }

    /// Output level and pan
    pub fn mix(title: impl Into<Title>) -> Self {
        let items = alloc::vec![
            Item::from(
                Number::builder("Level")
                    .default(1.0)
                    .step(0.025)
                    .assemble()
            ),
            Item::from(Number::builder("Pan").step(0.1).minimum(-1.0).assemble()),
        ];
        Self::with_kind(title.into(), GroupKind::Mix, items)
    }

    /// Coarse and fine tuning, glide time and pitch bend range
    pub fn tune(title: impl Into<Title>) -> Self {
        let items = alloc::vec![
            Item::from(
                Number::builder("Coarse")
                    .step(1.0)
                    .minimum(-36.0)
                    .maximum(36.0)
                    .show_sign(true)
                    .decimals(0)
                    .assemble()
            ),
            Item::from(
                Number::builder("Fine")
                    .step(1.0 / 144.0)
                    .minimum(-1.0 / 12.0)
                    .maximum(1.0 / 12.0)
                    .show_sign(true)
                    .decimals(3)
                    .assemble()
            ),
            Item::Time(
                Number::time("Glide")
                    .step(0.05)
                    .minimum(0.0)
                    .maximum(2.0)
                    .assemble()
            ),
            Item::from(
                Number::builder("Bend")
                    .step(1.0 / 24.0)
                    .minimum(-2.0)
                    .maximum(2.0)
                    .show_sign(true)
                    .decimals(2)
                    .assemble()
            ),
        ];
        Self::with_kind(title.into(), GroupKind::Tune, items)
    }

    /// Patch number out of `count` and a 16 character name
    pub fn patch(title: impl Into<Title>, count: usize) -> Self {
        let items = alloc::vec![
            Item::from(
                Number::builder("Patch")
                    .step(1.0)
                    .maximum(count.saturating_sub(1) as f32)
                    .looping(true)
                    .decimals(0)
                    .assemble()
            ),
            Item::from(Self::text("Name", 16)),
        ];
        Self::with_kind(title.into(), GroupKind::Patch, items)
    }

    /// Title of the group
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Flavour of the group
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Change whether navigation wraps around
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Whether navigation wraps around
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Children in order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no children
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the cursor, wrapping modulo the number of children
    pub fn set_index(&mut self, index: i32) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let index = index.rem_euclid(self.items.len() as i32) as usize;
        if index == self.index {
            return false;
        }
        self.index = index;
        true
    }

    /// Child at `index`
    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Mutable child at `index`
    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Child under the cursor
    pub fn current_item(&self) -> Option<&Item> {
        self.items.get(self.index)
    }

    /// Mutable child under the cursor
    pub fn current_item_mut(&mut self) -> Option<&mut Item> {
        self.items.get_mut(self.index)
    }

    /// First child titled `title`
    pub fn find(&self, title: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.title() == title)
    }

    /// First child titled `title`, mutable
    pub fn find_mut(&mut self, title: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.title() == title)
    }

    /// Numeric core of the child at `index`
    pub fn number_at(&self, index: usize) -> Option<&Number> {
        self.items.get(index).and_then(Item::as_number)
    }

    /// Waveform list of a waveform group
    pub fn waveform_list(&self) -> Option<&WaveformList> {
        match self.items.first() {
            Some(Item::WaveformList(list)) => Some(list),
            _ => None,
        }
    }

    /// Text of a string editor
    pub fn text_value(&self) -> String {
        self.items.iter().map(Item::label).collect()
    }

    /// `>` for groups the menu can enter, the text for string editors
    pub fn label(&self) -> String {
        match self.kind {
            GroupKind::Text => self.text_value(),
            _ => String::from(">"),
        }
    }

    /// Values of the children, or the text of a string editor
    pub fn value(&self) -> Value {
        match self.kind {
            GroupKind::Text => Value::Text(self.text_value()),
            _ => Value::Tuple(self.items.iter().map(Item::value).collect()),
        }
    }

    /// Assign children in order
    ///
    /// A string editor also accepts text, one character per child. Entries
    /// past the last child are ignored.
    pub fn set_value(&mut self, value: &Value) -> bool {
        match value {
            Value::Tuple(values) => {
                for (item, value) in self.items.iter_mut().zip(values) {
                    item.set_value(value);
                }
            }
            Value::Text(text) if self.kind == GroupKind::Text => {
                for (item, character) in self.items.iter_mut().zip(text.chars()) {
                    item.set_value(&Value::Char(character));
                }
            }
            _ => return false,
        }
        self.sync(LOOP_START);
        true
    }

    /// Persisted state of the children keyed by title
    ///
    /// Actions are skipped. String editors persist their text.
    pub fn data(&self) -> Data {
        if self.kind == GroupKind::Text {
            return Data::Text(self.text_value());
        }
        let map: BTreeMap<String, Data> = self
            .items
            .iter()
            .filter_map(|item| item.data().map(|data| (item.title(), data)))
            .collect();
        Data::Map(map)
    }

    /// Restore persisted state, ignoring unknown titles
    pub fn set_data(&mut self, data: &Data) -> bool {
        match data {
            Data::Text(text) if self.kind == GroupKind::Text => {
                self.set_value(&Value::Text(text.clone()))
            }
            Data::Map(map) => {
                for (title, data) in map {
                    if let Some(item) = self.find_mut(title) {
                        item.set_data(data);
                    }
                }
                self.sync(LOOP_START);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor by `delta`
    ///
    /// Looping groups wrap from one end to the other, other groups stop at
    /// the ends.
    pub fn navigate(&mut self, delta: i32) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let last = self.items.len() as i32 - 1;
        let target = self.index as i32 + delta;
        let target = if self.looping && target > last {
            0
        } else if self.looping && target < 0 {
            last
        } else {
            target.max(0).min(last)
        };
        if target as usize == self.index {
            return false;
        }
        self.index = target as usize;
        true
    }

    /// Move the cursor back by one
    pub fn previous(&mut self) -> bool {
        self.navigate(-1)
    }

    /// Move the cursor forward by one
    pub fn next(&mut self) -> bool {
        self.navigate(1)
    }

    /// Step the current child up, unless it is a group
    pub fn increment(&mut self) -> bool {
        let changed = match self.current_item_mut() {
            Some(item) if !item.is_group() => item.increment(),
            _ => false,
        };
        if changed {
            self.sync(self.index);
        }
        changed
    }

    /// Step the current child down, unless it is a group
    pub fn decrement(&mut self) -> bool {
        let changed = match self.current_item_mut() {
            Some(item) if !item.is_group() => item.decrement(),
            _ => false,
        };
        if changed {
            self.sync(self.index);
        }
        changed
    }

    /// Reset the current child
    pub fn reset(&mut self) -> bool {
        let changed = self.current_item_mut().is_some_and(Item::reset);
        if changed {
            self.sync(self.index);
        }
        changed
    }

    /// Reset every child and descendant
    pub fn reset_all(&mut self) -> bool {
        for item in &mut self.items {
            item.reset_all();
        }
        true
    }

    pub(crate) fn handler_mut(&mut self) -> Option<&mut UpdateHandler> {
        self.handler.as_mut()
    }

    /// Install the handler called when the group value is assigned
    pub fn set_update_handler(&mut self, handler: UpdateHandler) {
        self.handler = Some(handler);
    }

    /// Restore the invariants between children after child `edited` changed
    ///
    /// Waveform groups keep `Loop Start <= Loop End` by moving the point that
    /// was not edited.
    pub(crate) fn sync(&mut self, edited: usize) {
        if self.kind != GroupKind::Waveform {
            return;
        }
        let (Some(start), Some(end)) = (self.number_at(LOOP_START), self.number_at(LOOP_END))
        else {
            return;
        };
        let (start, end) = (start.value(), end.value());
        if start <= end {
            return;
        }
        let (target, value) = if edited == LOOP_END {
            (LOOP_START, end)
        } else {
            (LOOP_END, start)
        };
        if let Some(item) = self.items.get_mut(target) {
            item.set_value(&Value::Number(value));
        }
    }
}
