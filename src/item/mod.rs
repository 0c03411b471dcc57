//! Menu items
//!
//! Every entry of a menu is an [`Item`]. The set of kinds is closed: actions,
//! number-like values ([`Number`], [`Bool`], [`List`], [`Char`],
//! [`WaveformList`], plus the `Percentage` and `Time` flavours of [`Number`])
//! and [`Group`]s of further items.
//!
//! Operations that change state return `true` when something visible changed,
//! so the caller knows when to redraw.
//!
//! ## Example
//!
//! ```
//! use synthmenu::{Bool, Item, Title, Value};
//!
//! let mut item = Item::from(Bool::new(Title::kind()));
//! assert_eq!(item.title(), "Bool");
//! assert_eq!(item.label(), "Off");
//!
//! assert!(item.increment());
//! assert_eq!(item.value(), Value::Bool(true));
//! assert_eq!(item.label(), "On");
//! ```

mod action;
mod group;
mod number;
mod options;

pub use action::{Action, ActionHandler};
pub use group::{Group, GroupKind};
pub use number::{Number, NumberBuilder};
pub use options::{Bool, CHARACTERS, Char, List, Shape, WaveformList};

pub(crate) use number::round;

use alloc::{boxed::Box, format, string::String, vec::Vec};

use crate::data::Data;

/// Callback invoked with the new value whenever an item changes
pub type UpdateHandler = Box<dyn FnMut(&Value)>;

/// Item title, either fixed text or derived from the item itself
#[derive(Clone, Debug)]
pub enum Title {
    /// Fixed text
    Fixed(String),
    /// Computed on demand from the item
    Computed(fn(&Item) -> String),
}

impl Title {
    /// Title showing the kind of the item, e.g. `"Number"` or `"ADSREnvelope"`
    pub fn kind() -> Self {
        Self::Computed(|item| String::from(item.kind_name()))
    }
}

impl From<&str> for Title {
    fn from(title: &str) -> Self {
        Self::Fixed(String::from(title))
    }
}

impl From<String> for Title {
    fn from(title: String) -> Self {
        Self::Fixed(title)
    }
}

/// Dynamic item value
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Items without a value (actions)
    None,
    /// Numeric value, in display units
    Number(f32),
    /// Boolean value
    Bool(bool),
    /// Single character
    Char(char),
    /// Text value of a string editor
    Text(String),
    /// Values of the children of a group, in order
    Tuple(Vec<Value>),
}

/// Outcome of selecting an item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The item becomes the selected item of the menu
    Enter,
    /// The item ran its action and the selection stays where it is
    Activated,
    /// The item asks the menu to go back one level
    Exit,
    /// The item can't be selected
    Rejected,
}

/// A single menu entry
#[derive(Debug)]
pub enum Item {
    /// Selectable action
    Action(Action),
    /// Plain number
    Number(Number),
    /// On/off switch
    Bool(Bool),
    /// Number between 0 and 1 shown as a percentage
    Percentage(Number),
    /// Duration in seconds
    Time(Number),
    /// Choice from a list of labels
    List(List),
    /// Single character
    Char(Char),
    /// Choice from a list of waveform shapes
    WaveformList(WaveformList),
    /// Group of items
    Group(Group),
}

impl Item {
    /// Percentage item with default settings
    pub fn percentage(title: impl Into<Title>) -> Self {
        Self::Percentage(Number::percentage(title).assemble())
    }

    /// Time item with default settings
    pub fn time(title: impl Into<Title>) -> Self {
        Self::Time(Number::time(title).assemble())
    }

    /// Resolved title of the item
    pub fn title(&self) -> String {
        match self.title_spec() {
            Title::Fixed(title) => title.clone(),
            Title::Computed(compute) => compute(self),
        }
    }

    fn title_spec(&self) -> &Title {
        match self {
            Self::Action(action) => action.title(),
            Self::Group(group) => group.title(),
            Self::Number(number) | Self::Percentage(number) | Self::Time(number) => {
                number.title()
            }
            Self::Bool(item) => item.number().title(),
            Self::List(item) => item.number().title(),
            Self::Char(item) => item.number().title(),
            Self::WaveformList(item) => item.number().title(),
        }
    }

    /// Name of the item kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Action(_) => "Action",
            Self::Number(_) => "Number",
            Self::Bool(_) => "Bool",
            Self::Percentage(_) => "Percentage",
            Self::Time(_) => "Time",
            Self::List(_) => "List",
            Self::Char(_) => "Char",
            Self::WaveformList(_) => "WaveformList",
            Self::Group(group) => group.kind().name(),
        }
    }

    /// Text shown next to the title
    pub fn label(&self) -> String {
        match self {
            Self::Action(_) => String::new(),
            Self::Number(number) | Self::Time(number) => number.label(),
            Self::Percentage(number) => format!("{}%", round(number.value() * 100.0)),
            Self::Bool(item) => String::from(item.label()),
            Self::List(item) => String::from(item.label()),
            Self::Char(item) => item.label(),
            Self::WaveformList(item) => String::from(item.label()),
            Self::Group(group) => group.label(),
        }
    }

    /// Current value
    pub fn value(&self) -> Value {
        match self {
            Self::Action(_) => Value::None,
            Self::Number(number) | Self::Percentage(number) | Self::Time(number) => {
                Value::Number(number.value())
            }
            Self::Bool(item) => Value::Bool(item.is_on()),
            Self::List(item) => Value::Number(item.index() as f32),
            Self::Char(item) => Value::Char(item.character()),
            Self::WaveformList(item) => Value::Number(item.index() as f32),
            Self::Group(group) => group.value(),
        }
    }

    /// Assign a value
    ///
    /// Values of the wrong shape are ignored. Numbers are clamped to their
    /// range.
    pub fn set_value(&mut self, value: &Value) {
        let changed = match (&mut *self, value) {
            (Self::Action(_), _) => false,
            (Self::Group(group), value) => group.set_value(value),
            (Self::Bool(item), Value::Bool(on)) => item.set(*on),
            (Self::Bool(item), Value::Number(number)) => item.set(*number != 0.0),
            (Self::Char(item), Value::Char(character)) => item.set_char(*character),
            (Self::Char(item), Value::Text(text)) => {
                text.chars().next().is_some_and(|c| item.set_char(c))
            }
            (Self::Char(item), Value::Number(index)) => item.set_index(round(*index)),
            (Self::List(item), Value::Number(index)) => item.select(round(*index)),
            (Self::WaveformList(item), Value::Number(index)) => item.select(round(*index)),
            (
                Self::Number(number) | Self::Percentage(number) | Self::Time(number),
                Value::Number(value),
            ) => number.set_value(*value),
            _ => false,
        };
        if changed {
            self.notify();
        }
    }

    /// Persisted state, `None` for items without state
    pub fn data(&self) -> Option<Data> {
        match self {
            Self::Action(_) => None,
            Self::Group(group) => Some(group.data()),
            _ => self.as_number().map(|number| Data::Number(number.raw())),
        }
    }

    /// Restore persisted state
    pub fn set_data(&mut self, data: &Data) {
        let changed = match (&mut *self, data) {
            (Self::Group(group), data) => group.set_data(data) && group.kind() == GroupKind::Text,
            (Self::Char(item), Data::Number(index)) => item.set_index(round(*index)),
            (Self::Bool(item), Data::Number(raw)) => item.set(*raw != 0.0),
            (Self::List(item), Data::Number(index)) => item.select(round(*index)),
            (Self::WaveformList(item), Data::Number(index)) => item.select(round(*index)),
            (
                Self::Number(number) | Self::Percentage(number) | Self::Time(number),
                Data::Number(raw),
            ) => number.set_raw(*raw),
            _ => false,
        };
        if changed {
            self.notify();
        }
    }

    /// Run the selection behaviour of the item
    ///
    /// Empty groups can't be entered.
    pub fn select(&mut self) -> Selection {
        match self {
            Self::Action(action) => action.select(),
            Self::Group(group) if group.is_empty() => Selection::Rejected,
            _ => Selection::Enter,
        }
    }

    /// Move the cursor of a group, `false` for every other item
    pub fn navigate(&mut self, delta: i32) -> bool {
        match self {
            Self::Group(group) => group.navigate(delta),
            _ => false,
        }
    }

    /// Move the cursor of a group back by one
    pub fn previous(&mut self) -> bool {
        self.navigate(-1)
    }

    /// Move the cursor of a group forward by one
    pub fn next(&mut self) -> bool {
        self.navigate(1)
    }

    /// Step the value up
    pub fn increment(&mut self) -> bool {
        if let Self::Group(group) = self {
            return group.increment();
        }
        let changed = self.as_number_mut().is_some_and(|number| number.increment());
        if changed {
            self.notify();
        }
        changed
    }

    /// Step the value down
    pub fn decrement(&mut self) -> bool {
        if let Self::Group(group) = self {
            return group.decrement();
        }
        let changed = self.as_number_mut().is_some_and(|number| number.decrement());
        if changed {
            self.notify();
        }
        changed
    }

    /// Restore the default value (for groups: of the current child)
    pub fn reset(&mut self) -> bool {
        if let Self::Group(group) = self {
            return group.reset();
        }
        let changed = self.as_number_mut().is_some_and(|number| number.reset());
        if changed {
            self.notify();
        }
        changed
    }

    /// Restore the default value of this item and every descendant
    pub fn reset_all(&mut self) -> bool {
        match self {
            Self::Group(group) => group.reset_all(),
            _ => self.reset(),
        }
    }

    /// Install an update handler
    ///
    /// Actions have no value and ignore the handler.
    pub fn with_update_handler(mut self, handler: impl FnMut(&Value) + 'static) -> Self {
        let handler: UpdateHandler = Box::new(handler);
        if let Self::Group(group) = &mut self {
            group.set_update_handler(handler);
        } else if let Some(number) = self.as_number_mut() {
            number.set_update_handler(handler);
        }
        self
    }

    /// Whether the item is a group
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// The item as a group
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    /// The item as a mutable group
    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Numeric core of number-like items
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(number) | Self::Percentage(number) | Self::Time(number) => Some(number),
            Self::Bool(item) => Some(item.number()),
            Self::List(item) => Some(item.number()),
            Self::Char(item) => Some(item.number()),
            Self::WaveformList(item) => Some(item.number()),
            Self::Action(_) | Self::Group(_) => None,
        }
    }

    fn as_number_mut(&mut self) -> Option<&mut Number> {
        match self {
            Self::Number(number) | Self::Percentage(number) | Self::Time(number) => Some(number),
            Self::Bool(item) => Some(item.number_mut()),
            Self::List(item) => Some(item.number_mut()),
            Self::Char(item) => Some(item.number_mut()),
            Self::WaveformList(item) => Some(item.number_mut()),
            Self::Action(_) | Self::Group(_) => None,
        }
    }

    fn notify(&mut self) {
        let value = self.value();
        let handler = match self {
            Self::Action(_) => None,
            Self::Group(group) => group.handler_mut(),
            Self::Number(number) | Self::Percentage(number) | Self::Time(number) => {
                number.handler_mut()
            }
            Self::Bool(item) => item.number_mut().handler_mut(),
            Self::List(item) => item.number_mut().handler_mut(),
            Self::Char(item) => item.number_mut().handler_mut(),
            Self::WaveformList(item) => item.number_mut().handler_mut(),
        };
        if let Some(handler) = handler {
            handler(&value);
        }
    }
}

impl From<Action> for Item {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}

impl From<Number> for Item {
    fn from(number: Number) -> Self {
        Self::Number(number)
    }
}

impl From<Bool> for Item {
    fn from(item: Bool) -> Self {
        Self::Bool(item)
    }
}

impl From<List> for Item {
    fn from(item: List) -> Self {
        Self::List(item)
    }
}

impl From<Char> for Item {
    fn from(item: Char) -> Self {
        Self::Char(item)
    }
}

impl From<WaveformList> for Item {
    fn from(item: WaveformList) -> Self {
        Self::WaveformList(item)
    }
}

impl From<Group> for Item {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}
