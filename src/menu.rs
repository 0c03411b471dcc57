//! Menu navigation
//!
//! A [`Menu`] owns the root [`Group`] and a stack of child indices leading to
//! the selected item. Operations report whether anything visible changed; the
//! caller redraws with its renderer of choice.
//!
//! ## Example
//!
//! ```
//! use synthmenu::{Action, Group, Input, Item, Menu};
//!
//! let mut menu = Menu::new("Main", [
//!     Item::from(Group::mix("Mix")),
//!     Item::from(Action::empty("About")),
//! ]);
//!
//! assert!(menu.handle(Input::Select)); // enter "Mix"
//! assert!(menu.handle(Input::Decrement)); // level 1.0 -> 0.975
//! assert_eq!(menu.selected().title(), "Mix");
//! assert!(menu.handle(Input::Back));
//! assert_eq!(menu.depth(), 0);
//! ```

use alloc::{string::String, vec::Vec};

use crate::data::Data;
use crate::error::PersistError;
use crate::input::Input;
use crate::item::{Group, Item, Selection, Title};

/// Hierarchical menu with a navigation stack
#[derive(Debug)]
pub struct Menu {
    root: Item,
    path: Vec<usize>,
}

fn resolve<'a>(item: &'a Item, path: &[usize]) -> &'a Item {
    path.iter()
        .try_fold(item, |item, &index| item.as_group()?.item(index))
        .unwrap_or(item)
}

fn resolve_mut<'a>(item: &'a mut Item, path: &[usize]) -> &'a mut Item {
    let Some((&index, rest)) = path.split_first() else {
        return item;
    };
    let valid = item
        .as_group()
        .is_some_and(|group| index < group.len());
    if !valid {
        return item;
    }
    match item {
        Item::Group(group) => resolve_mut(&mut group.items_mut()[index], rest),
        other => other,
    }
}

impl Menu {
    /// Menu whose root group holds `items`
    pub fn new(title: impl Into<Title>, items: impl IntoIterator<Item = Item>) -> Self {
        Self::from_group(Group::new(title, items))
    }

    /// Menu over an existing group
    pub fn from_group(group: Group) -> Self {
        Self {
            root: Item::Group(group),
            path: Vec::new(),
        }
    }

    /// Wrap around at the ends of the root group
    pub fn looping(mut self, looping: bool) -> Self {
        if let Some(group) = self.root.as_group_mut() {
            group.set_looping(looping);
        }
        self
    }

    /// Title of the root group
    pub fn title(&self) -> String {
        self.root.title()
    }

    /// The root group as an item
    pub fn root(&self) -> &Item {
        &self.root
    }

    /// The root group as an item, mutable
    pub fn root_mut(&mut self) -> &mut Item {
        &mut self.root
    }

    /// Item at the top of the navigation stack
    pub fn selected(&self) -> &Item {
        resolve(&self.root, &self.path)
    }

    /// Item at the top of the navigation stack, mutable
    pub fn selected_mut(&mut self) -> &mut Item {
        resolve_mut(&mut self.root, &self.path)
    }

    /// Group holding the selected item, `None` at the root
    pub fn parent(&self) -> Option<&Item> {
        let (_, parent) = self.path.split_last()?;
        Some(resolve(&self.root, parent))
    }

    /// Number of levels below the root
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Child indices from the root to the selected item
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Whether the root group is selected
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Select a child of the selected group
    ///
    /// With `None` the group's current child is selected, an explicit index
    /// wraps around and becomes the current child. Groups and value items
    /// are entered, actions run in place and back actions leave the group.
    ///
    /// Returns `false` if the selected item is not a group, the group is
    /// empty, or the child refused the selection.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        let Some(group) = self.selected_mut().as_group_mut() else {
            return false;
        };
        if group.is_empty() {
            return false;
        }
        if let Some(index) = index {
            group.set_index(index as i32);
        }
        let index = group.index();
        let Some(child) = group.current_item_mut() else {
            return false;
        };
        match child.select() {
            Selection::Enter => {
                self.path.push(index);
                log::debug!("menu: entered {}", self.selected().title());
                true
            }
            Selection::Activated => true,
            Selection::Exit => {
                self.exit();
                true
            }
            Selection::Rejected => false,
        }
    }

    /// Move the cursor of the selected group
    pub fn navigate(&mut self, delta: i32) -> bool {
        self.selected_mut().navigate(delta)
    }

    /// Move the cursor of the selected group back by one
    pub fn previous(&mut self) -> bool {
        self.navigate(-1)
    }

    /// Move the cursor of the selected group forward by one
    pub fn next(&mut self) -> bool {
        self.navigate(1)
    }

    /// Leave the selected item, `false` at the root
    pub fn exit(&mut self) -> bool {
        if self.path.pop().is_none() {
            return false;
        }
        log::debug!("menu: back to {}", self.selected().title());
        true
    }

    /// Step the selected item up; the root itself is never stepped
    pub fn increment(&mut self) -> bool {
        let changed = !self.is_root() && self.selected_mut().increment();
        if changed {
            self.sync_parent();
        }
        changed
    }

    /// Step the selected item down; the root itself is never stepped
    pub fn decrement(&mut self) -> bool {
        let changed = !self.is_root() && self.selected_mut().decrement();
        if changed {
            self.sync_parent();
        }
        changed
    }

    /// Reset the selected item, or with `full` every item of the menu
    pub fn reset(&mut self, full: bool) -> bool {
        if full {
            return self.root.reset_all();
        }
        let changed = self.selected_mut().reset();
        if changed {
            self.sync_parent();
        }
        changed
    }

    /// Let the group holding the selected item react to its change
    fn sync_parent(&mut self) {
        let Some((&edited, parent)) = self.path.split_last() else {
            return;
        };
        if let Some(group) = resolve_mut(&mut self.root, parent).as_group_mut() {
            group.sync(edited);
        }
    }

    /// Apply a control input
    ///
    /// `Previous`/`Next` move through a selected group or step a selected
    /// value, `Select` enters the current child (or goes back when there is
    /// nothing to enter) and `Back` leaves the selected item.
    pub fn handle(&mut self, input: Input) -> bool {
        let on_group = self.selected().is_group();
        match input {
            Input::Previous if on_group => self.previous(),
            Input::Next if on_group => self.next(),
            Input::Previous | Input::Decrement => self.decrement(),
            Input::Next | Input::Increment => self.increment(),
            Input::Select => self.select(None) || self.exit(),
            Input::Back => self.exit(),
        }
    }

    /// Direct child of the root titled `title`
    pub fn find(&self, title: &str) -> Option<&Item> {
        self.root.as_group()?.find(title)
    }

    /// Direct child of the root titled `title`, mutable
    pub fn find_mut(&mut self, title: &str) -> Option<&mut Item> {
        self.root.as_group_mut()?.find_mut(title)
    }

    /// Persisted state of the whole menu
    pub fn data(&self) -> Data {
        self.root.data().unwrap_or_else(|| Data::Map(Default::default()))
    }

    /// Restore persisted state, ignoring unknown titles
    pub fn set_data(&mut self, data: &Data) {
        self.root.set_data(data);
    }

    /// Menu state as a JSON document
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string(&self.data())?)
    }

    /// Restore menu state from a JSON document
    ///
    /// Returns `Ok(false)` if the document is an empty object.
    ///
    /// # Errors
    ///
    /// - [`PersistError::Json`] for malformed JSON
    /// - [`PersistError::NotAnObject`] if the document is not an object
    pub fn load_json(&mut self, json: &str) -> Result<bool, PersistError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        if !document.is_object() {
            return Err(PersistError::NotAnObject);
        }
        let data: Data = serde_json::from_value(document)?;
        if data.is_empty() {
            return Ok(false);
        }
        self.set_data(&data);
        Ok(true)
    }

    /// Save the menu state as JSON
    ///
    /// # Errors
    ///
    /// - [`PersistError::InvalidExtension`] unless the path ends in `.json`
    /// - [`PersistError::Empty`] if there is nothing to save
    /// - [`PersistError::Io`] if the file can't be written
    #[cfg(feature = "std")]
    pub fn write_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        check_extension(path)?;
        let data = self.data();
        if data.is_empty() {
            return Err(PersistError::Empty);
        }
        let json = serde_json::to_string(&data)?;
        std::fs::write(path, json).inspect_err(|e| {
            log::warn!("menu: failed to write {}: {e}", path.display());
        })?;
        Ok(())
    }

    /// Load the menu state from JSON
    ///
    /// Returns `Ok(false)` if the file does not exist or holds an empty
    /// object.
    ///
    /// # Errors
    ///
    /// - [`PersistError::InvalidExtension`] unless the path ends in `.json`
    /// - [`PersistError::Io`] if the file exists but can't be read
    /// - [`PersistError::Json`] or [`PersistError::NotAnObject`] for bad contents
    #[cfg(feature = "std")]
    pub fn read_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<bool, PersistError> {
        let path = path.as_ref();
        check_extension(path)?;
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                log::warn!("menu: failed to read {}: {e}", path.display());
                return Err(e.into());
            }
        };
        self.load_json(&json).inspect_err(|e| {
            log::warn!("menu: ignoring {}: {e}", path.display());
        })
    }
}

#[cfg(feature = "std")]
fn check_extension(path: &std::path::Path) -> Result<(), PersistError> {
    if path.extension().is_some_and(|extension| extension == "json") {
        Ok(())
    } else {
        Err(PersistError::InvalidExtension)
    }
}
