use alloc::boxed::Box;

use super::{Selection, Title};

/// Callback run when an action is selected
pub type ActionHandler = Box<dyn FnMut()>;

/// Selectable entry without a value
///
/// Selecting an action runs its handler. A "back" action additionally asks
/// the menu to leave the current group.
pub struct Action {
    title: Title,
    handler: Option<ActionHandler>,
    exits: bool,
}

impl core::fmt::Debug for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Action")
            .field("title", &self.title)
            .field("exits", &self.exits)
            .finish_non_exhaustive()
    }
}

impl Action {
    /// Action running `handler` on selection
    pub fn new(title: impl Into<Title>, handler: impl FnMut() + 'static) -> Self {
        Self {
            title: title.into(),
            handler: Some(Box::new(handler)),
            exits: false,
        }
    }

    /// Action that does nothing when selected
    pub fn empty(title: impl Into<Title>) -> Self {
        Self {
            title: title.into(),
            handler: None,
            exits: false,
        }
    }

    /// Action leaving the group it is in
    pub fn back(title: impl Into<Title>) -> Self {
        Self {
            title: title.into(),
            handler: None,
            exits: true,
        }
    }

    /// Title of the action
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Whether selecting the action leaves the current group
    pub fn exits(&self) -> bool {
        self.exits
    }

    /// Run the handler
    pub fn select(&mut self) -> Selection {
        if let Some(handler) = self.handler.as_mut() {
            handler();
        }
        if self.exits {
            Selection::Exit
        } else {
            Selection::Activated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn test_handler_runs_on_select() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let mut action = Action::new("Count", move || counter.set(counter.get() + 1));

        assert_eq!(action.select(), Selection::Activated);
        assert_eq!(action.select(), Selection::Activated);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_back_exits() {
        let mut action = Action::back("Back");
        assert!(action.exits());
        assert_eq!(action.select(), Selection::Exit);
    }
}
