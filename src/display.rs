//! Character display operations
//!
//! [`CharacterDisplay`] drives an HD44780 controller through an
//! [`LcdInterface`] and renders a [`Menu`] as text:
//!
//! ```text
//! Syn:Filter      <- parent group title, ':', current item title
//! >               <- current item label
//! ```
//!
//! When a value is being edited the heading shows the group it lives in and
//! the value's own title, and the second line shows the value.

use alloc::{format, string::String, vec::Vec};

use embedded_hal::delay::DelayNs;

use crate::command::{
    CLEAR_DISPLAY, ENTRY_LEFT, ENTRY_MODE_SET, RETURN_HOME, SET_DDRAM_ADDR,
};
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::interface::LcdInterface;
use crate::item::Item;
use crate::menu::Menu;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Character written in place of anything the controller's ROM can't show
const REPLACEMENT: u8 = b'?';

/// Lines of text showing the selected item of `menu`
///
/// Every line is exactly `dimensions.columns` characters long.
pub fn compose_lines(menu: &Menu, dimensions: &Dimensions) -> Vec<String> {
    let selected = menu.selected();
    let (heading, item) = match selected.as_group() {
        Some(group) => (selected.title(), group.current_item()),
        None => (
            menu.parent().map(Item::title).unwrap_or_default(),
            Some(selected),
        ),
    };
    let title = item.map(Item::title).unwrap_or_default();
    let label = item.map(Item::label).unwrap_or_default();

    let group_width = dimensions.group_width();
    let item_width = dimensions.item_width();
    let width = usize::from(dimensions.columns);

    let mut lines = Vec::with_capacity(usize::from(dimensions.lines));
    lines.push(format!(
        "{heading:<group_width$.group_width$}:{title:<item_width$.item_width$}"
    ));
    lines.push(format!("{label:<width$.width$}"));
    while lines.len() < usize::from(dimensions.lines) {
        lines.push(format!("{:width$}", ""));
    }
    lines
}

/// Menu renderer for HD44780 character displays
///
/// Keeps the last frame and only rewrites lines that changed.
pub struct CharacterDisplay<I>
where
    I: LcdInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Lines currently on the glass
    shown: Vec<String>,
}

impl<I> CharacterDisplay<I>
where
    I: LcdInterface,
{
    /// Create a new CharacterDisplay
    ///
    /// Call [`reset`](Self::reset) before drawing.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            shown: Vec::new(),
        }
    }

    /// Initialise the controller: bus mode, function set, display on, clear
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.initialize(delay).map_err(Error::Interface)?;
        self.command(self.config.function_set(), delay)?;
        self.command(self.config.display_control(true), delay)?;
        self.clear(delay)?;
        self.command(ENTRY_MODE_SET | ENTRY_LEFT, delay)
    }

    /// Blank the display and forget the shown frame
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.command(CLEAR_DISPLAY, delay)?;
        delay.delay_ms(2);
        self.shown.clear();
        Ok(())
    }

    /// Move the cursor to the first position
    pub fn home<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.command(RETURN_HOME, delay)?;
        delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPosition`] if the position is outside the display.
    pub fn set_cursor<D: DelayNs>(
        &mut self,
        column: u8,
        line: u8,
        delay: &mut D,
    ) -> DisplayResult<I> {
        let dimensions = self.config.dimensions;
        let offset = dimensions
            .row_offset(line)
            .filter(|_| column < dimensions.columns)
            .ok_or(Error::InvalidPosition { column, line })?;
        self.command(SET_DDRAM_ADDR | (offset + column), delay)
    }

    /// Write text at the cursor
    ///
    /// Characters outside printable ASCII are written as `?`.
    pub fn write_str<D: DelayNs>(&mut self, text: &str, delay: &mut D) -> DisplayResult<I> {
        for character in text.chars() {
            let byte = if character.is_ascii() && !character.is_ascii_control() {
                character as u8
            } else {
                REPLACEMENT
            };
            self.interface
                .write_data(byte, delay)
                .map_err(Error::Interface)?;
        }
        Ok(())
    }

    /// Switch the display on or off, keeping its contents
    pub fn set_display_enabled<D: DelayNs>(&mut self, on: bool, delay: &mut D) -> DisplayResult<I> {
        self.command(self.config.display_control(on), delay)
    }

    /// Render the selected item of `menu`
    ///
    /// Only lines that differ from the previous frame are written.
    pub fn draw<D: DelayNs>(&mut self, menu: &Menu, delay: &mut D) -> DisplayResult<I> {
        let lines = compose_lines(menu, &self.config.dimensions);
        for (index, line) in lines.iter().enumerate() {
            if self.shown.get(index) == Some(line) {
                continue;
            }
            log::trace!("lcd: line {index} = {line:?}");
            self.set_cursor(0, index as u8, delay)?;
            self.write_str(line, delay)?;
        }
        self.shown = lines;
        Ok(())
    }

    /// Force the next [`draw`](Self::draw) to rewrite every line
    pub fn invalidate(&mut self) {
        self.shown.clear();
    }

    /// Display dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions
    }

    /// Display configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the interface back
    pub fn release(self) -> I {
        self.interface
    }

    fn command<D: DelayNs>(&mut self, command: u8, delay: &mut D) -> DisplayResult<I> {
        self.interface
            .write_command(command, delay)
            .map_err(Error::Interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::item::{Action, Group, Item};
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use core::convert::Infallible;

    /// Bytes written, `true` for character data
    type Log = Rc<RefCell<Vec<(bool, u8)>>>;

    #[derive(Debug)]
    struct MockInterface {
        log: Log,
    }

    impl LcdInterface for MockInterface {
        type Error = Infallible;

        fn initialize<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write_command<D: DelayNs>(&mut self, command: u8, _delay: &mut D) -> Result<(), Self::Error> {
            self.log.borrow_mut().push((false, command));
            Ok(())
        }

        fn write_data<D: DelayNs>(&mut self, data: u8, _delay: &mut D) -> Result<(), Self::Error> {
            self.log.borrow_mut().push((true, data));
            Ok(())
        }
    }

    struct MockDelay;

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn display(columns: u8, lines: u8) -> (CharacterDisplay<MockInterface>, Log) {
        let log = Log::default();
        let config = Builder::new()
            .dimensions(Dimensions::new(columns, lines).unwrap())
            .build()
            .unwrap();
        let interface = MockInterface {
            log: Rc::clone(&log),
        };
        (CharacterDisplay::new(interface, config), log)
    }

    fn text(log: &Log) -> String {
        log.borrow()
            .iter()
            .filter(|(data, _)| *data)
            .map(|(_, byte)| char::from(*byte))
            .collect()
    }

    fn menu() -> Menu {
        Menu::new(
            "Chain",
            [
                Item::from(Action::empty("Action")),
                Item::from(Group::mix("Mix")),
            ],
        )
    }

    #[test]
    fn test_compose_root() {
        let dims = Dimensions::new(16, 2).unwrap();
        let lines = compose_lines(&menu(), &dims);
        assert_eq!(lines, vec!["Cha:Action      ", "                "]);
    }

    #[test]
    fn test_compose_group_and_value() {
        let dims = Dimensions::new(16, 4).unwrap();
        let mut menu = menu();
        menu.select(Some(1));
        let lines = compose_lines(&menu, &dims);
        assert_eq!(lines[0], "Mix:Level       ");
        assert_eq!(lines[1], "1.0             ");
        assert_eq!(lines[3], "                ");

        menu.select(Some(1));
        let lines = compose_lines(&menu, &dims);
        assert_eq!(lines[0], "Mix:Pan         ");
        assert_eq!(lines[1], "0.0             ");
    }

    #[test]
    fn test_compose_truncates() {
        let dims = Dimensions::new(8, 2).unwrap();
        let menu = Menu::new("Main", [Item::from(Group::adsr_envelope("Envelope"))]);
        let lines = compose_lines(&menu, &dims);
        assert_eq!(lines, vec!["M:Envelo", ">       "]);
    }

    #[test]
    fn test_reset_sequence() {
        let (mut display, log) = display(16, 2);
        display.reset(&mut MockDelay).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![(false, 0x28), (false, 0x0C), (false, 0x01), (false, 0x06)]
        );
    }

    #[test]
    fn test_set_cursor_bounds() {
        let (mut display, log) = display(20, 4);
        display.set_cursor(3, 3, &mut MockDelay).unwrap();
        assert_eq!(log.borrow().last(), Some(&(false, 0x80 | 0x57)));
        assert!(matches!(
            display.set_cursor(20, 0, &mut MockDelay),
            Err(Error::InvalidPosition { column: 20, line: 0 })
        ));
        assert!(matches!(
            display.set_cursor(0, 4, &mut MockDelay),
            Err(Error::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_write_str_replaces_unsupported() {
        let (mut display, log) = display(16, 2);
        display.write_str("a\u{e9}\n", &mut MockDelay).unwrap();
        assert_eq!(text(&log), "a??");
    }

    #[test]
    fn test_draw_rewrites_changed_lines_only() {
        let (mut display, log) = display(16, 2);
        let mut menu = menu();
        display.draw(&menu, &mut MockDelay).unwrap();
        assert_eq!(text(&log), "Cha:Action                      ");

        log.borrow_mut().clear();
        display.draw(&menu, &mut MockDelay).unwrap();
        assert!(log.borrow().is_empty());

        menu.next();
        display.draw(&menu, &mut MockDelay).unwrap();
        assert_eq!(text(&log), "Cha:Mix         >               ");

        log.borrow_mut().clear();
        menu.select(None);
        menu.select(Some(1));
        menu.decrement();
        display.draw(&menu, &mut MockDelay).unwrap();
        assert_eq!(text(&log), "Mix:Pan         -0.1            ");

        log.borrow_mut().clear();
        menu.decrement();
        display.draw(&menu, &mut MockDelay).unwrap();
        let mut expected = vec![(false, 0xC0)];
        expected.extend("-0.2            ".bytes().map(|b| (true, b)));
        assert_eq!(*log.borrow(), expected);
    }
}
