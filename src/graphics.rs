//! Graphics support via embedded-graphics
//!
//! This module provides [`GraphicMenu`], a renderer that draws a [`Menu`] on
//! any [`DrawTarget`], e.g. an SSD1306 OLED driver or a simulator window.
//!
//! ## Layout
//!
//! The screen is split into 16 pixel lines. The first line is the title bar,
//! the rest is the body:
//!
//! - groups show a scrolling list of rows with a scrollbar on the right
//! - values show their label centred in the body
//! - string editors show the text with an underline under the edited character
//! - waveforms and envelopes show a chart with markers for the edited point
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics_core::{
//!     draw_target::DrawTarget,
//!     geometry::{OriginDimensions, Size},
//!     pixelcolor::BinaryColor,
//!     Pixel,
//! };
//! use synthmenu::{GraphicMenu, Group, Item, Menu, Theme};
//! # use core::convert::Infallible;
//! # struct Oled;
//! # impl OriginDimensions for Oled { fn size(&self) -> Size { Size::new(128, 64) } }
//! # impl DrawTarget for Oled {
//! #     type Color = BinaryColor;
//! #     type Error = Infallible;
//! #     fn draw_iter<I: IntoIterator<Item = Pixel<BinaryColor>>>(&mut self, _: I) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let mut oled = Oled;
//! let menu = Menu::new("Synth", [
//!     Item::from(Group::adsr_envelope("Envelope")),
//!     Item::from(Group::mix("Mix")),
//! ]);
//!
//! let renderer = match GraphicMenu::new(oled.size(), Theme::<BinaryColor>::default()) {
//!     Ok(renderer) => renderer,
//!     Err(_) => return,
//! };
//! assert_eq!(renderer.lines(), 3);
//! let _ = renderer.draw(&menu, &mut oled);
//! ```

use alloc::{format, string::String, vec::Vec};

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10},
    primitives::{Polyline, Primitive, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use embedded_graphics_core::{
    Drawable,
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::PixelColor,
};

use crate::error::BuilderError;
use crate::item::{Group, GroupKind, Item, Number, round};
use crate::menu::Menu;
use crate::theme::Theme;

/// Height of the title bar and of every row
pub const LINE_SIZE: u32 = 16;
/// Row outline width
pub const BORDER_WIDTH: u32 = 1;
/// Space between the row outline and its text
pub const PADDING: u32 = 2;
/// Width of the scrollbar
pub const SCROLLBAR_WIDTH: u32 = 2;
/// Thickness of chart lines and markers
pub const INDICATOR_STROKE: u32 = 2;
/// Space between markers and the text or chart edge they belong to
pub const INDICATOR_MARGIN: u32 = 2;

/// Narrowest display with room for a row outline, its padding and the scrollbar
pub const MIN_WIDTH: u32 = SCROLLBAR_WIDTH + 2 * (BORDER_WIDTH + PADDING);

/// Samples drawn per pixel of width on waveform charts
const WAVEFORM_RESOLUTION: u32 = 4;

/// What the body of the screen shows
enum Screen<'a> {
    List(&'a Group),
    Value(&'a Item),
    Text(&'a Group),
    Waveform {
        samples: &'a [i16],
        loop_points: Option<(f32, f32)>,
    },
    Envelope(&'a Group),
}

impl<'a> Screen<'a> {
    fn of(item: &'a Item) -> Self {
        match item {
            Item::Group(group) => match group.kind() {
                GroupKind::Text => Self::Text(group),
                GroupKind::Waveform => Self::Waveform {
                    samples: group.waveform_list().map(|list| list.samples()).unwrap_or_default(),
                    loop_points: Some((
                        number_value(group.number_at(1)),
                        number_value(group.number_at(2)),
                    )),
                },
                kind if kind.is_envelope() => Self::Envelope(group),
                _ => Self::List(group),
            },
            Item::WaveformList(list) => Self::Waveform {
                samples: list.samples(),
                loop_points: None,
            },
            item => Self::Value(item),
        }
    }
}

fn number_value(number: Option<&Number>) -> f32 {
    number.map(Number::value).unwrap_or_default()
}

fn relative_value(number: Option<&Number>) -> f32 {
    number.map(Number::relative_value).unwrap_or_default()
}

/// Title bar text for the selected item
///
/// Editors made of several values (strings, waveforms, envelopes) name the
/// child being edited, waveform lists name the chosen shape.
pub fn title(item: &Item) -> String {
    match item {
        Item::Group(group) if !matches!(Screen::of(item), Screen::List(_)) => {
            let child = group.current_item().map(Item::title).unwrap_or_default();
            format!("{}: {}", item.title(), child)
        }
        Item::WaveformList(list) => format!("{}: {}", item.title(), list.label()),
        _ => item.title(),
    }
}

/// First row shown when `index` of `len` items is current
///
/// The current row is kept in the middle. Non-looping lists stop scrolling
/// at either end, looping lists may start before zero and wrap.
pub fn scroll_start(index: usize, len: usize, lines: u32, looping: bool) -> i32 {
    let start = index as i32 - lines as i32 / 2;
    if looping {
        start
    } else {
        start.min((len as i32 - lines as i32).max(0)).max(0)
    }
}

/// Segment times and levels of an envelope group, in chart order
fn envelope_values(group: &Group) -> Vec<(f32, f32)> {
    let relative = |index| relative_value(group.number_at(index));
    let value = |index| number_value(group.number_at(index));
    match group.kind() {
        GroupKind::AdsrEnvelope => alloc::vec![
            (relative(0), value(1)),
            (relative(2), value(3)),
            (relative(4), value(3)),
        ],
        _ => alloc::vec![(relative(0), value(1)), (relative(2), value(1))],
    }
}

/// Horizontal position of the edited segment of an envelope, `0..=1`
pub fn envelope_marker(group: &Group) -> f32 {
    let relative = |index| relative_value(group.number_at(index));
    let index = group.index();
    if group.kind() == GroupKind::AdsrEnvelope {
        let (attack, decay, release) = (relative(0), relative(2), relative(4));
        match index {
            0 => attack / 8.0,
            1 => attack / 4.0,
            2 => attack / 4.0 + decay / 8.0,
            3 => (1.0 - (attack + decay + release) / 4.0) / 2.0 + (attack + decay) / 4.0,
            _ => 1.0 - release / 8.0,
        }
    } else {
        let (attack, release) = (relative(0), relative(2));
        match index {
            0 => attack / 6.0,
            1 => (1.0 - (attack + release) / 3.0) / 2.0 + attack / 3.0,
            _ => 1.0 - release / 6.0,
        }
    }
}

/// Menu renderer for pixel displays
///
/// The renderer holds no menu state; call [`draw`](Self::draw) whenever a
/// menu operation reports a change.
///
/// ## Type Parameters
///
/// * `C` - Colour type of the target display
#[derive(Clone, Copy)]
pub struct GraphicMenu<C: PixelColor> {
    size: Size,
    theme: Theme<C>,
    font: &'static MonoFont<'static>,
}

impl<C: PixelColor + core::fmt::Debug> core::fmt::Debug for GraphicMenu<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GraphicMenu")
            .field("size", &self.size)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl<C: PixelColor> GraphicMenu<C> {
    /// Create a renderer for a display of `size`
    ///
    /// # Errors
    ///
    /// [`BuilderError::TooFewLines`] if the display fits fewer than two rows
    /// below the title bar, [`BuilderError::TooNarrow`] if it is narrower
    /// than [`MIN_WIDTH`].
    pub fn new(size: Size, theme: Theme<C>) -> Result<Self, BuilderError> {
        if size.width < MIN_WIDTH {
            return Err(BuilderError::TooNarrow { width: size.width });
        }
        let lines = (size.height / LINE_SIZE).saturating_sub(1);
        if lines < 2 {
            return Err(BuilderError::TooFewLines { lines });
        }
        Ok(Self {
            size,
            theme,
            font: &FONT_6X10,
        })
    }

    /// Use another monospaced font
    ///
    /// Fonts taller than about 12 pixels don't fit the rows.
    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    /// Number of rows below the title bar
    pub fn lines(&self) -> u32 {
        self.size.height / LINE_SIZE - 1
    }

    /// Display size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Colour scheme
    pub fn theme(&self) -> &Theme<C> {
        &self.theme
    }

    /// Colour scheme, mutable
    pub fn theme_mut(&mut self) -> &mut Theme<C> {
        &mut self.theme
    }

    /// Render the selected item of `menu`
    ///
    /// The whole screen is redrawn.
    pub fn draw<D>(&self, menu: &Menu, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let item = menu.selected();
        log::trace!("graphics: drawing {}", item.title());

        self.fill(Point::zero(), self.size, self.theme.background, target)?;
        self.draw_title(&title(item), target)?;

        match Screen::of(item) {
            Screen::List(group) => self.draw_list(group, target),
            Screen::Value(item) => self.draw_value(&item.label(), target),
            Screen::Text(group) => {
                self.draw_value(&group.text_value(), target)?;
                self.draw_text_indicator(group.len(), group.index(), target)
            }
            Screen::Waveform {
                samples,
                loop_points,
            } => {
                self.draw_chart(&self.waveform_points(samples), target)?;
                if let Some((start, end)) = loop_points {
                    self.draw_marker(self.loop_marker_x(start), target)?;
                    self.draw_marker(self.loop_marker_x(end), target)?;
                }
                Ok(())
            }
            Screen::Envelope(group) => {
                self.draw_chart(&self.envelope_points(&envelope_values(group)), target)?;
                let span = self.size.width.saturating_sub(INDICATOR_STROKE) as f32;
                self.draw_marker(round(envelope_marker(group) * span), target)
            }
        }
    }

    /// Scrollbar for `index` of `len` rows
    pub fn scrollbar(&self, index: usize, len: usize) -> Option<Rectangle> {
        if len == 0 {
            return None;
        }
        let body = self.size.height - LINE_SIZE;
        let height = body / len as u32;
        let travel = (body - height) as usize;
        let y = LINE_SIZE as usize + travel * index / (len - 1).max(1);
        Some(Rectangle::new(
            Point::new((self.size.width - SCROLLBAR_WIDTH) as i32, y as i32),
            Size::new(SCROLLBAR_WIDTH, height),
        ))
    }

    /// Height of the chart area below the title bar
    fn chart_height(&self) -> i32 {
        (self.size.height - LINE_SIZE - 1) as i32
    }

    /// Top of the chart area
    fn chart_top(&self) -> i32 {
        (LINE_SIZE + 1) as i32
    }

    /// Chart outline of `samples`, resampled to a quarter of the width
    pub fn waveform_points(&self, samples: &[i16]) -> Vec<Point> {
        if samples.is_empty() {
            return Vec::new();
        }
        let width = self.size.width;
        let count = (width / WAVEFORM_RESOLUTION).clamp(1, width.max(1));
        let height = self.chart_height();
        let step = samples.len() as f32 / count as f32;

        (0..count)
            .map(|i| {
                let position = i as f32 * step;
                let index = position as usize;
                let fraction = position - index as f32;
                let current = f32::from(samples[index.min(samples.len() - 1)]);
                let next = f32::from(samples[(index + 1).min(samples.len() - 1)]);
                let sample = current + (next - current) * fraction;

                let y = ((1.0 - sample / 32767.0) * height as f32 / 2.0) as i32;
                let y = y.clamp(0, height - INDICATOR_STROKE as i32);
                Point::new((i * width / count) as i32, self.chart_top() + y)
            })
            .collect()
    }

    /// Chart outline of an envelope from `(time, level)` segments
    ///
    /// Every segment but the last starts where the previous one ended; the
    /// last one is measured back from the right edge.
    pub fn envelope_points(&self, values: &[(f32, f32)]) -> Vec<Point> {
        let right = self.size.width.saturating_sub(1) as f32;
        let floor = self.chart_height() - INDICATOR_STROKE as i32;
        let parts = (values.len() + 1) as f32;
        let top = self.chart_top();

        let mut points = Vec::with_capacity(values.len() + 2);
        points.push(Point::new(0, top + floor));
        let mut x = 0;
        for (i, &(time, level)) in values.iter().enumerate() {
            x = if i + 1 < values.len() {
                x + round(time / parts * right)
            } else {
                round((1.0 - time / parts) * right)
            };
            points.push(Point::new(x, top + round((1.0 - level) * floor as f32)));
        }
        points.push(Point::new(right as i32, top + floor));
        points
    }

    fn loop_marker_x(&self, value: f32) -> i32 {
        let limit = self.size.width.saturating_sub(INDICATOR_STROKE) as i32;
        ((value * self.size.width as f32) as i32).clamp(0, limit)
    }

    fn fill<D>(&self, origin: Point, size: Size, color: C, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        Rectangle::new(origin, size)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target)
    }

    fn text<D>(
        &self,
        text: &str,
        position: Point,
        alignment: Alignment,
        color: C,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let style = MonoTextStyle::new(self.font, color);
        let layout = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(text, position, style, layout).draw(target)?;
        Ok(())
    }

    fn draw_title<D>(&self, title: &str, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        self.fill(
            Point::zero(),
            Size::new(self.size.width, LINE_SIZE),
            self.theme.title_background,
            target,
        )?;
        self.text(
            title,
            Point::new((self.size.width / 2) as i32, (LINE_SIZE / 2) as i32),
            Alignment::Center,
            self.theme.title_label,
            target,
        )
    }

    fn draw_list<D>(&self, group: &Group, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let len = group.len();
        if len == 0 {
            return Ok(());
        }
        let index = group.index();
        let mut position = scroll_start(index, len, self.lines(), group.is_looping());
        for line in 0..self.lines() {
            if group.is_looping() || position < len as i32 {
                let wrapped = position.rem_euclid(len as i32) as usize;
                if let Some(item) = group.item(wrapped) {
                    self.draw_row(line, item, position == index as i32, target)?;
                }
            }
            position += 1;
        }
        match self.scrollbar(index, len) {
            Some(bar) => self.fill(bar.top_left, bar.size, self.theme.indicator, target),
            None => Ok(()),
        }
    }

    fn draw_row<D>(&self, line: u32, item: &Item, selected: bool, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let (border, background, title, label) = self.theme.row(selected);
        let width = self.size.width - SCROLLBAR_WIDTH;
        let top = (LINE_SIZE * (line + 1)) as i32;
        let middle = top + (LINE_SIZE / 2) as i32;

        self.fill(Point::new(0, top), Size::new(width, LINE_SIZE), border, target)?;
        self.fill(
            Point::new(BORDER_WIDTH as i32, top + BORDER_WIDTH as i32),
            Size::new(width - BORDER_WIDTH * 2, LINE_SIZE - BORDER_WIDTH * 2),
            background,
            target,
        )?;
        self.text(
            item.title().trim(),
            Point::new((BORDER_WIDTH + PADDING) as i32, middle),
            Alignment::Left,
            title,
            target,
        )?;
        self.text(
            item.label().trim(),
            Point::new((width - BORDER_WIDTH - PADDING) as i32, middle),
            Alignment::Right,
            label,
            target,
        )
    }

    fn body_center(&self) -> Point {
        Point::new(
            (self.size.width / 2) as i32,
            (LINE_SIZE + (self.size.height - LINE_SIZE) / 2) as i32,
        )
    }

    fn draw_value<D>(&self, label: &str, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        self.text(
            label,
            self.body_center(),
            Alignment::Center,
            self.theme.item_label,
            target,
        )
    }

    /// Underline below character `index` of a centred `len` character text
    fn draw_text_indicator<D>(&self, len: usize, index: usize, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let advance = (self.font.character_size.width + self.font.character_spacing) as i32;
        let x = (self.size.width as i32 - advance * len as i32) / 2 + advance * index as i32;
        let y = self.body_center().y
            + (self.font.character_size.height / 2) as i32
            + INDICATOR_MARGIN as i32;
        self.fill(
            Point::new(x, y),
            Size::new(self.font.character_size.width.saturating_sub(1), INDICATOR_STROKE),
            self.theme.indicator,
            target,
        )
    }

    fn draw_chart<D>(&self, points: &[Point], target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        Polyline::new(points)
            .into_styled(PrimitiveStyle::with_stroke(self.theme.indicator, INDICATOR_STROKE))
            .draw(target)
    }

    /// Vertical marker across the chart at `x`
    fn draw_marker<D>(&self, x: i32, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let margin = INDICATOR_MARGIN as i32;
        let height = (self.chart_height() - margin * 2).max(0) as u32;
        self.fill(
            Point::new(x, self.chart_top() + margin),
            Size::new(INDICATOR_STROKE, height),
            self.theme.indicator,
            target,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Action, Group, Shape, WaveformList};
    use alloc::vec;
    use core::convert::Infallible;
    use embedded_graphics_core::{Pixel, geometry::OriginDimensions, pixelcolor::BinaryColor};

    const WIDTH: usize = 128;
    const HEIGHT: usize = 64;

    /// 128x64 monochrome frame buffer
    struct FrameBuffer {
        pixels: Vec<bool>,
    }

    impl FrameBuffer {
        fn new() -> Self {
            Self {
                pixels: vec![false; WIDTH * HEIGHT],
            }
        }

        fn get(&self, x: usize, y: usize) -> bool {
            self.pixels[y * WIDTH + x]
        }

        fn lit(&self, rows: core::ops::Range<usize>) -> usize {
            rows.map(|y| (0..WIDTH).filter(|&x| self.get(x, y)).count())
                .sum()
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(Point { x, y }, color) in pixels {
                if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
                    continue;
                }
                self.pixels[y as usize * WIDTH + x as usize] = color.is_on();
            }
            Ok(())
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    fn renderer() -> GraphicMenu<BinaryColor> {
        GraphicMenu::new(Size::new(128, 64), Theme::default()).unwrap()
    }

    fn waveform_list() -> WaveformList {
        WaveformList::new("Wave", vec![Shape::sine(64), Shape::square(64)]).unwrap()
    }

    #[test]
    fn test_new_requires_two_lines() {
        let result = GraphicMenu::new(Size::new(128, 32), Theme::<BinaryColor>::default());
        assert!(matches!(result, Err(BuilderError::TooFewLines { lines: 1 })));
        assert_eq!(renderer().lines(), 3);
        let tall = GraphicMenu::new(Size::new(128, 128), Theme::<BinaryColor>::default()).unwrap();
        assert_eq!(tall.lines(), 7);
    }

    #[test]
    fn test_new_rejects_narrow_displays() {
        let result = GraphicMenu::new(Size::new(1, 64), Theme::<BinaryColor>::default());
        assert!(matches!(result, Err(BuilderError::TooNarrow { width: 1 })));

        let narrow = GraphicMenu::new(Size::new(MIN_WIDTH, 64), Theme::<BinaryColor>::default())
            .unwrap();
        let mut menu = Menu::new(
            "Synth",
            [
                Item::from(Group::mix("Mix")),
                Item::from(Group::ar_envelope("Amp")),
                Item::from(Group::waveform("Osc", vec![Shape::saw(8)]).unwrap()),
            ],
        );
        let mut buffer = FrameBuffer::new();
        narrow.draw(&menu, &mut buffer).unwrap();
        for index in 0..3 {
            menu.select(Some(index));
            narrow.draw(&menu, &mut buffer).unwrap();
            menu.exit();
        }
        assert!(buffer.get(0, 0));
        assert!(!buffer.get(MIN_WIDTH as usize, 0));
    }

    #[test]
    fn test_scroll_start() {
        assert_eq!(scroll_start(0, 5, 3, false), 0);
        assert_eq!(scroll_start(2, 5, 3, false), 1);
        assert_eq!(scroll_start(4, 5, 3, false), 2);
        assert_eq!(scroll_start(1, 2, 3, false), 0);
        assert_eq!(scroll_start(0, 5, 3, true), -1);
    }

    #[test]
    fn test_scrollbar_geometry() {
        let renderer = renderer();
        let first = renderer.scrollbar(0, 4).unwrap();
        assert_eq!(first.top_left, Point::new(126, 16));
        assert_eq!(first.size, Size::new(2, 12));
        let last = renderer.scrollbar(3, 4).unwrap();
        assert_eq!(last.top_left, Point::new(126, 52));
        assert_eq!(renderer.scrollbar(0, 1).unwrap().size.height, 48);
        assert!(renderer.scrollbar(0, 0).is_none());
    }

    #[test]
    fn test_titles() {
        let list = Item::from(waveform_list());
        assert_eq!(title(&list), "Wave: Sine");

        let text = Item::from(Group::text("Name", 4));
        assert_eq!(title(&text), "Name: 1");

        let envelope = Item::from(Group::ar_envelope("Amp"));
        assert_eq!(title(&envelope), "Amp: Attack Time");

        let mix = Item::from(Group::mix("Mix"));
        assert_eq!(title(&mix), "Mix");
    }

    #[test]
    fn test_waveform_points() {
        let renderer = renderer();
        let flat = renderer.waveform_points(&[0; 8]);
        assert_eq!(flat.len(), 32);
        assert_eq!(flat[0], Point::new(0, 17 + 23));
        assert_eq!(flat[31], Point::new(124, 17 + 23));

        let extremes = renderer.waveform_points(&[i16::MAX, -i16::MAX]);
        assert_eq!(extremes[0].y, 17);
        assert_eq!(extremes[31].y, 17 + 45);
        assert!(renderer.waveform_points(&[]).is_empty());
    }

    #[test]
    fn test_envelope_points() {
        let renderer = renderer();
        let points = renderer.envelope_points(&[(0.0, 1.0), (0.0, 1.0)]);
        assert_eq!(
            points,
            vec![
                Point::new(0, 17 + 45),
                Point::new(0, 17),
                Point::new(127, 17),
                Point::new(127, 17 + 45),
            ]
        );
    }

    #[test]
    fn test_envelope_marker() {
        let mut group = Group::ar_envelope("Amp");
        assert_eq!(envelope_marker(&group), 0.0);
        group.set_index(2);
        assert_eq!(envelope_marker(&group), 1.0);
        group.set_index(1);
        assert_eq!(envelope_marker(&group), 0.5);
    }

    #[test]
    fn test_draw_list() {
        let menu = Menu::new(
            "Synth",
            [
                Item::from(Action::empty("Play")),
                Item::from(Group::mix("Mix")),
            ],
        );
        let mut buffer = FrameBuffer::new();
        renderer().draw(&menu, &mut buffer).unwrap();

        // title bar
        assert!(buffer.get(0, 0));
        // current row is filled, the next one is not
        assert!(buffer.get(1, 17));
        assert!(!buffer.get(1, 33));
        // scrollbar at the top, rows end before it
        assert!(buffer.get(127, 16));
        assert!(!buffer.get(127, 63));
        assert!(buffer.lit(33..47) > 0);
    }

    #[test]
    fn test_draw_value() {
        let mut menu = Menu::new("Synth", [Item::from(Group::mix("Mix"))]);
        menu.select(None);
        menu.select(None);
        let mut buffer = FrameBuffer::new();
        renderer().draw(&menu, &mut buffer).unwrap();

        assert!(buffer.get(0, 0));
        assert!(buffer.lit(16..64) > 0);
        assert!(!buffer.get(127, 16));
        assert!(!buffer.get(1, 17));
    }

    #[test]
    fn test_draw_waveform_group_markers() {
        let group = Group::waveform("Osc", vec![Shape::square(64)]).unwrap();
        let mut menu = Menu::new("Synth", [Item::from(group)]);
        menu.select(None);
        let mut buffer = FrameBuffer::new();
        renderer().draw(&menu, &mut buffer).unwrap();

        // loop start on the left edge, loop end clamped to the right edge
        assert!(buffer.get(0, 30));
        assert!(buffer.get(126, 30));
        assert!(buffer.lit(17..64) > 0);
    }

    #[test]
    fn test_draw_string_indicator() {
        let mut menu = Menu::new("Synth", [Item::from(Group::text("Name", 4))]);
        menu.select(None);
        let mut buffer = FrameBuffer::new();
        renderer().draw(&menu, &mut buffer).unwrap();

        // four 6 pixel characters centred: the first starts at x = 52
        let y = 40 + 5 + 2;
        assert!(buffer.get(52, y));
        assert!(buffer.get(56, y));
        assert!(!buffer.get(58, y));
    }
}
