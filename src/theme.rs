//! Colour scheme for the graphic renderer
//!
//! A [`Theme`] assigns a colour to every part of a [`GraphicMenu`](crate::GraphicMenu)
//! frame. Any [`PixelColor`] works, so the same menu can be drawn on a
//! monochrome OLED or a colour TFT.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics_core::pixelcolor::BinaryColor;
//! use synthmenu::Theme;
//!
//! // White on black, the usual OLED look
//! let theme = Theme::<BinaryColor>::default();
//! assert_eq!(theme.title_background, BinaryColor::On);
//!
//! // Inverted
//! let inverted = Theme::new(BinaryColor::Off, BinaryColor::On);
//! assert_eq!(inverted.background, BinaryColor::On);
//! ```

use embedded_graphics_core::pixelcolor::{BinaryColor, PixelColor};

/// Colours used by the graphic renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme<C: PixelColor> {
    /// Screen background
    pub background: C,
    /// Title bar fill
    pub title_background: C,
    /// Title bar text
    pub title_label: C,
    /// Row outline
    pub item_border: C,
    /// Row outline of the current row
    pub item_border_selected: C,
    /// Row fill
    pub item_background: C,
    /// Row fill of the current row
    pub item_background_selected: C,
    /// Row title text
    pub item_title: C,
    /// Row title text of the current row
    pub item_title_selected: C,
    /// Row label text, and values shown full screen
    pub item_label: C,
    /// Row label text of the current row
    pub item_label_selected: C,
    /// Scrollbar, charts and markers
    pub indicator: C,
}

impl<C: PixelColor> Theme<C> {
    /// Two colour theme: `foreground` content on a `background` screen
    ///
    /// The title bar and the current row are drawn inverted.
    pub fn new(foreground: C, background: C) -> Self {
        Self {
            background,
            title_background: foreground,
            title_label: background,
            item_border: background,
            item_border_selected: foreground,
            item_background: background,
            item_background_selected: foreground,
            item_title: foreground,
            item_title_selected: background,
            item_label: foreground,
            item_label_selected: background,
            indicator: foreground,
        }
    }

    /// Row colours as `(border, background, title, label)`
    pub(crate) fn row(&self, selected: bool) -> (C, C, C, C) {
        if selected {
            (
                self.item_border_selected,
                self.item_background_selected,
                self.item_title_selected,
                self.item_label_selected,
            )
        } else {
            (
                self.item_border,
                self.item_background,
                self.item_title,
                self.item_label,
            )
        }
    }
}

impl Default for Theme<BinaryColor> {
    fn default() -> Self {
        Self::new(BinaryColor::On, BinaryColor::Off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light_on_dark() {
        let theme = Theme::<BinaryColor>::default();
        assert_eq!(theme.background, BinaryColor::Off);
        assert_eq!(theme.item_title, BinaryColor::On);
        assert_eq!(theme.title_label, BinaryColor::Off);
        assert_eq!(theme.indicator, BinaryColor::On);
    }

    #[test]
    fn test_selected_row_is_inverted() {
        let theme = Theme::<BinaryColor>::default();
        let (border, background, title, label) = theme.row(true);
        assert_eq!(border, BinaryColor::On);
        assert_eq!(background, BinaryColor::On);
        assert_eq!(title, BinaryColor::Off);
        assert_eq!(label, BinaryColor::Off);
        assert_eq!(theme.row(false).1, BinaryColor::Off);
    }
}
