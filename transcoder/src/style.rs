//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

/// One entry of the 16 color console palette.
///
/// The palette is the 4-bit legacy attribute space: eight standard hues and
/// their bright variants. The order follows the SGR color codes, so
/// `Color::Red` is selected by foreground `31` / background `41` and
/// `Color::BrightRed` by `91` / `101`.
///
/// Bold text is rendered with the bright half of the palette rather than as
/// a separate font weight, see [`Color::to_bright`].
#[derive(Clone, Copy, Debug, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum Color {
    /// Black - Color #0 (FG `30`, BG `40`).
    Black,
    /// Red - Color #1 (FG `31`, BG `41`).
    Red,
    /// Green - Color #2 (FG `32`, BG `42`).
    Green,
    /// Yellow - Color #3 (FG `33`, BG `43`).
    Yellow,
    /// Blue - Color #4 (FG `34`, BG `44`).
    Blue,
    /// Purple - Color #5 (FG `35`, BG `45`).
    Purple,
    /// Cyan - Color #6 (FG `36`, BG `46`).
    Cyan,
    /// White - Color #7 (FG `37`, BG `47`). The console default foreground.
    White,

    /// Bright Black - Color #8 (FG `90`, BG `100`).
    BrightBlack,
    /// Bright Red - Color #9 (FG `91`, BG `101`).
    BrightRed,
    /// Bright Green - Color #10 (FG `92`, BG `102`).
    BrightGreen,
    /// Bright Yellow - Color #11 (FG `93`, BG `103`).
    BrightYellow,
    /// Bright Blue - Color #12 (FG `94`, BG `104`).
    BrightBlue,
    /// Bright Purple - Color #13 (FG `95`, BG `105`).
    BrightPurple,
    /// Bright Cyan - Color #14 (FG `96`, BG `106`).
    BrightCyan,
    /// Bright White - Color #15 (FG `97`, BG `107`).
    BrightWhite,
}

impl Color {
    /// Every palette entry in index order.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Purple,
        Color::Cyan,
        Color::White,
        Color::BrightBlack,
        Color::BrightRed,
        Color::BrightGreen,
        Color::BrightYellow,
        Color::BrightBlue,
        Color::BrightPurple,
        Color::BrightCyan,
        Color::BrightWhite,
    ];

    /// Palette index of this color, `0..16`.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Looks up a color by palette index, returning `None` past 15.
    pub fn from_index(index: u8) -> Option<Color> {
        Color::ALL.get(usize::from(index)).copied()
    }

    /// Builds a color from a hue (`0..8`, the last digit of an SGR color code)
    /// and a brightness flag. Hue bits above the low three are ignored.
    pub fn from_hue(hue: u8, bright: bool) -> Color {
        let index = (hue & 0x07) | if bright { 0x08 } else { 0x00 };
        Color::ALL[usize::from(index)]
    }

    /// The hue of this color, `0..8`, shared by a standard color and its
    /// bright variant.
    pub fn hue(self) -> u8 {
        self.index() & 0x07
    }

    /// Whether this color sits in the bright half of the palette.
    pub fn is_bright(self) -> bool {
        self.index() & 0x08 != 0
    }

    /// The bright variant of this color; bright colors are returned unchanged.
    pub fn to_bright(self) -> Color {
        Color::from_hue(self.hue(), true)
    }

    /// The standard variant of this color; standard colors are returned
    /// unchanged.
    pub fn to_standard(self) -> Color {
        Color::from_hue(self.hue(), false)
    }
}

/// A 24-bit color value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Rgb {
    /// Creates a color from its three channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb { red, green, blue }
    }
}

/// Formats as a CSS hex color, `#rrggbb`.
impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Maps each of the 16 [`Color`] entries to a concrete RGB value.
///
/// The default is the classic console palette, where the standard half uses
/// half intensity channels and the bright half full intensity ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    entries: [Rgb; 16],
}

impl Palette {
    /// The classic console palette.
    pub const fn console() -> Palette {
        Palette {
            entries: [
                Rgb::new(0x00, 0x00, 0x00),
                Rgb::new(0x80, 0x00, 0x00),
                Rgb::new(0x00, 0x80, 0x00),
                Rgb::new(0x80, 0x80, 0x00),
                Rgb::new(0x00, 0x00, 0x80),
                Rgb::new(0x80, 0x00, 0x80),
                Rgb::new(0x00, 0x80, 0x80),
                Rgb::new(0xc0, 0xc0, 0xc0),
                Rgb::new(0x80, 0x80, 0x80),
                Rgb::new(0xff, 0x00, 0x00),
                Rgb::new(0x00, 0xff, 0x00),
                Rgb::new(0xff, 0xff, 0x00),
                Rgb::new(0x00, 0x00, 0xff),
                Rgb::new(0xff, 0x00, 0xff),
                Rgb::new(0x00, 0xff, 0xff),
                Rgb::new(0xff, 0xff, 0xff),
            ],
        }
    }

    /// Creates a palette from 16 entries in [`Color`] index order.
    pub const fn from_entries(entries: [Rgb; 16]) -> Palette {
        Palette { entries }
    }

    /// Returns the RGB value assigned to `color`.
    pub fn get(&self, color: Color) -> Rgb {
        self.entries[usize::from(color.index())]
    }

    /// Replaces the RGB value assigned to `color`.
    pub fn with_color(mut self, color: Color, rgb: Rgb) -> Palette {
        self.entries[usize::from(color.index())] = rgb;
        self
    }

    /// Iterates over every entry in [`Color`] index order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, Rgb)> + '_ {
        Color::ALL.iter().map(|&color| (color, self.get(color)))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::console()
    }
}
