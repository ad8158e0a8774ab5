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

use crate::style::Color;
use tracing::trace;

/// The color a default foreground is promoted from when bold is requested.
pub const DEFAULT_FOREGROUND: Color = Color::White;

/// Current rendering attributes of a document.
///
/// `None` for either color means "inherit the document default", which every
/// dialect renders without an explicit color. Bold has no field of its own:
/// SGR `1` moves the foreground into the bright half of the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FormatState {
    /// Foreground palette entry, `None` for the default
    pub foreground: Option<Color>,
    /// Background palette entry, `None` for the default
    pub background: Option<Color>,
    /// Underline on or off
    pub underline: bool,
}

impl FormatState {
    /// Creates the default state: no color override, underline off.
    pub fn new() -> FormatState {
        FormatState::default()
    }

    /// Whether every attribute is at its default.
    pub fn is_default(&self) -> bool {
        *self == FormatState::default()
    }

    /// Applies the parameters of one SGR sequence and reports the change.
    ///
    /// Parameters are applied left to right so later ones win when they
    /// conflict. An empty list is a reset. Unrecognized values are skipped
    /// without affecting the remaining parameters.
    ///
    /// # Recognized codes
    ///
    /// - `0` - Reset all attributes
    /// - `1` - Bold, promotes the foreground to its bright variant
    /// - `22` - Normal intensity, demotes the foreground to its standard variant
    /// - `4` / `24` - Underline on / off
    /// - `30-37` - Foreground hue, keeping the current brightness
    /// - `39` - Default foreground
    /// - `40-47` - Standard background
    /// - `49` - Default background
    /// - `90-97` - Bright foreground
    /// - `100-107` - Bright background
    pub fn apply(&mut self, parameters: &[u32]) -> Transition {
        let before = *self;
        if parameters.is_empty() {
            self.apply_parameter(0);
        }
        for &code in parameters {
            self.apply_parameter(code);
        }
        Transition {
            before,
            after: *self,
        }
    }

    fn apply_parameter(&mut self, code: u32) {
        match code {
            0 => *self = FormatState::default(),
            1 => {
                let foreground = self.foreground.unwrap_or(DEFAULT_FOREGROUND);
                self.foreground = Some(foreground.to_bright());
            }
            22 => self.foreground = self.foreground.map(Color::to_standard),
            4 => self.underline = true,
            24 => self.underline = false,
            30..=37 => {
                let bright = self.foreground.is_some_and(Color::is_bright);
                self.foreground = Some(Color::from_hue(hue(code, 30), bright));
            }
            39 => self.foreground = None,
            40..=47 => self.background = Some(Color::from_hue(hue(code, 40), false)),
            49 => self.background = None,
            90..=97 => self.foreground = Some(Color::from_hue(hue(code, 90), true)),
            100..=107 => self.background = Some(Color::from_hue(hue(code, 100), true)),
            _ => trace!(code, "ignoring unrecognized SGR parameter"),
        }
    }
}

fn hue(code: u32, base: u32) -> u8 {
    // Callers only pass codes within `base..base + 8`.
    (code - base) as u8
}

/// The change produced by one SGR sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State before the sequence was applied
    pub before: FormatState,
    /// State after the sequence was applied
    pub after: FormatState,
}

impl Transition {
    /// Whether the sequence left the state untouched.
    pub fn is_empty(&self) -> bool {
        self.before == self.after
    }

    pub fn foreground_changed(&self) -> bool {
        self.before.foreground != self.after.foreground
    }

    pub fn background_changed(&self) -> bool {
        self.before.background != self.after.background
    }

    pub fn underline_changed(&self) -> bool {
        self.before.underline != self.after.underline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_after(parameters: &[u32]) -> FormatState {
        let mut state = FormatState::new();
        state.apply(parameters);
        state
    }

    #[test]
    fn test_default_state() {
        let state = FormatState::new();
        assert!(state.is_default());
        assert_eq!(state.foreground, None);
        assert_eq!(state.background, None);
        assert!(!state.underline);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut state = state_after(&[1, 4, 31, 44]);
        assert!(!state.is_default());

        state.apply(&[0]);
        assert!(state.is_default());

        let transition = state.apply(&[0]);
        assert!(transition.is_empty());
    }

    #[test]
    fn test_empty_parameters_reset() {
        let mut state = state_after(&[32, 4]);
        let transition = state.apply(&[]);
        assert!(state.is_default());
        assert!(transition.foreground_changed());
        assert!(transition.underline_changed());
        assert!(!transition.background_changed());
    }

    #[test]
    fn test_foreground_colors() {
        assert_eq!(state_after(&[30]).foreground, Some(Color::Black));
        assert_eq!(state_after(&[31]).foreground, Some(Color::Red));
        assert_eq!(state_after(&[37]).foreground, Some(Color::White));
        assert_eq!(state_after(&[91]).foreground, Some(Color::BrightRed));
        assert_eq!(state_after(&[97]).foreground, Some(Color::BrightWhite));
        assert_eq!(state_after(&[31, 39]).foreground, None);
    }

    #[test]
    fn test_background_colors() {
        assert_eq!(state_after(&[40]).background, Some(Color::Black));
        assert_eq!(state_after(&[44]).background, Some(Color::Blue));
        assert_eq!(state_after(&[104]).background, Some(Color::BrightBlue));
        assert_eq!(state_after(&[107]).background, Some(Color::BrightWhite));
        assert_eq!(state_after(&[44, 49]).background, None);
    }

    #[test]
    fn test_last_conflicting_parameter_wins() {
        assert_eq!(state_after(&[31, 32, 33]).foreground, Some(Color::Yellow));
        assert!(!state_after(&[4, 24]).underline);
        assert!(state_after(&[24, 4]).underline);
    }

    #[test]
    fn test_bold_promotes_to_bright() {
        assert_eq!(state_after(&[1, 31]).foreground, Some(Color::BrightRed));
        assert_eq!(state_after(&[31, 1]).foreground, Some(Color::BrightRed));
        assert_eq!(state_after(&[1]).foreground, Some(Color::BrightWhite));
    }

    #[test]
    fn test_bold_persists_across_hue_changes() {
        let mut state = state_after(&[1, 31]);
        state.apply(&[32]);
        assert_eq!(state.foreground, Some(Color::BrightGreen));
    }

    #[test]
    fn test_normal_intensity_demotes() {
        assert_eq!(state_after(&[1, 31, 22]).foreground, Some(Color::Red));
        assert_eq!(state_after(&[22]).foreground, None);
    }

    #[test]
    fn test_underline() {
        assert!(state_after(&[4]).underline);
        assert!(!state_after(&[4, 24]).underline);
    }

    #[test]
    fn test_unrecognized_parameters_ignored() {
        let state = state_after(&[5, 31, 9999, 4, 38]);
        assert_eq!(state.foreground, Some(Color::Red));
        assert!(state.underline);
        assert_eq!(state.background, None);

        let mut state = FormatState::new();
        let transition = state.apply(&[7, 8, 53]);
        assert!(transition.is_empty());
        assert!(state.is_default());
    }

    #[test]
    fn test_transition_reports_changes() {
        let mut state = state_after(&[31]);
        let transition = state.apply(&[31, 4]);
        assert!(!transition.foreground_changed());
        assert!(transition.underline_changed());
        assert_eq!(transition.before.foreground, Some(Color::Red));
        assert_eq!(transition.after, state);
    }
}
