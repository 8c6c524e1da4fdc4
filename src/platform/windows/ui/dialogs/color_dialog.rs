//! Color picker.

use windows::Win32::Foundation::{COLORREF, HWND};
use windows::Win32::UI::Controls::Dialogs::{ChooseColorW, CC_FULLOPEN, CC_RGBINIT, CHOOSECOLORW};

use crate::model::Rgb;

/// The picker's 16 custom color slots, kept between invocations.
pub type CustomColors = [COLORREF; 16];

pub fn default_custom_colors() -> CustomColors {
    [COLORREF(0xFFFFFF); 16]
}

/// Show the system color picker starting at `initial`. `None` on cancel.
///
/// The result is passed through [`Rgb::selectable`].
pub fn choose_color(owner: HWND, initial: Rgb, custom_colors: &mut CustomColors) -> Option<Rgb> {
    let mut cc = CHOOSECOLORW {
        lStructSize: std::mem::size_of::<CHOOSECOLORW>() as u32,
        hwndOwner: owner,
        rgbResult: COLORREF(initial.to_colorref()),
        lpCustColors: custom_colors.as_mut_ptr(),
        Flags: CC_FULLOPEN | CC_RGBINIT,
        ..Default::default()
    };

    unsafe { ChooseColorW(&mut cc) }
        .as_bool()
        .then(|| Rgb::from_colorref(cc.rgbResult.0).selectable())
}
