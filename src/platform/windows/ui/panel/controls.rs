//! Child control helpers for the control panel.
//!
//! Thin wrappers over the stock Win32 controls (STATIC, BUTTON, EDIT,
//! COMBOBOX, msctls_trackbar32) and the messages used to drive them.

use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, WPARAM};
use windows::Win32::Graphics::Gdi::{GetStockObject, DEFAULT_GUI_FONT};
use windows::Win32::UI::Controls::{
    InitCommonControlsEx, ICC_BAR_CLASSES, ICC_STANDARD_CLASSES, INITCOMMONCONTROLSEX,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, SendMessageW, SetWindowLongPtrW, GWLP_USERDATA, HMENU, WINDOW_EX_STYLE,
    WINDOW_STYLE, WM_SETFONT, WS_BORDER, WS_CHILD, WS_EX_CLIENTEDGE, WS_GROUP, WS_TABSTOP,
    WS_VISIBLE, WS_VSCROLL,
};

use crate::platform::windows::ffi::{pcwstr, set_window_text, to_wide, window_text};

// Trackbar messages (from commctrl.h)
const TBM_GETPOS: u32 = 0x0400;
const TBM_SETPOS: u32 = 0x0405;
const TBM_SETRANGE: u32 = 0x0406;

// ComboBox messages
const CB_ADDSTRING: u32 = 0x0143;
const CB_GETCURSEL: u32 = 0x0147;
const CB_GETLBTEXT: u32 = 0x0148;
const CB_GETLBTEXTLEN: u32 = 0x0149;
const CB_RESETCONTENT: u32 = 0x014B;
const CB_SETCURSEL: u32 = 0x014E;
pub const CBN_SELCHANGE: u32 = 1;

// Edit notifications
pub const EN_CHANGE: u32 = 0x0300;

// Control styles
const SS_CENTER: u32 = 0x0001;
const SS_CENTERIMAGE: u32 = 0x0200;
const SS_SUNKEN: u32 = 0x1000;
const BS_GROUPBOX: u32 = 0x0007;
const ES_AUTOHSCROLL: u32 = 0x0080;
const CBS_DROPDOWN: u32 = 0x0002;
const CBS_DROPDOWNLIST: u32 = 0x0003;
const CBS_AUTOHSCROLL: u32 = 0x0040;

/// Register the trackbar class and enable visual styles for the stock controls.
pub fn init_common_controls() {
    let icc = INITCOMMONCONTROLSEX {
        dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_STANDARD_CLASSES | ICC_BAR_CLASSES,
    };
    unsafe {
        let _ = InitCommonControlsEx(&icc);
    }
}

/// Creates child controls of one parent with a shared font.
pub struct ControlBuilder {
    parent: HWND,
    hinstance: HINSTANCE,
}

impl ControlBuilder {
    pub fn new(parent: HWND, hinstance: HINSTANCE) -> Self {
        Self { parent, hinstance }
    }

    #[allow(clippy::too_many_arguments)]
    unsafe fn create(
        &self,
        ex_style: WINDOW_EX_STYLE,
        class: PCWSTR,
        text: &str,
        style: WINDOW_STYLE,
        rect: (i32, i32, i32, i32),
        id: i32,
    ) -> HWND {
        let text_wide = to_wide(text);
        let (x, y, width, height) = rect;
        let hwnd = CreateWindowExW(
            ex_style,
            class,
            pcwstr(&text_wide),
            WS_CHILD | WS_VISIBLE | style,
            x,
            y,
            width,
            height,
            Some(self.parent),
            Some(HMENU(id as isize as *mut _)),
            Some(self.hinstance),
            None,
        )
        .unwrap_or_default();

        if !hwnd.is_invalid() {
            let font = GetStockObject(DEFAULT_GUI_FONT);
            SendMessageW(
                hwnd,
                WM_SETFONT,
                Some(WPARAM(font.0 as usize)),
                Some(LPARAM(1)),
            );
        }
        hwnd
    }

    pub fn label(&self, x: i32, y: i32, width: i32, text: &str) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("STATIC"),
                text,
                WINDOW_STYLE(0),
                (x, y + 4, width, 20),
                0,
            )
        }
    }

    /// Centered read-only value next to a slider.
    pub fn value_label(&self, x: i32, y: i32, width: i32, id: i32) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("STATIC"),
                "0",
                WINDOW_STYLE(SS_CENTER),
                (x, y + 4, width, 20),
                id,
            )
        }
    }

    /// Sunken area that starts a drag. Statics are transparent to hit
    /// testing, so the presses land on the parent window.
    pub fn drag_pad(&self, x: i32, y: i32, width: i32, height: i32, text: &str, id: i32) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("STATIC"),
                text,
                WINDOW_STYLE(SS_CENTER | SS_CENTERIMAGE | SS_SUNKEN),
                (x, y, width, height),
                id,
            )
        }
    }

    pub fn group(&self, x: i32, y: i32, width: i32, height: i32, text: &str) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("BUTTON"),
                text,
                WINDOW_STYLE(BS_GROUPBOX) | WS_GROUP,
                (x, y, width, height),
                0,
            )
        }
    }

    pub fn button(&self, x: i32, y: i32, width: i32, text: &str, id: i32) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("BUTTON"),
                text,
                WS_TABSTOP,
                (x, y, width, 26),
                id,
            )
        }
    }

    pub fn edit(&self, x: i32, y: i32, width: i32, id: i32) -> HWND {
        unsafe {
            self.create(
                WS_EX_CLIENTEDGE,
                w!("EDIT"),
                "",
                WS_TABSTOP | WINDOW_STYLE(ES_AUTOHSCROLL),
                (x, y + 2, width, 22),
                id,
            )
        }
    }

    pub fn slider(&self, x: i32, y: i32, width: i32, id: i32) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("msctls_trackbar32"),
                "",
                WS_TABSTOP,
                (x, y, width, 28),
                id,
            )
        }
    }

    /// Selection-only combo box.
    pub fn dropdown_list(&self, x: i32, y: i32, width: i32, id: i32) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("COMBOBOX"),
                "",
                WS_TABSTOP | WS_VSCROLL | WINDOW_STYLE(CBS_DROPDOWNLIST),
                (x, y, width, 160), // Height includes dropdown area
                id,
            )
        }
    }

    /// Combo box with an editable entry field. Items stay in insertion order.
    pub fn editable_combo(&self, x: i32, y: i32, width: i32, id: i32) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("COMBOBOX"),
                "",
                WS_TABSTOP
                    | WS_VSCROLL
                    | WINDOW_STYLE(CBS_DROPDOWN | CBS_AUTOHSCROLL),
                (x, y, width, 200),
                id,
            )
        }
    }

    /// Swatch showing a color as text; the border makes it read as a box.
    pub fn swatch(&self, x: i32, y: i32, width: i32, id: i32) -> HWND {
        unsafe {
            self.create(
                WINDOW_EX_STYLE::default(),
                w!("STATIC"),
                "",
                WS_BORDER | WINDOW_STYLE(SS_CENTER | SS_CENTERIMAGE),
                (x, y + 2, width, 22),
                id,
            )
        }
    }
}

pub fn init_slider(slider: HWND, min: i32, max: i32, pos: i32) {
    let range = ((max as isize) << 16) | (min as isize);
    unsafe {
        SendMessageW(slider, TBM_SETRANGE, Some(WPARAM(1)), Some(LPARAM(range)));
    }
    set_slider_pos(slider, pos);
}

pub fn set_slider_pos(slider: HWND, pos: i32) {
    unsafe {
        SendMessageW(
            slider,
            TBM_SETPOS,
            Some(WPARAM(1)),
            Some(LPARAM(pos as isize)),
        );
    }
}

pub fn slider_pos(slider: HWND) -> i32 {
    unsafe { SendMessageW(slider, TBM_GETPOS, None, None).0 as i32 }
}

/// Remember which label shows a slider's value.
pub fn link_value_label(slider: HWND, value_label: HWND) {
    unsafe {
        SetWindowLongPtrW(slider, GWLP_USERDATA, value_label.0 as isize);
    }
}

pub fn set_value_text(hwnd: HWND, value: i32) {
    set_window_text(hwnd, &value.to_string());
}

pub fn combo_add(combo: HWND, text: &str) {
    let text_wide = to_wide(text);
    unsafe {
        SendMessageW(
            combo,
            CB_ADDSTRING,
            None,
            Some(LPARAM(text_wide.as_ptr() as isize)),
        );
    }
}

pub fn combo_clear(combo: HWND) {
    unsafe {
        SendMessageW(combo, CB_RESETCONTENT, None, None);
    }
}

/// Select item `index`, or clear the selection with `None`.
pub fn combo_select(combo: HWND, index: Option<usize>) {
    let wparam = index.unwrap_or(usize::MAX); // -1 clears
    unsafe {
        SendMessageW(combo, CB_SETCURSEL, Some(WPARAM(wparam)), None);
    }
}

pub fn combo_selection(combo: HWND) -> Option<usize> {
    let index = unsafe { SendMessageW(combo, CB_GETCURSEL, None, None).0 };
    (index >= 0).then_some(index as usize)
}

/// Text of list item `index`.
pub fn combo_item_text(combo: HWND, index: usize) -> Option<String> {
    unsafe {
        let len = SendMessageW(combo, CB_GETLBTEXTLEN, Some(WPARAM(index)), None).0;
        if len < 0 {
            return None;
        }
        let mut buf = vec![0u16; len as usize + 1];
        SendMessageW(
            combo,
            CB_GETLBTEXT,
            Some(WPARAM(index)),
            Some(LPARAM(buf.as_mut_ptr() as isize)),
        );
        Some(String::from_utf16_lossy(&buf[..len as usize]))
    }
}

/// Text currently in an editable combo's entry field.
pub fn combo_text(combo: HWND) -> String {
    window_text(combo)
}
