//! Open / save file dialogs.

use std::path::PathBuf;

use windows::core::{PCWSTR, PWSTR};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Controls::Dialogs::{
    GetOpenFileNameW, GetSaveFileNameW, OFN_EXPLORER, OFN_FILEMUSTEXIST, OFN_NOCHANGEDIR,
    OFN_OVERWRITEPROMPT, OFN_PATHMUSTEXIST, OPENFILENAMEW,
};

use crate::platform::windows::ffi::{from_wide, pcwstr, to_wide};

const PATH_CAPACITY: usize = 1024;

/// One filter entry: description and extensions without the dot.
pub struct FileFilter<'a> {
    pub description: &'a str,
    pub extensions: &'a [&'a str],
}

/// Double-NUL-terminated filter list in the `desc\0*.a;*.b\0` layout.
fn filter_spec(filters: &[FileFilter<'_>]) -> Vec<u16> {
    let mut spec = String::new();
    for filter in filters {
        let patterns = filter
            .extensions
            .iter()
            .map(|ext| format!("*.{ext}"))
            .collect::<Vec<_>>()
            .join(";");
        spec.push_str(filter.description);
        spec.push('\0');
        spec.push_str(&patterns);
        spec.push('\0');
    }
    // to_wide adds the final terminator
    to_wide(&spec)
}

/// Pick an existing file. `None` on cancel.
pub fn open_file(owner: HWND, title: &str, filters: &[FileFilter<'_>]) -> Option<PathBuf> {
    let title_wide = to_wide(title);
    let filter_wide = filter_spec(filters);
    let mut file = vec![0u16; PATH_CAPACITY];

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: pcwstr(&filter_wide),
        nFilterIndex: 1,
        lpstrFile: PWSTR(file.as_mut_ptr()),
        nMaxFile: file.len() as u32,
        lpstrTitle: pcwstr(&title_wide),
        Flags: OFN_EXPLORER | OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_NOCHANGEDIR,
        ..Default::default()
    };

    unsafe { GetOpenFileNameW(&mut ofn) }
        .as_bool()
        .then(|| PathBuf::from(from_wide(&file)))
}

/// Choose a destination file, suggesting `file_name`. `default_ext` is
/// appended when the user types a name without one.
pub fn save_file(
    owner: HWND,
    title: &str,
    filters: &[FileFilter<'_>],
    file_name: &str,
    default_ext: &str,
) -> Option<PathBuf> {
    let title_wide = to_wide(title);
    let filter_wide = filter_spec(filters);
    let ext_wide = to_wide(default_ext);
    let mut file = vec![0u16; PATH_CAPACITY];
    for (slot, c) in file
        .iter_mut()
        .zip(file_name.encode_utf16().take(PATH_CAPACITY - 1))
    {
        *slot = c;
    }

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: pcwstr(&filter_wide),
        nFilterIndex: 1,
        lpstrFile: PWSTR(file.as_mut_ptr()),
        nMaxFile: file.len() as u32,
        lpstrTitle: pcwstr(&title_wide),
        lpstrDefExt: if default_ext.is_empty() {
            PCWSTR::null()
        } else {
            pcwstr(&ext_wide)
        },
        Flags: OFN_EXPLORER | OFN_OVERWRITEPROMPT | OFN_PATHMUSTEXIST | OFN_NOCHANGEDIR,
        ..Default::default()
    };

    unsafe { GetSaveFileNameW(&mut ofn) }
        .as_bool()
        .then(|| PathBuf::from(from_wide(&file)))
}
