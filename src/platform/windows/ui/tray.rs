//! System tray (notification area) icon for Windows.
//!
//! The icon lives on its own thread with its own hidden window and message
//! loop, so the control panel never blocks on tray interaction. The thread
//! only publishes [`AppEvent`]s and wakes the panel with [`WM_TRAY_EVENT`];
//! it never touches configuration. After either menu action the icon is
//! removed and the thread ends.

use std::cell::RefCell;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, warn};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyMenu, DestroyWindow,
    DispatchMessageW, GetCursorPos, GetMessageW, LoadIconW, PostMessageW, PostQuitMessage,
    RegisterClassW, SetForegroundWindow, SetMenuDefaultItem, TrackPopupMenu, TranslateMessage,
    HMENU, IDI_APPLICATION, MF_STRING, MSG, TPM_BOTTOMALIGN, TPM_LEFTALIGN, TPM_NONOTIFY,
    TPM_RETURNCMD, TPM_RIGHTBUTTON, WINDOW_EX_STYLE, WM_APP, WM_CLOSE, WM_DESTROY,
    WM_LBUTTONDBLCLK, WM_RBUTTONUP, WNDCLASSW, WS_OVERLAPPED,
};

use crate::events::{AppEvent, EventPublisher};
use crate::platform::windows::ffi::{pcwstr, to_wide};
use crate::{tr_key, Language};

/// Callback message from the notification icon.
pub const WM_TRAYICON: u32 = WM_APP + 1;

/// Posted to the control panel after an event was published.
pub const WM_TRAY_EVENT: u32 = WM_APP + 2;

// Menu item IDs
const MENU_SHOW: u32 = 1001;
const MENU_QUIT: u32 = 1002;

// Tray icon ID
const TRAY_ICON_ID: u32 = 1;

const CLASS_NAME: PCWSTR = w!("ReticleTray");

struct TrayThreadState {
    /// Control panel window, as a raw handle value.
    notify: isize,
    publisher: EventPublisher,
    menu: HMENU,
}

thread_local! {
    static TRAY: RefCell<Option<TrayThreadState>> = const { RefCell::new(None) };
}

/// Running tray thread.
pub struct TrayHandle {
    hwnd: isize,
    thread: Option<JoinHandle<()>>,
}

impl TrayHandle {
    /// Start the tray thread and wait until its icon is installed.
    ///
    /// `notify` receives [`WM_TRAY_EVENT`] after each published event.
    pub fn spawn(notify: HWND, publisher: EventPublisher, lang: Language) -> Result<Self> {
        let notify = notify.0 as isize;
        let (ready_tx, ready_rx) = mpsc::channel::<Result<isize, String>>();

        let thread = thread::Builder::new()
            .name("tray".into())
            .spawn(move || tray_thread(notify, publisher, lang, ready_tx))
            .context("Failed to spawn tray thread")?;

        match ready_rx.recv() {
            Ok(Ok(hwnd)) => {
                info!("Tray icon shown");
                Ok(Self {
                    hwnd,
                    thread: Some(thread),
                })
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(anyhow!(e)).context("Failed to create tray icon")
            }
            Err(_) => {
                let _ = thread.join();
                Err(anyhow!("Tray thread exited before reporting"))
            }
        }
    }

    /// The thread has ended (a menu action was taken).
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Remove the icon and wait for the thread to end.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        if !thread.is_finished() {
            unsafe {
                let _ = PostMessageW(
                    Some(HWND(self.hwnd as *mut _)),
                    WM_CLOSE,
                    WPARAM(0),
                    LPARAM(0),
                );
            }
        }
        if thread.join().is_err() {
            warn!("Tray thread panicked");
        }
        debug!("Tray thread stopped");
    }
}

impl Drop for TrayHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn tray_thread(
    notify: isize,
    publisher: EventPublisher,
    lang: Language,
    ready: mpsc::Sender<Result<isize, String>>,
) {
    let hwnd = match unsafe { create_tray_window() } {
        Ok(hwnd) => hwnd,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };

    unsafe {
        let menu = build_menu(lang);
        TRAY.with(|t| {
            *t.borrow_mut() = Some(TrayThreadState {
                notify,
                publisher,
                menu,
            })
        });
        install_icon(hwnd);
        let _ = ready.send(Ok(hwnd.0 as isize));

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        if let Some(state) = TRAY.with(|t| t.borrow_mut().take()) {
            let _ = DestroyMenu(state.menu);
        }
    }
}

unsafe fn create_tray_window() -> windows::core::Result<HWND> {
    let instance = GetModuleHandleW(None)?;
    let wc = WNDCLASSW {
        lpfnWndProc: Some(tray_wndproc),
        hInstance: instance.into(),
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };
    RegisterClassW(&wc);

    // Hidden top-level window: owns the icon and the popup menu
    CreateWindowExW(
        WINDOW_EX_STYLE::default(),
        CLASS_NAME,
        w!("Reticle Tray"),
        WS_OVERLAPPED,
        0,
        0,
        0,
        0,
        None,
        None,
        Some(instance.into()),
        None,
    )
}

fn icon_data(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        ..Default::default()
    }
}

unsafe fn install_icon(hwnd: HWND) {
    let mut nid = icon_data(hwnd);
    nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
    nid.uCallbackMessage = WM_TRAYICON;
    nid.hIcon = LoadIconW(None, IDI_APPLICATION).unwrap_or_default();

    // Set tooltip
    let tip_wide: Vec<u16> = crate::model::APP_NAME.encode_utf16().collect();
    for (i, &c) in tip_wide.iter().enumerate().take(127) {
        nid.szTip[i] = c;
    }

    if !Shell_NotifyIconW(NIM_ADD, &nid).as_bool() {
        warn!("Shell_NotifyIcon(NIM_ADD) failed");
    }
}

unsafe fn remove_icon(hwnd: HWND) {
    let nid = icon_data(hwnd);
    let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
}

unsafe fn build_menu(lang: Language) -> HMENU {
    let menu = CreatePopupMenu().unwrap_or_default();
    let show = to_wide(&tr_key("Show settings", lang));
    let quit = to_wide(&tr_key("Quit", lang));
    let _ = AppendMenuW(menu, MF_STRING, MENU_SHOW as usize, pcwstr(&show));
    let _ = AppendMenuW(menu, MF_STRING, MENU_QUIT as usize, pcwstr(&quit));
    // Bold, and what a double-click does
    let _ = SetMenuDefaultItem(menu, MENU_SHOW, 0);
    menu
}

/// Show the context menu at the cursor and return the chosen command (0 if none).
unsafe fn track_menu(hwnd: HWND) -> u32 {
    let Some(menu) = TRAY.with(|t| t.borrow().as_ref().map(|s| s.menu)) else {
        return 0;
    };
    let mut pt = POINT::default();
    let _ = GetCursorPos(&mut pt);

    // Required for menu to close when clicking outside
    let _ = SetForegroundWindow(hwnd);

    TrackPopupMenu(
        menu,
        TPM_BOTTOMALIGN | TPM_LEFTALIGN | TPM_RIGHTBUTTON | TPM_RETURNCMD | TPM_NONOTIFY,
        pt.x,
        pt.y,
        None,
        hwnd,
        None,
    )
    .0 as u32
}

/// Hand `event` to the UI thread, then take the icon down and end the thread.
unsafe fn finish(hwnd: HWND, event: AppEvent) {
    TRAY.with(|t| {
        if let Some(state) = t.borrow().as_ref() {
            debug!(event = event.description(), "Tray event");
            state.publisher.publish(event);
            let _ = PostMessageW(
                Some(HWND(state.notify as *mut _)),
                WM_TRAY_EVENT,
                WPARAM(0),
                LPARAM(0),
            );
        }
    });
    let _ = DestroyWindow(hwnd);
}

extern "system" fn tray_wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_TRAYICON => {
                match (lparam.0 & 0xFFFF) as u32 {
                    WM_LBUTTONDBLCLK => finish(hwnd, AppEvent::RestorePanel),
                    WM_RBUTTONUP => match track_menu(hwnd) {
                        MENU_SHOW => finish(hwnd, AppEvent::RestorePanel),
                        MENU_QUIT => finish(hwnd, AppEvent::Quit),
                        _ => {}
                    },
                    _ => {}
                }
                LRESULT(0)
            }

            WM_CLOSE => {
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            }

            WM_DESTROY => {
                remove_icon(hwnd);
                PostQuitMessage(0);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
