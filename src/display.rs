use once_cell::sync::Lazy;
use std::sync::Mutex;

/// Usable rectangle of a display, excluding reserved system UI such as
/// taskbars where the platform reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkArea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Work area assumed when the windowing system cannot be queried.
pub const FALLBACK_AREA: WorkArea = WorkArea {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
};

/// Serialises tests that install a mock work area.
pub static MOCK_DISPLAY_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

static MOCK_WORK_AREA: Lazy<Mutex<Option<WorkArea>>> = Lazy::new(|| Mutex::new(None));

pub fn set_mock_work_area(area: Option<WorkArea>) {
    *MOCK_WORK_AREA.lock().unwrap() = area;
}

pub fn clear_mock_work_area() {
    *MOCK_WORK_AREA.lock().unwrap() = None;
}

fn mock_work_area() -> Option<WorkArea> {
    *MOCK_WORK_AREA.lock().unwrap()
}

/// Return the usable area of the display containing or nearest to `point`.
/// Never fails; degrades to whole-screen dimensions off Windows and to
/// [`FALLBACK_AREA`] when the windowing system is unreachable.
pub fn work_area_at(point: (i32, i32)) -> WorkArea {
    if let Some(area) = mock_work_area() {
        return area;
    }

    #[cfg(target_os = "windows")]
    {
        win32_work_area_at(point)
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let _ = point;
        x11_screen_area()
    }

    #[cfg(target_os = "macos")]
    {
        let _ = point;
        macos_main_display_area()
    }

    #[cfg(not(any(target_os = "windows", unix)))]
    {
        let _ = point;
        FALLBACK_AREA
    }
}

/// Usable area of the primary display, used for the startup placement.
pub fn primary_work_area() -> WorkArea {
    if let Some(area) = mock_work_area() {
        return area;
    }

    #[cfg(target_os = "windows")]
    {
        win32_primary_work_area()
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        x11_screen_area()
    }

    #[cfg(target_os = "macos")]
    {
        macos_main_display_area()
    }

    #[cfg(not(any(target_os = "windows", unix)))]
    {
        FALLBACK_AREA
    }
}

#[cfg(target_os = "windows")]
fn win32_work_area_at(point: (i32, i32)) -> WorkArea {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::Graphics::Gdi::{MonitorFromPoint, MONITOR_DEFAULTTONEAREST};

    let monitor = unsafe {
        MonitorFromPoint(
            POINT {
                x: point.0,
                y: point.1,
            },
            MONITOR_DEFAULTTONEAREST,
        )
    };
    win32_monitor_work_area(monitor).unwrap_or_else(|| {
        tracing::warn!(?point, "monitor lookup failed; using fallback work area");
        FALLBACK_AREA
    })
}

#[cfg(target_os = "windows")]
fn win32_primary_work_area() -> WorkArea {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::Graphics::Gdi::{MonitorFromPoint, MONITOR_DEFAULTTOPRIMARY};

    let monitor = unsafe { MonitorFromPoint(POINT { x: 0, y: 0 }, MONITOR_DEFAULTTOPRIMARY) };
    win32_monitor_work_area(monitor).unwrap_or_else(|| {
        tracing::warn!("primary monitor lookup failed; using fallback work area");
        FALLBACK_AREA
    })
}

#[cfg(target_os = "windows")]
fn win32_monitor_work_area(
    monitor: windows::Win32::Graphics::Gdi::HMONITOR,
) -> Option<WorkArea> {
    use windows::Win32::Graphics::Gdi::{GetMonitorInfoW, MONITORINFO};

    let mut info = MONITORINFO::default();
    info.cbSize = std::mem::size_of::<MONITORINFO>() as u32;
    if unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        // rcWork excludes the taskbar and other appbars.
        let rc = info.rcWork;
        Some(WorkArea {
            x: rc.left,
            y: rc.top,
            width: rc.right - rc.left,
            height: rc.bottom - rc.top,
        })
    } else {
        None
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn x11_screen_area() -> WorkArea {
    use std::ptr;
    use x11::xlib;

    unsafe {
        let display = xlib::XOpenDisplay(ptr::null());
        if display.is_null() {
            tracing::warn!("cannot open X display; using fallback work area");
            return FALLBACK_AREA;
        }
        let screen = xlib::XDefaultScreen(display);
        let width = xlib::XDisplayWidth(display, screen);
        let height = xlib::XDisplayHeight(display, screen);
        xlib::XCloseDisplay(display);
        WorkArea {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

#[cfg(target_os = "macos")]
fn macos_main_display_area() -> WorkArea {
    use core_graphics::display::{CGDisplayPixelsHigh, CGDisplayPixelsWide, CGMainDisplayID};

    unsafe {
        let id = CGMainDisplayID();
        WorkArea {
            x: 0,
            y: 0,
            width: CGDisplayPixelsWide(id) as i32,
            height: CGDisplayPixelsHigh(id) as i32,
        }
    }
}
