#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

#[cfg(target_os = "windows")]
fn main() -> anyhow::Result<()> {
    win::run()
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("hotkey_launcher only supports Windows");
    std::process::exit(1);
}

#[cfg(target_os = "windows")]
mod win {
    use anyhow::Context;
    use windows::Win32::Foundation::*;
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::WindowsAndMessaging::*;
    use windows::core::PCWSTR;

    use hotkey_launcher::WINDOW_CLASS_NAME;
    use hotkey_launcher::app::App;
    use hotkey_launcher::constants::{WM_APP_RELOAD, WM_TRAYICON};
    use hotkey_launcher::utils::to_wide_chars;

    pub fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();

        unsafe {
            let instance = GetModuleHandleW(None).context("failed to get module handle")?;

            let class_name = to_wide_chars(WINDOW_CLASS_NAME);
            let wc = WNDCLASSW {
                lpfnWndProc: Some(window_proc),
                hInstance: instance.into(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                ..Default::default()
            };
            RegisterClassW(&wc);

            // 隐藏消息窗口：热键注册、托盘回调和分发全部挂在这个
            // 窗口所在的线程上。创建失败是致命的——没有它整个系统
            // 都无法工作。
            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                PCWSTR(class_name.as_ptr()),
                windows::core::w!("Hotkey Launcher"),
                WS_OVERLAPPEDWINDOW,
                0,
                0,
                0,
                0,
                None,
                None,
                Some(instance.into()),
                None,
            )
            .context("fatal: failed to create message window")?;

            // App 的所有权交给窗口（GWLP_USERDATA），WM_DESTROY 时回收
            let app = Box::new(App::new(hwnd));
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(app) as isize);

            let app_ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut App;
            if let Err(e) = (*app_ptr).initialize() {
                let _ = DestroyWindow(hwnd);
                return Err(anyhow::anyhow!("initialization failed: {e}"));
            }

            log::info!("hotkey launcher started");

            let mut msg = MSG::default();
            while GetMessageW(&mut msg, None, 0, 0).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        Ok(())
    }

    unsafe extern "system" fn window_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        unsafe {
            let app_ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut App;

            match msg {
                WM_HOTKEY if !app_ptr.is_null() => {
                    (*app_ptr).on_hotkey(wparam.0 as i32);
                    LRESULT(0)
                }
                WM_TRAYICON if !app_ptr.is_null() => {
                    (*app_ptr).on_tray_message(wparam.0 as u32, lparam.0 as u32);
                    LRESULT(0)
                }
                WM_APP_RELOAD if !app_ptr.is_null() => {
                    (*app_ptr).reload();
                    LRESULT(0)
                }
                WM_DESTROY => {
                    if !app_ptr.is_null() {
                        SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                        let mut app = Box::from_raw(app_ptr);
                        app.cleanup();
                    }
                    PostQuitMessage(0);
                    LRESULT(0)
                }
                _ => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }
    }
}
