//! Windows 平台实现
//!
//! 将能力接口落到具体的 Win32 调用：RegisterHotKey/UnregisterHotKey、
//! ToolHelp 进程快照、EnumWindows 与 ShellExecuteW。

use std::path::Path;

use windows::Win32::Foundation::*;
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW, TH32CS_SNAPPROCESS,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_NOREPEAT, RegisterHotKey, UnregisterHotKey,
};
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
use windows::core::PCWSTR;

use crate::error::{LaunchError, RegistryError};
use crate::platform::traits::{HotkeyBackend, LaunchHost, LaunchRequest};
use crate::utils::win_api::{find_visible_window_for_pid, force_foreground_window, restore_if_minimized};
use crate::utils::to_wide_chars;

/// 基于 RegisterHotKey 的热键后端
///
/// 绑定到隐藏消息窗口；该窗口所在线程即热键分发线程。
pub struct WindowsHotkeyBackend {
    hwnd: HWND,
}

impl WindowsHotkeyBackend {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl HotkeyBackend for WindowsHotkeyBackend {
    fn register(&self, id: i32, modifiers: u32, key: u32) -> Result<(), RegistryError> {
        unsafe {
            // MOD_NOREPEAT：按住组合键不产生重复触发
            RegisterHotKey(
                Some(self.hwnd),
                id,
                HOT_KEY_MODIFIERS(modifiers) | MOD_NOREPEAT,
                key,
            )
            .map_err(|e| RegistryError::RegistrationFailed(e.message()))
        }
    }

    fn unregister(&self, id: i32) {
        unsafe {
            let _ = UnregisterHotKey(Some(self.hwnd), id);
        }
    }
}

/// 基于 Win32 的启动宿主
pub struct WindowsLaunchHost;

impl LaunchHost for WindowsLaunchHost {
    /// 用 ToolHelp 快照枚举进程，按镜像名（不含扩展名）精确匹配
    fn find_process(&self, image_name: &str) -> Option<u32> {
        let wanted = image_name.to_ascii_lowercase();

        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0).ok()?;

            let mut entry = PROCESSENTRY32W {
                dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
                ..Default::default()
            };

            let mut found = None;
            if Process32FirstW(snapshot, &mut entry).is_ok() {
                loop {
                    let len = entry
                        .szExeFile
                        .iter()
                        .position(|&c| c == 0)
                        .unwrap_or(entry.szExeFile.len());
                    let exe_name = String::from_utf16_lossy(&entry.szExeFile[..len]);

                    let matches = Path::new(&exe_name)
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().to_ascii_lowercase() == wanted)
                        .unwrap_or(false);
                    if matches {
                        found = Some(entry.th32ProcessID);
                        break;
                    }

                    if Process32NextW(snapshot, &mut entry).is_err() {
                        break;
                    }
                }
            }

            let _ = CloseHandle(snapshot);
            found
        }
    }

    fn activate(&self, pid: u32) -> bool {
        // 找不到可见窗口时静默放弃，进程可能没有任何 UI
        let Some(hwnd) = find_visible_window_for_pid(pid) else {
            return false;
        };

        restore_if_minimized(hwnd);
        force_foreground_window(hwnd);
        true
    }

    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        let verb = to_wide_chars(if request.elevate { "runas" } else { "open" });
        let file = to_wide_chars(&request.path);
        let arguments = to_wide_chars(&request.arguments);
        let directory = to_wide_chars(&request.working_directory);

        unsafe {
            let instance = ShellExecuteW(
                None,
                PCWSTR(verb.as_ptr()),
                PCWSTR(file.as_ptr()),
                if request.arguments.trim().is_empty() {
                    PCWSTR::null()
                } else {
                    PCWSTR(arguments.as_ptr())
                },
                if request.working_directory.trim().is_empty() {
                    PCWSTR::null()
                } else {
                    PCWSTR(directory.as_ptr())
                },
                SW_SHOWNORMAL,
            );

            // ShellExecuteW 约定：返回值 <= 32 表示失败
            if instance.0 as isize <= 32 {
                return Err(LaunchError::LaunchFailed(format!(
                    "ShellExecuteW failed for {} (code {})",
                    request.path, instance.0 as isize
                )));
            }
        }

        Ok(())
    }
}
