use windows::Win32::Foundation::*;
use windows::Win32::UI::{Shell::*, WindowsAndMessaging::*};

use crate::constants::{MENU_ID_EXIT, MENU_ID_RELOAD, MENU_ID_SETTINGS, WM_TRAYICON};
use crate::error::SystemError;
use crate::message::Command;
use crate::utils::to_wide_chars;

/// 系统托盘管理器
///
/// 同时充当注册失败的通知方：调和产生的警告通过气泡提示上报。
#[derive(Debug)]
pub struct TrayManager {
    hwnd: HWND,
    icon_id: u32,
    is_added: bool,
}

impl TrayManager {
    /// 创建新的托盘管理器
    pub fn new() -> Self {
        Self {
            hwnd: HWND(std::ptr::null_mut()),
            icon_id: 1,
            is_added: false,
        }
    }

    /// 初始化系统托盘
    pub fn initialize(&mut self, hwnd: HWND) -> Result<(), SystemError> {
        self.hwnd = hwnd;

        let icon = default_icon()?;
        self.add_icon("Hotkey Launcher - 双击打开设置，右键查看菜单", icon)
    }

    /// 添加托盘图标
    fn add_icon(&mut self, tooltip: &str, icon: HICON) -> Result<(), SystemError> {
        if self.is_added {
            return Ok(());
        }

        unsafe {
            let mut nid = NOTIFYICONDATAW {
                cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
                hWnd: self.hwnd,
                uID: self.icon_id,
                uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
                uCallbackMessage: WM_TRAYICON,
                hIcon: icon,
                ..Default::default()
            };
            copy_to_wide_array(tooltip, &mut nid.szTip);

            if Shell_NotifyIconW(NIM_ADD, &nid).as_bool() {
                self.is_added = true;
                Ok(())
            } else {
                Err(SystemError::TrayError(
                    "Failed to add tray icon".to_string(),
                ))
            }
        }
    }

    /// 处理托盘消息
    pub fn handle_message(&mut self, _wparam: u32, lparam: u32) -> Vec<Command> {
        match lparam {
            WM_RBUTTONUP => self.show_context_menu(),
            WM_LBUTTONDBLCLK => vec![Command::ShowSettings],
            _ => vec![],
        }
    }

    /// 显示右键菜单并返回用户选择的命令
    fn show_context_menu(&self) -> Vec<Command> {
        unsafe {
            let hmenu = CreatePopupMenu().unwrap_or_default();
            if hmenu.is_invalid() {
                return vec![];
            }

            let _ = AppendMenuW(
                hmenu,
                MF_STRING,
                MENU_ID_SETTINGS,
                windows::core::w!("设置(&S)"),
            );
            let _ = AppendMenuW(
                hmenu,
                MF_STRING,
                MENU_ID_RELOAD,
                windows::core::w!("重新加载配置(&R)"),
            );
            let _ = AppendMenuW(hmenu, MF_SEPARATOR, 0, windows::core::PCWSTR::null());
            let _ = AppendMenuW(hmenu, MF_STRING, MENU_ID_EXIT, windows::core::w!("退出(&X)"));

            let mut cursor_pos = POINT::default();
            let _ = GetCursorPos(&mut cursor_pos);

            // 先设置前台窗口，否则菜单在外部点击时不会消失
            let _ = SetForegroundWindow(self.hwnd);

            let cmd = TrackPopupMenu(
                hmenu,
                TPM_RIGHTBUTTON | TPM_RETURNCMD,
                cursor_pos.x,
                cursor_pos.y,
                Some(0),
                self.hwnd,
                None,
            );

            let _ = DestroyMenu(hmenu);

            match cmd.0 as usize {
                MENU_ID_SETTINGS => vec![Command::ShowSettings],
                MENU_ID_RELOAD => vec![Command::ReloadBindings],
                MENU_ID_EXIT => vec![Command::Exit],
                _ => vec![],
            }
        }
    }

    /// 显示警告气泡（注册失败等非致命问题的用户可见通知）
    pub fn show_warning(&self, title: &str, text: &str) {
        if !self.is_added {
            return;
        }

        unsafe {
            let mut nid = NOTIFYICONDATAW {
                cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
                hWnd: self.hwnd,
                uID: self.icon_id,
                uFlags: NIF_INFO,
                dwInfoFlags: NIIF_WARNING,
                ..Default::default()
            };
            copy_to_wide_array(title, &mut nid.szInfoTitle);
            copy_to_wide_array(text, &mut nid.szInfo);

            let _ = Shell_NotifyIconW(NIM_MODIFY, &nid);
        }
    }

    /// 清理托盘资源；幂等
    pub fn cleanup(&mut self) {
        if self.is_added {
            unsafe {
                let nid = NOTIFYICONDATAW {
                    cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
                    hWnd: self.hwnd,
                    uID: self.icon_id,
                    uFlags: NIF_ICON,
                    ..Default::default()
                };

                let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
                self.is_added = false;
            }
        }
    }
}

impl Default for TrayManager {
    fn default() -> Self {
        Self::new()
    }
}

/// 将字符串拷贝进 NOTIFYICONDATAW 的定长宽字符字段
fn copy_to_wide_array(s: &str, dest: &mut [u16]) {
    let wide = to_wide_chars(s);
    let copy_len = (wide.len() - 1).min(dest.len() - 1);
    dest[..copy_len].copy_from_slice(&wide[..copy_len]);
    dest[copy_len] = 0;
}

/// 加载托盘图标（使用系统默认应用图标）
fn default_icon() -> Result<HICON, SystemError> {
    unsafe {
        LoadIconW(None, IDI_APPLICATION)
            .map_err(|e| SystemError::TrayError(format!("Failed to load default icon: {e:?}")))
    }
}
