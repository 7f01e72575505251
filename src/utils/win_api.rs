// Windows API Helper Functions
//
// Centralized Windows API wrappers to reduce code duplication

use windows::Win32::Foundation::*;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::AttachThreadInput;
use windows::Win32::UI::WindowsAndMessaging::*;

/// 输入队列挂接守卫
///
/// 挂接当前线程与前台线程的输入队列，Drop 时保证解除挂接，
/// 即使 SetForegroundWindow 调用失败也不会泄漏挂接状态。
struct InputAttachGuard {
    current_thread: u32,
    foreground_thread: u32,
    attached: bool,
}

impl InputAttachGuard {
    fn attach(current_thread: u32, foreground_thread: u32) -> Self {
        let attached =
            unsafe { AttachThreadInput(current_thread, foreground_thread, true) }.as_bool();
        Self {
            current_thread,
            foreground_thread,
            attached,
        }
    }
}

impl Drop for InputAttachGuard {
    fn drop(&mut self) {
        if self.attached {
            unsafe {
                let _ = AttachThreadInput(self.current_thread, self.foreground_thread, false);
            }
        }
    }
}

/// 窗口最小化时恢复到上一次的非最小化状态
pub fn restore_if_minimized(hwnd: HWND) {
    unsafe {
        if IsIconic(hwnd).as_bool() {
            // SW_RESTORE 恢复到最小化之前的状态，而不是强制最大化
            let _ = ShowWindow(hwnd, SW_RESTORE);
        }
    }
}

/// 强制将窗口带到前台
///
/// 系统默认拒绝后台进程抢占前台；全局热键进程正是这样的后台进程，
/// 因此需要临时挂接到当前前台线程的输入队列再请求切换。
pub fn force_foreground_window(target: HWND) {
    unsafe {
        let foreground = GetForegroundWindow();
        if foreground == target {
            return;
        }

        let foreground_thread = GetWindowThreadProcessId(foreground, None);
        let current_thread = GetCurrentThreadId();

        if foreground_thread != 0 && foreground_thread != current_thread {
            let _guard = InputAttachGuard::attach(current_thread, foreground_thread);
            let _ = SetForegroundWindow(target);
        } else {
            let _ = SetForegroundWindow(target);
        }
    }
}

/// EnumWindows 回调的共享数据
struct FindWindowData {
    pid: u32,
    found: Option<HWND>,
}

unsafe extern "system" fn enum_windows_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    unsafe {
        let data = &mut *(lparam.0 as *mut FindWindowData);

        let mut window_pid = 0u32;
        GetWindowThreadProcessId(hwnd, Some(&mut window_pid));

        if window_pid == data.pid && IsWindowVisible(hwnd).as_bool() {
            data.found = Some(hwnd);
            return FALSE;
        }

        TRUE
    }
}

/// 查找属于指定进程的第一个可见顶级窗口
///
/// 枚举失败与"确实没有窗口"同样返回 None——进程可能在后台运行
/// 且没有任何 UI，调用方对两种情况的处理是一致的（静默放弃）。
pub fn find_visible_window_for_pid(pid: u32) -> Option<HWND> {
    let mut data = FindWindowData { pid, found: None };

    unsafe {
        // 回调提前返回 FALSE 时 EnumWindows 报告失败，这里并非错误
        let _ = EnumWindows(
            Some(enum_windows_proc),
            LPARAM(&mut data as *mut _ as isize),
        );
    }

    data.found
}
