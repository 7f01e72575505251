// 应用程序协调器
//
// App结构体是整个应用程序的核心协调器，负责：
// 1. 持有共享配置并驱动配置调和
// 2. 把窗口消息翻译成系统管理器调用
// 3. 执行托盘产生的命令

use std::sync::Arc;

use parking_lot::RwLock;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::DestroyWindow;

use crate::error::AppError;
use crate::message::Command;
use crate::settings::Settings;
use crate::system::{SystemManager, startup};

/// 应用程序主结构体
pub struct App {
    /// 共享的配置引用
    settings: Arc<RwLock<Settings>>,
    /// 系统管理器
    system: SystemManager,
    /// 隐藏消息窗口句柄
    hwnd: HWND,
}

impl App {
    /// 创建新的应用程序实例
    pub fn new(hwnd: HWND) -> Self {
        let settings = Arc::new(RwLock::new(Settings::load()));
        let system = SystemManager::new(Arc::clone(&settings), hwnd);

        Self {
            settings,
            system,
            hwnd,
        }
    }

    /// 初始化托盘与热键注册
    pub fn initialize(&mut self) -> Result<(), AppError> {
        self.system.initialize(self.hwnd)?;

        // 非最小化启动时直接打开编辑器
        if !self.settings.read().start_minimized {
            self.system.open_editor();
        }

        Ok(())
    }

    /// 处理一次热键触发（WM_HOTKEY）
    pub fn on_hotkey(&self, id: i32) {
        self.system.route_hotkey(id);
    }

    /// 处理托盘回调消息
    pub fn on_tray_message(&mut self, wparam: u32, lparam: u32) {
        let commands = self.system.handle_tray_message(wparam, lparam);
        for command in commands {
            self.execute_command(command);
        }
    }

    /// 外部编辑器保存配置后的重载入口（WM_APP_RELOAD）
    ///
    /// 编辑器只改磁盘文件并投递消息，注册表/分发表的变更始终
    /// 发生在本线程上。
    pub fn reload(&mut self) {
        *self.settings.write() = Settings::load();

        let autostart = self.settings.read().start_with_windows;
        if let Err(e) = startup::sync(autostart) {
            log::warn!("autostart sync failed: {}", e);
        }

        self.system.reconcile();
    }

    /// 执行应用级命令
    fn execute_command(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::ShowSettings => self.system.open_editor(),
            Command::ReloadBindings => self.reload(),
            Command::Exit => unsafe {
                let _ = DestroyWindow(self.hwnd);
            },
        }
    }

    /// 释放全部系统资源；幂等
    pub fn cleanup(&mut self) {
        self.system.cleanup();
    }
}
