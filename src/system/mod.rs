//! 系统集成模块
//!
//! 提供热键注册、分发、调和与 Windows 系统集成功能。
//!
//! # 主要组件
//! - [`SystemManager`]: 系统管理器，统一管理系统集成
//! - [`HotkeyRegistry`](hotkeys::HotkeyRegistry): 全局热键注册表
//! - [`HotkeyDispatcher`](dispatch::HotkeyDispatcher): 热键分发器
//! - [`reconcile`]: 配置调和器
//! - [`TrayManager`](tray::TrayManager): 系统托盘管理
//! - [`startup`]: 开机自启动注册

pub mod dispatch;
pub mod hotkeys;
pub mod reconcile;

#[cfg(target_os = "windows")]
pub mod startup;
#[cfg(target_os = "windows")]
pub mod tray;

pub use dispatch::HotkeyDispatcher;
pub use hotkeys::HotkeyRegistry;
pub use reconcile::RegistrationFailure;

#[cfg(target_os = "windows")]
mod manager {
    use std::rc::Rc;
    use std::sync::Arc;

    use parking_lot::RwLock;
    use windows::Win32::Foundation::HWND;

    use crate::error::SystemError;
    use crate::launcher::ProcessLauncher;
    use crate::message::Command;
    use crate::platform::windows::{WindowsHotkeyBackend, WindowsLaunchHost};
    use crate::settings::Settings;

    use super::dispatch::HotkeyDispatcher;
    use super::hotkeys::HotkeyRegistry;
    use super::{reconcile, startup, tray::TrayManager};

    /// 系统管理器
    ///
    /// 注册表和分发表由消息窗口所在线程独占；所有注册调用与
    /// 路由都发生在该线程上。
    pub struct SystemManager {
        /// 共享的配置引用
        settings: Arc<RwLock<Settings>>,
        /// 热键注册表
        registry: HotkeyRegistry,
        /// 热键分发器
        dispatcher: HotkeyDispatcher,
        /// 托盘管理器
        tray: TrayManager,
        /// 启动/激活引擎
        launcher: Rc<ProcessLauncher>,
    }

    impl SystemManager {
        /// 创建新的系统管理器
        ///
        /// # 参数
        /// - `settings`: 共享的配置引用
        /// - `hwnd`: 已创建的隐藏消息窗口
        pub fn new(settings: Arc<RwLock<Settings>>, hwnd: HWND) -> Self {
            Self {
                settings,
                registry: HotkeyRegistry::new(Box::new(WindowsHotkeyBackend::new(hwnd))),
                dispatcher: HotkeyDispatcher::new(),
                tray: TrayManager::new(),
                launcher: Rc::new(ProcessLauncher::new(Box::new(WindowsLaunchHost))),
            }
        }

        /// 初始化系统集成
        pub fn initialize(&mut self, hwnd: HWND) -> Result<(), SystemError> {
            // 初始化系统托盘
            self.tray.initialize(hwnd)?;

            // 同步自启动注册状态
            let autostart = self.settings.read().start_with_windows;
            if let Err(e) = startup::sync(autostart) {
                log::warn!("autostart sync failed: {}", e);
            }

            // 注册全部热键
            self.reconcile();

            Ok(())
        }

        /// 对当前配置集执行一次完整调和，失败条目上报托盘气泡
        pub fn reconcile(&mut self) {
            let mut settings = self.settings.write();
            let failures = reconcile::apply(
                &mut self.registry,
                &mut self.dispatcher,
                &mut settings.bindings,
                &self.launcher,
            );
            drop(settings);

            for failure in &failures {
                log::warn!(
                    "hotkey registration failed: {} ({}): {}",
                    failure.name,
                    failure.combination,
                    failure.reason
                );
                self.tray.show_warning(
                    "Hotkey Launcher",
                    &format!("无法注册热键: {}", failure.combination),
                );
            }
        }

        /// 路由一次热键触发
        pub fn route_hotkey(&self, id: i32) {
            self.dispatcher.route(id);
        }

        /// 处理托盘消息
        pub fn handle_tray_message(&mut self, wparam: u32, lparam: u32) -> Vec<Command> {
            self.tray.handle_message(wparam, lparam)
        }

        /// 打开外部设置编辑器（当前为默认程序打开配置文件）
        pub fn open_editor(&self) {
            let path = Settings::settings_path();
            self.launcher.open(&path.to_string_lossy());
        }

        /// 清理系统资源；幂等
        pub fn cleanup(&mut self) {
            self.registry.unregister_all();
            self.dispatcher.clear();
            self.tray.cleanup();
        }
    }
}

#[cfg(target_os = "windows")]
pub use manager::SystemManager;
