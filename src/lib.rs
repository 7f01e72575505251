// 模块声明
pub mod constants;
pub mod error;
pub mod launcher;
pub mod message;
pub mod platform;
pub mod settings;
pub mod system;

#[cfg(target_os = "windows")]
pub mod app;
#[cfg(target_os = "windows")]
pub mod utils;

// 重新导出主要类型
pub use error::{AppError, LaunchError, RegistryError, SettingsError, SystemError};
pub use launcher::ProcessLauncher;
pub use message::Command;
pub use settings::{HotkeyBinding, Settings};

// 常量定义
pub const WINDOW_CLASS_NAME: &str = "HOTKEY_LAUNCHER_MAIN";
