// Unified Error Handling Module
//
// Centralized error types for consistent error management across the application

use std::io;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    #[error("System error: {0}")]
    System(#[from] SystemError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Windows API error: {0}")]
    Windows(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Hotkey registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// 操作系统拒绝了该组合键（已被本进程或其他进程占用，或组合无效）。
    /// 按条目上报，不中断其余绑定的注册。
    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    /// 消息窗口等底层资源创建失败，启动阶段致命
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),
}

/// Process launch errors
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Launch failed: {0}")]
    LaunchFailed(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),
}

/// System integration errors (tray, autostart)
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Tray error: {0}")]
    TrayError(String),

    #[error("Startup registration error: {0}")]
    StartupError(String),

    #[error("Hotkey error: {0}")]
    HotkeyError(String),
}

/// Settings persistence errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO failed: {0}")]
    Io(#[from] io::Error),

    #[error("Parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}
