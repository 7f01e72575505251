//! 平台抽象层
//!
//! 提供与操作系统解耦的能力接口，当前主要支持 Windows 平台。
//!
//! # 模块结构
//! - [`traits`]: 平台无关的 trait 定义（热键后端、启动宿主）
//! - [`windows`]: Windows 平台实现（RegisterHotKey、ShellExecute 等）

pub mod traits;

#[cfg(target_os = "windows")]
pub mod windows;

pub use traits::*;

#[cfg(target_os = "windows")]
pub use windows::*;
