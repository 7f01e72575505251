//! 平台无关的能力接口定义
//!
//! 核心逻辑只依赖这里的 trait，便于用假实现模拟组合键冲突、
//! 进程存在与否等场景进行测试。

use crate::error::{LaunchError, RegistryError};
use crate::settings::HotkeyBinding;

/// 全局热键的操作系统后端
///
/// 注册 ID 由上层的注册表组件分配，后端只负责向操作系统申请/释放
/// 对应的全局捕获（按键重复抑制由实现负责）。
pub trait HotkeyBackend {
    /// 申请全局捕获指定组合键；组合已被占用或无效时返回错误
    fn register(&self, id: i32, modifiers: u32, key: u32) -> Result<(), RegistryError>;

    /// 释放捕获；对未注册的 id 调用是无害的
    fn unregister(&self, id: i32);
}

/// 一次进程启动请求
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    pub path: String,
    pub arguments: String,
    pub working_directory: String,
    pub elevate: bool,
}

impl LaunchRequest {
    /// 从绑定构造启动请求
    pub fn from_binding(binding: &HotkeyBinding) -> Self {
        Self {
            path: binding.target_path.clone(),
            arguments: binding.arguments.clone(),
            working_directory: binding.working_directory.clone(),
            elevate: binding.elevate,
        }
    }
}

/// 启动/激活决策引擎依赖的宿主能力
pub trait LaunchHost {
    /// 查找第一个镜像名（不含扩展名，忽略大小写）匹配的进程
    fn find_process(&self, image_name: &str) -> Option<u32>;

    /// 将进程的主窗口恢复并带到前台；找到并前台化窗口时返回 true
    fn activate(&self, pid: u32) -> bool;

    /// 通过外壳机制启动目标（可执行文件、文件夹或 URL）
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError>;
}
