//! 启动/激活决策引擎
//!
//! 热键触发后，决定是启动新进程还是把已运行实例的窗口带到前台：
//! - URL 永远新启动（没有可激活的"运行中进程"概念）
//! - 路径目标先按镜像名查找运行中的进程，找到则激活其主窗口
//! - 找不到才启动新进程
//!
//! 启动失败只记录日志，激活失败完全静默——热键是即发即弃的手势，
//! 绝不能用对话框打断用户。

use crate::platform::traits::{LaunchHost, LaunchRequest};
use crate::settings::HotkeyBinding;

/// 进程启动器
pub struct ProcessLauncher {
    host: Box<dyn LaunchHost>,
}

impl ProcessLauncher {
    pub fn new(host: Box<dyn LaunchHost>) -> Self {
        Self { host }
    }

    /// 对一条绑定执行启动或激活
    pub fn resolve(&self, binding: &HotkeyBinding) {
        let target = binding.target_path.trim();

        // 防御：调和器不会注册空目标的绑定，这里仍然兜底
        if target.is_empty() {
            return;
        }

        // URL 没有对应的运行中进程，总是新启动
        if is_url(target) {
            self.launch(binding);
            return;
        }

        // 从路径推导进程镜像名（不含扩展名的文件名）
        let Some(image_name) = file_stem(target) else {
            self.launch(binding);
            return;
        };

        match self.host.find_process(&image_name) {
            Some(pid) => {
                // 激活失败静默：用户可能已经关掉了应用，下次按键会重新启动
                if !self.host.activate(pid) {
                    log::debug!("no window to activate for {} (pid {})", image_name, pid);
                }
            }
            None => self.launch(binding),
        }
    }

    /// 打开任意路径（托盘"设置"入口用它拉起外部编辑器）
    pub fn open(&self, path: &str) {
        let request = LaunchRequest {
            path: path.to_string(),
            arguments: String::new(),
            working_directory: String::new(),
            elevate: false,
        };
        if let Err(e) = self.host.launch(&request) {
            log::warn!("failed to open {}: {}", path, e);
        }
    }

    fn launch(&self, binding: &HotkeyBinding) {
        let request = LaunchRequest::from_binding(binding);
        if let Err(e) = self.host.launch(&request) {
            log::warn!("failed to launch {}: {}", binding.target_path, e);
        }
    }
}

/// 判断目标是否为 http(s) URL（大小写不敏感）
fn is_url(target: &str) -> bool {
    prefix_ignore_case(target, "http://") || prefix_ignore_case(target, "https://")
}

fn prefix_ignore_case(target: &str, prefix: &str) -> bool {
    target
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// 路径基础文件名去掉扩展名
///
/// 手动按 `/` 和 `\` 两种分隔符切分：配置里的目标路径是 Windows
/// 形式的字符串，决策逻辑本身不依赖宿主平台的路径语义。
fn file_stem(target: &str) -> Option<String> {
    let name = target.rsplit(['/', '\\']).next().unwrap_or(target);
    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(pos) => &name[..pos],
    };
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
