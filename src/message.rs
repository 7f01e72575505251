// 全局消息系统
//
// 定义托盘和应用协调器之间通信的命令类型。
// 托盘只产生命令，具体执行由 App 统一处理，避免模块间直接访问状态。

/// 应用级命令枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// 空命令
    None,
    /// 打开外部设置编辑器
    ShowSettings,
    /// 从磁盘重新加载配置并重新注册所有热键
    ReloadBindings,
    /// 退出应用程序
    Exit,
}
