// 全局常量定义
//
// 修饰键掩码和虚拟键码与 Win32 的 RegisterHotKey 约定保持一致，
// 在非 Windows 平台上也可用于纯逻辑测试。

/// 修饰键掩码（与 Win32 MOD_* 相同的位值）
pub const MOD_NONE: u32 = 0x0000;
pub const MOD_ALT: u32 = 0x0001;
pub const MOD_CONTROL: u32 = 0x0002;
pub const MOD_SHIFT: u32 = 0x0004;
pub const MOD_WIN: u32 = 0x0008;

/// 常用虚拟键码
pub const VK_0: u32 = 0x30;
pub const VK_9: u32 = 0x39;
pub const VK_A: u32 = 0x41;
pub const VK_Z: u32 = 0x5A;
pub const VK_F1: u32 = 0x70;
pub const VK_F12: u32 = 0x7B;
pub const VK_F13: u32 = 0x7C;
pub const VK_F24: u32 = 0x87;

// ==================== 窗口消息 ====================

/// 托盘图标回调消息（WM_USER + 1）
pub const WM_TRAYICON: u32 = 0x0400 + 1;
/// 外部编辑器保存配置后投递的重载消息（WM_APP + 1）
pub const WM_APP_RELOAD: u32 = 0x8000 + 1;

// ==================== 托盘菜单命令 ID ====================

pub const MENU_ID_SETTINGS: usize = 1001;
pub const MENU_ID_RELOAD: usize = 1002;
pub const MENU_ID_EXIT: usize = 1003;
