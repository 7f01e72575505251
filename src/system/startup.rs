//! 开机自启动注册
//!
//! 通过 HKCU 的 Run 键实现，随 `start_with_windows` 偏好同步。

use winreg::RegKey;
use winreg::enums::HKEY_CURRENT_USER;

use crate::error::SystemError;

const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";
const APP_NAME: &str = "HotkeyLauncher";

/// 查询当前是否已注册自启动
pub fn is_registered() -> bool {
    RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey(RUN_KEY)
        .and_then(|key| key.get_value::<String, _>(APP_NAME))
        .is_ok()
}

/// 把注册状态同步到偏好值；已一致时不触碰注册表
pub fn sync(desired: bool) -> Result<(), SystemError> {
    if is_registered() == desired {
        return Ok(());
    }
    set_enabled(desired)
}

/// 启用或禁用自启动
///
/// 禁用时值不存在是无操作，不算错误。
pub fn set_enabled(enable: bool) -> Result<(), SystemError> {
    let (key, _) = RegKey::predef(HKEY_CURRENT_USER)
        .create_subkey(RUN_KEY)
        .map_err(|e| SystemError::StartupError(e.to_string()))?;

    if enable {
        let exe_path = std::env::current_exe()
            .map_err(|e| SystemError::StartupError(e.to_string()))?;
        key.set_value(APP_NAME, &format!("\"{}\"", exe_path.display()))
            .map_err(|e| SystemError::StartupError(e.to_string()))?;
    } else {
        match key.delete_value(APP_NAME) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(SystemError::StartupError(e.to_string())),
        }
    }

    Ok(())
}
