// 工具函数模块

use std::{ffi::OsStr, iter::once, os::windows::ffi::OsStrExt};

pub mod win_api;

// ==================== 字符串转换 ====================

/// 将字符串转换为Windows API所需的宽字符格式
pub fn to_wide_chars(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(once(0)).collect()
}
