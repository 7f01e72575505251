//! Core settings data structure and persistence
//!
//! This module contains the HotkeyBinding and Settings struct definitions,
//! serialization/deserialization, and core methods.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::constants::*;
use crate::error::SettingsError;

use super::defaults::*;

/// 显示主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    Dark,
    Light,
}

/// 单条热键绑定
///
/// `registration_id` 是注册表分配的瞬态句柄，每次完整调和时重新计算，
/// 不参与持久化；0 表示未注册。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotkeyBinding {
    /// 稳定标识，创建时分配，重排/改名后保持不变
    #[serde(default = "default_binding_id")]
    pub id: Uuid,
    /// 显示名称，可为空
    #[serde(default)]
    pub name: String,
    /// 修饰键掩码（MOD_CONTROL | MOD_ALT | ...），允许为空
    #[serde(default)]
    pub modifiers: u32,
    /// 虚拟键码，0 表示未设置
    #[serde(default)]
    pub key: u32,
    /// 可执行文件路径、文件夹路径或 http(s) URL
    #[serde(default)]
    pub target_path: String,
    /// 传递给目标进程的参数字符串
    #[serde(default)]
    pub arguments: String,
    /// 工作目录，空表示使用默认
    #[serde(default)]
    pub working_directory: String,
    /// 以管理员权限启动
    #[serde(default)]
    pub elevate: bool,
    /// 最近一次注册成功返回的注册 ID（瞬态，不持久化）
    #[serde(skip)]
    pub registration_id: i32,
}

impl Default for HotkeyBinding {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            modifiers: MOD_NONE,
            key: 0,
            target_path: String::new(),
            arguments: String::new(),
            working_directory: String::new(),
            elevate: false,
            registration_id: 0,
        }
    }
}

impl HotkeyBinding {
    /// 是否启用（目标路径非空的绑定才会参与注册）
    pub fn is_enabled(&self) -> bool {
        !self.target_path.trim().is_empty()
    }

    /// 组合键是否完整（键码为 0 表示"未设置"，永不注册）
    pub fn is_complete(&self) -> bool {
        self.key != 0
    }

    /// 修饰键的显示文本，例如 "Ctrl + Alt"
    pub fn modifier_text(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers & MOD_CONTROL != 0 {
            parts.push("Ctrl");
        }
        if self.modifiers & MOD_ALT != 0 {
            parts.push("Alt");
        }
        if self.modifiers & MOD_SHIFT != 0 {
            parts.push("Shift");
        }
        if self.modifiers & MOD_WIN != 0 {
            parts.push("Win");
        }
        parts.join(" + ")
    }

    /// 主键的显示文本
    pub fn key_text(&self) -> String {
        match self.key {
            VK_0..=VK_9 | VK_A..=VK_Z => char::from(self.key as u8).to_string(),
            VK_F1..=VK_F24 => format!("F{}", self.key - VK_F1 + 1),
            _ => format!("0x{:02X}", self.key),
        }
    }

    /// 完整组合键的显示文本，例如 "Ctrl + Alt + F5"
    pub fn display_text(&self) -> String {
        let modifier_text = self.modifier_text();
        if modifier_text.is_empty() {
            self.key_text()
        } else {
            format!("{} + {}", modifier_text, self.key_text())
        }
    }
}

/// 应用程序设置（配置集）
///
/// 绑定顺序对用户有意义（拖拽排序只改变持久化顺序，不影响分发）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// 有序的热键绑定列表
    #[serde(default)]
    pub bindings: Vec<HotkeyBinding>,
    /// 启动时是否只显示托盘（不打开编辑器）
    #[serde(default = "default_start_minimized")]
    pub start_minimized: bool,
    /// 是否随 Windows 启动
    #[serde(default)]
    pub start_with_windows: bool,
    /// 显示主题
    #[serde(default = "default_theme")]
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            start_minimized: true,
            start_with_windows: false,
            theme: default_theme(),
        }
    }
}

impl Settings {
    /// 获取设置文件路径
    pub fn settings_path() -> PathBuf {
        // 优先使用用户配置目录（USERPROFILE）
        if let Ok(user_profile) = std::env::var("USERPROFILE") {
            let mut path = PathBuf::from(user_profile);
            path.push(".hotkey_launcher");
            if std::fs::create_dir_all(&path).is_ok() {
                path.push("settings.json");
                return path;
            }
        }

        // 回退到程序目录
        let mut path = std::env::current_exe().unwrap_or_default();
        path.set_file_name("settings.json");
        path
    }

    /// 从磁盘加载设置
    ///
    /// 文件不存在或解析失败时回退到默认值并重写文件（与保守的
    /// 首次启动行为一致），绝不因配置损坏而中止启动。
    pub fn load() -> Self {
        let path = Self::settings_path();

        let settings = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Settings>(&content) {
                Ok(settings) => return settings,
                Err(e) => {
                    log::warn!("settings parse failed, using defaults: {}", e);
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        };

        let _ = settings.save();
        settings
    }

    /// 保存设置到磁盘
    pub fn save(&self) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(Self::settings_path(), json)?;
        Ok(())
    }

    /// 添加一条绑定并持久化
    pub fn add_binding(&mut self, binding: HotkeyBinding) -> Result<(), SettingsError> {
        self.bindings.push(binding);
        self.save()
    }

    /// 按 id 更新一条绑定并持久化；id 不存在时不做任何事
    pub fn update_binding(&mut self, binding: HotkeyBinding) -> Result<(), SettingsError> {
        if let Some(slot) = self.bindings.iter_mut().find(|b| b.id == binding.id) {
            *slot = binding;
            self.save()?;
        }
        Ok(())
    }

    /// 按 id 删除绑定并持久化
    pub fn remove_binding(&mut self, id: Uuid) -> Result<(), SettingsError> {
        self.bindings.retain(|b| b.id != id);
        self.save()
    }

    /// 移动绑定位置（拖拽排序），只改变持久化顺序
    pub fn move_binding(&mut self, from: usize, to: usize) -> Result<(), SettingsError> {
        if from < self.bindings.len() && to < self.bindings.len() && from != to {
            let binding = self.bindings.remove(from);
            self.bindings.insert(to, binding);
            self.save()?;
        }
        Ok(())
    }

    /// 在编辑边界检查重复组合键
    ///
    /// 返回与给定组合相同、且不是 `exclude` 自身的第一条绑定。
    /// 与其他进程的系统级冲突在注册时才能发现，不在此处处理。
    pub fn find_duplicate(&self, modifiers: u32, key: u32, exclude: Uuid) -> Option<&HotkeyBinding> {
        self.bindings
            .iter()
            .find(|b| b.id != exclude && b.modifiers == modifiers && b.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    fn binding(modifiers: u32, key: u32) -> HotkeyBinding {
        HotkeyBinding {
            modifiers,
            key,
            target_path: "C:\\Windows\\notepad.exe".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn display_text_with_modifiers() {
        let b = binding(MOD_CONTROL | MOD_ALT, VK_F1 + 4);
        assert_eq!(b.display_text(), "Ctrl + Alt + F5");
    }

    #[test]
    fn display_text_bare_function_key() {
        // 无修饰键的绑定是允许的，例如裸 F13
        let b = binding(MOD_NONE, VK_F13);
        assert_eq!(b.display_text(), "F13");
    }

    #[test]
    fn display_text_letter_and_digit() {
        assert_eq!(binding(MOD_WIN, VK_A).display_text(), "Win + A");
        assert_eq!(binding(MOD_SHIFT, VK_0).display_text(), "Shift + 0");
    }

    #[test]
    fn key_text_unknown_code_falls_back_to_hex() {
        let b = binding(MOD_NONE, 0xAD);
        assert_eq!(b.key_text(), "0xAD");
    }

    #[test]
    fn incomplete_binding_detected() {
        let b = binding(MOD_CONTROL, 0);
        assert!(!b.is_complete());
        assert!(b.is_enabled());

        let mut b = binding(MOD_CONTROL, VK_A);
        b.target_path = "   ".to_string();
        assert!(!b.is_enabled());
    }

    #[test]
    fn registration_id_not_serialized() {
        let mut b = binding(MOD_CONTROL, VK_A);
        b.registration_id = 42;

        let json = serde_json::to_value(&b).unwrap();
        assert!(json.get("registrationId").is_none());

        // 其余字段无损往返
        let back: HotkeyBinding = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, b.id);
        assert_eq!(back.modifiers, b.modifiers);
        assert_eq!(back.key, b.key);
        assert_eq!(back.target_path, b.target_path);
        assert_eq!(back.registration_id, 0);
    }

    #[test]
    fn find_duplicate_ignores_self() {
        let first = binding(MOD_CONTROL, VK_A);
        let second = binding(MOD_CONTROL, VK_A);
        let settings = Settings {
            bindings: vec![first.clone(), second.clone()],
            ..Default::default()
        };

        // 排除自身后仍能找到另一条相同组合
        let dup = settings.find_duplicate(MOD_CONTROL, VK_A, first.id).unwrap();
        assert_eq!(dup.id, second.id);

        // 只有自己时没有重复
        let settings = Settings {
            bindings: vec![first.clone()],
            ..Default::default()
        };
        assert!(settings.find_duplicate(MOD_CONTROL, VK_A, first.id).is_none());
    }

    #[test]
    fn settings_round_trip_preserves_order() {
        let settings = Settings {
            bindings: vec![binding(MOD_ALT, VK_A), binding(MOD_ALT, VK_Z)],
            start_minimized: false,
            start_with_windows: true,
            theme: Theme::Light,
        };

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bindings.len(), 2);
        assert_eq!(back.bindings[0].key, VK_A);
        assert_eq!(back.bindings[1].key, VK_Z);
        assert!(!back.start_minimized);
        assert!(back.start_with_windows);
        assert_eq!(back.theme, Theme::Light);
    }
}
