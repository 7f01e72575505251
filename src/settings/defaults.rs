//! Default value functions for serde deserialization

use uuid::Uuid;

use super::core::Theme;

/// 旧配置文件缺少 id 字段时补发一个新的稳定标识
pub fn default_binding_id() -> Uuid {
    Uuid::new_v4()
}

pub fn default_start_minimized() -> bool {
    true
}

pub fn default_theme() -> Theme {
    Theme::Dark
}
