use std::collections::HashMap;
use std::rc::Rc;

use crate::settings::HotkeyBinding;

/// 绑定触发时执行的动作
pub type BindingAction = Rc<dyn Fn(&HotkeyBinding)>;

/// 分发表条目
struct DispatchEntry {
    binding: HotkeyBinding,
    action: BindingAction,
}

/// 热键分发器
///
/// 维护注册 ID 到逻辑绑定及其动作的映射。与消息窗口同线程运行，
/// 不需要任何并发保护。
#[derive(Default)]
pub struct HotkeyDispatcher {
    entries: HashMap<i32, DispatchEntry>,
}

impl HotkeyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 绑定注册 ID 到动作；替换同 id 的旧条目
    pub fn bind(&mut self, id: i32, binding: HotkeyBinding, action: BindingAction) {
        self.entries.insert(id, DispatchEntry { binding, action });
    }

    /// 路由一次热键触发
    ///
    /// 未知 id 静默忽略并返回 false——注销之后、分发表更新之前
    /// 送达的通知属于调和期间的正常竞态，不是错误。
    pub fn route(&self, id: i32) -> bool {
        match self.entries.get(&id) {
            Some(entry) => {
                (entry.action)(&entry.binding);
                true
            }
            None => false,
        }
    }

    /// 查看 id 当前绑定的配置
    pub fn binding(&self, id: i32) -> Option<&HotkeyBinding> {
        self.entries.get(&id).map(|e| &e.binding)
    }

    /// 清空整个分发表
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
