use crate::error::RegistryError;
use crate::platform::traits::HotkeyBackend;

/// 热键注册表
///
/// 独占操作系统级的注册表项：除本组件外没有任何代码直接调用
/// 注册原语。注册 ID 为进程内单调递增的分配（从 1 开始，永不为 0，
/// 进程生命周期内不复用），在尝试 OS 注册之前就已分配，
/// 因此失败的尝试也不会让后续 ID 产生歧义。
pub struct HotkeyRegistry {
    /// 平台后端
    backend: Box<dyn HotkeyBackend>,
    /// 下一个待分配的注册 ID
    next_id: i32,
    /// 当前持有的注册
    registered: Vec<i32>,
}

impl HotkeyRegistry {
    /// 创建新的热键注册表
    pub fn new(backend: Box<dyn HotkeyBackend>) -> Self {
        Self {
            backend,
            next_id: 1,
            registered: Vec::new(),
        }
    }

    /// 注册全局热键，成功时返回分配的注册 ID
    ///
    /// 组合键被占用或无效时返回 `RegistrationFailed`（非致命，
    /// 调用方按条目上报）。不自动重试。
    pub fn register(&mut self, modifiers: u32, key: u32) -> Result<i32, RegistryError> {
        let id = self.next_id;
        self.next_id += 1;

        self.backend.register(id, modifiers, key)?;
        self.registered.push(id);
        Ok(id)
    }

    /// 注销指定注册；对未持有的 id 是无操作
    pub fn unregister(&mut self, id: i32) {
        if let Some(pos) = self.registered.iter().position(|&r| r == id) {
            self.registered.swap_remove(pos);
            self.backend.unregister(id);
        }
    }

    /// 注销全部当前持有的注册；幂等
    pub fn unregister_all(&mut self) {
        for id in self.registered.drain(..) {
            self.backend.unregister(id);
        }
    }

    /// 指定 id 是否当前持有
    pub fn is_registered(&self, id: i32) -> bool {
        self.registered.contains(&id)
    }

    /// 当前持有的注册数量
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }
}
