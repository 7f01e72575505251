//! 配置调和器
//!
//! 把完整的配置集落到注册表 + 分发器上：先全部注销，再按顺序
//! 重新注册每条启用的绑定。跨条目没有事务性——用户配置了冲突
//! 组合时，部分成功是预期的正常结果，单条失败绝不阻塞其余绑定。

use std::rc::Rc;

use crate::launcher::ProcessLauncher;
use crate::settings::HotkeyBinding;

use super::dispatch::HotkeyDispatcher;
use super::hotkeys::HotkeyRegistry;

/// 单条绑定的注册失败报告（上报给托盘气泡等通知方）
#[derive(Debug, Clone)]
pub struct RegistrationFailure {
    /// 绑定的显示名称
    pub name: String,
    /// 组合键的显示文本，例如 "Ctrl + Alt + F5"
    pub combination: String,
    /// 操作系统给出的失败原因
    pub reason: String,
}

/// 应用一个配置集
///
/// 每条绑定的瞬态 `registration_id` 都会被重置；注册成功的条目
/// 写回新分配的 ID 并绑定到分发器，动作为调用启动/激活引擎。
/// 返回按顺序收集的失败报告。
pub fn apply(
    registry: &mut HotkeyRegistry,
    dispatcher: &mut HotkeyDispatcher,
    bindings: &mut [HotkeyBinding],
    launcher: &Rc<ProcessLauncher>,
) -> Vec<RegistrationFailure> {
    registry.unregister_all();
    dispatcher.clear();

    let mut failures = Vec::new();

    for binding in bindings.iter_mut() {
        binding.registration_id = 0;

        // 空目标视为禁用；键码 0 表示组合不完整，永不注册
        if !binding.is_enabled() || !binding.is_complete() {
            continue;
        }

        match registry.register(binding.modifiers, binding.key) {
            Ok(id) => {
                binding.registration_id = id;
                let launcher = Rc::clone(launcher);
                dispatcher.bind(id, binding.clone(), Rc::new(move |b| launcher.resolve(b)));
            }
            Err(e) => {
                failures.push(RegistrationFailure {
                    name: binding.name.clone(),
                    combination: binding.display_text(),
                    reason: e.to_string(),
                });
            }
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::error::{LaunchError, RegistryError};
    use crate::platform::traits::{HotkeyBackend, LaunchHost, LaunchRequest};
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;

    /// 模拟系统级冲突的假后端
    ///
    /// 注销会释放占用的组合键，与真实的 UnregisterHotKey 一致。
    struct FakeBackend {
        claimed: RefCell<HashSet<(u32, u32)>>,
        id_to_combo: RefCell<HashMap<i32, (u32, u32)>>,
        register_calls: Rc<RefCell<usize>>,
    }

    impl FakeBackend {
        fn new() -> (Self, Rc<RefCell<usize>>) {
            let calls = Rc::new(RefCell::new(0));
            (
                Self {
                    claimed: RefCell::new(HashSet::new()),
                    id_to_combo: RefCell::new(HashMap::new()),
                    register_calls: Rc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl HotkeyBackend for FakeBackend {
        fn register(&self, id: i32, modifiers: u32, key: u32) -> Result<(), RegistryError> {
            *self.register_calls.borrow_mut() += 1;
            if !self.claimed.borrow_mut().insert((modifiers, key)) {
                return Err(RegistryError::RegistrationFailed(
                    "hotkey already claimed".to_string(),
                ));
            }
            self.id_to_combo.borrow_mut().insert(id, (modifiers, key));
            Ok(())
        }

        fn unregister(&self, id: i32) {
            if let Some(combo) = self.id_to_combo.borrow_mut().remove(&id) {
                self.claimed.borrow_mut().remove(&combo);
            }
        }
    }

    struct NullHost;

    impl LaunchHost for NullHost {
        fn find_process(&self, _image_name: &str) -> Option<u32> {
            None
        }
        fn activate(&self, _pid: u32) -> bool {
            false
        }
        fn launch(&self, _request: &LaunchRequest) -> Result<(), LaunchError> {
            Ok(())
        }
    }

    fn launcher() -> Rc<ProcessLauncher> {
        Rc::new(ProcessLauncher::new(Box::new(NullHost)))
    }

    fn binding(name: &str, modifiers: u32, key: u32) -> HotkeyBinding {
        HotkeyBinding {
            name: name.to_string(),
            modifiers,
            key,
            target_path: "C:\\Windows\\notepad.exe".to_string(),
            ..Default::default()
        }
    }

    fn setup() -> (HotkeyRegistry, HotkeyDispatcher, Rc<RefCell<usize>>) {
        let (backend, calls) = FakeBackend::new();
        (
            HotkeyRegistry::new(Box::new(backend)),
            HotkeyDispatcher::new(),
            calls,
        )
    }

    #[test]
    fn incomplete_or_disabled_bindings_never_reach_backend() {
        let (mut registry, mut dispatcher, register_calls) = setup();

        let mut bindings = vec![
            binding("no key", MOD_CONTROL, 0),
            HotkeyBinding {
                name: "no target".to_string(),
                modifiers: MOD_CONTROL,
                key: VK_A,
                ..Default::default()
            },
        ];

        let failures = apply(&mut registry, &mut dispatcher, &mut bindings, &launcher());
        assert!(failures.is_empty());
        assert_eq!(*register_calls.borrow(), 0);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn assigns_distinct_increasing_ids() {
        let (mut registry, mut dispatcher, _) = setup();
        let mut bindings = vec![
            binding("a", MOD_CONTROL, VK_A),
            binding("b", MOD_CONTROL, VK_Z),
            binding("c", MOD_ALT, VK_F1),
        ];

        let failures = apply(&mut registry, &mut dispatcher, &mut bindings, &launcher());
        assert!(failures.is_empty());

        let ids: Vec<i32> = bindings.iter().map(|b| b.registration_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(dispatcher.len(), 3);
    }

    #[test]
    fn conflicting_combination_fails_second_binding_only() {
        let (mut registry, mut dispatcher, _) = setup();
        let mut bindings = vec![
            binding("first", MOD_CONTROL | MOD_ALT, VK_F1 + 4),
            binding("second", MOD_CONTROL | MOD_ALT, VK_F1 + 4),
            binding("third", MOD_CONTROL, VK_A),
        ];

        let failures = apply(&mut registry, &mut dispatcher, &mut bindings, &launcher());

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "second");
        assert_eq!(failures[0].combination, "Ctrl + Alt + F5");

        // 第一条成功，失败的条目保持 0，后续条目不受影响
        assert_eq!(bindings[0].registration_id, 1);
        assert_eq!(bindings[1].registration_id, 0);
        assert_ne!(bindings[2].registration_id, 0);
    }

    #[test]
    fn reorder_gets_fresh_ids_on_next_apply() {
        let (mut registry, mut dispatcher, _) = setup();
        let mut bindings = vec![
            binding("a", MOD_CONTROL, VK_A),
            binding("b", MOD_CONTROL, VK_Z),
        ];

        apply(&mut registry, &mut dispatcher, &mut bindings, &launcher());
        assert_eq!(bindings[0].registration_id, 1);
        assert_eq!(bindings[1].registration_id, 2);

        // 重排只改变持久化顺序；下一次调和按新顺序重新分配 ID。
        // 调和开头的全量注销已释放占用，相同组合不会和自己冲突。
        bindings.swap(0, 1);
        let failures = apply(&mut registry, &mut dispatcher, &mut bindings, &launcher());
        assert!(failures.is_empty());
        assert_eq!(bindings[0].name, "b");
        assert_eq!(bindings[0].registration_id, 3);
        assert_eq!(bindings[1].registration_id, 4);
    }

    #[test]
    fn stale_dispatch_entries_removed_by_apply() {
        let (mut registry, mut dispatcher, _) = setup();
        let mut bindings = vec![binding("a", MOD_CONTROL, VK_A)];

        apply(&mut registry, &mut dispatcher, &mut bindings, &launcher());
        let old_id = bindings[0].registration_id;

        // 删除绑定后再调和，旧 ID 的路由变成静默无操作
        let mut bindings: Vec<HotkeyBinding> = Vec::new();
        apply(&mut registry, &mut dispatcher, &mut bindings, &launcher());
        assert!(!dispatcher.route(old_id));
        assert_eq!(registry.registered_count(), 0);
    }
}
