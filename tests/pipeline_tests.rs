use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use hotkey_launcher::constants::{MOD_ALT, MOD_CONTROL, VK_F13};
use hotkey_launcher::error::{LaunchError, RegistryError};
use hotkey_launcher::launcher::ProcessLauncher;
use hotkey_launcher::platform::traits::{HotkeyBackend, LaunchHost, LaunchRequest};
use hotkey_launcher::settings::HotkeyBinding;
use hotkey_launcher::system::reconcile;
use hotkey_launcher::system::{HotkeyDispatcher, HotkeyRegistry};

struct FakeBackend {
    claimed: RefCell<HashSet<(u32, u32)>>,
    id_to_combo: RefCell<HashMap<i32, (u32, u32)>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            claimed: RefCell::new(HashSet::new()),
            id_to_combo: RefCell::new(HashMap::new()),
        }
    }
}

impl HotkeyBackend for FakeBackend {
    fn register(&self, id: i32, modifiers: u32, key: u32) -> Result<(), RegistryError> {
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

struct FakeHost {
    running_pid: Option<u32>,
    launched: Rc<RefCell<Vec<LaunchRequest>>>,
    activated: Rc<RefCell<Vec<u32>>>,
}

impl LaunchHost for FakeHost {
    fn find_process(&self, image_name: &str) -> Option<u32> {
        match image_name {
            "notepad" => self.running_pid,
            _ => None,
        }
    }

    fn activate(&self, pid: u32) -> bool {
        self.activated.borrow_mut().push(pid);
        true
    }

    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        self.launched.borrow_mut().push(request.clone());
        Ok(())
    }
}

fn binding(name: &str, modifiers: u32, key: u32, target: &str) -> HotkeyBinding {
    HotkeyBinding {
        name: name.to_string(),
        modifiers,
        key,
        target_path: target.to_string(),
        ..Default::default()
    }
}

#[test]
fn fired_hotkey_reaches_the_configured_target() {
    let launched = Rc::new(RefCell::new(Vec::new()));
    let activated = Rc::new(RefCell::new(Vec::new()));

    let launcher = Rc::new(ProcessLauncher::new(Box::new(FakeHost {
        running_pid: Some(4242),
        launched: Rc::clone(&launched),
        activated: Rc::clone(&activated),
    })));

    let mut registry = HotkeyRegistry::new(Box::new(FakeBackend::new()));
    let mut dispatcher = HotkeyDispatcher::new();

    let mut bindings = vec![
        binding("editor", MOD_CONTROL | MOD_ALT, 0x45, "C:\\Tools\\editor.exe"),
        binding("notes", MOD_CONTROL, 0x4E, "C:\\Windows\\notepad.exe"),
        binding("docs", 0, VK_F13, "https://docs.example.com"),
    ];

    let failures = reconcile::apply(&mut registry, &mut dispatcher, &mut bindings, &launcher);
    assert!(failures.is_empty());

    // 触发第二条：notepad 已在运行，应激活而不是再启动
    dispatcher.route(bindings[1].registration_id);
    assert_eq!(*activated.borrow(), vec![4242]);
    assert!(launched.borrow().is_empty());

    // 触发第三条：URL 永远新启动
    dispatcher.route(bindings[2].registration_id);
    assert_eq!(launched.borrow().len(), 1);
    assert_eq!(launched.borrow()[0].path, "https://docs.example.com");

    // 触发第一条：没有同名进程在运行，启动新进程
    dispatcher.route(bindings[0].registration_id);
    assert_eq!(launched.borrow()[1].path, "C:\\Tools\\editor.exe");
}

#[test]
fn edit_cycle_reconciles_cleanly() {
    let launcher = Rc::new(ProcessLauncher::new(Box::new(FakeHost {
        running_pid: None,
        launched: Rc::new(RefCell::new(Vec::new())),
        activated: Rc::new(RefCell::new(Vec::new())),
    })));

    let mut registry = HotkeyRegistry::new(Box::new(FakeBackend::new()));
    let mut dispatcher = HotkeyDispatcher::new();

    let mut bindings = vec![binding("a", MOD_CONTROL, 0x41, "C:\\a.exe")];
    reconcile::apply(&mut registry, &mut dispatcher, &mut bindings, &launcher);
    let first_id = bindings[0].registration_id;
    assert_eq!(first_id, 1);

    // 用户编辑了组合键并保存：完整调和重新分配 ID
    bindings[0].key = 0x42;
    reconcile::apply(&mut registry, &mut dispatcher, &mut bindings, &launcher);
    assert_eq!(bindings[0].registration_id, 2);

    // 旧 ID 的迟到通知被静默吞掉
    assert!(!dispatcher.route(first_id));
    assert!(dispatcher.route(bindings[0].registration_id));
}
