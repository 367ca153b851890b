//! In-memory key-value store.

use super::{KvError, KvResult, KvStore};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Process-local store. Clones share the same underlying map, so a test can
/// keep a handle while a repository owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    inner: Rc<RefCell<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, Vec<u8>>,
    fail_writes: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set`/`remove` fail with `KvError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Raw bytes currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.borrow().entries.get(key).cloned()
    }

    fn check_writable(&self) -> KvResult<()> {
        if self.inner.borrow().fail_writes {
            return Err(KvError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> KvResult<()> {
        self.check_writable()?;
        self.inner
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        self.check_writable()?;
        self.inner.borrow_mut().entries.remove(key);
        Ok(())
    }
}
