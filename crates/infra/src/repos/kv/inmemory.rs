use super::IKVRepo;
use dashmap::{mapref::entry::Entry, DashMap};

pub struct InMemoryKVRepo {
    values: DashMap<String, String>,
}

impl InMemoryKVRepo {
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
        }
    }
}

#[async_trait::async_trait]
impl IKVRepo for InMemoryKVRepo {
    async fn set_if_absent(&self, key: &str, value: &str) -> anyhow::Result<Option<String>> {
        match self.values.entry(key.to_string()) {
            Entry::Occupied(existing) => Ok(Some(existing.get().clone())),
            Entry::Vacant(entry) => {
                entry.insert(value.to_string());
                Ok(None)
            }
        }
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }

    async fn delete(&self, key: &str) -> Option<String> {
        self.values.remove(key).map(|(_, v)| v)
    }
}
