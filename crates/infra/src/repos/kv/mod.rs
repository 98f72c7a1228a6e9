mod inmemory;

pub use inmemory::InMemoryKVRepo;

/// Remembers which entity was created for an idempotency key
#[async_trait::async_trait]
pub trait IKVRepo: Send + Sync {
    /// Stores `value` under `key` unless the key is taken. Returns the value
    /// already stored under the key, if any.
    async fn set_if_absent(&self, key: &str, value: &str) -> anyhow::Result<Option<String>>;
    async fn get(&self, key: &str) -> Option<String>;
    async fn delete(&self, key: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use crate::LectureContext;

    #[tokio::test]
    async fn test_kv_queries() {
        let ctx = LectureContext::create_inmemory();

        assert_eq!(
            ctx.repos.key_values.set_if_absent("1", "a").await.unwrap(),
            None
        );
        assert_eq!(
            ctx.repos.key_values.set_if_absent("1", "b").await.unwrap(),
            Some("a".into())
        );
        assert_eq!(ctx.repos.key_values.get("1").await, Some("a".into()));

        assert_eq!(ctx.repos.key_values.delete("1").await, Some("a".into()));
        assert!(ctx.repos.key_values.get("1").await.is_none());
    }
}
