/// Durable, per-device key/value storage with no expiry.
pub trait DurableStorage {
    /// Reads the value stored under `key`, `None` when nothing was ever written.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
