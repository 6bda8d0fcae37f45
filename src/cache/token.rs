/// Cached value with its absolute deadline
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub value: V,
    /// UNIX timestamp in ms, 0 never expires
    pub expires_at: i64,
}

pub const NEVER_EXPIRES: i64 = 0;

impl<V> CacheEntry<V> {
    pub fn new(value: V, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    pub fn is_live_at(&self, now_millis: i64) -> bool {
        self.expires_at == NEVER_EXPIRES || now_millis <= self.expires_at
    }
}
