use redis::RedisResult;

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    /// Fixed-window counter: true while `key` has been hit at most `limit` times in the window.
    ///
    /// The window starts with the first hit; later hits never extend it.
    pub async fn check_rate_limit(&self, key: &str, limit: i64, window_seconds: i64) -> RedisResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let (count,): (i64,) = fixed_window(key, window_seconds)
            .query_async(&mut conn)
            .await?;

        Ok(count <= limit)
    }
}

/// `SET key 0 NX EX window` then `INCR key`, in one transaction
fn fixed_window(key: &str, window_seconds: i64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET").arg(key).arg(0).arg("NX").arg("EX").arg(window_seconds)
        .ignore()
        .incr(key, 1);
    pipe
}
