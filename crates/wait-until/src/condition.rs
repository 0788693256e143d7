use std::future::Future;

use async_trait::async_trait;

/// A check the poller evaluates once per attempt.
#[async_trait]
pub trait Condition: Send + Sync {
    type Error: Send;

    /// Returns `Ok(true)` once the awaited state holds.
    async fn check(&self) -> Result<bool, Self::Error>;
}

/// Adapter turning an async closure into a [`Condition`].
pub struct FnCondition<F> {
    check: F,
}

pub fn condition_fn<F, Fut, E>(check: F) -> FnCondition<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, E>> + Send,
    E: Send,
{
    FnCondition { check }
}

#[async_trait]
impl<F, Fut, E> Condition for FnCondition<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, E>> + Send,
    E: Send,
{
    type Error = E;

    async fn check(&self) -> Result<bool, E> {
        (self.check)().await
    }
}
