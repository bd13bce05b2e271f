//! 冲突重试策略（RetryPolicy）
//!
//! 乐观并发写入冲突时的指数退避配置：
//! `delay = initial_delay * multiplier^(retry - 1)`，封顶 `max_delay`，
//! 开启抖动时再乘以 [0.5, 1.0] 区间的随机系数以错开并发写者。
//!
use bon::Builder;
use rand::Rng;
use std::time::Duration;

#[derive(Builder, Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// 总尝试次数（含首次），至少为 1
    #[builder(default = 5)]
    pub max_attempts: usize,
    #[builder(default = Duration::from_millis(10))]
    pub initial_delay: Duration,
    #[builder(default = Duration::from_secs(1))]
    pub max_delay: Duration,
    #[builder(default = 2.0)]
    pub multiplier: f64,
    #[builder(default = true)]
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    /// 只尝试一次，冲突即失败
    pub fn no_retry() -> Self {
        Self::builder().max_attempts(1).build()
    }

    pub fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }

    /// 第 `retry` 次重试前的等待时长（`retry` 从 1 开始）
    pub fn delay_for_attempt(&self, retry: usize) -> Duration {
        let exponent = retry.saturating_sub(1).min(i32::MAX as usize) as i32;
        let base = self.initial_delay.as_nanos() as f64 * self.multiplier.powi(exponent);
        let capped = base.min(self.max_delay.as_nanos() as f64).max(0.0);

        let scaled = if self.jitter {
            capped * rand::thread_rng().gen_range(0.5..=1.0)
        } else {
            capped
        };
        Duration::from_nanos(scaled.round() as u64)
    }
}
