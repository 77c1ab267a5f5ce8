use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::{
        ports::RateLimiter,
        rate_limit::{EndpointClass, EndpointUsage, RateLimits},
    },
};

type Windows = HashMap<(Uuid, EndpointClass), VecDeque<Instant>>;

/// Every this many admissions, keys whose window has fully expired are dropped.
const PRUNE_EVERY: u64 = 1024;

#[derive(Debug, Default)]
struct State {
    windows: Windows,
    admissions: u64,
}

/// Sliding-window call counter keyed by (user, endpoint class).
///
/// State lives in process memory and is shared by clones, so every request
/// handler sees the same budget.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    limits: RateLimits,
    state: Arc<Mutex<State>>,
}

impl InMemoryRateLimiter {
    pub fn new(limits: RateLimits) -> Self {
        Self {
            limits,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    fn window(&self) -> Duration {
        Duration::from_secs(self.limits.window_secs)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, CoreError> {
        self.state.lock().map_err(|e| {
            error!("Rate limiter state poisoned: {}", e);
            CoreError::InternalServerError
        })
    }

    fn evict(calls: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = calls.front() {
            if now.saturating_duration_since(*oldest) >= window {
                calls.pop_front();
            } else {
                break;
            }
        }
    }

    fn try_acquire_at(
        &self,
        user_id: Uuid,
        endpoint: EndpointClass,
        now: Instant,
    ) -> Result<(), CoreError> {
        let limit = self.limits.limit_for(endpoint);
        let window = self.window();
        let mut state = self.lock()?;
        let key = (user_id, endpoint);
        let calls = state.windows.entry(key).or_default();

        Self::evict(calls, now, window);

        if calls.len() >= limit as usize {
            let retry_after = calls
                .front()
                .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
                .unwrap_or(window);
            if calls.is_empty() {
                state.windows.remove(&key);
            }
            warn!(
                user_id = %user_id,
                endpoint = %endpoint,
                limit,
                "Rate limit exceeded"
            );
            return Err(CoreError::RateLimited {
                endpoint: endpoint.to_string(),
                limit,
                retry_after_secs: retry_after.as_secs().max(1),
            });
        }

        calls.push_back(now);
        debug!(user_id = %user_id, endpoint = %endpoint, calls = calls.len(), "Call admitted");

        state.admissions += 1;
        if state.admissions % PRUNE_EVERY == 0 {
            Self::prune(&mut state.windows, now, window);
        }
        Ok(())
    }

    fn prune(windows: &mut Windows, now: Instant, window: Duration) {
        let before = windows.len();
        windows.retain(|_, calls| {
            Self::evict(calls, now, window);
            !calls.is_empty()
        });
        debug!(dropped = before - windows.len(), "Pruned expired rate limit windows");
    }

    fn usage_at(&self, user_id: Uuid, now: Instant) -> Result<Vec<EndpointUsage>, CoreError> {
        let window = self.window();
        let mut state = self.lock()?;

        Ok(EndpointClass::ALL
            .iter()
            .map(|endpoint| {
                let limit = self.limits.limit_for(*endpoint);
                let key = (user_id, *endpoint);
                let calls = match state.windows.get_mut(&key) {
                    Some(calls) => {
                        Self::evict(calls, now, window);
                        calls.len() as u32
                    }
                    None => 0,
                };
                if calls == 0 {
                    state.windows.remove(&key);
                }
                EndpointUsage {
                    endpoint: *endpoint,
                    calls,
                    limit,
                    remaining: limit.saturating_sub(calls),
                }
            })
            .collect())
    }
}

impl RateLimiter for InMemoryRateLimiter {
    async fn try_acquire(&self, user_id: Uuid, endpoint: EndpointClass) -> Result<(), CoreError> {
        self.try_acquire_at(user_id, endpoint, Instant::now())
    }

    async fn usage(&self, user_id: Uuid) -> Result<Vec<EndpointUsage>, CoreError> {
        self.usage_at(user_id, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::RateLimitConfig;

    fn limiter(analyze_recipe: u32, window_secs: u64) -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimits::new(RateLimitConfig {
            window_secs,
            analyze_recipe,
            ..RateLimitConfig::default()
        }))
    }

    #[tokio::test]
    async fn test_admits_up_to_limit() {
        let limiter = limiter(2, 60);
        let user = Uuid::new_v4();
        let now = Instant::now();

        assert!(limiter.try_acquire_at(user, EndpointClass::AnalyzeRecipe, now).is_ok());
        assert!(limiter.try_acquire_at(user, EndpointClass::AnalyzeRecipe, now).is_ok());
        let third = limiter.try_acquire_at(user, EndpointClass::AnalyzeRecipe, now);

        assert_eq!(
            third,
            Err(CoreError::RateLimited {
                endpoint: "analyze_recipe".to_string(),
                limit: 2,
                retry_after_secs: 60,
            })
        );
    }

    #[tokio::test]
    async fn test_calls_expire_after_window() {
        let limiter = limiter(1, 60);
        let user = Uuid::new_v4();
        let start = Instant::now();

        limiter
            .try_acquire_at(user, EndpointClass::AnalyzeRecipe, start)
            .unwrap();
        assert!(
            limiter
                .try_acquire_at(user, EndpointClass::AnalyzeRecipe, start + Duration::from_secs(30))
                .is_err()
        );
        assert!(
            limiter
                .try_acquire_at(user, EndpointClass::AnalyzeRecipe, start + Duration::from_secs(60))
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_retry_after_counts_down_from_oldest_call() {
        let limiter = limiter(1, 100);
        let user = Uuid::new_v4();
        let start = Instant::now();

        limiter
            .try_acquire_at(user, EndpointClass::AnalyzeRecipe, start)
            .unwrap();
        let err = limiter
            .try_acquire_at(user, EndpointClass::AnalyzeRecipe, start + Duration::from_secs(40))
            .unwrap_err();

        assert!(matches!(err, CoreError::RateLimited { retry_after_secs: 60, .. }));
    }

    #[tokio::test]
    async fn test_usage_reports_every_endpoint() {
        let limiter = limiter(5, 60);
        let user = Uuid::new_v4();
        let now = Instant::now();

        limiter
            .try_acquire_at(user, EndpointClass::AnalyzeRecipe, now)
            .unwrap();
        let usage = limiter.usage_at(user, now).unwrap();

        assert_eq!(usage.len(), EndpointClass::ALL.len());
        let recipe = usage
            .iter()
            .find(|u| u.endpoint == EndpointClass::AnalyzeRecipe)
            .unwrap();
        assert_eq!((recipe.calls, recipe.limit, recipe.remaining), (1, 5, 4));
    }

    fn tracked_keys(limiter: &InMemoryRateLimiter) -> usize {
        limiter.lock().unwrap().windows.len()
    }

    #[tokio::test]
    async fn test_expired_windows_are_dropped() {
        let limiter = limiter(5, 60);
        let user = Uuid::new_v4();
        let start = Instant::now();

        limiter
            .try_acquire_at(user, EndpointClass::AnalyzeRecipe, start)
            .unwrap();
        assert_eq!(tracked_keys(&limiter), 1);

        limiter
            .usage_at(user, start + Duration::from_secs(61))
            .unwrap();
        assert_eq!(tracked_keys(&limiter), 0);
    }

    #[tokio::test]
    async fn test_idle_users_are_pruned() {
        let limiter = limiter(5, 60);
        let start = Instant::now();
        let idle = Uuid::new_v4();

        limiter
            .try_acquire_at(idle, EndpointClass::AnalyzeRecipe, start)
            .unwrap();

        let later = start + Duration::from_secs(120);
        for _ in 1..PRUNE_EVERY {
            limiter
                .try_acquire_at(Uuid::new_v4(), EndpointClass::AnalyzeImage, later)
                .unwrap();
        }

        let state = limiter.lock().unwrap();
        assert!(!state.windows.contains_key(&(idle, EndpointClass::AnalyzeRecipe)));
        assert_eq!(state.windows.len() as u64, PRUNE_EVERY - 1);
    }

    #[tokio::test]
    async fn test_rejected_calls_do_not_consume_budget() {
        let limiter = limiter(1, 60);
        let user = Uuid::new_v4();
        let now = Instant::now();

        limiter
            .try_acquire_at(user, EndpointClass::AnalyzeRecipe, now)
            .unwrap();
        let _ = limiter.try_acquire_at(user, EndpointClass::AnalyzeRecipe, now);

        let usage = limiter.usage_at(user, now).unwrap();
        assert_eq!(usage[0].calls, 1);
    }
}
