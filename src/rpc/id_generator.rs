use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

static GLOBAL: LazyLock<Arc<IdGenerator>> = LazyLock::new(|| Arc::new(IdGenerator::new()));

/// Hands out request ids seeded from the wall clock in nanoseconds.
///
/// While the clock has moved past the last id handed out, the next id is the
/// current timestamp. Otherwise (several calls inside one tick, or the clock
/// stepping backwards) the offset keeps counting up from the last seed. The
/// read-modify-write happens under one lock, so concurrent callers can never
/// observe the same value.
pub struct IdGenerator {
    state: Mutex<IdState>,
    clock: Clock,
}

#[derive(Debug, Default)]
struct IdState {
    base: i64,
    offset: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(now_nanos))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: Mutex::new(IdState::default()),
            clock,
        }
    }

    /// The instance shared by every client in the process.
    pub fn global() -> Arc<IdGenerator> {
        Arc::clone(&GLOBAL)
    }

    pub fn next_id(&self) -> i64 {
        let mut state = self.state.lock();
        let now = (self.clock)();
        if state.base.saturating_add(state.offset) < now {
            state.base = now;
            state.offset = 0;
        } else {
            state.offset += 1;
        }
        state.base + state.offset
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("IdGenerator")
            .field("base", &state.base)
            .field("offset", &state.offset)
            .finish()
    }
}

fn now_nanos() -> i64 {
    // Out of i64 range only after 2262.
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

