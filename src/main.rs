/*!
 * Condition Wait Demo
 *
 * Blocks the main thread until a background ticker has bumped a shared
 * counter three times, then shows a bounded wait timing out.
 */

use observable_wait::{
    init_tracing, ChangeCallback, ConditionWaiter, Observable, PropertyNotifier, SubscriptionId,
    WaitConfig, WaitError,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

/// Counter that announces every change of its `count` property
#[derive(Default)]
struct Counter {
    count: AtomicU64,
    notifier: PropertyNotifier<&'static str>,
}

impl Counter {
    fn increment(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.notifier.notify(&"count");
    }

    fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

impl Observable for Counter {
    type Key = &'static str;

    fn subscribe(&self, key: &Self::Key, callback: ChangeCallback) -> SubscriptionId {
        self.notifier.subscribe(key, callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn subscriber_count(&self, key: &Self::Key) -> usize {
        self.notifier.subscriber_count(key)
    }
}

fn main() -> miette::Result<()> {
    init_tracing();

    let waiter = ConditionWaiter::new(WaitConfig::from_env());
    let counter = Arc::new(Counter::default());

    let ticker = {
        let counter = counter.clone();
        thread::spawn(move || {
            for _ in 0..3 {
                thread::sleep(Duration::from_millis(10));
                counter.increment();
            }
        })
    };

    let start = Instant::now();
    waiter.wait(|c: &Counter| c.count() >= 3, &counter, &"count", None)?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        count = counter.count(),
        "Counter reached 3"
    );
    ticker
        .join()
        .map_err(|_| miette::miette!("ticker thread panicked"))?;

    let start = Instant::now();
    match waiter.wait(
        |c: &Counter| c.count() >= 10,
        &counter,
        &"count",
        Some(Duration::from_millis(200)),
    ) {
        Err(WaitError::Timeout { timeout_ms }) => info!(
            timeout_ms,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Bounded wait timed out as expected"
        ),
        other => other?,
    }

    info!(
        subscribers = counter.subscriber_count(&"count"),
        "Demo finished"
    );
    Ok(())
}
