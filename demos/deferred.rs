//! # Example: deferred
//!
//! Hand slow work off the emitting thread.
//!
//! Demonstrates how to:
//! - Plug an [`OffloadPool`] into a dispatcher channel via its forwarding handler.
//! - Observe that `emit` returns before the consumer's deferred work completes.
//! - Drain the pool on shutdown.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► emit("deferred", &payload)   — returns immediately
//!   ├─► "continuing with other work" — prints before the consumer finishes
//!   └─► pool.shutdown()              — drains the queue, joins the worker
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example deferred
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use herald::{Consume, Dispatcher, OffloadPool};

/// Consumer that takes a second per payload.
struct SlowWorker;

#[async_trait]
impl Consume<String> for SlowWorker {
    async fn consume(&self, payload: &String) {
        tokio::time::sleep(Duration::from_secs(1)).await;
        println!("[slow-worker] handled {payload:?} after 1 second");
    }

    fn name(&self) -> &'static str {
        "slow-worker"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = OffloadPool::new(vec![Arc::new(SlowWorker) as Arc<dyn Consume<String>>]);

    let bus: Dispatcher<String> = Dispatcher::new();
    bus.subscribe("deferred", pool.handler())?;

    println!("emitting deferred event...");
    bus.emit("deferred", &"payload".to_string())?;
    println!("continuing with other work...");

    // Shutdown drains what is already enqueued before joining the worker.
    pool.shutdown().await;
    println!("pool drained, exiting.");

    Ok(())
}
