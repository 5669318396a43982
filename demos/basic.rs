//! # Example: basic
//!
//! Registration lifecycle on a single dispatcher.
//!
//! Demonstrates how to:
//! - Subscribe persistent, one-shot and removable handlers.
//! - Use an enum envelope as the payload type for heterogeneous channels.
//! - Observe that `emit` returns the number of handlers attempted.
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use herald::{Dispatcher, HandlerFn};

/// Channels are heterogeneous, so payloads travel as a tagged union.
#[derive(Clone, Debug)]
enum Note {
    Ping,
    Pair(i64, i64),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus: Dispatcher<Note> = Dispatcher::new();

    // Plain listener
    bus.subscribe(
        "event",
        HandlerFn::arc("plain", |_: &Note| {
            println!("[plain] here will be data");
            Ok(())
        }),
    )?;

    // Argument-comparing listener
    bus.subscribe(
        "event-with-args",
        HandlerFn::arc("compare", |note: &Note| {
            if let Note::Pair(a, b) = note {
                if a == b {
                    println!("[compare] given inputs are equal");
                } else {
                    println!("[compare] given inputs are not equal");
                }
            }
            Ok(())
        }),
    )?;

    // One-time listener: removed before its first invocation
    bus.subscribe_once(
        "once",
        HandlerFn::arc("one-shot", |_: &Note| {
            println!("[one-shot] this runs only one time");
            Ok(())
        }),
    )?;

    // Removable listener
    let removable = bus.subscribe(
        "removable",
        HandlerFn::arc("removable", |_: &Note| {
            println!("[removable] this will be removed");
            Ok(())
        }),
    )?;

    println!("emit event          -> {} handler(s)", bus.emit("event", &Note::Ping)?);
    println!(
        "emit event-with-args -> {} handler(s)",
        bus.emit("event-with-args", &Note::Pair(3, 3))?
    );
    println!("emit once           -> {} handler(s)", bus.emit("once", &Note::Ping)?);
    println!("emit once (again)   -> {} handler(s)", bus.emit("once", &Note::Ping)?);

    bus.unsubscribe("removable", removable);
    println!("emit removable      -> {} handler(s)", bus.emit("removable", &Note::Ping)?);

    Ok(())
}
