//! # Example: lookup
//!
//! A hostname resolver as an example producer.
//!
//! The resolver is an external collaborator: it turns a hostname into an
//! address and family, and feeds the outcome into `emit`. The dispatcher
//! neither knows nor cares where payloads come from.
//!
//! Also demonstrates failure reporting: one handler rejects loopback
//! addresses, and the [`LogReporter`] prints the captured failure while the
//! sibling handler still runs.
//!
//! ## Run
//! ```bash
//! cargo run --example lookup --features logging
//! ```

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use herald::{Dispatcher, HandlerError, HandlerFn, LogReporter};

/// Outcome of one hostname lookup.
#[derive(Clone, Debug)]
struct Resolved {
    host: String,
    addr: SocketAddr,
}

fn resolve(host: &str) -> std::io::Result<SocketAddr> {
    let mut addrs = (host, 443).to_socket_addrs()?;
    addrs.next().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, format!("no address for {host}"))
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus: Dispatcher<Resolved> = Dispatcher::with_reporter(Arc::new(LogReporter::new()));

    bus.subscribe(
        "resolved",
        HandlerFn::arc("print", |r: &Resolved| {
            let family = if r.addr.is_ipv4() { "IPv4" } else { "IPv6" };
            println!("[print] {} -> {} ({family})", r.host, r.addr.ip());
            Ok(())
        }),
    )?;

    bus.subscribe(
        "resolved",
        HandlerFn::arc("reject-loopback", |r: &Resolved| {
            if r.addr.ip().is_loopback() {
                return Err(HandlerError::fail(format!("{} resolves to loopback", r.host)));
            }
            Ok(())
        }),
    )?;

    for host in ["localhost", "example.com"] {
        match resolve(host) {
            Ok(addr) => {
                bus.emit(
                    "resolved",
                    &Resolved {
                        host: host.to_string(),
                        addr,
                    },
                )?;
            }
            Err(err) => eprintln!("lookup failed for {host}: {err}"),
        }
    }

    Ok(())
}
