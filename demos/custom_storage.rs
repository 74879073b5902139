//! Custom storage example for multi-registry.
//!
//! Demonstrates:
//! - Injecting a `BTreeMap` for ordered key iteration
//! - Watching operations through the trace callback
//! - Sharing a registry between threads behind a `Mutex`
//!
//! Run with: `cargo run --example custom_storage`

use multi_registry::{CollisionPolicy, Registry};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::thread;

fn main() {
    println!("=== multi-registry: Custom Storage ===\n");

    // -------------------------------------------------------------------------
    // 1. Ordered storage with tracing
    // -------------------------------------------------------------------------
    println!("1. BTreeMap-backed registry with a trace callback...");

    let mut routes = Registry::with_storage(BTreeMap::new(), CollisionPolicy::Discard);
    routes.set_trace_callback(|event| println!("   [registry-trace] {}", event));

    routes.register_all("/users", ["GET", "POST", "GET"]).unwrap();
    routes.register_all("/health", ["GET"]).unwrap();
    routes.deregister(&"/users", &"POST");

    routes.clear_trace_callback();

    for (path, methods) in routes.iter() {
        println!("   {} -> {:?}", path, methods);
    }

    // -------------------------------------------------------------------------
    // 2. External synchronization
    // -------------------------------------------------------------------------
    println!("\n2. Sharing a registry between threads...");

    let shared = Arc::new(Mutex::new(Registry::with_policy(CollisionPolicy::Duplicate)));

    let handles: Vec<_> = (0..3)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut registry = shared.lock().unwrap();
                registry.register("workers", worker).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let registry = shared.lock().unwrap();
    println!("   workers registered: {}", registry.len_of(&"workers"));

    println!("\n=== Example Complete ===");
}
