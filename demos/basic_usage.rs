//! Basic usage example for multi-registry.
//!
//! Demonstrates:
//! - Registering single values and batches under a key
//! - Reading buckets with `get()`, `len()` and `len_of()`
//! - Removing values, whole keys and filtered values
//!
//! Run with: `cargo run --example basic_usage`

use multi_registry::Registry;

fn main() {
    println!("=== multi-registry: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Register values
    // -------------------------------------------------------------------------
    println!("1. Registering listeners per event...");

    let mut listeners = Registry::new();
    listeners.register("save", "autosave").unwrap();
    listeners.register_all("save", ["backup", "lint"]).unwrap();
    listeners.register_all("open", ["recent_files", "lint"]).unwrap();

    println!("   Registered {} listeners under {} events", listeners.len(), listeners.key_count());

    // -------------------------------------------------------------------------
    // 2. Read buckets
    // -------------------------------------------------------------------------
    println!("\n2. Reading buckets with get()...");

    println!("   save  -> {:?}", listeners.get(&"save"));
    println!("   open  -> {:?}", listeners.get(&"open"));
    println!("   close -> {:?}", listeners.get(&"close")); // Not registered
    println!("   len_of(save) = {}", listeners.len_of(&"save"));

    // -------------------------------------------------------------------------
    // 3. Remove a single value
    // -------------------------------------------------------------------------
    println!("\n3. Removing one value...");

    let removed = listeners.deregister(&"open", &"recent_files");
    println!("   deregister(open, recent_files) = {}", removed);
    println!("   open  -> {:?}", listeners.get(&"open"));

    // -------------------------------------------------------------------------
    // 4. Remove a value from every key
    // -------------------------------------------------------------------------
    println!("\n4. Removing 'lint' everywhere...");

    listeners.deregister_value(&"lint");
    // "open" held only "lint", so the key is gone
    println!("   contains_key(open) = {}", listeners.contains_key(&"open"));

    // -------------------------------------------------------------------------
    // 5. Filtered removal and whole keys
    // -------------------------------------------------------------------------
    println!("\n5. Filtered removal...");

    listeners.deregister_if(|name| name.starts_with("auto"));
    println!("   save  -> {:?}", listeners.get(&"save"));

    let bucket = listeners.deregister_key(&"save");
    println!("   deregister_key(save) returned {:?}", bucket);

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("\n=== Example Complete ===");
    println!("The registry is empty again: is_empty() = {}", listeners.is_empty());
}
