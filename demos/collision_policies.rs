//! Collision policy example for multi-registry.
//!
//! Registers the same values under `Duplicate`, `Discard` and `Abort` and
//! prints how each policy reacts.
//!
//! Run with: `cargo run --example collision_policies`

use multi_registry::{CollisionPolicy, Registry, RegistryError};

fn run(policy: CollisionPolicy) -> Result<(), RegistryError> {
    println!("\n-- policy: {} --", policy);

    let mut registry = Registry::with_policy(policy);

    println!("   register(a, 1)        = {:?}", registry.register("a", 1)?);
    println!("   register(a, 1)        = {:?}", registry.register("a", 1)?);
    println!("   register(a, [2, 2, 3]) = {:?}", registry.register_all("a", [2, 2, 3])?);
    println!("   a -> {:?}", registry.get(&"a"));

    Ok(())
}

fn main() {
    println!("=== multi-registry: Collision Policies ===");

    for name in ["duplicate", "discard", "abort"] {
        // Policies can come straight from configuration strings
        let policy: CollisionPolicy = match name.parse() {
            Ok(policy) => policy,
            Err(e) => {
                println!("   {}", e);
                continue;
            }
        };

        if let Err(e) = run(policy) {
            println!("   Error (expected for abort): {}", e);
        }
    }

    println!("\n=== Example Complete ===");
}
