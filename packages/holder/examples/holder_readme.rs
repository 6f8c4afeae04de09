//! Example that demonstrates the exact usage shown in the crate documentation.
//!
//! This shows how a `Holder` moves between the empty and occupied states.

use holder::{Holder, swap};

fn main() {
    println!("=== Holder README Example ===");

    let mut counter = Holder::<i32>::new();
    println!("Empty holder, value or 5: {}", counter.value_or(5));
    assert!(!counter.has_value());

    counter.assign(10);
    println!("After assigning 10, value or 5: {}", counter.value_or(5));
    assert_eq!(counter.value_or(5), 10);

    let mut other = Holder::new();
    swap(&mut counter, &mut other);
    println!(
        "After swap: counter occupied = {}, other = {:?}",
        counter.has_value(),
        other
    );
    assert!(counter.is_empty());

    other.reset();
    println!("After reset: other = {other:?}");
    assert!(other.is_empty());

    println!("README example completed successfully!");
}
