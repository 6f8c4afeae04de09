//! Declaring the lifetime guarantees of a custom type and reading them back through `Holder`.

use holder::{
    Guarantees, Holder, is_nothrow_clone_constructible, is_nothrow_destructible,
    is_trivially_destructible,
};

/// A plain value type whose clone cannot fail.
#[derive(Clone, Debug)]
struct Point {
    x: i32,
    y: i32,
}

impl Guarantees for Point {
    const NOTHROW_CLONE_CONSTRUCTIBLE: bool = true;
}

/// A type that releases something when dropped.
#[derive(Debug)]
struct Lease {
    name: &'static str,
}

impl Drop for Lease {
    fn drop(&mut self) {
        println!("Releasing lease {}", self.name);
    }
}

impl Guarantees for Lease {}

fn main() {
    println!(
        "Point: trivially destructible = {}, nothrow clone = {}",
        is_trivially_destructible::<Point>(),
        is_nothrow_clone_constructible::<Point>()
    );
    println!(
        "Holder<Point>: trivially destructible = {}, nothrow clone = {}",
        is_trivially_destructible::<Holder<Point>>(),
        Holder::<Point>::NOTHROW_CLONE
    );
    println!(
        "Holder<Lease>: trivially destructible = {}, nothrow destructible = {}, nothrow reset = {}",
        is_trivially_destructible::<Holder<Lease>>(),
        is_nothrow_destructible::<Holder<Lease>>(),
        Holder::<Lease>::NOTHROW_RESET
    );

    let point = Holder::with_value(Point { x: 3, y: 4 });
    println!("Holding point at ({}, {})", point.x, point.y);

    let mut lease = Holder::with_value(Lease { name: "primary" });
    println!("Holding {lease:?}");
    lease.reset();
    println!("Lease holder is empty: {}", lease.is_empty());
}
