/*!
 * Tracked Stack - Demonstration Entry Point
 *
 * Walks a Stack bound to a TrackedResource through:
 * - Simple values (push, pop, emplace)
 * - Composite values built in place
 * - Iterator traversal and comparison
 * - Copy and move semantics
 *
 * Set RUST_LOG=tracked_stack::memory=debug to see every allocation event.
 */

use std::error::Error;
use std::fmt;
use std::rc::Rc;
use tracing::info;

use tracked_stack::{init_tracing, Collector, EventKind, ResourceConfig, Stack, TrackedResource};

#[derive(Debug, Clone, PartialEq)]
struct ComplexType {
    id: i32,
    name: String,
    value: f64,
}

impl From<(i32, &str, f64)> for ComplexType {
    fn from((id, name, value): (i32, &str, f64)) -> Self {
        Self {
            id,
            name: name.to_string(),
            value,
        }
    }
}

impl fmt::Display for ComplexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComplexType{{id={}, name=\"{}\", value={}}}",
            self.id, self.name, self.value
        )
    }
}

fn join<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn simple_values(resource: &TrackedResource) -> Result<(), Box<dyn Error>> {
    println!("1. Working with simple types (i32):");
    let mut stack = Stack::new_in(resource);

    for i in 1..=5 {
        stack.push(i * 10)?;
    }
    println!("Stack after adding 5 elements: {}", join(&stack));
    println!("Stack size: {}", stack.len());

    stack.pop();
    stack.pop();
    println!("Stack after 2 deletions: {}", join(&stack));
    println!("Stack size: {}", stack.len());

    stack.emplace(99)?;
    println!("After emplace(99): {}", join(&stack));
    println!("Top element: {}", stack.top()?);
    Ok(())
}

fn composite_values(resource: &TrackedResource) -> Result<(), Box<dyn Error>> {
    println!("\n2. Working with complex types (ComplexType):");
    let mut stack: Stack<'_, ComplexType> = Stack::new_in(resource);

    stack.emplace((1, "First", 1.1))?;
    stack.push(ComplexType::from((2, "Second", 2.2)))?;
    stack.emplace((3, "Third", 3.3))?;

    println!("Stack contents:");
    for item in &stack {
        println!("- {}", item);
    }
    println!("Top element: {}", stack.top()?);

    stack.pop();
    println!("After pop(), top element: {}", stack.top()?);
    Ok(())
}

fn iterators(resource: &TrackedResource) -> Result<(), Box<dyn Error>> {
    println!("\n3. Iterator testing:");
    let mut stack = Stack::new_in(resource);
    stack.try_extend(["Hello", "World", "Rust", "PMR"].map(String::from))?;

    let mut forward = Vec::new();
    let mut it = stack.begin();
    while it != stack.end() {
        if let Some(value) = it.get() {
            forward.push(value.as_str());
        }
        it.advance();
    }
    println!("Forward traversal: {}", forward.join(" "));
    println!("For loop: {}", join(&stack));

    let it1 = stack.begin();
    let mut it2 = stack.begin();
    it2.advance();
    println!(
        "Iterator comparison: it1 == it2: {}, it1 != it2: {}",
        it1 == it2,
        it1 != it2
    );
    Ok(())
}

fn copy_and_move(resource: &TrackedResource) -> Result<(), Box<dyn Error>> {
    println!("\n4. Copy and move testing:");
    let mut original = Stack::new_in(resource);
    original.try_extend([100, 200, 300])?;

    let copy = original.try_clone()?;
    println!("Original after copying: {}", join(&original));
    println!("Copy: {}", join(&copy));

    let moved = original.take();
    println!("Moved stack: {}", join(&moved));
    println!("Original is empty after move: {}", original.is_empty());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!("Tracked stack demonstration starting...");
    println!("Demonstration of Stack with TrackedResource\n");

    let collector = Rc::new(Collector::new());
    let resource = TrackedResource::with_config(ResourceConfig::from_env().with_label("demo"))
        .with_collector(collector.clone());

    simple_values(&resource)?;
    composite_values(&resource)?;
    iterators(&resource)?;
    copy_and_move(&resource)?;

    println!("\nDemonstration completed");
    println!(
        "Events: {} allocated, {} deallocated",
        collector.count(EventKind::Allocated),
        collector.count(EventKind::Deallocated)
    );
    println!("Stats: {}", serde_json::to_string_pretty(&resource.stats())?);

    drop(resource);
    if let Some(released) = collector.events().last() {
        println!("{}", released);
    }
    Ok(())
}
