// src/lifecycle_tests.rs
//! Drop-order checks for every transition that removes a payload.

use crate::{variant_set, Poly, Variant, Visitor, VisitorMut};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

thread_local! {
    static EVENTS: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

fn record(event: String) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

fn drain() -> Vec<String> {
    EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}

trait Speak {
    fn speak(&self) -> String;
    fn rename(&mut self, name: &str);
}

#[derive(Debug, PartialEq)]
struct Meower {
    name: String,
}

#[derive(Debug, PartialEq)]
struct Woofer {
    name: String,
}

impl Meower {
    fn new(name: &str) -> Self {
        record(format!("new Meower({})", name));
        Self {
            name: name.to_string(),
        }
    }
}

impl Woofer {
    fn new(name: &str) -> Self {
        record(format!("new Woofer({})", name));
        Self {
            name: name.to_string(),
        }
    }
}

impl Clone for Meower {
    fn clone(&self) -> Self {
        record(format!("clone Meower({})", self.name));
        Self {
            name: self.name.clone(),
        }
    }
}

impl Clone for Woofer {
    fn clone(&self) -> Self {
        record(format!("clone Woofer({})", self.name));
        Self {
            name: self.name.clone(),
        }
    }
}

impl Drop for Meower {
    fn drop(&mut self) {
        record(format!("drop Meower({})", self.name));
    }
}

impl Drop for Woofer {
    fn drop(&mut self) {
        record(format!("drop Woofer({})", self.name));
    }
}

impl Speak for Meower {
    fn speak(&self) -> String {
        format!("{} says: Meow!", self.name)
    }

    fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

impl Speak for Woofer {
    fn speak(&self) -> String {
        format!("{} says: Woof!", self.name)
    }

    fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

variant_set! {
    #[derive(Debug, Clone, PartialEq)]
    enum Pets: dyn Speak {
        Meower(Meower),
        Woofer(Woofer),
    }
}

#[test]
fn test_reassign_drops_old_before_constructing_new() {
    let mut pet = Poly::<Pets>::from_variant(Meower::new("Tom"));
    drain();

    pet.emplace_with(|| Woofer::new("Rex"));
    assert_eq!(drain(), vec!["drop Meower(Tom)", "new Woofer(Rex)"]);
    assert!(pet.holds::<Woofer>());
    assert!(!pet.holds::<Meower>());
    assert_eq!(pet.speak(), "Rex says: Woof!");
}

#[test]
fn test_reassign_same_type_never_reuses_instance() {
    let mut pet = Poly::<Pets>::from_variant(Meower::new("Tom"));
    drain();

    pet.emplace_with(|| Meower::new("Felix"));
    assert_eq!(drain(), vec!["drop Meower(Tom)", "new Meower(Felix)"]);

    let kitten = Meower::new("Kit");
    pet.set(kitten);
    assert_eq!(drain(), vec!["new Meower(Kit)", "drop Meower(Felix)"]);
    assert_eq!(pet.speak(), "Kit says: Meow!");
}

#[test]
fn test_set_drops_previous_payload() {
    drain();
    let mut pet = Poly::<Pets>::new();
    pet.set(Meower::new("Tom"));
    pet.set(Woofer::new("Rex"));
    assert_eq!(
        drain(),
        vec!["new Meower(Tom)", "new Woofer(Rex)", "drop Meower(Tom)"]
    );
}

#[test]
fn test_erase_drops_once() {
    drain();
    let mut pet = Poly::<Pets>::from_variant(Woofer::new("Rex"));
    pet.erase();
    pet.erase();
    assert!(pet.is_empty());
    drop(pet);
    assert_eq!(drain(), vec!["new Woofer(Rex)", "drop Woofer(Rex)"]);
}

#[test]
fn test_scope_exit_drops_payload() {
    drain();
    {
        let _pet = Poly::<Pets>::from_variant(Meower::new("Tom"));
    }
    {
        let _empty = Poly::<Pets>::new();
    }
    assert_eq!(drain(), vec!["new Meower(Tom)", "drop Meower(Tom)"]);
}

#[test]
fn test_clone_copies_exact_type() {
    let original = Poly::<Pets>::from_variant(Woofer::new("Rex"));
    drain();

    let copy = original.clone();
    assert_eq!(drain(), vec!["clone Woofer(Rex)"]);
    assert!(copy.holds::<Woofer>());
    assert_eq!(original.speak(), "Rex says: Woof!");
    assert_eq!(copy, original);
}

#[test]
fn test_clone_from_drops_before_cloning() {
    let source = Poly::<Pets>::from_variant(Woofer::new("Rex"));
    let mut target = Poly::<Pets>::from_variant(Meower::new("Tom"));
    drain();

    target.clone_from(&source);
    assert_eq!(drain(), vec!["drop Meower(Tom)", "clone Woofer(Rex)"]);
    assert!(target.holds::<Woofer>());
    assert!(source.holds::<Woofer>());
}

#[test]
fn test_take_moves_without_cloning_or_dropping() {
    let mut source = Poly::<Pets>::from_variant(Woofer::new("Rex"));
    drain();

    let moved = source.take();
    assert_eq!(drain(), Vec::<String>::new());
    assert!(moved.holds::<Woofer>());
    assert!(source.is_empty());

    drop(source);
    assert_eq!(drain(), Vec::<String>::new());
    drop(moved);
    assert_eq!(drain(), vec!["drop Woofer(Rex)"]);
}

#[test]
fn test_move_from_drops_target_payload() {
    let mut source = Poly::<Pets>::from_variant(Woofer::new("Rex"));
    let mut target = Poly::<Pets>::from_variant(Meower::new("Tom"));
    drain();

    target.move_from(&mut source);
    assert_eq!(drain(), vec!["drop Meower(Tom)"]);
    assert!(target.holds::<Woofer>());
    assert!(source.is_empty());
}

#[test]
fn test_emplace_panic_leaves_container_empty() {
    let mut pet = Poly::<Pets>::from_variant(Meower::new("Tom"));
    drain();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pet.emplace_with::<Woofer, _>(|| panic!("no dogs today"));
    }));
    assert!(result.is_err());
    assert!(pet.is_empty());
    assert_eq!(drain(), vec!["drop Meower(Tom)"]);
}

#[test]
fn test_swap_moves_nothing_else() {
    let mut a = Poly::<Pets>::from_variant(Meower::new("Tom"));
    let mut b = Poly::<Pets>::from_variant(Woofer::new("Rex"));
    drain();

    a.swap(&mut b);
    std::mem::swap(&mut a, &mut b);
    a.swap(&mut b);
    assert_eq!(drain(), Vec::<String>::new());
    assert_eq!(a.speak(), "Rex says: Woof!");
    assert_eq!(b.speak(), "Tom says: Meow!");
}

struct Greeting;

impl Visitor<Pets> for Greeting {
    type Output = String;

    fn visit<T: Variant<Pets>>(self, value: &T) -> String {
        format!("{}:{}", T::TAG, value.as_base().speak())
    }
}

struct Rename<'a>(&'a str);

impl VisitorMut<Pets> for Rename<'_> {
    type Output = ();

    fn visit_mut<T: Variant<Pets>>(self, value: &mut T) {
        value.as_base_mut().rename(self.0);
    }
}

#[test]
fn test_visit_does_not_touch_lifecycle() {
    let mut pet = Poly::<Pets>::from_variant(Meower::new("Tom"));
    drain();

    assert_eq!(pet.visit(Greeting).as_deref(), Some("1:Tom says: Meow!"));
    assert_eq!(pet.visit_mut(Rename("Garfield")), Some(()));
    assert_eq!(pet.speak(), "Garfield says: Meow!");
    assert_eq!(drain(), Vec::<String>::new());
}

#[cfg(feature = "tracing")]
mod events {
    use super::{Meower, Pets, Woofer};
    use crate::Poly;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::level_filters::{LevelFilter, STATIC_MAX_LEVEL};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_no_compile_time_level_cap() {
        assert_eq!(STATIC_MAX_LEVEL, LevelFilter::TRACE);
    }

    #[test]
    fn test_replace_is_traced() {
        let log = capture(|| {
            let mut pet = Poly::<Pets>::from_variant(Meower::new("Tom"));
            let previous = pet.replace(Woofer::new("Rex"));
            assert!(previous.holds::<Meower>());
        });
        let line = log
            .lines()
            .find(|line| line.contains("replaced"))
            .unwrap_or_else(|| panic!("no replace event in:\n{}", log));
        assert!(line.contains("tag=2"), "{}", line);
        assert!(line.contains("previous=1"), "{}", line);
    }

    #[test]
    fn test_conversion_from_set_is_traced() {
        let log = capture(|| {
            let pet = Poly::<Pets>::from(Pets::Woofer(Woofer::new("Rex")));
            assert!(pet.holds::<Woofer>());
            let empty = Poly::<Pets>::from(None::<Pets>);
            assert!(empty.is_empty());
        });
        let constructed = log.lines().filter(|line| line.contains("constructed")).count();
        assert_eq!(constructed, 2, "log was:\n{}", log);
        assert!(log.contains("inline_poly"));
    }
}
