//! # inline-poly
//!
//! Allocation-free polymorphic values over a closed set of types.
//!
//! A [`Poly`] holds at most one value drawn from a fixed set of concrete types
//! that all implement one capability interface. The value lives inline, in a
//! block sized to the largest member of the set: there is no `Box`, no
//! reference counting and no indirection. Callers can either go through the
//! interface (`poly.speak()` via `Deref`) or [`visit`](Poly::visit) the value
//! with its exact concrete type.
//!
//! ## Key Features
//!
//! - **Inline**: storage is the generated enum, sized by [`StorageLayout`]
//! - **Closed**: the set is declared once with [`variant_set!`]; other types do not compile
//! - **Type-exact dispatch**: visitors receive `&T`, not just `&dyn Trait`
//! - **Destructive moves**: [`Poly::take`] always leaves the source empty
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use inline_poly::{variant_set, Poly};
//!
//! trait Speak {
//!     fn speak(&self) -> String;
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Meower;
//!
//! #[derive(Clone, Debug)]
//! struct Woofer;
//!
//! impl Speak for Meower {
//!     fn speak(&self) -> String { "Meow!".to_string() }
//! }
//!
//! impl Speak for Woofer {
//!     fn speak(&self) -> String { "Woof!".to_string() }
//! }
//!
//! variant_set! {
//!     #[derive(Clone, Debug)]
//!     enum Speakers: dyn Speak {
//!         Meower(Meower),
//!         Woofer(Woofer),
//!     }
//! }
//!
//! let mut x = Poly::<Speakers>::new();
//! assert!(x.is_empty());
//!
//! x.set(Meower);
//! assert_eq!(x.speak(), "Meow!");
//!
//! x.set(Woofer);
//! assert!(x.holds::<Woofer>());
//! assert_eq!(x.speak(), "Woof!");
//!
//! // Copies leave the source alone.
//! let y = x.clone();
//! assert!(y.holds::<Woofer>() && x.holds::<Woofer>());
//!
//! // Moves between containers leave the source empty.
//! let mut z = x.take();
//! assert!(z.holds::<Woofer>() && x.is_empty());
//!
//! z.erase();
//! assert!(z.is_empty());
//! ```
//!
//! ### Typed Access
//!
//! ```rust
//! use inline_poly::{variant_set, Poly, PolyError};
//!
//! trait Counter {
//!     fn count(&self) -> u32;
//! }
//!
//! struct Clicks(u32);
//! struct Visits { total: u32 }
//!
//! impl Counter for Clicks {
//!     fn count(&self) -> u32 { self.0 }
//! }
//!
//! impl Counter for Visits {
//!     fn count(&self) -> u32 { self.total }
//! }
//!
//! variant_set! {
//!     enum Counters: dyn Counter {
//!         Clicks(Clicks),
//!         Visits(Visits),
//!     }
//! }
//!
//! fn main() -> Result<(), PolyError> {
//!     let mut poly = Poly::<Counters>::from_variant(Visits { total: 1 });
//!
//!     poly.with_mut::<Visits, _, _>(|visits| visits.total += 1)?;
//!     assert_eq!(poly.count(), 2);
//!
//!     match poly.get::<Clicks>() {
//!         Err(PolyError::TypeMismatch { .. }) => {}
//!         other => panic!("unexpected {:?}", other.map(|c| c.0)),
//!     }
//!
//!     let visits = poly.take_as::<Visits>()?;
//!     assert_eq!(visits.total, 2);
//!     assert_eq!(poly.get::<Visits>().err(), Some(PolyError::Empty));
//!     Ok(())
//! }
//! ```

/// Emits a TRACE event describing a container state transition.
macro_rules! lifecycle {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: "inline_poly", $($arg)*);
    };
}

mod error;
mod macros;
mod poly;
mod set;
mod storage;
mod visit;

#[cfg(test)]
mod lifecycle_tests;

pub use error::PolyError;
pub use poly::Poly;
pub use set::{Tag, Variant, VariantAt, VariantSet, EMPTY_TAG};
pub use storage::StorageLayout;
pub use visit::{Visitor, VisitorMut};
