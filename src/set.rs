use crate::storage::StorageLayout;
use crate::visit::{Visitor, VisitorMut};

/// Identifies the member a container currently holds.
///
/// Members are numbered from 1 in declaration order; [`EMPTY_TAG`] means no
/// value is held.
pub type Tag = usize;

/// The tag of an empty container.
pub const EMPTY_TAG: Tag = 0;

/// A closed, ordered set of concrete types sharing one capability interface.
///
/// Implemented by the enum that [`variant_set!`](crate::variant_set) generates.
/// Each enum variant wraps exactly one member type, so the enum is the inline
/// storage block: it is as large as its largest member and never allocates.
pub trait VariantSet: Sized + 'static {
    /// The capability interface every member coerces to, usually `dyn Trait`.
    type Base: ?Sized;

    /// Number of member types.
    const COUNT: usize;

    /// Union of the layouts of all member types.
    const LAYOUT: StorageLayout;

    /// Tag of the member held, in `1..=COUNT`.
    fn tag(&self) -> Tag;

    /// Name of the member type for `tag`, or `None` outside `1..=COUNT`.
    fn name_of(tag: Tag) -> Option<&'static str>;

    /// Name of the member type held.
    fn variant_name(&self) -> &'static str;

    fn as_base(&self) -> &Self::Base;

    fn as_base_mut(&mut self) -> &mut Self::Base;

    /// Calls `visitor` with a reference typed to the exact member held.
    fn accept<V: Visitor<Self>>(&self, visitor: V) -> V::Output;

    /// Calls `visitor` with a mutable reference typed to the exact member held.
    fn accept_mut<V: VisitorMut<Self>>(&mut self, visitor: V) -> V::Output;
}

/// A concrete type belonging to the variant set `S`.
///
/// `TAG` is the member's position in `S`, known at compile time. Types that
/// were not declared in `S` have no implementation, so asking a container
/// for them does not compile.
///
/// Storing a type outside the set is rejected:
///
/// ```compile_fail
/// use inline_poly::{variant_set, Poly};
///
/// trait Speak { fn speak(&self) -> String; }
/// struct Cat;
/// struct Stranger;
/// impl Speak for Cat { fn speak(&self) -> String { "Meow!".into() } }
/// impl Speak for Stranger { fn speak(&self) -> String { "Hello?".into() } }
///
/// variant_set! {
///     enum Pets: dyn Speak {
///         Cat(Cat),
///     }
/// }
///
/// let _pet = Poly::<Pets>::from_variant(Stranger);
/// ```
///
/// So is querying for one:
///
/// ```compile_fail
/// use inline_poly::{variant_set, Poly};
///
/// trait Speak { fn speak(&self) -> String; }
/// struct Cat;
/// struct Stranger;
/// impl Speak for Cat { fn speak(&self) -> String { "Meow!".into() } }
///
/// variant_set! {
///     enum Pets: dyn Speak {
///         Cat(Cat),
///     }
/// }
///
/// let pet = Poly::<Pets>::from_variant(Cat);
/// assert!(!pet.holds::<Stranger>());
/// ```
///
/// And assigning one:
///
/// ```compile_fail
/// use inline_poly::{variant_set, Poly};
///
/// trait Speak { fn speak(&self) -> String; }
/// struct Cat;
/// struct Stranger;
/// impl Speak for Cat { fn speak(&self) -> String { "Meow!".into() } }
/// impl Speak for Stranger { fn speak(&self) -> String { "Hello?".into() } }
///
/// variant_set! {
///     enum Pets: dyn Speak {
///         Cat(Cat),
///     }
/// }
///
/// let mut pet = Poly::<Pets>::new();
/// pet.set(Stranger);
/// ```
///
/// The interface itself is unsized and cannot be stored by value:
///
/// ```compile_fail
/// use inline_poly::{variant_set, Poly};
///
/// trait Speak { fn speak(&self) -> String; }
/// struct Cat;
/// impl Speak for Cat { fn speak(&self) -> String { "Meow!".into() } }
///
/// variant_set! {
///     enum Pets: dyn Speak {
///         Cat(Cat),
///     }
/// }
///
/// let boxed: Box<dyn Speak> = Box::new(Cat);
/// let mut pet = Poly::<Pets>::new();
/// pet.set(*boxed);
/// ```
pub trait Variant<S: VariantSet>: Sized + 'static {
    const TAG: Tag;

    fn into_set(self) -> S;

    /// Unwraps `set` if it holds this type, otherwise gives it back untouched.
    fn from_set(set: S) -> Result<Self, S>;

    fn ref_from(set: &S) -> Option<&Self>;

    fn mut_from(set: &mut S) -> Option<&mut Self>;

    fn as_base(&self) -> &S::Base;

    fn as_base_mut(&mut self) -> &mut S::Base;
}

/// Maps a tag known at compile time back to its member type.
///
/// ```
/// use inline_poly::{variant_set, Variant, VariantAt};
///
/// trait Shape { fn area(&self) -> f64; }
/// struct Square(f64);
/// struct Circle(f64);
/// impl Shape for Square { fn area(&self) -> f64 { self.0 * self.0 } }
/// impl Shape for Circle { fn area(&self) -> f64 { 3.0 * self.0 * self.0 } }
///
/// variant_set! {
///     enum Shapes: dyn Shape {
///         Square(Square),
///         Circle(Circle),
///     }
/// }
///
/// assert_eq!(<<Shapes as VariantAt<2>>::Type as Variant<Shapes>>::TAG, 2);
/// let square: <Shapes as VariantAt<1>>::Type = Square(2.0);
/// assert_eq!(square.area(), 4.0);
/// ```
pub trait VariantAt<const TAG: Tag>: VariantSet {
    type Type: Variant<Self>;
}
