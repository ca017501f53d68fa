use crate::set::{Variant, VariantSet};

/// A callback that is polymorphic over every member of `S`.
///
/// Closures cannot be generic, so visiting is expressed as a trait with a
/// generic method. `visit` is monomorphized once per member type and receives
/// the exact concrete type, not just the capability interface: a visitor can
/// read `T::TAG`, call [`Variant::as_base`], or downcast through
/// [`std::any::Any`].
///
/// ```
/// use inline_poly::{variant_set, Poly, Variant, Visitor};
///
/// trait Noise { fn noise(&self) -> &'static str; }
/// struct Bell;
/// struct Horn;
/// impl Noise for Bell { fn noise(&self) -> &'static str { "ding" } }
/// impl Noise for Horn { fn noise(&self) -> &'static str { "honk" } }
///
/// variant_set! {
///     enum Noisy: dyn Noise {
///         Bell(Bell),
///         Horn(Horn),
///     }
/// }
///
/// struct Describe;
///
/// impl Visitor<Noisy> for Describe {
///     type Output = String;
///
///     fn visit<T: Variant<Noisy>>(self, value: &T) -> String {
///         format!("#{} {} says {}", T::TAG, std::any::type_name::<T>(), value.as_base().noise())
///     }
/// }
///
/// let poly = Poly::<Noisy>::from_variant(Horn);
/// let described = poly.visit(Describe).unwrap();
/// assert!(described.starts_with("#2 "));
/// assert!(described.ends_with("Horn says honk"));
/// assert_eq!(Poly::<Noisy>::new().visit(Describe), None);
/// ```
pub trait Visitor<S: VariantSet> {
    type Output;

    fn visit<T: Variant<S>>(self, value: &T) -> Self::Output;
}

/// Mutable counterpart of [`Visitor`].
pub trait VisitorMut<S: VariantSet> {
    type Output;

    fn visit_mut<T: Variant<S>>(self, value: &mut T) -> Self::Output;
}
