use crate::error::PolyError;
use crate::set::{Tag, Variant, VariantSet, EMPTY_TAG};
use crate::storage::StorageLayout;
use crate::visit::{Visitor, VisitorMut};
use std::any::type_name;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

/// An inline container holding at most one member of the variant set `S`.
///
/// The payload lives inside the container itself; `Poly<S>` is exactly as
/// large as `Option<S>`. An empty container has tag [`EMPTY_TAG`], a full one
/// has the tag of the member it holds.
///
/// Every operation that replaces or removes the payload drops the old value
/// first and only then stores the new one. Moving out of a container with
/// [`take`](Poly::take) or [`move_from`](Poly::move_from) always leaves the
/// source empty.
///
/// # Examples
///
/// ```
/// use inline_poly::{variant_set, Poly};
///
/// trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Clone)]
/// struct English { name: String }
///
/// #[derive(Clone)]
/// struct French { name: String }
///
/// impl Greeter for English {
///     fn greet(&self) -> String { format!("Hello, {}!", self.name) }
/// }
///
/// impl Greeter for French {
///     fn greet(&self) -> String { format!("Bonjour, {} !", self.name) }
/// }
///
/// variant_set! {
///     #[derive(Clone)]
///     enum Greeters: dyn Greeter {
///         English(English),
///         French(French),
///     }
/// }
///
/// let mut greeter = Poly::<Greeters>::from_variant(English { name: "World".to_string() });
/// assert_eq!(greeter.greet(), "Hello, World!");
///
/// greeter.set(French { name: "Monde".to_string() });
/// assert!(greeter.holds::<French>());
/// assert_eq!(greeter.base().map(|g| g.greet()), Some("Bonjour, Monde !".to_string()));
/// ```
pub struct Poly<S: VariantSet> {
    slot: Option<S>,
}

impl<S: VariantSet> Poly<S> {
    /// Creates an empty container.
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Creates a container holding `value`.
    pub fn from_variant<T: Variant<S>>(value: T) -> Self {
        lifecycle!(tag = T::TAG, variant = type_name::<T>(), "constructed");
        Self {
            slot: Some(value.into_set()),
        }
    }

    /// Layout of the inline block shared by every member of `S`.
    pub const fn payload_layout() -> StorageLayout {
        S::LAYOUT
    }

    /// Tag of the held member, or [`EMPTY_TAG`].
    pub fn tag(&self) -> Tag {
        self.slot.as_ref().map_or(EMPTY_TAG, VariantSet::tag)
    }

    /// Type name of the held member.
    pub fn variant_name(&self) -> Option<&'static str> {
        self.slot.as_ref().map(VariantSet::variant_name)
    }

    /// Returns true if the container holds a `T`.
    pub fn holds<T: Variant<S>>(&self) -> bool {
        self.tag() == T::TAG
    }

    pub fn holds_any(&self) -> bool {
        self.slot.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Drops the held value, if any, leaving the container empty.
    pub fn erase(&mut self) {
        if let Some(old) = self.slot.take() {
            lifecycle!(tag = old.tag(), variant = old.variant_name(), "erased");
            drop(old);
        }
    }

    /// Replaces the content with `value`.
    ///
    /// The previous value is dropped before `value` is stored, even when both
    /// have the same type.
    pub fn set<T: Variant<S>>(&mut self, value: T) {
        self.erase();
        self.slot = Some(value.into_set());
        lifecycle!(tag = T::TAG, variant = type_name::<T>(), "assigned");
    }

    /// Drops the current content, then builds the new value with `init` and
    /// stores it.
    ///
    /// Unlike [`set`](Poly::set), the new value does not exist yet while the
    /// old one is dropped. If `init` panics the container is left empty.
    pub fn emplace_with<T, F>(&mut self, init: F)
    where
        T: Variant<S>,
        F: FnOnce() -> T,
    {
        self.erase();
        self.slot = Some(init().into_set());
        lifecycle!(tag = T::TAG, variant = type_name::<T>(), "emplaced");
    }

    /// Stores `value` and hands back the previous content without dropping it.
    pub fn replace<T: Variant<S>>(&mut self, value: T) -> Self {
        let previous = Self {
            slot: self.slot.replace(value.into_set()),
        };
        lifecycle!(
            tag = T::TAG,
            variant = type_name::<T>(),
            previous = previous.tag(),
            "replaced"
        );
        previous
    }

    /// Moves the content into a new container, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        let taken = Self {
            slot: self.slot.take(),
        };
        lifecycle!(tag = taken.tag(), "moved out");
        taken
    }

    /// Drops the current content, then moves `source`'s content in.
    ///
    /// `source` is empty afterwards.
    pub fn move_from(&mut self, source: &mut Self) {
        self.erase();
        self.slot = source.slot.take();
        lifecycle!(tag = self.tag(), "move-assigned");
    }

    /// Drops the current content, then stores a clone of `source`'s content.
    pub fn assign(&mut self, source: &Self)
    where
        S: Clone,
    {
        self.erase();
        self.slot = source.slot.clone();
        lifecycle!(tag = self.tag(), "copy-assigned");
    }

    /// Exchanges the contents of two containers.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.slot, &mut other.slot);
    }

    /// Calls `visitor` with the held value typed as its exact member type.
    ///
    /// Returns `None` without calling the visitor if the container is empty.
    pub fn visit<V: Visitor<S>>(&self, visitor: V) -> Option<V::Output> {
        self.slot.as_ref().map(|set| set.accept(visitor))
    }

    /// Mutable counterpart of [`visit`](Poly::visit).
    pub fn visit_mut<V: VisitorMut<S>>(&mut self, visitor: V) -> Option<V::Output> {
        self.slot.as_mut().map(|set| set.accept_mut(visitor))
    }

    /// Views the held value through the capability interface.
    pub fn base(&self) -> Option<&S::Base> {
        self.slot.as_ref().map(VariantSet::as_base)
    }

    pub fn base_mut(&mut self) -> Option<&mut S::Base> {
        self.slot.as_mut().map(VariantSet::as_base_mut)
    }

    /// Borrows the held value as a `T`.
    ///
    /// # Errors
    ///
    /// - Returns `PolyError::Empty` if the container is empty
    /// - Returns `PolyError::TypeMismatch` if it holds another member
    pub fn get<T: Variant<S>>(&self) -> Result<&T, PolyError> {
        let set = self.slot.as_ref().ok_or(PolyError::Empty)?;
        T::ref_from(set).ok_or_else(|| mismatch::<S, T>(set))
    }

    /// Mutably borrows the held value as a `T`.
    ///
    /// # Errors
    ///
    /// - Returns `PolyError::Empty` if the container is empty
    /// - Returns `PolyError::TypeMismatch` if it holds another member
    pub fn get_mut<T: Variant<S>>(&mut self) -> Result<&mut T, PolyError> {
        match self.slot.as_mut() {
            None => Err(PolyError::Empty),
            Some(set) if set.tag() != T::TAG => Err(mismatch::<S, T>(set)),
            Some(set) => T::mut_from(set).ok_or(PolyError::Empty),
        }
    }

    /// Accesses the held value as a `T` with a read-only closure.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Poly::get).
    pub fn with<T: Variant<S>, F, R>(&self, f: F) -> Result<R, PolyError>
    where
        F: FnOnce(&T) -> R,
    {
        self.get::<T>().map(f)
    }

    /// Accesses the held value as a `T` with a read-write closure.
    ///
    /// # Errors
    ///
    /// Same as [`get_mut`](Poly::get_mut).
    pub fn with_mut<T: Variant<S>, F, R>(&mut self, f: F) -> Result<R, PolyError>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.get_mut::<T>().map(f)
    }

    /// Moves the held value out as a `T`, leaving the container empty.
    ///
    /// On error the container is left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Poly::get).
    pub fn take_as<T: Variant<S>>(&mut self) -> Result<T, PolyError> {
        let set = self.slot.take().ok_or(PolyError::Empty)?;
        T::from_set(set).map_err(|set| {
            let error = mismatch::<S, T>(&set);
            self.slot = Some(set);
            error
        })
    }

    pub fn as_set(&self) -> Option<&S> {
        self.slot.as_ref()
    }

    pub fn into_set(self) -> Option<S> {
        self.slot
    }
}

fn mismatch<S: VariantSet, T: Variant<S>>(held: &S) -> PolyError {
    PolyError::TypeMismatch {
        requested: type_name::<T>(),
        held: held.variant_name(),
    }
}

#[cold]
#[track_caller]
fn empty_access() -> ! {
    panic!("capability access on an empty Poly")
}

impl<S: VariantSet> Default for Poly<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: VariantSet> From<S> for Poly<S> {
    fn from(set: S) -> Self {
        lifecycle!(tag = set.tag(), variant = set.variant_name(), "constructed");
        Self { slot: Some(set) }
    }
}

impl<S: VariantSet> From<Option<S>> for Poly<S> {
    fn from(slot: Option<S>) -> Self {
        let poly = Self { slot };
        lifecycle!(tag = poly.tag(), "constructed");
        poly
    }
}

impl<S: VariantSet + Clone> Clone for Poly<S> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

/// Capability access. Panics if the container is empty.
impl<S: VariantSet> Deref for Poly<S> {
    type Target = S::Base;

    #[track_caller]
    fn deref(&self) -> &S::Base {
        match self.slot.as_ref() {
            Some(set) => set.as_base(),
            None => empty_access(),
        }
    }
}

impl<S: VariantSet> DerefMut for Poly<S> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut S::Base {
        match self.slot.as_mut() {
            Some(set) => set.as_base_mut(),
            None => empty_access(),
        }
    }
}

impl<S: VariantSet + fmt::Debug> fmt::Debug for Poly<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.slot {
            Some(set) => f.debug_tuple("Poly").field(set).finish(),
            None => write!(f, "Poly(<empty>)"),
        }
    }
}

impl<S: VariantSet + PartialEq> PartialEq for Poly<S> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<S: VariantSet + Eq> Eq for Poly<S> {}
