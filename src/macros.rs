/// Declares a closed variant set over a shared capability interface.
///
/// ```
/// use inline_poly::{variant_set, VariantSet, Variant};
///
/// trait Speak {
///     fn speak(&self) -> String;
/// }
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Meower;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Woofer {
///     volume: u8,
/// }
///
/// impl Speak for Meower {
///     fn speak(&self) -> String { "Meow!".to_string() }
/// }
///
/// impl Speak for Woofer {
///     fn speak(&self) -> String { "Woof!".repeat(self.volume as usize) }
/// }
///
/// variant_set! {
///     /// Things that make noise.
///     #[derive(Clone, Debug, PartialEq)]
///     enum Speakers: dyn Speak {
///         Meower(Meower),
///         Woofer(Woofer),
///     }
/// }
///
/// assert_eq!(Speakers::COUNT, 2);
/// assert_eq!(<Meower as Variant<Speakers>>::TAG, 1);
/// assert_eq!(<Woofer as Variant<Speakers>>::TAG, 2);
///
/// let held = Speakers::Woofer(Woofer { volume: 2 });
/// assert_eq!(held.tag(), 2);
/// assert_eq!(held.as_base().speak(), "Woof!Woof!");
/// ```
///
/// The macro expands to:
///
/// - the enum itself, one tuple variant per member, carrying any attributes
///   written on the enum or its variants;
/// - a hidden tag table numbering the members from 1 in declaration order;
/// - [`VariantSet`](crate::VariantSet) for the enum;
/// - [`Variant`](crate::Variant) for every member type;
/// - [`VariantAt`](crate::VariantAt) for every tag.
///
/// Listing the same type twice produces conflicting `Variant` impls and is
/// rejected by the compiler:
///
/// ```compile_fail
/// use inline_poly::variant_set;
///
/// trait Speak { fn speak(&self) -> String; }
/// struct Cat;
/// impl Speak for Cat { fn speak(&self) -> String { "Meow!".into() } }
///
/// variant_set! {
///     enum Pets: dyn Speak {
///         Cat(Cat),
///         Kitten(Cat),
///     }
/// }
/// ```
///
/// Every member must coerce to the interface type (`&Member` to
/// `&Interface`), which for `dyn Trait` means implementing it:
///
/// ```compile_fail
/// use inline_poly::variant_set;
///
/// trait Speak { fn speak(&self) -> String; }
/// struct Cat;
/// struct Rock;
/// impl Speak for Cat { fn speak(&self) -> String { "Meow!".into() } }
///
/// variant_set! {
///     enum Things: dyn Speak {
///         Cat(Cat),
///         Rock(Rock),
///     }
/// }
/// ```
#[macro_export]
macro_rules! variant_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $base:ty {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        const _: () = {
            #[repr(usize)]
            #[allow(dead_code, non_camel_case_types)]
            enum __Tags {
                __Empty = $crate::EMPTY_TAG,
                $($variant,)+
            }

            impl $crate::VariantSet for $name {
                type Base = $base;

                const COUNT: usize = [$(__Tags::$variant as $crate::Tag),+].len();

                const LAYOUT: $crate::StorageLayout = $crate::StorageLayout::EMPTY
                    $(.union($crate::StorageLayout::of::<$ty>()))+;

                #[inline]
                fn tag(&self) -> $crate::Tag {
                    match self {
                        $($name::$variant(_) => __Tags::$variant as $crate::Tag,)+
                    }
                }

                fn name_of(tag: $crate::Tag) -> ::core::option::Option<&'static str> {
                    $(
                        if tag == (__Tags::$variant as $crate::Tag) {
                            return ::core::option::Option::Some(::core::any::type_name::<$ty>());
                        }
                    )+
                    ::core::option::Option::None
                }

                fn variant_name(&self) -> &'static str {
                    match self {
                        $($name::$variant(_) => ::core::any::type_name::<$ty>(),)+
                    }
                }

                #[inline]
                fn as_base(&self) -> &Self::Base {
                    match self {
                        $($name::$variant(value) => <$ty as $crate::Variant<$name>>::as_base(value),)+
                    }
                }

                #[inline]
                fn as_base_mut(&mut self) -> &mut Self::Base {
                    match self {
                        $($name::$variant(value) => <$ty as $crate::Variant<$name>>::as_base_mut(value),)+
                    }
                }

                #[inline]
                fn accept<V: $crate::Visitor<Self>>(&self, visitor: V) -> V::Output {
                    match self {
                        $($name::$variant(value) => visitor.visit::<$ty>(value),)+
                    }
                }

                #[inline]
                fn accept_mut<V: $crate::VisitorMut<Self>>(&mut self, visitor: V) -> V::Output {
                    match self {
                        $($name::$variant(value) => visitor.visit_mut::<$ty>(value),)+
                    }
                }
            }

            $(
                impl $crate::Variant<$name> for $ty {
                    const TAG: $crate::Tag = __Tags::$variant as $crate::Tag;

                    #[inline]
                    fn into_set(self) -> $name {
                        $name::$variant(self)
                    }

                    #[allow(unreachable_patterns)]
                    fn from_set(set: $name) -> ::core::result::Result<Self, $name> {
                        match set {
                            $name::$variant(value) => ::core::result::Result::Ok(value),
                            other => ::core::result::Result::Err(other),
                        }
                    }

                    #[allow(unreachable_patterns)]
                    fn ref_from(set: &$name) -> ::core::option::Option<&Self> {
                        match set {
                            $name::$variant(value) => ::core::option::Option::Some(value),
                            _ => ::core::option::Option::None,
                        }
                    }

                    #[allow(unreachable_patterns)]
                    fn mut_from(set: &mut $name) -> ::core::option::Option<&mut Self> {
                        match set {
                            $name::$variant(value) => ::core::option::Option::Some(value),
                            _ => ::core::option::Option::None,
                        }
                    }

                    #[inline]
                    fn as_base(&self) -> &<$name as $crate::VariantSet>::Base {
                        self
                    }

                    #[inline]
                    fn as_base_mut(&mut self) -> &mut <$name as $crate::VariantSet>::Base {
                        self
                    }
                }

                impl $crate::VariantAt<{ __Tags::$variant as $crate::Tag }> for $name {
                    type Type = $ty;
                }
            )+
        };
    };
}
