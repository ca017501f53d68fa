use thiserror::Error;

/// Errors returned by the typed accessors of [`Poly`](crate::Poly).
///
/// Lifecycle operations (construct, assign, erase, visit) never fail; only
/// requests for a specific concrete type can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolyError {
    /// The container holds no value
    #[error("container is empty")]
    Empty,
    /// The container holds a value of a different type than the one requested
    #[error("type mismatch: requested `{requested}`, container holds `{held}`")]
    TypeMismatch {
        requested: &'static str,
        held: &'static str,
    },
}
