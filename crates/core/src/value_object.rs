//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// - **Value Object**: no identity (two statistics snapshots with the same
///   totals are equal)
/// - **Entity**: has identity (two items with the same freshness are still
///   different items)
///
/// Value objects are produced as results and not modified afterwards; to
/// "change" one, compute a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Statistics {
///     total: usize,
///     average_freshness: f64,
/// }
///
/// impl ValueObject for Statistics {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
