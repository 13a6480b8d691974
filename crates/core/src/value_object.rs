//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two slugs with the same text, or two
/// prices with the same amount, are the same value. They are immutable; to
/// "change" one, construct a new one through its validating constructor.
///
/// - **Value Object**: `Slug("power-drill")`, `Price(12.50)`, `RentDuration::OneWeek`
/// - **Entity**: `Category { id, .. }`, `Product { id, .. }`
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
