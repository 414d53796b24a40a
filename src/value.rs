//! The payload type shared by every queue variant.

/// Signed integer payload carried by queue nodes.
pub type Value = i32;

/// Reserved value returned by `pop` to mean "the queue was empty".
///
/// Chosen as the type's minimum so it can never collide with a legitimate
/// caller-supplied value, unlike an in-range magic constant.
pub const SENTINEL: Value = Value::MIN;
