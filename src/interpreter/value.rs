/// Runtime values, their coercions and their display form.
///
/// Defines the `Value` enum together with the host-number conversion used by
/// arithmetic, the truthiness rule used by `when` and `!`, and the loose
/// equality used by `==` and `!=`.
pub mod core;
