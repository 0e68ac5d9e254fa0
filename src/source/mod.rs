//! Sources produce [Panel](crate::input::panel::Panel)s from data held outside the library. Each
//! source has its own format that is converted into a panel on load, clients should not need to
//! touch the panel constructors directly.
pub mod file;
pub mod random;
