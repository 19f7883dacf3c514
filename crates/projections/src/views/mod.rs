//! Read model views built from user events.

pub mod users;

pub use users::UsersView;
