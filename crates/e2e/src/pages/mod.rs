//! Page objects for the MyRent UI.

mod login;

pub use login::LoginPage;
