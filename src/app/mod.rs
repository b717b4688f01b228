pub mod session;

pub use session::AuthenticatorSession;
