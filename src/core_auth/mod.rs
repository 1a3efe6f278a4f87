pub mod core_auth;

pub use self::core_auth::login;
