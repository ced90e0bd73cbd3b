mod claims;
pub(crate) mod extractors;
pub(crate) mod keys;

pub use extractors::AuthUser;
