pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::Subject;
pub use claims::TokenKind;
pub use errors::JwtError;
pub use handler::JwtHandler;
