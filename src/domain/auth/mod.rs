pub mod error;
pub mod jwt;

pub use error::AuthError;
pub use jwt::{Claims, JwtManager};
