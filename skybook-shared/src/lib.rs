pub mod pii;
pub mod token;

pub use pii::Masked;
pub use token::random_token;
