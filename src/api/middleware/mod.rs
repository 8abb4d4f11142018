pub mod token;

pub use token::TokenGate;
