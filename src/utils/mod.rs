pub mod error;
pub mod flatten;
pub mod logger;
pub mod substitute;
pub mod text;
pub mod validation;
