pub mod driver;
pub mod error_handling;
pub mod formatter;
pub mod grammar;
pub mod parser;
pub mod transform;
