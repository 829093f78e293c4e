//! Presentational building blocks with no state of their own.

mod text_field;

pub use text_field::TextField;
