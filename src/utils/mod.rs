pub mod string;

pub use string::{display_name_or_placeholder, placeholder_name, strip_markup};
