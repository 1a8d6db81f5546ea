// src/core/mod.rs

pub mod dom;
pub mod net;
pub mod parser;
pub mod sanitize;

pub use dom::HtmlElement;
pub use parser::HtmlDocument;
