// src/macros.rs
//
// String shorthands used throughout the crate.

/// `s!()` → empty String; `s!(x)` → `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate two or more string-ish pieces into one String.
/// The first argument sets the buffer; the rest only need `AsRef<str>`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $(
            out.push_str($rest.as_ref());
        )+
        out
    }};
}
