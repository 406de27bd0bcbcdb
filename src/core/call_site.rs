//! Call-site capture
//!
//! A `CallSite` is captured where one of the crate's macros is expanded, so
//! attribution never depends on how many wrapper frames sit between the
//! caller and the sink.

use std::fmt;

/// Source location and enclosing function of the code that requested a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    function: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> &'static str {
        self.function
    }
}

/// Renders as `file:line`, the value of the `caller` key.
impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Strip the helper item and closure segments that `function_name!` picks up.
#[doc(hidden)]
pub fn trim_function_name(name: &'static str) -> &'static str {
    let mut name = name.strip_suffix("::__f").unwrap_or(name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Path of the enclosing function, e.g. `my_crate::handlers::create_user`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::core::call_site::trim_function_name(__type_name_of(__f))
    }};
}

/// Capture the `CallSite` of the expansion point.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(::std::file!(), ::std::line!(), $crate::function_name!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_file_and_line() {
        let site = CallSite::new("src/main.rs", 12, "app::main");
        assert_eq!(site.to_string(), "src/main.rs:12");
    }

    #[test]
    fn test_function_name_macro() {
        let name = crate::function_name!();
        assert!(name.ends_with("call_site::tests::test_function_name_macro"), "{}", name);
    }

    #[test]
    fn test_function_name_inside_closure() {
        let name = (|| crate::function_name!())();
        assert!(name.ends_with("tests::test_function_name_inside_closure"), "{}", name);
    }

    #[test]
    fn test_call_site_macro() {
        let line = line!() + 1;
        let site = crate::call_site!();
        assert_eq!(site.line(), line);
        assert!(site.file().ends_with("call_site.rs"));
        assert!(site.function().ends_with("test_call_site_macro"));
    }

    #[test]
    fn test_trim_function_name() {
        assert_eq!(trim_function_name("a::b::__f"), "a::b");
        assert_eq!(trim_function_name("a::b::{{closure}}::{{closure}}::__f"), "a::b");
        assert_eq!(trim_function_name("a::b"), "a::b");
    }
}
