//! Language front-end registry.
//!
//! Each language implements the `LanguageFrontend` contract and is
//! registered here.

pub mod csharp;
pub mod go;
pub mod java;
pub mod python;
pub mod ruby;
pub mod rust;
pub mod typescript;

use crate::frontend::LanguageFrontend;

/// All registered language front ends.
pub fn all_frontends() -> Vec<Box<dyn LanguageFrontend>> {
    vec![
        Box::new(rust::RustFrontend::new()),
        Box::new(typescript::TypeScriptFrontend::new()),
        Box::new(python::PythonFrontend::new()),
        Box::new(go::GoFrontend::new()),
        Box::new(java::JavaFrontend::new()),
        Box::new(csharp::CSharpFrontend::new()),
        Box::new(ruby::RubyFrontend::new()),
    ]
}

/// Find a front end for a given file extension.
pub fn frontend_for_extension(ext: &str) -> Option<Box<dyn LanguageFrontend>> {
    all_frontends()
        .into_iter()
        .find(|frontend| frontend.file_extensions().contains(&ext))
}
