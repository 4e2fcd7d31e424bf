//! Extension to `listings` language lookup.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Languages understood by the LaTeX `listings` package, keyed by file extension.
static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("ada", "Ada"),
        ("adb", "Ada"),
        ("ads", "Ada"),
        ("awk", "Awk"),
        ("c", "C"),
        ("h", "C++"),
        ("hh", "C++"),
        ("hpp", "C++"),
        ("cxx", "C++"),
        ("cpp", "C++"),
        ("caml", "Caml"),
        ("ex", "Euphoria"),
        ("exw", "Euphoria"),
        ("f", "Fortran"),
        ("for", "Fortran"),
        ("f90", "Fortran"),
        ("fpp", "Fortran"),
        ("html", "HTML"),
        ("xhtml", "HTML"),
        ("has", "Haskell"),
        ("hs", "Haskell"),
        ("idl", "IDL"),
        ("java", "Java"),
        // Processing sketches
        ("pde", "Java"),
        ("lsp", "Lisp"),
        ("lgo", "Logo"),
        ("ml", "ML"),
        ("php", "PHP"),
        ("php3", "PHP"),
        ("p", "Pascal"),
        ("pas", "Pascal"),
        // Prolog also uses .pl
        ("pl", "Perl"),
        ("py", "Python"),
        ("r", "R"),
        ("rb", "Ruby"),
        ("sas", "SAS"),
        ("sql", "SQL"),
        ("tex", "TeX"),
        ("vbs", "VBScript"),
        ("vhd", "VHDL"),
        ("vrml", "VRML"),
        ("v", "Verilog"),
        ("xml", "XML"),
        ("xslt", "XSLT"),
        ("bash", "bash"),
        ("csh", "csh"),
        ("ksh", "ksh"),
        ("sh", "sh"),
        ("tcl", "tcl"),
    ]
    .into_iter()
    .collect()
});

/// Returns the `listings` language name for a path, or `""` when unknown.
///
/// The extension is whatever follows the last `.`; a name without a dot is
/// looked up whole and so never matches. Lookup is case-sensitive, so
/// `main.PY` resolves to no language.
#[must_use]
pub fn resolve_language(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or(path);
    LANGUAGES.get(extension).copied().unwrap_or("")
}
