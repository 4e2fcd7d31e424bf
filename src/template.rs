use crate::{
    error::{Error, Result},
    escape::escape_tex,
    heading::Heading,
    language::resolve_language,
};
use serde::Serialize;
use std::{collections::HashMap, fs, io::Write, path::Path};
use tera::{Context, Tera, Value};
use tracing::debug;

const PREAMBLE: &str = "preamble";
const LISTING: &str = "listing";
const CLOSING: &str = "closing";

/// Marker in a replacement preamble that becomes `true` or `false`.
///
/// Replacement preambles are plain LaTeX, not templates, so macro
/// arguments like `#1` need no quoting.
pub const WHITESPACE_PLACEHOLDER: &str = "__WHITESPACE__";

/// Template data for one file's block.
#[derive(Debug, Serialize)]
pub(crate) struct ListingView<'a> {
    /// Literal path handed to `\lstinputlisting`
    pub(crate) path: &'a str,
    /// Unescaped heading text shown as the long title
    pub(crate) title: &'a str,
    /// Headings declared before the listing
    pub(crate) headings: &'a [Heading],
}

/// Renders the LaTeX document pieces.
pub(crate) struct TemplateEngine {
    tera: Tera,
    custom_preamble: Option<String>,
}

impl TemplateEngine {
    /// Creates a template engine, optionally replacing the built-in preamble.
    ///
    /// # Errors
    ///
    /// Returns an error if the preamble file cannot be read or a built-in
    /// template does not compile.
    pub(crate) fn new(preamble_path: Option<&Path>) -> Result<Self> {
        let mut tera = Tera::default();

        Self::register_builtin_templates(&mut tera)?;
        Self::register_filters(&mut tera);

        let custom_preamble = match preamble_path {
            Some(path) => {
                let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
                debug!("Using preamble from {}", path.display());
                Some(source)
            }
            None => None,
        };

        Ok(Self {
            tera,
            custom_preamble,
        })
    }

    fn register_builtin_templates(tera: &mut Tera) -> Result<()> {
        tera.add_raw_templates(vec![
            (PREAMBLE, include_str!("../templates/preamble.tex.tera")),
            (LISTING, include_str!("../templates/listing.tex.tera")),
            (CLOSING, include_str!("../templates/closing.tex.tera")),
        ])
        .map_err(|e| Error::template("builtin", &e))
    }

    fn register_filters(tera: &mut Tera) {
        tera.register_filter("tex_escape", Self::tex_escape_filter);
        tera.register_filter("language", Self::language_filter);
        tera.register_filter("braced", Self::braced_filter);
    }

    /// Escapes LaTeX specials in a string value.
    fn tex_escape_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        match value.as_str() {
            Some(s) => Ok(Value::String(escape_tex(s))),
            None => Ok(value.clone()),
        }
    }

    /// Maps a path to its `listings` language, empty when unknown.
    fn language_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let language = value.as_str().map_or("", resolve_language);
        Ok(Value::String(language.to_string()))
    }

    /// Wraps a value in a TeX group. Templates cannot write `{{{` directly.
    fn braced_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let inner = match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        };
        Ok(Value::String(format!("{{{inner}}}")))
    }

    /// Renders the preamble up to and including `\tableofcontents`.
    ///
    /// A replacement preamble is copied verbatim apart from
    /// [`WHITESPACE_PLACEHOLDER`].
    pub(crate) fn render_preamble<W: Write>(
        &self,
        show_whitespace: bool,
        mut out: W,
    ) -> Result<()> {
        if let Some(source) = &self.custom_preamble {
            let text = source.replace(WHITESPACE_PLACEHOLDER, &show_whitespace.to_string());
            return out
                .write_all(text.as_bytes())
                .map_err(|e| Error::io("<output>", e));
        }

        let mut context = Context::new();
        context.insert("show_whitespace", &show_whitespace);
        self.render_to(PREAMBLE, &context, out)
    }

    /// Renders one file's page break, headings and listing directive.
    pub(crate) fn render_listing<W: Write>(&self, listing: &ListingView<'_>, out: W) -> Result<()> {
        let context = Context::from_serialize(listing).map_err(|e| Error::template(LISTING, &e))?;
        self.render_to(LISTING, &context, out)
    }

    /// Renders the document end.
    pub(crate) fn render_closing<W: Write>(&self, out: W) -> Result<()> {
        self.render_to(CLOSING, &Context::new(), out)
    }

    fn render_to<W: Write>(&self, name: &str, context: &Context, out: W) -> Result<()> {
        self.tera
            .render_to(name, context, out)
            .map_err(|e| Error::template(name, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::HeadingLevel;

    fn render_listing(listing: &ListingView<'_>) -> String {
        let engine = TemplateEngine::new(None).unwrap();
        let mut out = Vec::new();
        engine.render_listing(listing, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new(None).is_ok());
    }

    #[test]
    fn test_render_preamble_hides_whitespace() {
        let engine = TemplateEngine::new(None).unwrap();
        let mut out = Vec::new();
        engine.render_preamble(false, &mut out).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.starts_with("\\documentclass{article}"));
        assert!(rendered.contains("showspaces=false,"));
        assert!(rendered.contains("showtabs=false,"));
        assert!(rendered.contains("\\begin{document}"));
        assert!(rendered.contains("\\tableofcontents"));
    }

    #[test]
    fn test_render_preamble_shows_whitespace() {
        let engine = TemplateEngine::new(None).unwrap();
        let mut out = Vec::new();
        engine.render_preamble(true, &mut out).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("showspaces=true,"));
        assert!(rendered.contains("showtabs=true,"));
        assert!(!rendered.contains("showtabs=false"));
        // string spaces stay hidden either way
        assert!(rendered.contains("showstringspaces=false,"));
    }

    #[test]
    fn test_render_listing_with_headings() {
        let headings = vec![
            Heading {
                segment: "pkg".to_string(),
                level: HeadingLevel::Section,
            },
            Heading {
                segment: "__init__.py".to_string(),
                level: HeadingLevel::Subsection,
            },
        ];
        let rendered = render_listing(&ListingView {
            path: "src/pkg/__init__.py",
            title: "pkg/__init__.py",
            headings: &headings,
        });

        assert_eq!(
            rendered.trim_end(),
            "\\newpage\n\
             \\section[pkg]{pkg/\\_\\_init\\_\\_.py}\n\
             \\subsection[\\_\\_init\\_\\_.py]{pkg/\\_\\_init\\_\\_.py}\n\
             \\lstinputlisting[language=Python]{\"src/pkg/__init__.py\"}"
        );
    }

    #[test]
    fn test_render_listing_without_headings() {
        let rendered = render_listing(&ListingView {
            path: "notes.txt",
            title: "notes.txt",
            headings: &[],
        });

        assert_eq!(
            rendered.trim_end(),
            "\\newpage\n\\lstinputlisting[language=]{\"notes.txt\"}"
        );
    }

    #[test]
    fn test_custom_preamble_template() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().join("preamble.tex");
        fs::write(
            &path,
            "\\documentclass{book}\n\\lstset{showspaces=__WHITESPACE__,showtabs=__WHITESPACE__}\n",
        )
        .unwrap();

        let engine = TemplateEngine::new(Some(&path)).unwrap();
        let mut out = Vec::new();
        engine.render_preamble(true, &mut out).unwrap();

        let rendered = String::from_utf8(out).unwrap();
        assert_eq!(
            rendered,
            "\\documentclass{book}\n\\lstset{showspaces=true,showtabs=true}\n"
        );
    }

    #[test]
    fn test_custom_preamble_with_macro_arguments() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().join("preamble.tex");
        let source = "\\documentclass{article}\n\
                      \\newcommand{\\code}[1]{\\texttt{#1}}\n\
                      \\newcommand{\\pair}[2]{{#1}{{#2}}}\n\
                      {% not a tag %} {{ not a variable }}\n\
                      \\begin{document}\n";
        fs::write(&path, source).unwrap();

        let engine = TemplateEngine::new(Some(&path)).unwrap();
        let mut out = Vec::new();
        engine.render_preamble(false, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), source);
    }

    #[test]
    fn test_unreadable_custom_preamble() {
        let result = TemplateEngine::new(Some(Path::new("/nonexistent/preamble.tex")));
        assert!(result.err().unwrap().is_io());
    }

    #[test]
    fn test_tex_escape_filter() {
        let value = Value::String("a_b%c".to_string());
        let result = TemplateEngine::tex_escape_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(result.as_str().unwrap(), "a\\_b\\%c");
    }

    #[test]
    fn test_language_filter() {
        let test_cases = vec![
            ("main.c", "C"),
            ("tool.py", "Python"),
            ("lib.rs", ""),
            ("README", ""),
        ];

        for (path, expected) in test_cases {
            let value = Value::String(path.to_string());
            let result = TemplateEngine::language_filter(&value, &HashMap::new()).unwrap();
            assert_eq!(result.as_str().unwrap(), expected);
        }
    }

    #[test]
    fn test_braced_filter() {
        let value = Value::String("x".to_string());
        let result = TemplateEngine::braced_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(result.as_str().unwrap(), "{x}");
    }
}
