use std::collections::BTreeMap;
use crate::error::{Error, Result};




/**
 * The CTest dashboard script handed to `ctest -S`. Field names and the
 * statement sequence are read by CTest and must not change. Braces that
 * belong to CMake variable references are doubled.
 */
pub const CTEST_SCRIPT: &str = r#"set (CTEST_SOURCE_DIRECTORY "{source_dir}")
set (CTEST_BINARY_DIRECTORY "{build_dir}")

set(CTEST_SITE "{host_name}")
set (CTEST_BUILD_NAME "{build_name}")
set (CTEST_CMAKE_GENERATOR "Unix Makefiles")
set (CTEST_BUILD_OPTIONS "{build_opts}")

set(CTEST_CONFIGURE_COMMAND "${{CMAKE_COMMAND}} -H${{CTEST_SOURCE_DIRECTORY}} -B${{CTEST_BINARY_DIRECTORY}} ${{CTEST_BUILD_OPTIONS}}")
set(CTEST_MEMORYCHECK_COMMAND "/usr/bin/valgrind")
set(CTEST_MEMORYCHECK_COMMAND_OPTIONS "--tool=memcheck --leak-check=yes --show-reachable=yes --num-callers=20 --track-fds=yes --track-origins=yes")

ctest_start("Nightly")
ctest_configure()
ctest_build()
ctest_test()
ctest_submit()"#;




/**
 * Named values substituted into a template.
 */
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}




// ============================================================================
impl RenderContext {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}




/**
 * One piece of a parsed template: either literal text (with doubled braces
 * already collapsed) or the name of a placeholder.
 */
#[derive(Clone, Debug, PartialEq)]
enum Segment<'a> {
    Text(String),
    Field(&'a str),
}




/**
 * A block of text with `{name}` placeholders. Literal braces are written
 * `{{` and `}}`. The text is parsed once, on construction.
 */
#[derive(Clone, Debug)]
pub struct Template<'a> {
    segments: Vec<Segment<'a>>,
}




// ============================================================================
impl<'a> Template<'a> {

    pub fn parse(text: &'a str) -> Result<Self> {
        let bytes = text.as_bytes();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    literal.push('{');
                    i += 2;
                }
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    literal.push('}');
                    i += 2;
                }
                b'{' => {
                    let close = text[i + 1..]
                        .find(|c: char| c == '}' || c == '{')
                        .map(|n| n + i + 1)
                        .filter(|&n| bytes[n] == b'}')
                        .ok_or(Error::MalformedTemplate(i))?;
                    if !literal.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(&text[i + 1..close]));
                    i = close + 1;
                }
                b'}' => return Err(Error::MalformedTemplate(i)),
                _ => {
                    let next = text[i..]
                        .find(|c: char| c == '{' || c == '}')
                        .map_or(text.len(), |n| n + i);
                    literal.push_str(&text[i..next]);
                    i = next;
                }
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Text(literal));
        }
        Ok(Self { segments })
    }

    /**
     * Placeholder names, in order of appearance (repeats included).
     */
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(name) => Some(*name),
            Segment::Text(_) => None,
        })
    }

    /**
     * Substitute every placeholder from the context. Fails on the first
     * placeholder the context has no value for.
     */
    pub fn render(&self, context: &RenderContext) -> Result<String> {
        let mut output = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Field(name) => {
                    let value = context
                        .get(name)
                        .ok_or_else(|| Error::MissingPlaceholder(name.to_string()))?;
                    output.push_str(value)
                }
            }
        }
        Ok(output)
    }
}

/// The parsed dashboard script template.
pub fn ctest_script() -> Result<Template<'static>> {
    Template::parse(CTEST_SCRIPT)
}
