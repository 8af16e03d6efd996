//! How a line's result reaches the terminal.
//!
//! The front end never prints an [`Object`] directly; it asks [`render`]
//! which stream the result belongs on and what exact text to write.
//!
//! | Result       | Stream | Text                                    |
//! |--------------|--------|-----------------------------------------|
//! | `Null`       | none   |                                         |
//! | `Error`      | stderr | `Error: <message>` and a newline        |
//! | `String`     | stdout | the text, newline added only if missing |
//! | `Json`       | stdout | 2-space indented JSON and a newline     |
//! | anything else| stdout | its `inspect()` text and a newline      |
//!
//! # Examples
//!
//! ```
//! use jsonsh::{render, Object, Rendered};
//!
//! assert_eq!(render(&Object::Null), Rendered::Nothing);
//! assert_eq!(
//!     render(&Object::String("hi".into())),
//!     Rendered::Stdout("hi\n".into())
//! );
//! ```

use std::io::{self, Write};

use crate::object::Object;

/// A result ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Nothing,
    Stdout(String),
    Stderr(String),
}

impl Rendered {
    /// Writes the text to whichever of `out` and `err` it belongs on.
    pub fn write_to<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> io::Result<()> {
        match self {
            Rendered::Nothing => Ok(()),
            Rendered::Stdout(text) => {
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Rendered::Stderr(text) => {
                err.write_all(text.as_bytes())?;
                err.flush()
            }
        }
    }
}

pub fn render(obj: &Object) -> Rendered {
    match obj {
        Object::Null => Rendered::Nothing,
        Object::Error(_) => Rendered::Stderr(with_newline(obj.inspect())),
        Object::String(s) => Rendered::Stdout(with_newline(s.clone())),
        Object::Json(_) | Object::Builtin(_) => Rendered::Stdout(with_newline(obj.inspect())),
    }
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
