use std::fmt;
use std::io;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while rendering a chain of templates.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
    template: Option<String>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A template or block failed with a custom message.
    Render,

    /// A template could not be found in the engine or template store.
    UnknownTemplate,

    /// An area was declared more than once in the same render.
    AreaRedeclared,

    /// Templates were nested deeper than the configured maximum.
    MaxTemplateDepth,

    /// The render data could not be serialized.
    Serialize,

    /// Writing the rendered output failed.
    Io,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            template: None,
        }
    }

    /// Construct a custom render error.
    ///
    /// Templates use this to fail the whole render with their own message.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, msg)
    }

    pub(crate) fn unknown_template(name: &str) -> Self {
        Self::new(ErrorKind::UnknownTemplate, format!("unknown template `{name}`"))
    }

    pub(crate) fn template_store(name: &str, msg: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::UnknownTemplate,
            format!("failed to load template `{name}`: {msg}"),
        )
    }

    pub(crate) fn area_redeclared(name: &str) -> Self {
        Self::new(
            ErrorKind::AreaRedeclared,
            format!("area `{name}` was already declared in this render"),
        )
    }

    pub(crate) fn max_template_depth(max: usize) -> Self {
        Self::new(
            ErrorKind::MaxTemplateDepth,
            format!("reached the maximum template depth ({max})"),
        )
    }

    /// Attach the name of the template that failed.
    ///
    /// The innermost template wins, outer templates never overwrite it.
    pub(crate) fn with_template_name(mut self, name: &str) -> Self {
        if self.template.is_none() {
            self.template = Some(name.to_owned());
        }
        self
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the name of the template that failed, if known.
    pub fn template_name(&self) -> Option<&str> {
        self.template.as_deref()
    }
}

impl std::error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("msg", &self.msg)
            .field("template", &self.template)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)?;
        if let Some(name) = &self.template {
            write!(f, " (in template `{name}`)")?;
        }
        Ok(())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Render => "render error",
            Self::UnknownTemplate => "template error",
            Self::AreaRedeclared => "area error",
            Self::MaxTemplateDepth => "depth error",
            Self::Serialize => "serialize error",
            Self::Io => "io error",
        };
        f.write_str(s)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Self::render(msg)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Self::render(msg)
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self::render("format error")
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorKind::Io, err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Serialize, err.to_string())
    }
}
