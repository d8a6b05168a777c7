use reqwest::Url;

/// A license determination produced by a classifier
///
/// A master license is canonical and shared by every package that declares
/// it; anything else is a snapshot tied to the location it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    id: String,
    name: String,
    text: Option<String>,
    is_master: bool,
    source: Option<Url>,
}

impl License {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: None,
            is_master: false,
            source: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn as_master(mut self) -> Self {
        self.is_master = true;
        self
    }

    pub fn with_source(mut self, source: Url) -> Self {
        self.source = Some(source);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full license text, `None` when only the identity is known
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_master(&self) -> bool {
        self.is_master
    }

    pub fn source(&self) -> Option<&Url> {
        self.source.as_ref()
    }
}
