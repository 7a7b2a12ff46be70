use std::fmt;

/// Client operation a method bucket dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Map a method bucket name to its verb
    ///
    /// `GET AFTER CHANGES` is a second read bucket that runs after the
    /// mutating buckets. Anything else is unsupported.
    pub fn from_bucket(method: &str) -> Option<Self> {
        match method.trim() {
            "GET" | "GET AFTER CHANGES" => Some(Verb::Get),
            "POST" => Some(Verb::Post),
            "PUT" => Some(Verb::Put),
            "DELETE" => Some(Verb::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
