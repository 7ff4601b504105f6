use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::HashMap;

/// A remote resource: where it lives, what it is asked with and what it answers.
pub trait Method {
    /// Endpoint root below the API version, without slashes.
    const PATH: &'static str;

    type Response: DeserializeOwned;

    /// Path segments below the API version. Each one is sent as a single percent-encoded
    /// segment, so a `/` inside an id never adds a level.
    fn segments(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(Self::PATH)]
    }

    /// `/`-joined [`Self::segments`], used to label errors.
    fn endpoint(&self) -> String {
        self.segments().join("/")
    }

    fn params(&self) -> Option<HashMap<String, String>> {
        None
    }
}
