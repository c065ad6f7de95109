//! Request context seen by the exits

use crate::ExitError;
use relsync_domain::ContentId;
use std::collections::HashMap;

/// Request parameter carrying the triggering item's content id
pub const CONTENT_ID_PARAM: &str = "sys_contentid";

/// Read-only view of the request that triggered an exit
pub trait RequestContext {
    /// Value of a request parameter, if present
    fn parameter(&self, name: &str) -> Option<String>;
}

impl<T: RequestContext + ?Sized> RequestContext for &T {
    fn parameter(&self, name: &str) -> Option<String> {
        (**self).parameter(name)
    }
}

/// Request context backed by a map of parameters
///
/// # Examples
///
/// ```
/// use relsync_exit::{MapRequestContext, RequestContext};
///
/// let request = MapRequestContext::new()
///     .with("sys_contentid", "7")
///     .with("related_ids", "101;102");
///
/// assert_eq!(request.parameter("related_ids").as_deref(), Some("101;102"));
/// assert!(request.parameter("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapRequestContext {
    params: HashMap<String, String>,
}

impl MapRequestContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, returning the context
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a parameter, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }
}

impl RequestContext for MapRequestContext {
    fn parameter(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapRequestContext {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut context = Self::new();
        for (name, value) in iter {
            context.set(name, value);
        }
        context
    }
}

/// Content id of the item the request is about
pub fn content_id<R: RequestContext + ?Sized>(request: &R) -> Result<ContentId, ExitError> {
    let raw = request.parameter(CONTENT_ID_PARAM).ok_or_else(|| {
        ExitError::InvalidRequest(format!("request has no {} parameter", CONTENT_ID_PARAM))
    })?;

    raw.parse().map_err(|e| {
        ExitError::InvalidRequest(format!("invalid {} parameter: {}", CONTENT_ID_PARAM, e))
    })
}
