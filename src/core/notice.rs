//! One-shot error notices carried in the page URL.
//!
//! The server redirects back to the listing with `?error=<code>` when an
//! upload is refused. On load the code is mapped to a message, shown once,
//! and the parameter is scrubbed from the visible URL so a refresh does not
//! show it again.

use crate::config::{ERROR_MESSAGES, ERROR_PARAM};
use crate::utils::url::{query_value, strip_query_param};

/// The parts of `window.location` the notifier looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLocation {
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

/// A notice to surface and the URL to replace the current one with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlNotice {
    pub message: String,
    pub clean_url: String,
}

/// Maps error codes found in the URL to user-facing messages.
#[derive(Clone, Debug)]
pub struct UrlErrorNotifier {
    param: String,
    messages: Vec<(String, String)>,
}

impl Default for UrlErrorNotifier {
    fn default() -> Self {
        Self {
            param: ERROR_PARAM.to_string(),
            messages: ERROR_MESSAGES
                .iter()
                .map(|(code, message)| (code.to_string(), message.to_string()))
                .collect(),
        }
    }
}

impl UrlErrorNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the message for an error code.
    #[cfg(test)]
    pub fn with_message(mut self, code: &str, message: &str) -> Self {
        self.messages.retain(|(known, _)| known != code);
        self.messages.push((code.to_string(), message.to_string()));
        self
    }

    pub fn message_for(&self, code: &str) -> Option<&str> {
        self.messages
            .iter()
            .find(|(known, _)| known == code)
            .map(|(_, message)| message.as_str())
    }

    /// Check `location` for a recognized error code.
    ///
    /// Unknown codes are left in the URL untouched.
    pub fn check(&self, location: &PageLocation) -> Option<UrlNotice> {
        let code = query_value(&location.search, &self.param)?;
        let message = self.message_for(&code)?.to_string();
        let clean_url = format!(
            "{}{}{}",
            location.pathname,
            strip_query_param(&location.search, &self.param),
            location.hash
        );

        Some(UrlNotice { message, clean_url })
    }
}
