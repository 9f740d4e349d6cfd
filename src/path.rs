//! Path syntax for addressing nodes in a data tree.
//!
//! A path is a sequence of segments joined by a separator character, e.g.
//! `user.profile.name`. A segment equal to the self-reference token resolves
//! to the node the path is being resolved on, so `#` addresses the node itself.
//!
//! Paths are consumed one segment at a time: [`PathConfig::split`] returns the
//! leading segment and whatever is left, and each level of the tree only ever
//! looks at the leading segment of the sub-path it was handed.

use std::borrow::Cow;

use crate::error::ConfigError;

/// Separator used by [`PathConfig::default`].
pub const DEFAULT_SEPARATOR: char = '.';

/// Self-reference token used by [`PathConfig::default`].
pub const DEFAULT_SELF_TOKEN: &str = "#";

/// The separator character and self-reference token used to parse paths.
///
/// A [`DataTree`](crate::DataTree) holds one of these and reads it every time a
/// path is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPathConfig")
)]
pub struct PathConfig {
    separator: char,
    self_token: Cow<'static, str>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            self_token: Cow::Borrowed(DEFAULT_SELF_TOKEN),
        }
    }
}

impl PathConfig {
    /// Create a config with a custom separator and self-reference token.
    ///
    /// The token must not contain the separator, otherwise it could never
    /// appear as a whole segment. An empty token makes an empty leading
    /// segment refer to the node itself, so `"."` and `".a"` both resolve to
    /// the node the path is resolved on.
    pub fn new(
        separator: char,
        self_token: impl Into<Cow<'static, str>>,
    ) -> Result<Self, ConfigError> {
        let self_token = self_token.into();
        if self_token.contains(separator) {
            return Err(ConfigError::TokenContainsSeparator {
                token: self_token.into_owned(),
                separator,
            });
        }
        Ok(Self {
            separator,
            self_token,
        })
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn self_token(&self) -> &str {
        &self.self_token
    }

    /// Split `path` at the first separator into the leading segment and the rest.
    ///
    /// An empty rest (`"a."`) is reported as `None`, the same as no separator.
    pub fn split<'p>(&self, path: &'p str) -> (&'p str, Option<&'p str>) {
        match path.split_once(self.separator) {
            Some((segment, rest)) if !rest.is_empty() => (segment, Some(rest)),
            Some((segment, _)) => (segment, None),
            None => (path, None),
        }
    }

    /// Whether `segment` is the self-reference token.
    pub fn is_self(&self, segment: &str) -> bool {
        segment == self.self_token
    }

    /// Join segments with the separator.
    pub fn join<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> String {
        let mut path = String::new();
        for segment in segments {
            if !path.is_empty() {
                path.push(self.separator);
            }
            path.push_str(segment);
        }
        path
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPathConfig {
    separator: char,
    self_token: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPathConfig> for PathConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPathConfig) -> Result<Self, Self::Error> {
        PathConfig::new(raw.separator, raw.self_token)
    }
}
