//! # Graph names.
//!
//! [`GraphName`] is a validated, path-like identifier a node claims in the shared
//! naming namespace. Only the syntax is checked here; how names resolve against
//! namespaces is the node factory's business.
//!
//! ## Rules
//! - non-empty, no whitespace
//! - no empty segments (`/a//b`)
//! - no trailing slash, except the root name `/`
//! - `/`-prefixed names are global, `~`-prefixed names are private, others are relative

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ExecutorError;

/// A validated graph name. Cheap to clone.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphName(Arc<str>);

impl GraphName {
    /// Parses and validates a graph name.
    ///
    /// # Example
    /// ```
    /// use nodevisor::GraphName;
    ///
    /// let name = GraphName::new("/robot/talker").unwrap();
    /// assert!(name.is_global());
    /// assert!(GraphName::new("a//b").is_err());
    /// ```
    pub fn new(name: impl AsRef<str>) -> Result<Self, ExecutorError> {
        let name = name.as_ref();
        let reject = |reason| ExecutorError::InvalidGraphName {
            name: name.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(reject("empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(reject("contains whitespace"));
        }
        if name == "/" {
            return Ok(Self(Arc::from(name)));
        }
        if name.ends_with('/') {
            return Err(reject("trailing slash"));
        }
        let body = name.strip_prefix('/').unwrap_or(name);
        if body.split('/').any(str::is_empty) {
            return Err(reject("empty segment"));
        }
        Ok(Self(Arc::from(name)))
    }

    /// The root namespace `/`.
    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        &*self.0 == "/"
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        self.0.starts_with('/')
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        self.0.starts_with('~')
    }

    /// Last path segment (`/a/b` → `b`). The root's basename is empty.
    pub fn basename(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Joins a relative name onto this one. Global `other` replaces `self`.
    pub fn join(&self, other: &GraphName) -> GraphName {
        if other.is_global() {
            return other.clone();
        }
        if self.is_root() {
            return GraphName(Arc::from(format!("/{}", other.0)));
        }
        GraphName(Arc::from(format!("{}/{}", self.0, other.0)))
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphName({:?})", &*self.0)
    }
}

impl AsRef<str> for GraphName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for GraphName {
    type Err = ExecutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GraphName::new(s)
    }
}

impl TryFrom<&str> for GraphName {
    type Error = ExecutorError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        GraphName::new(s)
    }
}
