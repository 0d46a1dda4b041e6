//! Database configuration: serialization hooks.

use crate::error::CoreResult;
use crate::types::Tree;
use std::fmt;
use std::sync::Arc;

/// Custom encoder from the in-memory tree to backing-file text.
pub type EncodeHook = Arc<dyn Fn(&Tree) -> CoreResult<String> + Send + Sync>;

/// Custom decoder from backing-file text to the in-memory tree.
pub type DecodeHook = Arc<dyn Fn(&str) -> CoreResult<Tree> + Send + Sync>;

/// Configuration for opening a database.
///
/// Both hooks are optional; the defaults are plain structural JSON via
/// `serde_json`. A database continues to use the hooks it was opened
/// with for its whole lifetime.
#[derive(Clone, Default)]
pub struct Config {
    encode: Option<EncodeHook>,
    decode: Option<DecodeHook>,
}

impl Config {
    /// Creates a configuration with default (plain JSON) hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom encode hook.
    #[must_use]
    pub fn encode_with(
        mut self,
        hook: impl Fn(&Tree) -> CoreResult<String> + Send + Sync + 'static,
    ) -> Self {
        self.encode = Some(Arc::new(hook));
        self
    }

    /// Sets a custom decode hook.
    #[must_use]
    pub fn decode_with(
        mut self,
        hook: impl Fn(&str) -> CoreResult<Tree> + Send + Sync + 'static,
    ) -> Self {
        self.decode = Some(Arc::new(hook));
        self
    }

    /// Encodes the tree to backing-file text.
    pub(crate) fn encode(&self, tree: &Tree) -> CoreResult<String> {
        match &self.encode {
            Some(hook) => hook(tree),
            None => Ok(serde_json::to_string(tree)?),
        }
    }

    /// Decodes backing-file text into a tree.
    pub(crate) fn decode(&self, text: &str) -> CoreResult<Tree> {
        match &self.decode {
            Some(hook) => hook(text),
            None => Ok(serde_json::from_str(text)?),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("encode", &self.encode.as_ref().map(|_| "custom"))
            .field("decode", &self.decode.as_ref().map(|_| "custom"))
            .finish()
    }
}
