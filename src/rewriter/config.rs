//! Configuration of a rewrite pass.
//!
//! [`RewriterConfig`] collects the few switches that change how a pass treats its input.
//! The defaults describe the in-place engine: frozen nodes are passed through untouched,
//! unrecognized kinds are tolerated, and findings are recorded as diagnostics.
//!
//! # Examples
//!
//! ```rust
//! use dotrewrite::rewriter::RewriterConfig;
//!
//! let config = RewriterConfig::copying();
//! assert!(config.copy_and_rewrite_immutable_references);
//! assert!(!config.strict_dispatch);
//!
//! let custom = RewriterConfig {
//!     max_depth: 256,
//!     ..RewriterConfig::strict()
//! };
//! assert!(custom.strict_dispatch);
//! ```

/// Default recursion guard of a pass.
pub const DEFAULT_MAX_DEPTH: usize = 2048;

/// Switches that control a rewrite pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriterConfig {
    /// Shallow-copy frozen nodes and rewrite the copy instead of passing them through.
    ///
    /// With this off, a frozen node that is reached is returned unchanged and its children
    /// are not visited. With it on, the output is a graph independent of the frozen input.
    pub copy_and_rewrite_immutable_references: bool,

    /// Fail with [`crate::Error::UnexpectedKind`] when a slot holds a kind its category can
    /// never contain, instead of passing the node through and recording a warning.
    pub strict_dispatch: bool,

    /// Maximum nesting of simultaneously active rewrite operations.
    pub max_depth: usize,

    /// Record non-fatal findings in the pass [`crate::metadata::diagnostics::Diagnostics`].
    pub record_diagnostics: bool,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        RewriterConfig {
            copy_and_rewrite_immutable_references: false,
            strict_dispatch: false,
            max_depth: DEFAULT_MAX_DEPTH,
            record_diagnostics: true,
        }
    }
}

impl RewriterConfig {
    /// Rewrites mutable nodes in place and leaves frozen nodes alone.
    #[must_use]
    pub fn in_place() -> Self {
        Self::default()
    }

    /// Copies frozen nodes before rewriting them.
    #[must_use]
    pub fn copying() -> Self {
        RewriterConfig {
            copy_and_rewrite_immutable_references: true,
            ..Self::default()
        }
    }

    /// In-place rewriting that rejects unrecognized kinds.
    #[must_use]
    pub fn strict() -> Self {
        RewriterConfig {
            strict_dispatch: true,
            ..Self::default()
        }
    }

    /// Copying rewriting that rejects unrecognized kinds.
    #[must_use]
    pub fn copying_strict() -> Self {
        RewriterConfig {
            copy_and_rewrite_immutable_references: true,
            strict_dispatch: true,
            ..Self::default()
        }
    }

    /// Returns the configuration with a different recursion guard.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RewriterConfig::default();
        assert!(!config.copy_and_rewrite_immutable_references);
        assert!(!config.strict_dispatch);
        assert!(config.record_diagnostics);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config, RewriterConfig::in_place());
    }

    #[test]
    fn test_presets() {
        assert!(RewriterConfig::copying().copy_and_rewrite_immutable_references);
        assert!(!RewriterConfig::copying().strict_dispatch);
        assert!(RewriterConfig::strict().strict_dispatch);
        assert!(!RewriterConfig::strict().copy_and_rewrite_immutable_references);

        let both = RewriterConfig::copying_strict();
        assert!(both.copy_and_rewrite_immutable_references && both.strict_dispatch);
    }

    #[test]
    fn test_with_max_depth() {
        let config = RewriterConfig::copying().with_max_depth(16);
        assert_eq!(config.max_depth, 16);
        assert!(config.copy_and_rewrite_immutable_references);
    }
}
