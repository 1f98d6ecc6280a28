//! Write-only password holder
//!
//! The password is wiped from memory on drop and on [`Password::clear`]. It
//! has no `Serialize` impl and a redacted `Debug`, so it cannot leak into the
//! lead snapshot, the session file or the audit journal.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A password typed during signup
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Password {
    inner: String,
}

impl Password {
    /// Create a new Password
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Expose the secret for the single place that sends it
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.inner.chars().count()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Wipe the secret
    pub fn clear(&mut self) {
        self.inner.zeroize();
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
