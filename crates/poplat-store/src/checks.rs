//! Index verification mode.

/// Whether the store verifies occupant keys and back-references on
/// every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IndexChecks {
    /// Verify liveness and both back-references; violations return
    /// [`StoreError`](poplat_core::StoreError) instead of corrupting state.
    #[default]
    Checked,
    /// Skip verification outside debug builds.
    Unchecked,
}

impl IndexChecks {
    /// `true` for [`IndexChecks::Checked`].
    pub fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }
}
