//! Migrator configuration.

/// Per-run options for the [`Migrator`](super::Migrator).
#[derive(Debug, Clone)]
pub struct MigratorConfig {
    /// Comma separated labels applied to every issue.
    extra_labels: String,
    /// Whether bodies get a `by **reporter**:` header.
    attribution: bool,
    /// Whether labels are sent with create requests.
    attach_labels: bool,
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            extra_labels: String::new(),
            attribution: true,
            attach_labels: true,
        }
    }
}

impl MigratorConfig {
    /// Creates the default configuration: attribution and labels on, no
    /// extra labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the comma separated extra labels.
    #[must_use]
    pub fn with_extra_labels(mut self, extra_labels: impl Into<String>) -> Self {
        self.extra_labels = extra_labels.into();
        self
    }

    /// Enables or disables the reporter attribution header.
    #[must_use]
    pub fn with_attribution(mut self, attribution: bool) -> Self {
        self.attribution = attribution;
        self
    }

    /// Enables or disables sending labels on create.
    #[must_use]
    pub fn with_attach_labels(mut self, attach_labels: bool) -> Self {
        self.attach_labels = attach_labels;
        self
    }

    /// Returns the extra labels.
    pub fn extra_labels(&self) -> &str {
        &self.extra_labels
    }

    /// Returns whether the attribution header is enabled.
    pub fn attribution(&self) -> bool {
        self.attribution
    }

    /// Returns whether labels are sent on create.
    pub fn attach_labels(&self) -> bool {
        self.attach_labels
    }
}
