//! Issue body renderer.

use super::TemplateError;
use crate::issues::CanonicalIssue;
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{json, Value};
use std::path::Path;
use tracing::warn;

const BODY_TEMPLATE: &str = "body";

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("eq", Box::new(eq_helper));
    hbs
}

/// Usage: `{{#if (eq status "resolved")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Produces the body text of destination issues.
///
/// Without a custom template the body is [`CanonicalIssue::body`]. With one,
/// the template sees the fields listed in [`BodyRenderer::template_data`].
pub struct BodyRenderer {
    handlebars: Handlebars<'static>,
    has_template: bool,
}

impl Default for BodyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyRenderer {
    /// Creates a renderer that uses the built-in body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
            has_template: false,
        }
    }

    /// Creates a renderer from template source.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] on template syntax errors.
    pub fn with_template(template: &str) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(BODY_TEMPLATE, template)?;
        Ok(Self {
            handlebars,
            has_template: true,
        })
    }

    /// Creates a renderer from a template file.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let template = std::fs::read_to_string(path).map_err(|e| TemplateError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::with_template(&template)
    }

    /// Renders the body of `issue`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RenderError`] if the custom template fails,
    /// e.g. by referencing an unknown variable.
    pub fn render(&self, issue: &CanonicalIssue) -> Result<String, TemplateError> {
        if !self.has_template {
            return Ok(issue.body.clone());
        }
        Ok(self
            .handlebars
            .render(BODY_TEMPLATE, &Self::template_data(issue))?)
    }

    /// Renders the body of `issue`, falling back to its raw content if the
    /// template fails.
    #[must_use]
    pub fn render_or_raw(&self, issue: &CanonicalIssue) -> String {
        self.render(issue).unwrap_or_else(|e| {
            warn!(issue = issue.id, error = %e, "Body template failed, using raw content");
            issue.content.clone()
        })
    }

    /// Variables available to body templates.
    fn template_data(issue: &CanonicalIssue) -> Value {
        json!({
            "id": issue.id,
            "title": issue.title,
            "content": issue.content,
            "body": issue.body,
            "reporter": issue.reporter,
            "status": issue.status,
            "priority": issue.priority,
            "kind": issue.kind,
            "component": issue.component.as_deref().unwrap_or_default(),
            "labels": issue.labels,
            "created_on": issue.created_on.map(|t| t.to_rfc3339()).unwrap_or_default(),
        })
    }
}
