//! Shared template engine setup
//!
//! Every render builds its own environment from a constant body, so there is
//! no cache and nothing shared between callers.

use crate::{RenderError, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use tracing::debug;

/// Build an environment holding a single fixed template
///
/// Output is YAML, not HTML: escaping is off and the trailing newline of the
/// body is kept so the rendered text matches the body byte for byte.
fn environment(name: &'static str, source: &'static str) -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(name, source).map_err(RenderError::Parse)?;
    Ok(env)
}

/// Render a fixed template body against `ctx`
pub(crate) fn render(name: &'static str, source: &'static str, ctx: Value) -> Result<String> {
    let env = environment(name, source)?;
    let tmpl = env.get_template(name).map_err(RenderError::Parse)?;
    let rendered = tmpl.render(ctx).map_err(RenderError::Execute)?;

    debug!(template = name, bytes = rendered.len(), "Rendered template");
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_render_keeps_leading_and_trailing_newline() {
        let out = render("t", "\nkey: {{ value }}\n", context! { value => "x" }).unwrap();
        assert_eq!(out, "\nkey: x\n");
    }

    #[test]
    fn test_render_does_not_escape() {
        let out = render(
            "t.yaml",
            "worker: \"{{ worker }}\" cmd: {{ cmd }}",
            context! { worker => "{{.device_1}}", cmd => "a && b <c>" },
        )
        .unwrap();
        assert_eq!(out, "worker: \"{{.device_1}}\" cmd: a && b <c>");
    }

    #[test]
    fn test_render_bool() {
        // Booleans print Python-style, callers pass YAML text instead
        let out = render("t", "efiBoot: {{ efi_boot }}", context! { efi_boot => true }).unwrap();
        assert_eq!(out, "efiBoot: True");
        let out = render(
            "t",
            "efiBoot: {{ efi_boot }}",
            context! { efi_boot => false.to_string() },
        )
        .unwrap();
        assert_eq!(out, "efiBoot: false");
    }

    #[test]
    fn test_parse_error() {
        let err = render("t", "name: {{ name ", context! { name => "x" }).unwrap_err();
        assert!(matches!(err, RenderError::Parse(_)));
    }

    #[test]
    fn test_undefined_variable_is_execute_error() {
        let err = render("t", "name: {{ missing }}", context! { name => "x" }).unwrap_err();
        assert!(matches!(err, RenderError::Execute(_)));
    }
}
