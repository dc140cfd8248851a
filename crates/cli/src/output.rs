//! Terminal output: rendered fragments on stdout, alerts on stderr.

use askama::Template;

/// Render `template` and print it to stdout.
///
/// # Errors
///
/// Returns `askama::Error` if rendering fails.
#[allow(clippy::print_stdout)]
pub fn html(template: &impl Template) -> Result<(), askama::Error> {
    let rendered = template.render()?;
    println!("{}", rendered.trim());
    Ok(())
}

/// Print a user-facing message to stderr.
#[allow(clippy::print_stderr)]
pub fn alert(message: &str) {
    eprintln!("{message}");
}
