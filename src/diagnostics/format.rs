/// Fill `{}` placeholders in `template` with `values`, in order.
///
/// Placeholders without a matching value are left as `{}`; extra values are
/// ignored. Text inside substituted values is never re-scanned.
///
/// # Example
/// ```
/// use hostref::diagnostics::format_message;
/// let msg = format_message("Expected {}, got {}.", &["int", "'a'"]);
/// assert_eq!(msg, "Expected int, got 'a'.");
/// ```
pub fn format_message<S: AsRef<str>>(template: &str, values: &[S]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut rest = template;
    while let Some(idx) = rest.find("{}") {
        result.push_str(&rest[..idx]);
        match values.next() {
            Some(value) => result.push_str(value.as_ref()),
            None => result.push_str("{}"),
        }
        rest = &rest[idx + 2..];
    }
    result.push_str(rest);
    result
}
