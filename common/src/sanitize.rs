/// Turns untrusted markup into markup that is safe to display.
///
/// Implementations must be pure: same input, same output, no side effects.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, raw: &str) -> String;
}
