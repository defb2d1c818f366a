// src/application/ports/localization.rs

/// Resolves translation keys to display text. Positional arguments replace
/// `%s` placeholders in order; unknown keys come back unchanged.
pub trait Translator: Send + Sync {
    fn trans(&self, key: &str, args: &[&str]) -> String;

    fn text(&self, key: &str) -> String {
        self.trans(key, &[])
    }
}
