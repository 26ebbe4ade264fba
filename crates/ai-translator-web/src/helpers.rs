//! Helpers for route handlers.
//!
//! Caller-side input checks that run before anything reaches the dispatcher.

use ai_translator_core::Lang;

/// Validate a translate form before dispatch.
///
/// Returns the user-facing message for rejected input.
pub fn validate_translate_input(
    text: &str,
    source: &Lang,
    target: &Lang,
) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("Please enter some text to translate.");
    }
    if source == target {
        return Err("Please select different source and target languages.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_translate_input() {
        let en = Lang::new("en");
        let fr = Lang::new("fr");
        assert_eq!(
            validate_translate_input("   ", &en, &fr),
            Err("Please enter some text to translate.")
        );
        assert_eq!(
            validate_translate_input("Hi", &en, &en),
            Err("Please select different source and target languages.")
        );
        assert_eq!(validate_translate_input("Hi", &en, &fr), Ok(()));
    }
}
