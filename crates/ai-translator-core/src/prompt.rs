//! Instruction template sent to every hosted backend.

use crate::config::Lang;

/// System instruction for a translation from `source` to `target`.
pub fn system_instruction(source: &Lang, target: &Lang) -> String {
    let source = source.display_name();
    let target = target.display_name();
    format!(
        "You are a professional translator specializing in accurate, contextual translations. \
Translate the given text from {source} to {target}.

Rules:
- Provide only the translation, no explanations or additional text
- Maintain the original tone, style, and formality level
- Preserve formatting like line breaks and punctuation
- Keep proper nouns, brand names, and technical terms appropriate for the target language
- Consider cultural context and idiomatic expressions
- If the source text is already in the target language, provide the same text but mention it's already in the correct language"
    )
}

/// User turn carrying the text to translate.
pub fn user_prompt(text: &str, source: &Lang, target: &Lang) -> String {
    format!(
        "Translate this text from {} to {}:\n\n{}",
        source.display_name(),
        target.display_name(),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_uses_language_names() {
        let prompt = system_instruction(&Lang::new("en"), &Lang::new("de"));
        assert!(prompt.contains("from English to German"));
        assert!(prompt.contains("Preserve formatting like line breaks"));
        assert!(prompt.contains("already in the target language"));
    }

    #[test]
    fn test_unknown_code_falls_back_to_raw_code() {
        let prompt = system_instruction(&Lang::new("eo"), &Lang::new("fr"));
        assert!(prompt.contains("from eo to French"));
    }

    #[test]
    fn test_user_prompt_keeps_text_verbatim() {
        let text = "Line one\n  Line two\t(with tab)";
        let prompt = user_prompt(text, &Lang::new("en"), &Lang::new("ja"));
        assert_eq!(
            prompt,
            "Translate this text from English to Japanese:\n\nLine one\n  Line two\t(with tab)"
        );
    }
}
