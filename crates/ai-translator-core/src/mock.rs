//! Offline demo translator.
//!
//! Deterministic and dependency-free: a small phrase table plus per-language
//! placeholder templates. Used when the user picks demo mode and as the last
//! resort after every hosted backend has failed.

/// Known phrases, checked in this order for substring matches.
///
/// Each entry maps a lowercase phrase to `(target code, translation)` pairs.
const PHRASES: &[(&str, &[(&str, &str)])] = &[
    (
        "hello",
        &[
            ("es", "hola"),
            ("fr", "bonjour"),
            ("de", "hallo"),
            ("it", "ciao"),
            ("pt", "olá"),
            ("ru", "привет"),
            ("ja", "こんにちは"),
            ("ko", "안녕하세요"),
            ("zh", "你好"),
            ("ar", "مرحبا"),
            ("hi", "नमस्ते"),
        ],
    ),
    (
        "how are you",
        &[
            ("es", "¿cómo estás?"),
            ("fr", "comment allez-vous?"),
            ("de", "wie geht es dir?"),
            ("it", "come stai?"),
            ("pt", "como você está?"),
            ("ru", "как дела?"),
            ("ja", "元気ですか？"),
            ("ko", "어떻게 지내세요?"),
            ("zh", "你好吗？"),
            ("ar", "كيف حالك؟"),
            ("hi", "आप कैसे हैं?"),
        ],
    ),
    (
        "thank you",
        &[
            ("es", "gracias"),
            ("fr", "merci"),
            ("de", "danke"),
            ("it", "grazie"),
            ("pt", "obrigado"),
            ("ru", "спасибо"),
            ("ja", "ありがとう"),
            ("ko", "감사합니다"),
            ("zh", "谢谢"),
            ("ar", "شكرا"),
            ("hi", "धन्यवाद"),
        ],
    ),
    (
        "good morning",
        &[
            ("es", "buenos días"),
            ("fr", "bonjour"),
            ("de", "guten Morgen"),
            ("it", "buongiorno"),
            ("pt", "bom dia"),
            ("ru", "доброе утро"),
            ("ja", "おはよう"),
            ("ko", "좋은 아침"),
            ("zh", "早上好"),
            ("ar", "صباح الخير"),
            ("hi", "सुप्रभात"),
        ],
    ),
    (
        "i love you",
        &[
            ("es", "te amo"),
            ("fr", "je t'aime"),
            ("de", "ich liebe dich"),
            ("it", "ti amo"),
            ("pt", "eu te amo"),
            ("ru", "я тебя люблю"),
            ("ja", "愛してる"),
            ("ko", "사랑해"),
            ("zh", "我爱你"),
            ("ar", "أحبك"),
            ("hi", "मैं तुमसे प्यार करता हूँ"),
        ],
    ),
    (
        "what is your name",
        &[
            ("es", "¿cuál es tu nombre?"),
            ("fr", "quel est votre nom?"),
            ("de", "wie heißt du?"),
            ("it", "come ti chiami?"),
            ("pt", "qual é o seu nome?"),
            ("ru", "как тебя зовут?"),
            ("ja", "お名前は何ですか？"),
            ("ko", "이름이 뭐예요?"),
            ("zh", "你叫什么名字？"),
            ("ar", "ما اسمك؟"),
            ("hi", "आपका नाम क्या है?"),
        ],
    ),
    (
        "where are you from",
        &[
            ("es", "¿de dónde eres?"),
            ("fr", "d'où venez-vous?"),
            ("de", "woher kommst du?"),
            ("it", "di dove sei?"),
            ("pt", "de onde você é?"),
            ("ru", "откуда ты?"),
            ("ja", "どちらの出身ですか？"),
            ("ko", "어디서 왔어요?"),
            ("zh", "你来自哪里？"),
            ("ar", "من أين أنت؟"),
            ("hi", "आप कहाँ से हैं?"),
        ],
    ),
];

fn phrase_translation(
    translations: &[(&str, &'static str)],
    target: &str,
) -> Option<&'static str> {
    translations
        .iter()
        .find(|(code, _)| *code == target)
        .map(|(_, text)| *text)
}

/// Produce the demo translation of `text` into `target`.
///
/// Lookup order:
/// 1. the trimmed, lowercased text equals a known phrase;
/// 2. it contains a known phrase (first match in table order);
/// 3. a placeholder naming demo mode, in the target language when known.
pub fn mock_translate(text: &str, target: &str) -> String {
    let normalized = text.trim().to_lowercase();

    let exact = PHRASES
        .iter()
        .find(|(phrase, _)| *phrase == normalized)
        .and_then(|(_, translations)| phrase_translation(translations, target));
    if let Some(found) = exact {
        return found.to_string();
    }

    let partial = PHRASES
        .iter()
        .filter(|(phrase, _)| normalized.contains(phrase))
        .find_map(|(_, translations)| phrase_translation(translations, target));
    if let Some(found) = partial {
        return found.to_string();
    }

    placeholder(text, target)
}

fn placeholder(text: &str, target: &str) -> String {
    match target {
        "es" => format!("Traducción simulada: \"{text}\" (Modo demostración)"),
        "fr" => format!("Traduction simulée: \"{text}\" (Mode démonstration)"),
        "de" => format!("Simulierte Übersetzung: \"{text}\" (Demo-Modus)"),
        "it" => format!("Traduzione simulata: \"{text}\" (Modalità demo)"),
        "pt" => format!("Tradução simulada: \"{text}\" (Modo demonstração)"),
        "ru" => format!("Имитация перевода: \"{text}\" (Демо-режим)"),
        "ja" => format!("模擬翻訳: \"{text}\" (デモモード)"),
        "ko" => format!("모의 번역: \"{text}\" (데모 모드)"),
        "zh" => format!("模拟翻译: \"{text}\" (演示模式)"),
        "ar" => format!("ترجمة محاكاة: \"{text}\" (وضع العرض)"),
        "hi" => format!("नकली अनुवाद: \"{text}\" (डेमो मोड)"),
        _ => format!("Mock translation: \"{text}\" (Demo mode)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(mock_translate("Hello", "es"), "hola");
        assert_eq!(mock_translate("  THANK YOU  ", "de"), "danke");
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(mock_translate("Well, hello there", "es"), "hola");
        assert_eq!(mock_translate("Good morning everyone", "it"), "buongiorno");
    }

    #[test]
    fn test_substring_ties_follow_table_order() {
        // "hello" precedes "how are you" in the table
        assert_eq!(mock_translate("how are you? hello!", "fr"), "bonjour");
        // "thank you" precedes "i love you"
        assert_eq!(mock_translate("i love you, thank you", "pt"), "obrigado");
    }

    #[test]
    fn test_placeholder_contains_text() {
        let out = mock_translate("Supercalifragilistic", "fr");
        assert!(out.contains("Supercalifragilistic"));
        assert!(out.contains("Mode démonstration"));
    }

    #[test]
    fn test_known_phrase_without_target_uses_placeholder() {
        // phrase table has no Dutch entries
        let out = mock_translate("hello", "nl");
        assert_eq!(out, "Mock translation: \"hello\" (Demo mode)");
    }

    #[test]
    fn test_english_placeholder_template() {
        let out = mock_translate("Buenos días", "en");
        assert_eq!(out, "Mock translation: \"Buenos días\" (Demo mode)");
    }

    #[test]
    fn test_placeholder_keeps_original_text() {
        let out = mock_translate("  Spaced Out  ", "es");
        assert_eq!(out, "Traducción simulada: \"  Spaced Out  \" (Modo demostración)");
    }

    #[test]
    fn test_idempotent() {
        for (text, target) in [("Hello", "ja"), ("random words", "ko"), ("x", "zz")] {
            assert_eq!(mock_translate(text, target), mock_translate(text, target));
        }
    }
}
