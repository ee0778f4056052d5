//! Prompt construction for the assistant bridge.
//!
//! All prompts are plain string compositions. The system instructions gain a
//! response-language directive whenever the active locale is not the default,
//! and the routine prompt opens and closes with localized framing while the
//! formatting contract itself stays fixed.

use ritu_core::catalog::Product;
use ritu_core::locale::Locale;

/// Base system instructions sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a knowledgeable and friendly beauty advisor for a \
personal routine builder. You help users choose skincare, haircare, makeup, suncare, and \
fragrance products and build effective routines from them. Only discuss beauty-related topics: \
products, routines, application techniques, and general beauty advice. Keep answers warm, \
professional, and concise.";

/// System instructions with the locale directive applied.
pub fn system_prompt(locale: Locale) -> String {
    format!("{SYSTEM_PROMPT}{}", locale.response_directive())
}

/// Bullet list of the selected products, as shown to the model.
fn product_bullets(products: &[Product], with_description: bool) -> String {
    products
        .iter()
        .map(|p| {
            if with_description {
                format!(
                    "• **{}** by {} ({}): {}",
                    p.name, p.brand, p.category, p.description
                )
            } else {
                format!("• {} by {} ({})", p.name, p.brand, p.category)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes a chat message with the current selection so answers stay
/// grounded in what the user actually picked. Used only when the selection
/// is non-empty.
pub fn chat_prompt_with_selection(products: &[Product], message: &str) -> String {
    format!(
        "User's selected products:\n{}\n\nUser question: {}",
        product_bullets(products, false),
        message
    )
}

/// The synthetic user-intent record appended to history after a successful
/// routine generation.
pub fn routine_user_intent(products: &[Product]) -> String {
    let names = products
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Generate routine for: {names}")
}

/// The structured routine-generation prompt: every selected product with its
/// full description, plus explicit formatting instructions.
pub fn routine_prompt(products: &[Product], locale: Locale) -> String {
    let t = locale.translations();

    format!(
        "\n{intro}\n\n{products}\n\n\
Create a complete skincare routine with numbered steps. Include timing information \
(morning/evening) within each step instruction rather than using separate section headers.\n\n\
Format your response as a numbered list with detailed instructions:\n\n\
1. [First step with timing - e.g., \"In the morning, apply **Product Name**...\"]\n\
2. [Second step with timing - e.g., \"In the evening, use **Product Name**...\"]\n\
3. [Continue with all steps, specifying when each should be done]\n\
4. [Include application tips and frequency within each step]\n\
5. [Add waiting times and order information in the instructions]\n\n\
{tips}\n\
- [Compatibility notes]\n\
- [Special considerations]\n\
- [Frequency recommendations]\n\n\
CRITICAL REQUIREMENTS:\n\
- Use **bold** formatting for product names\n\
- Include ALL selected products in the routine\n\
- Specify timing (morning/evening) within each numbered step\n\
- Do NOT use separate \"Morning Routine\" or \"Evening Routine\" headers\n\
- Provide 6-10 detailed numbered steps total\n\
- Include specific application tips and timing in each step\n\
- Mention frequency (daily, twice daily, etc.) in the instructions\n\
- Keep response elegant, professional, and COMPLETE\n\
- Do NOT truncate, summarize, or cut off any part of the routine\n\n\
Example format:\n\
1. In the morning, cleanse your face with **Product Name**...\n\
2. After cleansing, apply **Serum Name** and wait 2-3 minutes...\n\
3. In the evening, remove makeup with **Product Name**...\n\n\
Generate the COMPLETE routine with all details integrated into numbered steps.",
        intro = t.routine_intro,
        products = product_bullets(products, true),
        tips = t.routine_tips,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: "Glow Serum".to_string(),
                brand: "Lumina".to_string(),
                category: "skincare".to_string(),
                description: "Brightening vitamin C serum".to_string(),
                image: "img".to_string(),
            },
            Product {
                id: 2,
                name: "Sun Shield".to_string(),
                brand: "Solar".to_string(),
                category: "suncare".to_string(),
                description: "SPF 50 daily sunscreen".to_string(),
                image: "img".to_string(),
            },
        ]
    }

    #[test]
    fn test_system_prompt_directive_only_for_non_default_locale() {
        assert_eq!(system_prompt(Locale::En), SYSTEM_PROMPT);
        assert!(system_prompt(Locale::Es).ends_with("Always respond in Spanish."));
    }

    #[test]
    fn test_chat_prompt_embeds_selection_and_question() {
        let prompt = chat_prompt_with_selection(&products(), "what order?");
        assert!(prompt.contains("• Glow Serum by Lumina (skincare)"));
        assert!(prompt.ends_with("User question: what order?"));
        // Chat context stays terse: no descriptions.
        assert!(!prompt.contains("vitamin C"));
    }

    #[test]
    fn test_routine_prompt_enumerates_every_product() {
        let prompt = routine_prompt(&products(), Locale::En);
        assert!(prompt.contains("• **Glow Serum** by Lumina (skincare): Brightening vitamin C serum"));
        assert!(prompt.contains("• **Sun Shield** by Solar (suncare): SPF 50 daily sunscreen"));
        assert!(prompt.contains("Provide 6-10 detailed numbered steps total"));
        assert!(prompt.contains("**Additional Tips:**"));
    }

    #[test]
    fn test_routine_prompt_localizes_framing() {
        let prompt = routine_prompt(&products(), Locale::Fr);
        assert!(prompt.contains("Créez une routine complète"));
        assert!(prompt.contains("**Conseils Supplémentaires:**"));
        // The formatting contract itself is fixed.
        assert!(prompt.contains("CRITICAL REQUIREMENTS:"));
    }

    #[test]
    fn test_routine_user_intent_lists_names() {
        assert_eq!(
            routine_user_intent(&products()),
            "Generate routine for: Glow Serum, Sun Shield"
        );
    }
}
