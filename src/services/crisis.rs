//! Deterministic crisis detection.
//!
//! Matching is plain case-insensitive substring containment, so a phrase
//! embedded in a longer word still counts. That is the intended behaviour.

pub const CRISIS_PHRASES: [&str; 6] = [
    "suicide",
    "kill myself",
    "end it all",
    "hurt myself",
    "self-harm",
    "crisis",
];

pub const CRISIS_REPLY: &str = "I'm really concerned about you and want you to know that you're not alone. Please reach out for immediate help:

🆘 **Emergency Resources:**
- **Crisis Text Line**: Text HOME to 741741
- **National Suicide Prevention Lifeline**: Call or text 988
- **Emergency**: Call 911

You matter, and there are people who want to help you through this difficult time. Would you like to talk about what's making you feel this way?";

pub fn classify(text: &str) -> bool {
    let lowered = text.to_lowercase();
    CRISIS_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}
