//! Canned replies used when the completion service cannot answer.

/// Checked in order; the first keyword found in the message wins.
const KEYWORD_REPLIES: [(&str, &str); 5] = [
    (
        "stressed",
        "I understand you're feeling stressed. Try taking three deep breaths with me: inhale for 4 counts, hold for 7, exhale for 8. Stress is temporary, and you have the strength to work through this. What's one small thing you could do right now to feel a bit better?",
    ),
    (
        "anxious",
        "Anxiety can feel overwhelming, but you're not alone in this. Ground yourself by naming 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, and 1 you can taste. Would you like to try some breathing exercises or talk about what's making you anxious?",
    ),
    (
        "sad",
        "I'm sorry you're feeling sad. It's okay to feel this way - your emotions are valid. Sometimes sadness helps us process important experiences. Would journaling help? Writing down your thoughts can sometimes bring clarity and relief.",
    ),
    (
        "happy",
        "I'm so glad to hear you're feeling good! It's wonderful when we can appreciate positive moments. What's bringing you joy today? Celebrating these feelings can help us remember them during tougher times.",
    ),
    (
        "tired",
        "Being tired can affect everything - your mood, thoughts, and energy. Are you getting enough sleep? Sometimes tiredness is our body's way of asking for rest or self-care. What would help you feel more energized?",
    ),
];

pub const GENERIC_REPLY: &str = "Thank you for sharing with me. I'm here to listen and support you. Sometimes it helps to talk through what we're experiencing. Would you like to tell me more about how you're feeling today?";

pub fn fallback(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    KEYWORD_REPLIES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(GENERIC_REPLY)
}
