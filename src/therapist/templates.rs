// src/therapist/templates.rs — Fixed reply bank per tone

use super::tone::{Category, Tone};

const EMPATHETIC_ACKNOWLEDGMENTS: &[&str] = &[
    "I hear you, and I want you to know that your feelings are completely valid.",
    "I can sense the weight of what you're carrying, and I'm here to support you.",
    "Thank you for trusting me with this. Your experience matters deeply.",
    "I understand how challenging this must be for you right now.",
    "Your emotions are telling us something important, and I'm listening.",
];

const EMPATHETIC_QUESTIONS: &[&str] = &[
    "What would be most helpful for you in this moment?",
    "How can I best support you through this?",
    "What do you need right now that would feel supportive?",
    "How are you taking care of yourself through this?",
    "What would it look like to give yourself permission to feel this?",
];

const EMPATHETIC_REFLECTIONS: &[&str] = &[
    "It sounds like you're navigating some really complex emotions.",
    "I can hear the struggle in your words, and I want you to know you're not alone.",
    "Your resilience is showing through even in this difficult time.",
    "This seems to be touching on something deeper for you.",
    "I notice how much courage it takes to share these feelings.",
];

const HONEST_ACKNOWLEDGMENTS: &[&str] = &[
    "I appreciate your honesty in sharing this with me.",
    "I need to be direct with you about what I'm hearing.",
    "Let me give you some straightforward feedback.",
    "I want to be completely honest about what I think is happening here.",
    "I respect that you're willing to face this head-on.",
];

const HONEST_QUESTIONS: &[&str] = &[
    "What specific steps can you take to address this?",
    "What's the hard truth you might be avoiding?",
    "What would it look like to take responsibility for your part in this?",
    "What's one thing you can do differently right now?",
    "What's the reality of the situation, not just how you wish it was?",
];

const HONEST_REFLECTIONS: &[&str] = &[
    "I think you know deep down what needs to happen here.",
    "This pattern isn't serving you well, and I think you know that.",
    "You have more control over this situation than you're allowing yourself.",
    "The truth is, you're capable of handling this better than you think.",
    "I see some self-sabotage happening here, and I want to call that out.",
];

const COGNITIVE_ACKNOWLEDGMENTS: &[&str] = &[
    "Let's examine the thinking patterns that are influencing your experience.",
    "I notice some cognitive patterns that might be contributing to this.",
    "Your thoughts are creating your emotional response here.",
    "Let's look at the connection between your thinking and your feelings.",
    "I see some automatic thoughts that we should explore together.",
];

const COGNITIVE_QUESTIONS: &[&str] = &[
    "What evidence supports or contradicts your perspective?",
    "What would you tell a friend who was thinking this way?",
    "What's the worst that could happen, and how likely is that?",
    "What automatic thoughts are you having right now?",
    "How would you think about this if you were feeling calmer?",
];

const COGNITIVE_REFLECTIONS: &[&str] = &[
    "I'm noticing some cognitive distortions in your thinking.",
    "Your thoughts seem to be following a familiar pattern.",
    "There's a connection between your beliefs and your emotional state.",
    "Your thinking is creating a filter that's coloring your experience.",
    "Let's challenge some of these automatic thoughts together.",
];

const SOLUTION_ACKNOWLEDGMENTS: &[&str] = &[
    "I can see you're ready to move forward and find solutions.",
    "You have strengths and resources to draw on here.",
    "Let's focus on what you can control and influence.",
    "I appreciate your willingness to take action.",
    "You're showing great problem-solving energy.",
];

const SOLUTION_QUESTIONS: &[&str] = &[
    "What's one small step you can take right now?",
    "What would success look like for you in this situation?",
    "What resources do you have available to you?",
    "What's your next concrete action?",
    "How can you build on what's already working?",
];

const SOLUTION_REFLECTIONS: &[&str] = &[
    "Instead of dwelling on the problem, let's focus on solutions.",
    "You have more options than you might think.",
    "Let's create a concrete action plan.",
    "Your strengths are your greatest resource here.",
    "This is a solvable problem with the right approach.",
];

const EMPATHETIC_FOLLOW_UPS: &[&str] = &[
    "How long have you been feeling this way?",
    "What triggered these feelings for you?",
    "Who else knows about what you're going through?",
    "What would feel most supportive to you right now?",
    "How are you taking care of yourself through this?",
];

const HONEST_FOLLOW_UPS: &[&str] = &[
    "What's the real issue here that you might be avoiding?",
    "What would it take for you to make a change?",
    "What's stopping you from taking action?",
    "What's the cost of staying in this pattern?",
    "What would it look like to be completely honest with yourself?",
];

const COGNITIVE_FOLLOW_UPS: &[&str] = &[
    "What's the evidence for and against this thought?",
    "What's a more balanced way to think about this?",
    "What would you think if you were feeling better?",
    "How would someone who loves you see this situation?",
    "What's the probability of your worst fear happening?",
];

const SOLUTION_FOLLOW_UPS: &[&str] = &[
    "What's your next concrete step?",
    "What would you like to accomplish in the next week?",
    "What resources do you need to make this happen?",
    "What's your timeline for this goal?",
    "How will you measure your progress?",
];

/// Reply candidates for a tone and category.
pub fn templates_for(tone: Tone, category: Category) -> &'static [&'static str] {
    match (tone, category) {
        (Tone::Empathetic, Category::Acknowledgment) => EMPATHETIC_ACKNOWLEDGMENTS,
        (Tone::Empathetic, Category::Question) => EMPATHETIC_QUESTIONS,
        (Tone::Empathetic, Category::Reflection) => EMPATHETIC_REFLECTIONS,
        (Tone::Honest, Category::Acknowledgment) => HONEST_ACKNOWLEDGMENTS,
        (Tone::Honest, Category::Question) => HONEST_QUESTIONS,
        (Tone::Honest, Category::Reflection) => HONEST_REFLECTIONS,
        (Tone::Cognitive, Category::Acknowledgment) => COGNITIVE_ACKNOWLEDGMENTS,
        (Tone::Cognitive, Category::Question) => COGNITIVE_QUESTIONS,
        (Tone::Cognitive, Category::Reflection) => COGNITIVE_REFLECTIONS,
        (Tone::Solution, Category::Acknowledgment) => SOLUTION_ACKNOWLEDGMENTS,
        (Tone::Solution, Category::Question) => SOLUTION_QUESTIONS,
        (Tone::Solution, Category::Reflection) => SOLUTION_REFLECTIONS,
    }
}

/// Questions that may be appended after a non-question reply.
pub fn follow_ups_for(tone: Tone) -> &'static [&'static str] {
    match tone {
        Tone::Empathetic => EMPATHETIC_FOLLOW_UPS,
        Tone::Honest => HONEST_FOLLOW_UPS,
        Tone::Cognitive => COGNITIVE_FOLLOW_UPS,
        Tone::Solution => SOLUTION_FOLLOW_UPS,
    }
}

/// Opening line of a fresh session.
pub fn welcome_for(tone: Tone) -> &'static str {
    match tone {
        Tone::Empathetic => "Hello! I'm here to listen and support you with warmth and understanding. How are you feeling today? I want to hear whatever is on your mind.",
        Tone::Honest => "Hello! I'm here to provide honest, direct support and guidance. How are you really doing? I'm ready to give you straightforward feedback.",
        Tone::Cognitive => "Hello! I'm here to help you understand your thoughts and behaviors. What's on your mind today? Let's explore your thinking patterns together.",
        Tone::Solution => "Hello! I'm here to help you find solutions and move forward. What would you like to work on today? Let's focus on your goals and next steps.",
    }
}

/// In-character line used when no template can be produced.
pub fn fallback_for(tone: Tone) -> &'static str {
    match tone {
        Tone::Empathetic => "I hear you, and I want you to know that your feelings are valid. How can I support you right now?",
        Tone::Honest => "I appreciate your honesty in sharing this. What specific steps can you take?",
        Tone::Cognitive => "Let's examine your thinking here. Can you identify any automatic thoughts?",
        Tone::Solution => "Let's focus on solutions. What's one small step you can take right now to move forward?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORIES: [Category; 3] = [
        Category::Acknowledgment,
        Category::Question,
        Category::Reflection,
    ];

    #[test]
    fn test_bank_sizes() {
        for tone in Tone::ALL {
            for category in CATEGORIES {
                assert!(
                    templates_for(tone, category).len() >= 4,
                    "{tone}/{} too small",
                    category.as_str()
                );
            }
            assert!(follow_ups_for(tone).len() >= 5);
            assert!(!welcome_for(tone).is_empty());
            assert!(!fallback_for(tone).is_empty());
        }
    }

    #[test]
    fn test_questions_end_with_question_mark() {
        for tone in Tone::ALL {
            for q in templates_for(tone, Category::Question)
                .iter()
                .chain(follow_ups_for(tone))
            {
                assert!(q.ends_with('?'), "{q}");
            }
        }
    }

    #[test]
    fn test_welcomes_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for tone in Tone::ALL {
            assert!(seen.insert(welcome_for(tone)));
        }
    }
}
