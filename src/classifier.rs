/// Output of the intent classifier for one message.
#[derive(Debug, Clone)]
pub struct Classification {
    pub tag: String,
    pub confidence: f32,
}

/// Capability object for the external message -> (tag, confidence) model.
/// Injected into the orchestrator at construction so the policy layer stays
/// testable with a stub.
pub trait Classifier: Send + Sync {
    fn classify(&self, message: &str) -> Classification;
}

/// Deterministic keyword matcher used by the REPL binary. The production
/// classifier is a separate service; this one only has to be good enough to
/// drive the rule chain from a terminal.
#[derive(Debug, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

const KEYWORD_TAGS: &[(&[&str], &str)] = &[
    (&["hello", "hi ", "hey", "good morning"], "greeting"),
    (&["bye", "goodbye", "see you"], "goodbye"),
    (&["thank"], "thanks"),
    (&["finished all", "done with all", "completed all"], "finishAllTask"),
    (&["recommended", "suggested task"], "finishPartOfRecommentedTask"),
    (&["today"], "todayTask"),
    (&["team progress", "group progress"], "teamProgress"),
    (&["member progress"], "memberProgress"),
];

impl Classifier for KeywordClassifier {
    fn classify(&self, message: &str) -> Classification {
        let lowered = message.to_lowercase();
        for (needles, tag) in KEYWORD_TAGS {
            if needles.iter().any(|needle| lowered.contains(needle)) {
                return Classification {
                    tag: (*tag).to_string(),
                    confidence: 0.9,
                };
            }
        }
        Classification {
            tag: "unknown".to_string(),
            confidence: 0.5,
        }
    }
}
