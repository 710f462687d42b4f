//! Fixed word lists used by normalization and the ratio features
//!
//! These lists are part of the trained model's contract: the vectorizer and
//! scaler were fit on text processed with exactly these entries.

/// Salutations and sign-offs removed before tokenization
pub const GREETINGS: &[&str] = &[
    "dear",
    "hi",
    "hello",
    "hey",
    "greetings",
    "regards",
    "best",
    "thanks",
    "thank",
    "sincerely",
    "cheers",
    "respectfully",
    "welcome",
    "goodbye",
];

/// Spam-indicative terms counted by the suspicious-word ratio
pub const SUSPICIOUS_WORDS: &[&str] = &[
    // offers
    "free", "win", "prize", "bonus", "discount", "offer", "deal", "sale",
    // urgency
    "urgent", "immediate", "act", "miss", "last", "expires", "deadline", "hurry", "quick", "rush",
    // money
    "money", "cash", "earn", "income", "investment", "guarantee", "risk-free", "refund", "lottery",
    "million",
    // calls to action
    "subscribe", "unsubscribe", "reply", "visit", "download", "order", "register", "join", "apply",
    // pharma and phishing
    "viagra", "cialis", "password", "account", "security", "verify", "confirm", "alert",
    "notification", "update",
];

/// Characters counted by the suspicious-character ratio
pub const SUSPICIOUS_CHARS: &[char] = &['$', '€', '£', '!', '%'];

/// Standard English stopword list
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lists_have_no_duplicates() {
        for list in [GREETINGS, SUSPICIOUS_WORDS, STOPWORDS] {
            let unique: HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len());
        }
    }

    #[test]
    fn test_lists_are_lowercase() {
        for word in GREETINGS.iter().chain(SUSPICIOUS_WORDS).chain(STOPWORDS) {
            assert_eq!(word.to_lowercase(), *word);
        }
    }

    #[test]
    fn test_list_sizes() {
        assert_eq!(GREETINGS.len(), 14);
        assert_eq!(SUSPICIOUS_WORDS.len(), 47);
        assert_eq!(STOPWORDS.len(), 179);
    }
}
