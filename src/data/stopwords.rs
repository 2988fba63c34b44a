// ============================================================
// Layer 4 — Stopword Filter
// ============================================================
// The NLTK English stopword list, with apostrophes removed
// ("don't" → "dont") because the normaliser strips punctuation
// before the stopword check. Kept sorted so membership is a
// binary search.
//
// Pronoun contractions ("I'm", "they're", ...) collapse to single
// tokens once the apostrophe is gone, so their stripped forms are
// listed too. Forms that are ordinary words ("ill", "well",
// "shed", "id") are left out.

/// Sorted, deduplicated English stopwords.
pub const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and",
    "any", "are", "aren", "arent", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "couldn", "couldnt", "d",
    "did", "didn", "didnt", "do", "does", "doesn", "doesnt", "doing", "don", "dont",
    "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "hadnt",
    "has", "hasn", "hasnt", "have", "haven", "havent", "having", "he", "hed", "her",
    "here", "hers", "herself", "hes", "him", "himself", "his", "how", "i", "if", "im",
    "in", "into", "is", "isn", "isnt", "it", "itd", "itll", "its", "itself", "ive",
    "just", "ll", "m", "ma", "me", "mightn", "mightnt", "more", "most", "mustn",
    "mustnt", "my", "myself", "needn", "neednt", "no", "nor", "not", "now", "o", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "re", "s", "same", "shan", "shant", "she", "shes", "should",
    "shouldn", "shouldnt", "shouldve", "so", "some", "such", "t", "than", "that",
    "thatll", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "theyd", "theyll", "theyre", "theyve", "this", "those", "through", "to",
    "too", "under", "until", "up", "ve", "very", "was", "wasn", "wasnt", "we", "were",
    "weren", "werent", "weve", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "won", "wont", "wouldn", "wouldnt", "y", "you", "youd",
    "youll", "your", "youre", "yours", "yourself", "yourselves", "youve",
];

/// True when `token` (already lowercased) is an English stopword.
pub fn is_stopword(token: &str) -> bool {
    ENGLISH.binary_search(&token).is_ok()
}
