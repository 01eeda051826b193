// Built-in block-list data.
//
// These are the defaults a fresh deployment starts with. Operators can replace
// or extend every list through a JSON block-list file (see BLOCKLIST_PATH),
// so nothing here is special beyond being the fallback.

/// Violence, crime, drug, harassment and danger vocabulary.
/// Matched as lowercase substrings unless word boundaries are switched on.
/// Entries are whole words, with inflections listed separately, so that
/// boundary mode still catches them.
pub const PLAIN_WORDS: &[&str] = &[
    // violence
    "kill",
    "murder",
    "shoot",
    "stabbing",
    "assault",
    "torture",
    // crime
    "crime",
    "robbery",
    "kidnap",
    "kidnapping",
    "smuggle",
    "smuggling",
    // drugs
    "drugs",
    "cocaine",
    "heroin",
    "methamphetamine",
    "fentanyl",
    "overdose",
    // harassment
    "harass",
    "harassment",
    "harassing",
    "stalker",
    "doxx",
    "doxxing",
    "threaten",
    // danger
    "bomb",
    "explosive",
    "weapon",
    "terror",
    "poison",
    "suicide",
];

/// Sexual-content patterns. Case-insensitive regexes, mostly plain substrings.
pub const SEXUAL_PATTERNS: &[&str] = &[
    "sex", "xxx", "nsfw", r"18\+", "nude", "porn", "hentai", "onlyfans", "camgirl", "erotic",
];

/// Profanity targets. Each one is compiled into an obfuscation-tolerant
/// pattern, so only the bare spelling goes here.
pub const PROFANITY_WORDS: &[&str] = &[
    "fuck", "shit", "bitch", "cunt", "asshole", "ass", "bastard", "dick", "slut", "whore",
    "motherfucker",
];

/// Category-label patterns. Real slurs are mapped onto these coded tokens by a
/// private extension; the core only ever sees the labels.
pub const SLUR_PATTERNS: &[&str] = &[
    r"\bslur_[[:alnum:]]+",
    r"\bhate_[[:alnum:]]+",
    r"\b[[:alnum:]]+-slur\b",
    r"\bslurs?\b",
];
