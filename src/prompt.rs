// src/prompt.rs
//! Instruction payload sent to the generation service. The whole service
//! contract lives in this text: formatting rules, content rules, and the
//! required document skeleton. `build_prompt` is a pure function of its
//! inputs so the payload is reproducible under a fixed clock.

use chrono::NaiveDate;

/// Bumped whenever the rule set below changes in a way the digest consumer
/// could observe.
pub const RULES_VERSION: &str = "v3";

/// Required top-level section markers, in the order the response must
/// instantiate them. The validator checks for these exact strings.
pub const SECTION_MACRO: &str = "<h2>Macro Sentiment</h2>";
pub const SECTION_TOP_TICKERS: &str = "<h2>Top Tickers</h2>";
pub const SECTION_MINOR_TICKERS: &str = "<h2>Lower-Coverage Tickers</h2>";
pub const SECTION_THEMES: &str = "<h2>Themes</h2>";

/// Closed subtopic taxonomy for the themes section.
pub const THEME_TAXONOMY: [&str; 4] = [
    "AI & Semiconductors",
    "Optical Networking",
    "Internet Platforms",
    "Software & SaaS",
];

/// Minimum distinct tickers the top-tickers section must cover.
pub const MIN_TOP_TICKERS: usize = 3;

const CORPUS_BEGIN: &str = "--- BEGIN CORPUS ---";
const CORPUS_END: &str = "--- END CORPUS ---";

/// Assemble the full instruction string for one run. Byte-identical output
/// for identical (date, corpus) inputs.
pub fn build_prompt(date: NaiveDate, corpus_block: &str) -> String {
    let taxonomy = THEME_TAXONOMY.join(", ");
    format!(
        "You are a senior US-equities analyst. Today is {date}. Analyze ONLY the \
retail-forum post lines supplied between the corpus markers below and produce an \
HTML market-sentiment digest (rules revision {version}).\n\
\n\
FORMATTING RULES:\n\
1. Output raw HTML elements only. No markdown, no ** or * emphasis markers, no code fences.\n\
2. Every section header must be followed immediately by content. No transitional prose \
between sections.\n\
3. When quoting a post, strip its leading [source] tag from the quoted text.\n\
\n\
CONTENT RULES:\n\
1. The macro section covers market-wide mood only; never name individual equities there.\n\
2. Broad index instruments (SPY, QQQ, DIA, IWM, VTI) are never individual equities.\n\
3. Reflect both bullish and bearish framing present in the corpus, not only the positive side.\n\
4. Derive 100% of the digest from the supplied corpus. No outside or historical knowledge; \
today's date above is your only temporal anchor.\n\
\n\
DOCUMENT SKELETON (instantiate these sections, in this order, with these exact headers):\n\
1. {macro_section}: aggregate retail mood and the consensus or point of maximum disagreement.\n\
2. {top}: at least {min_tickers} distinct tickers with the heaviest coverage, each as an \
<h3> header followed by at least 2 supporting post excerpts.\n\
3. {minor}: optional; thinly covered tickers worth a single line each. Omit the section \
if nothing qualifies.\n\
4. {themes}: group remaining discussion under exactly these subtopics, skipping any with \
no coverage: {taxonomy}.\n\
\n\
{begin}\n\
{corpus}\n\
{end}\n",
        date = date.format("%Y-%m-%d"),
        version = RULES_VERSION,
        macro_section = SECTION_MACRO,
        top = SECTION_TOP_TICKERS,
        min_tickers = MIN_TOP_TICKERS,
        minor = SECTION_MINOR_TICKERS,
        themes = SECTION_THEMES,
        taxonomy = taxonomy,
        begin = CORPUS_BEGIN,
        corpus = corpus_block.trim_end(),
        end = CORPUS_END,
    )
}
