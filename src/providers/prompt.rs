/// System prompt for the description call.
///
/// Instructs the model to produce short, objective captions of Andean
/// cultural and ritual scenes without embellishment. Loaded from
/// `describe_prompt.txt` at compile time using the `include_str!` macro,
/// making it easy to edit without dealing with Rust string syntax.
pub const DESCRIBE_SYSTEM_PROMPT: &str = include_str!("describe_prompt.txt");

/// System prompt for the keyword call.
///
/// Asks for concise lowercase culturally-relevant terms as a JSON array of
/// strings. The reply is still decoded defensively (see
/// [`crate::keywords`]) because the endpoint is not contractually bound to
/// honor the format.
pub const KEYWORDS_SYSTEM_PROMPT: &str = include_str!("keywords_prompt.txt");
