// Shared prompt fragments. Step-specific prompts live in generation/prompts.rs.

/// Appended to prompts whose answer is parsed as a JSON object.
pub const JSON_OBJECT_ONLY: &str = "Return ONLY valid JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Appended to prompts whose answer is parsed as a JSON array of strings.
pub const JSON_LIST_ONLY: &str = "Return ONLY a JSON array of strings. \
    Do NOT include any text outside the array.";

/// Guards against invented experience in rewrites.
pub const NO_FABRICATION: &str = "Do NOT invent employers, titles, dates, degrees or \
    metrics that are not present in the source resume.";
