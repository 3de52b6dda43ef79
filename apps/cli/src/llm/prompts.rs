//! Prompt construction for structured extraction.

/// System prompt instructing the model to emit JSON matching the resume
/// schema. The schema document is embedded verbatim.
pub fn extraction_system_prompt(schema_json: &str) -> String {
    format!(
        "You are a resume parser. Convert the resume the user provides into \
         a single JSON object matching this JSON Schema exactly:\n\n\
         {schema_json}\n\n\
         Rules:\n\
         - Output ONLY the JSON object, with keys matching the schema exactly.\n\
         - Use null for optional scalar fields that are not present.\n\
         - Use [] for list sections that are not present.\n\
         - Copy dates as free text exactly as written (\"Present\" is valid).\n\
         - Do not invent information that is not in the resume."
    )
}
