// src/extract/prompt.rs

use chrono::NaiveDate;

/// Page text beyond this many characters is cut before it goes into the
/// prompt, keeping the request inside a small model's context window.
pub const MAX_PAGE_CHARS: usize = 12_000;

/// Longest prefix of `text` with at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn build_prompt(text: &str, today: NaiveDate) -> String {
    let content = truncate_chars(text, MAX_PAGE_CHARS);
    let today = today.format("%Y-%m-%d");

    format!(
        r#"You are an expert real estate data extractor. Extract the details of the rental property described in the text below.
The text may come from listing sites such as OLX, Facebook Marketplace or other Brazilian real estate pages.
Return a single JSON object with exactly these keys. If a value is not present in the text, use a sensible default, or null when no default applies.

- "address": full address of the property, as specific as possible.
- "size_sq_m": size in square meters, number only.
- "bedrooms": number of bedrooms, integer only.
- "bathrooms": number of bathrooms, integer only.
- "rent_price": monthly rent in Brazilian reais, number only.
- "notes": any other relevant details about the property.
- "quality": a rating from 1 to 5 inferred from the description; 3 if unclear.
- "visit_date": date of the visit or listing as YYYY-MM-DD; {today} if not stated.

Example output:
{{
    "address": "Rua da Paz, 123, Centro, São Paulo - SP",
    "size_sq_m": 150.0,
    "bedrooms": 3,
    "bathrooms": 2,
    "rent_price": 2500.00,
    "notes": "Apartamento reformado, próximo ao metrô, com varanda gourmet.",
    "quality": 4,
    "visit_date": "{today}"
}}

Text content:
{content}
"#
    )
}
