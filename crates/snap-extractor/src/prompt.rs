//! Prompt for receipt extraction

use snap_domain::Category;

/// Builds the instruction text sent alongside the receipt image
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    hint: Option<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free-text hint, e.g. the expected currency
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into()).filter(|h: &String| !h.trim().is_empty());
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let categories = Category::KNOWN
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let mut prompt = String::new();
        prompt.push_str("Analyze this receipt image and extract the following information:\n");
        prompt.push_str("1. Total Price (as a number)\n");
        prompt.push_str("2. Currency (e.g. USD, EUR, etc.)\n");
        prompt.push_str(&format!("3. Expense Category (e.g. {})\n", categories));
        prompt.push_str("4. Vendor Name (the business name)\n");
        prompt.push_str(
            "5. Billing Date (the date of the transaction in YYYY-MM-DD format if visible on the receipt)\n\n",
        );

        if let Some(hint) = &self.hint {
            prompt.push_str(&format!("Additional context: {}\n\n", hint.trim()));
        }

        prompt.push_str(OUTPUT_FORMAT);
        prompt
    }
}

const OUTPUT_FORMAT: &str = r#"Return the result as a JSON object with the following format:
{
  "total": <number>,
  "currency": "<currency code>",
  "category": "<category>",
  "vendor": "<vendor name>",
  "billingDate": "<date in YYYY-MM-DD format or null if not available>"
}

Only return the JSON object, nothing else."#;
