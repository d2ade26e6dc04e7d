//! The comparison prompt

use crate::AIError;
use minijinja::{Environment, context};
use stockclash_market::StockSummary;

/// Literal sentence the model is told to finish with
pub const WINNER_LINE: &str = "Winner for Long-Term Hold:";

const TEMPLATE_NAME: &str = "stock.user.compare_rivals";

const TEMPLATE: &str = r#"Act as a Senior Financial Analyst. Compare these two companies based on the data provided:

Company A: {{ a.name }}
- P/E Ratio: {{ a.pe_ratio }}
- Revenue Growth: {{ a.revenue_growth }}
- Market Cap: {{ a.market_cap }}

Company B: {{ b.name }}
- P/E Ratio: {{ b.pe_ratio }}
- Revenue Growth: {{ b.revenue_growth }}
- Market Cap: {{ b.market_cap }}

Compare them on Valuation and Growth Prospects.
Be concise. Use bullet points.
Conclude with: "{{ winner_line }} [Company Name]" and explain why."#;

/// Renders the fixed two-company prompt
pub struct RivalryPrompt {
    env: Environment<'static>,
}

impl RivalryPrompt {
    /// Compile the template
    pub fn new() -> Result<Self, AIError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| AIError::Prompt(e.to_string()))?;
        Ok(Self { env })
    }

    /// Render the prompt for two summaries.
    ///
    /// Figures are embedded exactly as [`std::fmt::Display`] prints them.
    pub fn render(&self, a: &StockSummary, b: &StockSummary) -> Result<String, AIError> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| AIError::Prompt(e.to_string()))?;

        template
            .render(context! {
                a => figures(a),
                b => figures(b),
                winner_line => WINNER_LINE,
            })
            .map_err(|e| AIError::Prompt(e.to_string()))
    }
}

impl std::fmt::Debug for RivalryPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RivalryPrompt")
            .field("template", &TEMPLATE_NAME)
            .finish()
    }
}

fn figures(summary: &StockSummary) -> minijinja::Value {
    context! {
        name => summary.name.as_str(),
        pe_ratio => summary.pe_ratio.to_string(),
        revenue_growth => summary.revenue_growth.to_string(),
        market_cap => summary.market_cap.to_string(),
    }
}
