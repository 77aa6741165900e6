//! Prompt builders. Each takes borrowed inputs and returns one user message.

use analyzer_constant::limits::MAX_PROMPT_EVENTS;
use serde_json::Value;

use crate::types::{
    EconomicData, EconomicIndicator, MarketEvent, PriceData, PriceSnapshot, Reading, display_number,
};

/// Placeholder in [`STRUCTURED_SCHEMA`] replaced with the real event count.
const EVENTS_ANALYZED: &str = "{{EVENTS_ANALYZED}}";

/// Target shape for the structured variant, embedded verbatim in the prompt.
const STRUCTURED_SCHEMA: &str = r#"{
  "marketSentiment": {
    "overall": "Bullish/Bearish/Neutral",
    "score": 7.2, // 0-10 scale
    "indicators": {
      "social": 8.1, // 0-10 based on sentiment
      "technical": 7.5, // 0-10 technical strength
      "fundamental": 6.8, // 0-10 fundamental analysis
      "onchain": 7.9 // 0-10 on-chain metrics
    }
  },
  "predictions": {
    "1d": {
      "trend": "bullish/bearish/neutral",
      "confidence": 78, // 0-100%
      "priceChange": "+3.2%", // expected % change
      "key_factors": ["Factor 1", "Factor 2", "Factor 3"]
    },
    "1w": {
      "trend": "bullish/bearish/neutral",
      "confidence": 65,
      "priceChange": "+8.5%",
      "key_factors": ["Factor 1", "Factor 2", "Factor 3"]
    },
    "1m": {
      "trend": "bullish/bearish/neutral",
      "confidence": 52,
      "priceChange": "+2.1%",
      "key_factors": ["Factor 1", "Factor 2", "Factor 3"]
    },
    "1y": {
      "trend": "bullish/bearish/neutral",
      "confidence": 71,
      "priceChange": "+45.3%",
      "key_factors": ["Factor 1", "Factor 2", "Factor 3"]
    }
  },
  "marketMetrics": {
    "volatility": 24.5, // percentage
    "volume_trend": "+15.2%", // volume change
    "market_cap_rank": 2, // market position
    "fear_greed_index": 67, // 0-100
    "social_sentiment": "Positive/Negative/Neutral",
    "technical_score": 8.2 // 0-10
  },
  "riskFactors": [
    {
      "factor": "Regulatory Risk",
      "severity": "High/Medium/Low",
      "impact": "Detailed impact description"
    }
  ],
  "aiInsights": {
    "keyOpportunities": [
      "Specific opportunity 1",
      "Specific opportunity 2",
      "Specific opportunity 3"
    ],
    "riskWarnings": [
      "Specific risk 1",
      "Specific risk 2",
      "Specific risk 3"
    ],
    "monthlyOutlook": "Detailed paragraph about next month expectations based on all data",
    "aiRecommendation": "Specific actionable recommendation based on analysis"
  },
  "patternAnalysis": {
    "bullishPatterns": {
      "volumeSpikes": 3, // count from events
      "breakoutEvents": 2,
      "positiveNews": 4
    },
    "bearishSignals": {
      "supportBreaks": 1,
      "negativeEvents": 2,
      "sellPressure": 1
    },
    "patternStrength": {
      "bullishMomentum": 75, // 0-100%
      "eventDensity": 2.3 // events per day
    }
  },
  "economicImpact": {
    "fedPolicy": "Hawkish/Dovish/Neutral",
    "inflationPressure": "High/Medium/Low",
    "employmentStrength": "Strong/Moderate/Weak",
    "cryptoCorrelation": {
      "btcVsFedRate": -0.73, // correlation coefficient
      "cryptoVsCPI": -0.45,
      "altVsUnemployment": -0.32
    },
    "nextEventImpact": "Analysis of upcoming economic events impact"
  },
  "performanceSummary": {
    "period": "December 2024",
    "eventsAnalyzed": {{EVENTS_ANALYZED}},
    "avgGain": "+12.3%", // calculated estimate
    "bestDay": "+8.2%", // estimated
    "worstDay": "-4.1%", // estimated
    "volatility": "18.5%", // estimated
    "accuracy": "76%" // model confidence
  }
}"#;

const STRUCTURED_INSTRUCTIONS: &str = "\
ANALYSIS INSTRUCTIONS:
1. Base your analysis on the actual events and economic data provided
2. If limited data, acknowledge this but still provide reasonable estimates
3. Make specific, actionable insights rather than generic statements
4. Consider the correlation between economic indicators and crypto markets
5. Factor in current market conditions and recent trends
6. Provide realistic confidence levels based on data quality
7. Include both bullish and bearish scenarios
8. Make the analysis professional and data-driven
9. Ensure all numerical values are realistic and justified
10. Return ONLY the JSON response, no additional text

Begin analysis:";

const REPORT_REQUIREMENTS: &str = "\
## Required Analysis:
1. Market health assessment with trends
2. Top 3-5 significant events and their impacts
3. Price predictions for 2 weeks and 1 month
4. Economic outlook
5. Investment recommendations (buy/hold/sell)
6. Risk assessment

Format professionally with clear sections. Be data-driven and realistic.";

/// Splits `events` into the prefix that goes into a prompt and the number left out.
fn bounded(events: &[MarketEvent]) -> (&[MarketEvent], usize) {
    let shown = events.len().min(MAX_PROMPT_EVENTS);
    (&events[..shown], events.len() - shown)
}

fn omitted_suffix(omitted: usize) -> String {
    if omitted > 0 {
        format!("\n(Plus {omitted} more)")
    } else {
        String::new()
    }
}

fn price_line(symbol: &str, snap: &PriceSnapshot) -> String {
    format!(
        "- {symbol}: Open ${} | Close ${} | Change {}",
        display_number(snap.open),
        display_number(snap.close),
        snap.change_display()
    )
}

fn indicator_line(label: &str, indicator: Option<&EconomicIndicator>, unit: &str) -> String {
    let value = Reading::display(indicator.and_then(|i| i.value.as_ref()));
    let change = Reading::display(indicator.and_then(|i| i.change.as_ref()));
    format!("- {label}: {value}{unit} (Change: {change})")
}

/// Free-text report prompt (report variant).
pub fn build_report_prompt(events: &[MarketEvent], price_data: &PriceData) -> String {
    let (shown, omitted) = bounded(events);
    let lines = shown
        .iter()
        .map(|e| format!("- [{}] {}", e.date, e.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a senior crypto market analyst. Analyze this data and provide a comprehensive report:

## Market Events ({total}):
{lines}
{suffix}

## Price Data:
{btc}
{eth}

{REPORT_REQUIREMENTS}",
        total = events.len(),
        suffix = omitted_suffix(omitted),
        btc = price_line("BTC", &price_data.btc),
        eth = price_line("ETH", &price_data.eth),
    )
}

/// JSON-schema prompt (structured variant).
pub fn build_structured_prompt(
    events: &[MarketEvent],
    economic_data: Option<&EconomicData>,
    uploaded_files: usize,
) -> String {
    let events_section = if events.is_empty() {
        "No events provided".to_string()
    } else {
        let (shown, omitted) = bounded(events);
        let mut section = shown
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. [{}] {}", i + 1, e.date, e.text))
            .collect::<Vec<_>>()
            .join("\n");
        section.push_str(&omitted_suffix(omitted));
        section
    };

    let economic = [
        ("Unemployment Rate", economic_data.and_then(|d| d.unemployment.as_ref()), "%"),
        ("Fed Interest Rate", economic_data.and_then(|d| d.fed_rate.as_ref()), "%"),
        ("Non-Farm Payrolls", economic_data.and_then(|d| d.nfp.as_ref()), ""),
        ("CPI Inflation", economic_data.and_then(|d| d.cpi.as_ref()), "%"),
    ]
    .into_iter()
    .map(|(label, indicator, unit)| indicator_line(label, indicator, unit))
    .collect::<Vec<_>>()
    .join("\n");

    let schema = STRUCTURED_SCHEMA.replace(EVENTS_ANALYZED, &events.len().to_string());

    format!(
        "
You are an advanced AI crypto market analyst. Analyze the provided data and return a structured JSON response with comprehensive market insights.

MARKET EVENTS DATA:
{events_section}

ECONOMIC DATA:
{economic}

UPLOADED FILES: {uploaded_files} files uploaded for analysis

ANALYSIS REQUIREMENTS:
Provide a comprehensive JSON response with the following structure. Be specific and data-driven in your analysis:

{schema}

{STRUCTURED_INSTRUCTIONS}"
    )
}

/// Economic-indicator prompt for `POST /analyze-economic`. The caller's JSON
/// is embedded as sent; the reply is schema-hinted but returned unparsed.
pub fn build_economic_prompt(economic_data: &Value) -> String {
    let data = serde_json::to_string_pretty(economic_data).unwrap_or_else(|_| economic_data.to_string());
    format!(
        "Analyze the following economic indicators and their impact on cryptocurrency markets:\n\n\
{data}\n\n\
Return JSON with {{ \"economicAssessment\": \"...\", \"cryptoImpact\": \"...\", \"recommendation\": \"...\", \"riskLevel\": \"...\" }}"
    )
}
