use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt::Display;

lazy_static! {
    static ref PRICE: Regex = Regex::new(r"\$(\d+(?:\.\d{2})?)(?:\s*-\s*\$(\d+(?:\.\d{2})?))?")
        .expect("Failed to create price regex");
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Price {
    Free,
    Fixed { amount: String },
    Range { min: String, max: String },
    Ticketed,
    #[default]
    Unknown,
}

impl Price {
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();

        if lower.contains("free") {
            return Price::Free;
        }

        if let Some(caps) = PRICE.captures(&lower) {
            return match caps.get(2) {
                Some(max) => Price::Range {
                    min: caps[1].to_string(),
                    max: max.as_str().to_string(),
                },
                None => Price::Fixed {
                    amount: caps[1].to_string(),
                },
            };
        }

        if lower.contains("buy ticket") {
            return Price::Ticketed;
        }

        Price::Unknown
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Free => write!(f, "Free"),
            Price::Fixed { amount } => write!(f, "${}", amount),
            Price::Range { min, max } => write!(f, "${}-${}", min, max),
            Price::Ticketed => write!(f, "Ticketed event"),
            Price::Unknown => write!(f, "See website for details"),
        }
    }
}
