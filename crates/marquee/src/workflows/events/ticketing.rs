use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TICKET_LABEL: &str = "General";

/// One admission tier as stored on a published event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketTier {
    pub label: String,
    pub price: f64,
    pub currency: String,
}

/// Normalize organizer-supplied ticketing into a non-empty tier list.
///
/// Two wire shapes exist: the legacy object with fixed `general`, `vip`,
/// and `earlyBird` keys, and the current array of labelled tiers. Anything
/// else, and any shape that yields no valid tiers, falls back to a single
/// free general-admission tier so downstream rendering never sees an empty
/// list.
pub fn normalize_ticketing(raw: &Value, default_currency: &str) -> Vec<TicketTier> {
    let tiers = match raw {
        Value::Array(entries) => array_tiers(entries, default_currency),
        Value::Object(fields) => legacy_tiers(fields, default_currency),
        _ => Vec::new(),
    };

    if tiers.is_empty() {
        return vec![fallback_tier(default_currency)];
    }
    tiers
}

fn fallback_tier(default_currency: &str) -> TicketTier {
    TicketTier {
        label: DEFAULT_TICKET_LABEL.to_owned(),
        price: 0.0,
        currency: default_currency.to_owned(),
    }
}

fn array_tiers(entries: &[Value], default_currency: &str) -> Vec<TicketTier> {
    entries
        .iter()
        .filter_map(|entry| {
            let fields = entry.as_object()?;
            let label = fields.get("label")?.as_str()?.trim();
            if label.is_empty() {
                return None;
            }
            let price = ticket_price(fields.get("price")?)?;
            let currency = fields
                .get("currency")
                .and_then(Value::as_str)
                .and_then(sanitize_currency)
                .unwrap_or_else(|| default_currency.to_owned());

            Some(TicketTier {
                label: label.to_owned(),
                price,
                currency,
            })
        })
        .collect()
}

fn legacy_tiers(
    fields: &serde_json::Map<String, Value>,
    default_currency: &str,
) -> Vec<TicketTier> {
    let mut tiers = Vec::new();

    // Key presence decides inclusion; a price of zero is a real free tier.
    if let Some(price) = fields.get("general").and_then(ticket_price) {
        tiers.push(TicketTier {
            label: "General".to_owned(),
            price,
            currency: default_currency.to_owned(),
        });
    }
    if let Some(price) = fields.get("vip").and_then(ticket_price) {
        tiers.push(TicketTier {
            label: "VIP".to_owned(),
            price,
            currency: default_currency.to_owned(),
        });
    }
    let early_bird = fields
        .get("earlyBird")
        .and_then(Value::as_object)
        .and_then(|nested| nested.get("price"))
        .and_then(ticket_price);
    if let Some(price) = early_bird {
        tiers.push(TicketTier {
            label: "Early Bird".to_owned(),
            price,
            currency: default_currency.to_owned(),
        });
    }

    tiers
}

/// A usable ticket price: finite, non-negative, numeric.
fn ticket_price(value: &Value) -> Option<f64> {
    let price = value.as_f64()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Uppercase three-letter currency codes only; everything else is discarded.
pub(crate) fn sanitize_currency(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() == 3 && trimmed.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        return Some(trimmed.to_ascii_uppercase());
    }
    None
}
