use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Hotel record as served by the catalog API. Upstream data is loosely
/// shaped: ids arrive as strings or numbers, ratings as bare scores or
/// structured objects, prices as a flat amount or a tier list. The wire
/// shapes are absorbed here, once, and the rest of the engine only sees
/// the normalizing accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Option<Images>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub pricing: Vec<PriceTier>,
}

impl Hotel {
    /// Resolves the applicable nightly rate: the first pricing tier's
    /// discounted price, else its original price, else the flat `price`
    /// field. `None` means the record carries no usable rate at all.
    pub fn nightly_rate(&self) -> Option<NightlyRate> {
        if let Some(tier) = self.pricing.first() {
            return Some(NightlyRate {
                amount: tier.effective_price(),
                currency: tier.currency.clone(),
            });
        }

        self.price.map(|amount| NightlyRate {
            amount,
            currency: None,
        })
    }

    pub fn rating_view(&self) -> RatingView {
        self.rating
            .as_ref()
            .map(Rating::normalized)
            .unwrap_or_default()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.main.as_deref())
            .or(self.image.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_iso_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub main: Option<String>,
}

/// Rating as it appears on the wire: a bare 0-5 score, or an object
/// carrying its own scale (`score`/`value` plus `maxScore`/`max`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Score(f32),
    Detailed {
        #[serde(default, alias = "value")]
        score: f32,
        #[serde(rename = "maxScore", alias = "max", default = "default_max_score")]
        max_score: f32,
    },
}

fn default_max_score() -> f32 {
    5.0
}

impl Rating {
    pub fn normalized(&self) -> RatingView {
        match *self {
            Rating::Score(value) => RatingView { value, max: 5.0 },
            Rating::Detailed { score, max_score } => RatingView {
                value: score,
                max: max_score,
            },
        }
    }
}

/// Rating reduced to a single `{ value, max }` pair for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingView {
    pub value: f32,
    pub max: f32,
}

impl Default for RatingView {
    fn default() -> Self {
        Self {
            value: 0.0,
            max: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub original_price: Decimal,
    #[serde(default)]
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub price_unit: Option<String>,
}

impl PriceTier {
    pub fn effective_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.original_price)
    }
}

/// Resolved nightly rate, ready for the pricing calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct NightlyRate {
    pub amount: Decimal,
    pub currency: Option<String>,
}

/// Entry of the `best_offer` feed. Fields are sparse upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOffer {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
