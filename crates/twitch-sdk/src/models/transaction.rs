use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Identified, Identifier, PartialUser, parse_timestamp};
use crate::TwitchError;

closed_set! {
    ProductType {
        BitsInExtension => "BITS_IN_EXTENSION",
    }
}

closed_set! {
    CostType {
        Bits => "bits",
    }
}

/// Transaction object from GET /helix/extensions/transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionPayload {
    pub id: String,
    pub timestamp: String,
    pub broadcaster_id: String,
    pub broadcaster_name: String,
    pub user_id: String,
    pub user_name: String,
    pub product_type: String,
    pub product_data: ProductData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductData {
    pub sku: String,
    pub cost: ProductCost,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "inDevelopment", default)]
    pub in_development: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductCost {
    pub amount: u64,
    #[serde(rename = "type")]
    pub cost_type: String,
}

/// A bits purchase made inside an extension.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: Identifier,
    timestamp: DateTime<Utc>,
    receiver: PartialUser,
    giver: PartialUser,
    product_type: ProductType,
    sku: String,
    cost_amount: u64,
    cost_type: CostType,
    product_name: String,
    product_in_development: bool,
}

impl TryFrom<TransactionPayload> for Transaction {
    type Error = TwitchError;

    fn try_from(data: TransactionPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            product_type: ProductType::parse(&data.product_type)?,
            cost_type: CostType::parse(&data.product_data.cost.cost_type)?,
            id: data.id.into(),
            timestamp: parse_timestamp(Some(&data.timestamp)),
            receiver: PartialUser::new(data.broadcaster_id, data.broadcaster_name),
            giver: PartialUser::new(data.user_id, data.user_name),
            sku: data.product_data.sku,
            cost_amount: data.product_data.cost.amount,
            product_name: data.product_data.display_name,
            product_in_development: data.product_data.in_development,
        })
    }
}

impl Transaction {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The broadcaster who received the bits.
    pub fn receiving_user(&self) -> &PartialUser {
        &self.receiver
    }

    pub fn giving_user(&self) -> &PartialUser {
        &self.giver
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn cost_amount(&self) -> u64 {
        self.cost_amount
    }

    pub fn cost_type(&self) -> CostType {
        self.cost_type
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn product_in_development(&self) -> bool {
        self.product_in_development
    }
}

impl Identified for Transaction {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction {}: {} paid {} {} for {} to {}",
            self.id, self.giver, self.cost_amount, self.cost_type, self.product_name, self.receiver
        )
    }
}

id_equality!(Transaction);
