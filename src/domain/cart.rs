use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::MenuItem;

/// One menu item in a cart, priced at the moment it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(default)]
    pub name: String,
    #[serde(alias = "qty")]
    pub quantity: u32,
    #[serde(alias = "unit_price")]
    pub price: f64,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Items keyed by menu item id.
///
/// A line exists only while its quantity is at least one; decrementing the
/// last unit removes the line.
///
/// Always written as a map. Reading also accepts a list of line items that
/// carry their own id, and drops lines stored at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<String, CartLine>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCart {
    Keyed(BTreeMap<String, CartLine>),
    Listed(Vec<ListedLine>),
}

#[derive(Deserialize)]
struct ListedLine {
    #[serde(default, alias = "item_id")]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(alias = "qty")]
    quantity: u32,
    #[serde(alias = "unit_price")]
    price: f64,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut lines = match RawCart::deserialize(deserializer)? {
            RawCart::Keyed(keyed) => keyed,
            RawCart::Listed(listed) => {
                let mut lines = BTreeMap::new();
                for ListedLine {
                    id,
                    name,
                    quantity,
                    price,
                } in listed
                {
                    let id = match id {
                        Some(id) => id,
                        None if !name.is_empty() => name.clone(),
                        None => return Err(D::Error::custom("cart line without id or name")),
                    };
                    lines
                        .entry(id)
                        .and_modify(|line: &mut CartLine| {
                            line.quantity = line.quantity.saturating_add(quantity)
                        })
                        .or_insert(CartLine {
                            name,
                            quantity,
                            price,
                        });
                }
                lines
            }
        };
        lines.retain(|_, line| line.quantity > 0);
        Ok(Self { lines })
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit and returns the new quantity.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        let line = self
            .lines
            .entry(item.id.clone())
            .or_insert_with(|| CartLine {
                name: item.name.clone(),
                quantity: 0,
                price: item.price,
            });
        line.quantity = line.quantity.saturating_add(1);
        line.quantity
    }

    /// Removes one unit. Returns the remaining quantity, or `None` when the
    /// item was not in the cart.
    pub fn remove(&mut self, item_id: &str) -> Option<u32> {
        let line = self.lines.get_mut(item_id)?;
        line.quantity = line.quantity.saturating_sub(1);
        let remaining = line.quantity;
        if remaining == 0 {
            self.lines.remove(item_id);
        }
        Some(remaining)
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.lines.get(item_id).map_or(0, |line| line.quantity)
    }

    pub fn lines(&self) -> impl Iterator<Item = (&str, &CartLine)> {
        self.lines.iter().map(|(id, line)| (id.as_str(), line))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.lines.values().map(CartLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
