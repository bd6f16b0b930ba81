use crate::foundation::core::{Slot, SlotKey, View};
use crate::foundation::error::{DressError, DressResult};

/// Back-to-front draw order over semantic slots.
///
/// Slots absent from the order are never drawn, whatever garments the request carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerOrder {
    slots: Vec<Slot>,
}

impl Default for LayerOrder {
    fn default() -> Self {
        Self::standard()
    }
}

impl LayerOrder {
    /// `shoes, bottom, top, outer, bag, necklace, bracelet, ring, earring, hat`.
    pub fn standard() -> Self {
        Self {
            slots: Slot::ALL.to_vec(),
        }
    }

    /// Build a custom order. Each slot may appear at most once.
    pub fn from_slots(slots: impl IntoIterator<Item = Slot>) -> DressResult<Self> {
        let slots: Vec<Slot> = slots.into_iter().collect();
        for (i, s) in slots.iter().enumerate() {
            if slots[..i].contains(s) {
                return Err(DressError::validation(format!(
                    "layer order lists slot '{s}' more than once"
                )));
            }
        }
        Ok(Self { slots })
    }

    /// Slots in draw order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Whether `slot` is drawn at all under this order.
    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }
}

/// Slot keys to attempt, in draw order.
///
/// A pure filter over `order`: a slot is kept only when a garment exists for its exact
/// `<slot>_<view>` key. Input ordering of `available` never matters.
pub fn build_plan<'a, I>(view: View, order: &LayerOrder, available: I) -> Vec<SlotKey>
where
    I: IntoIterator<Item = &'a str>,
{
    let available: Vec<&str> = available.into_iter().collect();
    order
        .slots()
        .iter()
        .map(|slot| slot.key(view))
        .filter(|key| {
            let wire = key.as_key();
            available.iter().any(|k| *k == wire)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/plan/layers.rs"]
mod tests;
