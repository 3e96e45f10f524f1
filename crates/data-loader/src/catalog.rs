//! The item catalog.
//!
//! Items are kept in load order. That order is part of the contract: it is
//! the tie-break key when two recommendations score the same.

use crate::error::{DataError, Result};
use crate::types::{Item, ItemDefinition, ItemId, normalize_title};
use std::collections::HashMap;
use tracing::debug;

/// Immutable registry of items with title and id indices.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    /// Normalized title -> position in `items`
    by_title: HashMap<String, usize>,
    /// Item id -> position in `items`
    by_id: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and duplicate titles.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut by_title = HashMap::with_capacity(items.len());
        let mut by_id = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            if by_id.insert(item.id, position).is_some() {
                return Err(DataError::DuplicateItem { id: item.id });
            }

            let key = normalize_title(&item.title);
            if key.is_empty() {
                return Err(DataError::InvalidValue {
                    field: "title".to_string(),
                    value: item.title.clone(),
                });
            }
            if let Some(&first) = by_title.get(&key) {
                let first: &Item = &items[first];
                return Err(DataError::DuplicateTitle {
                    title: item.title.clone(),
                    first: first.id,
                    second: item.id,
                });
            }
            by_title.insert(key, position);
        }

        debug!("Catalog built with {} items", items.len());
        Ok(Self {
            items,
            by_title,
            by_id,
        })
    }

    /// Build a catalog straight from raw definitions
    pub fn from_definitions(definitions: Vec<ItemDefinition>) -> Result<Self> {
        Self::new(definitions.into_iter().map(Item::from).collect())
    }

    /// Exact, case- and whitespace-insensitive title lookup.
    ///
    /// No fuzzy matching: anything that doesn't normalize to a known title
    /// is `TitleNotFound`.
    pub fn lookup_by_title(&self, title: &str) -> Result<&Item> {
        self.by_title
            .get(&normalize_title(title))
            .map(|&position| &self.items[position])
            .ok_or_else(|| DataError::TitleNotFound {
                title: title.to_string(),
            })
    }

    /// Get an item by ID
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.by_id.get(&id).map(|&position| &self.items[position])
    }

    /// Load-order position of an item
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All items in load order
    pub fn all(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Substring search over titles, for suggesting alternatives.
    ///
    /// Exact matches come first, then the rest in load order.
    pub fn search(&self, query: &str) -> Vec<&Item> {
        let needle = normalize_title(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(bool, &Item)> = self
            .items
            .iter()
            .filter_map(|item| {
                let key = normalize_title(&item.title);
                key.contains(&needle).then(|| (key != needle, item))
            })
            .collect();

        // Stable sort keeps load order within each group
        matches.sort_by_key(|(partial, _)| *partial);
        matches.into_iter().map(|(_, item)| item).collect()
    }
}
