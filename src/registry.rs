//! Identifier-tracked contact registry.
//!
//! Keeps the live set of pressed fingers, unique by identifier, in contact
//! order. No gesture meaning lives here; handlers always read a consistent
//! set instead of raw, possibly stale event payloads.

use log::debug;
use serde::{Deserialize, Serialize};

/// A single finger's last known location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    pub id: i32,
    pub page_x: f64,
    pub page_y: f64,
}

#[derive(Debug, Default)]
pub struct TouchRegistry {
    contacts: Vec<ContactPoint>,
}

impl TouchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile against the platform's authoritative list on touch start:
    /// unseen ids are appended, known ids get their position replaced.
    pub fn on_contacts_start(&mut self, raw: &[ContactPoint]) {
        for p in raw {
            match self.contacts.iter_mut().find(|c| c.id == p.id) {
                Some(existing) => *existing = *p,
                None => {
                    debug!("contact {} down at ({}, {})", p.id, p.page_x, p.page_y);
                    self.contacts.push(*p);
                }
            }
        }
    }

    /// Replace positions of known ids. Ids we never saw a start for are
    /// stale and ignored.
    pub fn on_contacts_move(&mut self, raw: &[ContactPoint]) {
        for p in raw {
            if let Some(existing) = self.contacts.iter_mut().find(|c| c.id == p.id) {
                *existing = *p;
            }
        }
    }

    /// Reconcile on touch end: retain only ids still present in the
    /// authoritative list, so each lifted id is removed exactly once.
    pub fn on_contacts_end(&mut self, remaining: &[ContactPoint]) {
        self.contacts.retain(|c| {
            let keep = remaining.iter().any(|p| p.id == c.id);
            if !keep {
                debug!("contact {} up", c.id);
            }
            keep
        });
        // positions of survivors may have shifted in the same event
        self.on_contacts_move(remaining);
    }

    /// The live ordered set, insertion order = contact order.
    pub fn current(&self) -> &[ContactPoint] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn first(&self) -> Option<&ContactPoint> {
        self.contacts.first()
    }
}
