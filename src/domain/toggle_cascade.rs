//! Bulk and per-row layer flag toggles.
//!
//! Flags are written straight into the host's layer tree. Each operation
//! reports whether the row list has to be regenerated afterwards, since
//! group visibility and collapse state decide which rows exist.

use std::collections::HashMap;

use crate::traits::{LayerFlag, LayerId, LayerKind, LayerTree};

/// What a toggle did to the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub changed: bool,
    pub regenerate_rows: bool,
}

impl std::ops::BitOrAssign for ToggleOutcome {
    fn bitor_assign(&mut self, rhs: Self) {
        self.changed |= rhs.changed;
        self.regenerate_rows |= rhs.regenerate_rows;
    }
}

/// Result of a solo-visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solo {
    /// Every row was hidden after recording its visibility.
    Hidden,
    /// Rows recorded as visible were shown again, all others hidden.
    Restored,
}

/// Flag toggling logic plus the visibility snapshot used by solo toggles.
#[derive(Debug, Clone, Default)]
pub struct ToggleCascade {
    /// Visibility of each row before the last solo-hide
    was_visible: HashMap<LayerId, bool>,
}

impl ToggleCascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a solo-hide is waiting to be restored.
    pub fn has_solo_snapshot(&self) -> bool {
        self.was_visible.values().any(|&v| v)
    }

    /// Visibility recorded for `layer` by the last solo-hide.
    pub fn was_visible(&self, layer: LayerId) -> Option<bool> {
        self.was_visible.get(&layer).copied()
    }

    /// Header eye/padlock: sets `flag` on every top-level layer to the
    /// opposite of "all top-level layers have it".
    pub fn toggle_top_level(doc: &mut dyn LayerTree, flag: LayerFlag) -> ToggleOutcome {
        let layers = doc.top_level_layers();
        let new_state = !layers.iter().all(|&l| doc.flag(l, flag));
        let mut outcome = ToggleOutcome::default();
        for layer in layers {
            if doc.flag(layer, flag) != new_state {
                doc.set_flag(layer, flag, new_state);
                outcome.changed = true;
                if doc.layer_kind(layer) == Some(LayerKind::Group) {
                    outcome.regenerate_rows = true;
                }
            }
        }
        tracing::debug!(?flag, new_state, "toggled top-level layers");
        outcome
    }

    /// Header continuous icon: same as [`Self::toggle_top_level`] but over
    /// every row.
    pub fn toggle_rows(doc: &mut dyn LayerTree, rows: &[LayerId], flag: LayerFlag) -> ToggleOutcome {
        let new_state = !rows.iter().all(|&l| doc.flag(l, flag));
        let mut outcome = ToggleOutcome::default();
        for &layer in rows {
            if doc.flag(layer, flag) != new_state {
                doc.set_flag(layer, flag, new_state);
                outcome.changed = true;
            }
        }
        outcome
    }

    /// Sets one layer's flag, as done while painting across row icons.
    pub fn set_row_flag(
        doc: &mut dyn LayerTree,
        layer: LayerId,
        flag: LayerFlag,
        value: bool,
    ) -> ToggleOutcome {
        if doc.flag(layer, flag) == value {
            return ToggleOutcome::default();
        }
        doc.set_flag(layer, flag, value);

        let expanded_group = doc.layer_kind(layer) == Some(LayerKind::Group)
            && !doc.flag(layer, LayerFlag::Collapsed);
        let regenerate_rows = match flag {
            LayerFlag::Visible | LayerFlag::Editable => expanded_group,
            LayerFlag::Collapsed => true,
            LayerFlag::Continuous => false,
        };
        ToggleOutcome {
            changed: true,
            regenerate_rows,
        }
    }

    /// Alt-click on a row eye.
    ///
    /// Without a pending snapshot, records every row's visibility and hides
    /// them all. With one, shows exactly the rows recorded as visible, hides
    /// the rest and drops the snapshot.
    pub fn solo(&mut self, doc: &mut dyn LayerTree, rows: &[LayerId]) -> Solo {
        if self.has_solo_snapshot() {
            for &layer in rows {
                let show = self.was_visible.get(&layer).copied().unwrap_or(false);
                doc.set_flag(layer, LayerFlag::Visible, show);
            }
            self.was_visible.clear();
            tracing::debug!(rows = rows.len(), "restored visibility after solo");
            Solo::Restored
        } else {
            self.was_visible = rows
                .iter()
                .map(|&layer| (layer, doc.flag(layer, LayerFlag::Visible)))
                .collect();
            for &layer in rows {
                doc.set_flag(layer, LayerFlag::Visible, false);
            }
            tracing::debug!(rows = rows.len(), "hid all rows for solo");
            Solo::Hidden
        }
    }
}
