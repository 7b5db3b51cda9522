//! Dashboard composition model.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API layer and any future CLI tooling.
//!
//! A [`DashboardState`] is the single source of truth for one editing
//! session: an ordered set of [`Widget`]s plus one [`Layout`] holding a
//! grid rectangle per widget per responsive breakpoint. All mutation goes
//! through the methods here, which maintain two structural invariants:
//!
//! - every breakpoint's entry-id set equals the widget-id set (no orphan
//!   entries, no missing entries);
//! - every entry's width fits the breakpoint's column count.
//!
//! The rendering surface replaces layouts wholesale after a drag/resize via
//! [`DashboardState::on_layout_change`]; breakpoints are independently
//! mutable after that point. No cross-breakpoint propagation is re-derived.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;
use crate::visualization::{ChartKind, VisualizationConfig};

// ---------------------------------------------------------------------------
// Breakpoints
// ---------------------------------------------------------------------------

/// A responsive viewport tier with its own column count and widget layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
    Xxs,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// Minimum viewport width (pixels) at which this tier activates.
    pub fn min_width_px(self) -> u32 {
        match self {
            Breakpoint::Lg => 1200,
            Breakpoint::Md => 996,
            Breakpoint::Sm => 768,
            Breakpoint::Xs => 480,
            Breakpoint::Xxs => 0,
        }
    }

    /// Number of grid columns available at this tier.
    pub fn columns(self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md => 10,
            Breakpoint::Sm => 6,
            Breakpoint::Xs => 4,
            Breakpoint::Xxs => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid defaults
// ---------------------------------------------------------------------------

/// Default column span for a newly added widget.
pub const DEFAULT_WIDGET_W: u32 = 4;

/// Default row span for a newly added widget.
pub const DEFAULT_WIDGET_H: u32 = 4;

/// Grid row height in pixels, used by rendering clients.
pub const GRID_ROW_HEIGHT_PX: u32 = 60;

/// Grid cell margin in pixels, used by rendering clients.
pub const GRID_MARGIN_PX: u32 = 10;

// ---------------------------------------------------------------------------
// Widgets and layout entries
// ---------------------------------------------------------------------------

/// A positioned, typed dashboard unit, optionally bound to a saved query.
///
/// Widgets are exclusively owned by one [`DashboardState`]; deleting the
/// dashboard deletes its widgets. `bound_query_ref` is a weak reference --
/// the referenced query may have been deleted, in which case the widget
/// renders as "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Unique identifier, assigned at creation, immutable.
    pub id: String,
    /// Default rendering kind, independent from any `visual_config` override.
    pub kind: ChartKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_query_ref: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_config: Option<VisualizationConfig>,
}

/// One widget's grid rectangle at a single breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub widget_id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Per-breakpoint layout entry lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub lg: Vec<LayoutEntry>,
    #[serde(default)]
    pub md: Vec<LayoutEntry>,
    #[serde(default)]
    pub sm: Vec<LayoutEntry>,
    #[serde(default)]
    pub xs: Vec<LayoutEntry>,
    #[serde(default)]
    pub xxs: Vec<LayoutEntry>,
}

impl Layout {
    /// Entries for a single breakpoint.
    pub fn entries(&self, bp: Breakpoint) -> &[LayoutEntry] {
        match bp {
            Breakpoint::Lg => &self.lg,
            Breakpoint::Md => &self.md,
            Breakpoint::Sm => &self.sm,
            Breakpoint::Xs => &self.xs,
            Breakpoint::Xxs => &self.xxs,
        }
    }

    fn entries_mut(&mut self, bp: Breakpoint) -> &mut Vec<LayoutEntry> {
        match bp {
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Xs => &mut self.xs,
            Breakpoint::Xxs => &mut self.xxs,
        }
    }
}

/// The first grid row with nothing at or below it.
///
/// Placing a new entry at `(0, next_free_row(entries))` can never overlap
/// an existing entry, regardless of how earlier entries were dragged.
pub fn next_free_row(entries: &[LayoutEntry]) -> u32 {
    entries.iter().map(|e| e.y + e.h).max().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Widget updates
// ---------------------------------------------------------------------------

/// Partial widget update.
///
/// The outer `Option` means "field provided"; for clearable fields the inner
/// `Option` carries the new value (`Some(None)` clears).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWidget {
    pub title: Option<String>,
    pub bound_query_ref: Option<Option<DbId>>,
    pub visual_config: Option<Option<VisualizationConfig>>,
}

// ---------------------------------------------------------------------------
// DashboardState
// ---------------------------------------------------------------------------

/// The aggregate of one dashboard's widgets and per-breakpoint layouts.
///
/// Created empty in a builder session, mutated by widget and layout
/// operations, persisted as a single row (all-or-nothing) and exportable as
/// a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub widgets: Vec<Widget>,
    #[serde(default)]
    pub layouts: Layout,
}

impl DashboardState {
    /// An empty dashboard with no widgets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a widget by id.
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Add a widget of the given kind and return its id.
    ///
    /// The widget gets a fresh unique id, the default `"New {kind} widget"`
    /// title, and no bound query. One layout entry is appended per
    /// breakpoint at the next free row, with the default span clamped to
    /// the breakpoint's column count. Always succeeds.
    pub fn add_widget(&mut self, kind: ChartKind) -> String {
        let id = format!("widget-{}", Uuid::new_v4());
        let widget = Widget {
            id: id.clone(),
            kind,
            title: format!("New {kind} widget"),
            bound_query_ref: None,
            visual_config: None,
        };

        for bp in Breakpoint::ALL {
            let entries = self.layouts.entries_mut(bp);
            let y = next_free_row(entries);
            entries.push(LayoutEntry {
                widget_id: id.clone(),
                x: 0,
                y,
                w: DEFAULT_WIDGET_W.min(bp.columns()),
                h: DEFAULT_WIDGET_H,
            });
        }

        self.widgets.push(widget);
        id
    }

    /// Merge the provided fields into the widget matching `id`.
    ///
    /// Silent no-op when the id does not exist. Changing `bound_query_ref`
    /// without supplying a new `visual_config` clears the stored config: a
    /// config's axis names were derived from the previously bound query's
    /// result columns and must not outlive the binding.
    pub fn update_widget(&mut self, id: &str, update: UpdateWidget) {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            return;
        };

        if let Some(title) = update.title {
            widget.title = title;
        }
        if let Some(query_ref) = update.bound_query_ref {
            widget.bound_query_ref = query_ref;
            widget.visual_config = None;
        }
        if let Some(config) = update.visual_config {
            widget.visual_config = config;
        }
    }

    /// Bind a saved query to a widget, invalidating any prior visual config.
    pub fn bind_query(&mut self, id: &str, query_id: DbId) {
        self.update_widget(
            id,
            UpdateWidget {
                bound_query_ref: Some(Some(query_id)),
                ..Default::default()
            },
        );
    }

    /// Clear a widget's query binding and visual config atomically.
    pub fn clear_query(&mut self, id: &str) {
        self.update_widget(
            id,
            UpdateWidget {
                bound_query_ref: Some(None),
                ..Default::default()
            },
        );
    }

    /// Remove a widget and its layout entries from every breakpoint.
    ///
    /// Silent no-op when the id does not exist. Remaining entries keep
    /// their positions; nothing is renumbered or re-packed.
    pub fn remove_widget(&mut self, id: &str) {
        self.widgets.retain(|w| w.id != id);
        for bp in Breakpoint::ALL {
            self.layouts.entries_mut(bp).retain(|e| e.widget_id != id);
        }
    }

    /// Replace the stored layouts wholesale.
    ///
    /// Called with the value reported by the grid-rendering surface after a
    /// user drag/resize. The surface is the constraint authority at
    /// interaction time, so no validation happens here.
    pub fn on_layout_change(&mut self, layouts: Layout) {
        self.layouts = layouts;
    }

    /// Check the preconditions for persisting this dashboard.
    pub fn validate_for_save(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Dashboard name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn id_set(entries: &[LayoutEntry]) -> std::collections::BTreeSet<&str> {
        entries.iter().map(|e| e.widget_id.as_str()).collect()
    }

    fn assert_consistent(state: &DashboardState) {
        let widget_ids: std::collections::BTreeSet<&str> =
            state.widgets.iter().map(|w| w.id.as_str()).collect();
        for bp in Breakpoint::ALL {
            assert_eq!(
                id_set(state.layouts.entries(bp)),
                widget_ids,
                "entry ids at {bp:?} must match widget ids"
            );
        }
    }

    // -- Add / remove consistency -------------------------------------------

    #[test]
    fn add_creates_entry_at_every_breakpoint() {
        let mut state = DashboardState::new();
        state.add_widget(ChartKind::Bar);
        state.add_widget(ChartKind::Line);
        assert_eq!(state.widgets.len(), 2);
        assert_consistent(&state);
    }

    #[test]
    fn remove_deletes_entries_at_every_breakpoint() {
        let mut state = DashboardState::new();
        let a = state.add_widget(ChartKind::Bar);
        let b = state.add_widget(ChartKind::Pie);
        state.remove_widget(&a);
        assert_eq!(state.widgets.len(), 1);
        assert_eq!(state.widgets[0].id, b);
        assert_consistent(&state);
    }

    #[test]
    fn interleaved_adds_and_removes_stay_consistent() {
        let mut state = DashboardState::new();
        let a = state.add_widget(ChartKind::Bar);
        let _b = state.add_widget(ChartKind::Table);
        state.remove_widget(&a);
        let _c = state.add_widget(ChartKind::Area);
        state.remove_widget("widget-does-not-exist");
        assert_eq!(state.widgets.len(), 2);
        assert_consistent(&state);
    }

    #[test]
    fn remove_of_unknown_id_is_a_silent_no_op() {
        let mut state = DashboardState::new();
        state.add_widget(ChartKind::Bar);
        state.remove_widget("nope");
        assert_eq!(state.widgets.len(), 1);
        assert_consistent(&state);
    }

    // -- Placement and clamping ---------------------------------------------

    #[test]
    fn widths_are_clamped_to_breakpoint_columns() {
        let mut state = DashboardState::new();
        state.add_widget(ChartKind::Bar);
        for bp in Breakpoint::ALL {
            for entry in state.layouts.entries(bp) {
                assert!(
                    entry.w <= bp.columns(),
                    "w={} exceeds {} columns at {bp:?}",
                    entry.w,
                    bp.columns()
                );
            }
        }
        // xxs has 2 columns, narrower than the default span.
        assert_eq!(state.layouts.xxs[0].w, 2);
        assert_eq!(state.layouts.lg[0].w, DEFAULT_WIDGET_W);
    }

    #[test]
    fn new_widgets_never_overlap_existing_entries() {
        let mut state = DashboardState::new();
        state.add_widget(ChartKind::Bar);
        state.add_widget(ChartKind::Line);
        state.add_widget(ChartKind::Pie);

        for bp in Breakpoint::ALL {
            let entries = state.layouts.entries(bp);
            for (i, a) in entries.iter().enumerate() {
                for b in &entries[i + 1..] {
                    let disjoint = a.x + a.w <= b.x
                        || b.x + b.w <= a.x
                        || a.y + a.h <= b.y
                        || b.y + b.h <= a.y;
                    assert!(disjoint, "{a:?} overlaps {b:?} at {bp:?}");
                }
            }
        }
    }

    #[test]
    fn placement_appends_below_dragged_entries() {
        let mut state = DashboardState::new();
        let a = state.add_widget(ChartKind::Bar);

        // Simulate a drag that moved the widget down at lg only.
        let mut layouts = state.layouts.clone();
        layouts.lg[0].y = 10;
        state.on_layout_change(layouts);

        state.add_widget(ChartKind::Line);
        let lg = &state.layouts.lg;
        assert_eq!(lg[0].widget_id, a);
        assert_eq!(lg[1].y, 10 + DEFAULT_WIDGET_H);
    }

    #[test]
    fn next_free_row_of_empty_list_is_zero() {
        assert_eq!(next_free_row(&[]), 0);
    }

    // -- Widget defaults and updates ----------------------------------------

    #[test]
    fn new_widget_has_default_title_and_no_binding() {
        let mut state = DashboardState::new();
        let id = state.add_widget(ChartKind::Pie);
        let widget = state.widget(&id).unwrap();
        assert_eq!(widget.title, "New pie widget");
        assert_eq!(widget.kind, ChartKind::Pie);
        assert!(widget.bound_query_ref.is_none());
        assert!(widget.visual_config.is_none());
    }

    #[test]
    fn widget_ids_are_unique() {
        let mut state = DashboardState::new();
        let a = state.add_widget(ChartKind::Bar);
        let b = state.add_widget(ChartKind::Bar);
        assert_ne!(a, b);
    }

    #[test]
    fn update_merges_title_only() {
        let mut state = DashboardState::new();
        let id = state.add_widget(ChartKind::Bar);
        state.bind_query(&id, 7);
        state.update_widget(
            &id,
            UpdateWidget {
                title: Some("TVL by day".into()),
                ..Default::default()
            },
        );
        let widget = state.widget(&id).unwrap();
        assert_eq!(widget.title, "TVL by day");
        assert_eq!(widget.bound_query_ref, Some(7));
    }

    #[test]
    fn update_of_unknown_id_is_a_silent_no_op() {
        let mut state = DashboardState::new();
        state.update_widget(
            "nope",
            UpdateWidget {
                title: Some("ignored".into()),
                ..Default::default()
            },
        );
        assert!(state.widgets.is_empty());
    }

    // -- Query binding lifecycle --------------------------------------------

    #[test]
    fn rebinding_clears_stale_visual_config() {
        let mut state = DashboardState::new();
        let id = state.add_widget(ChartKind::Bar);
        state.bind_query(&id, 1);
        state.update_widget(
            &id,
            UpdateWidget {
                visual_config: Some(Some(VisualizationConfig::new(ChartKind::Bar))),
                ..Default::default()
            },
        );
        assert!(state.widget(&id).unwrap().visual_config.is_some());

        state.bind_query(&id, 2);
        let widget = state.widget(&id).unwrap();
        assert_eq!(widget.bound_query_ref, Some(2));
        assert!(
            widget.visual_config.is_none(),
            "config derived from the old query must not survive rebinding"
        );
    }

    #[test]
    fn clearing_the_binding_clears_both_fields() {
        let mut state = DashboardState::new();
        let id = state.add_widget(ChartKind::Bar);
        state.bind_query(&id, 1);
        state.clear_query(&id);
        let widget = state.widget(&id).unwrap();
        assert!(widget.bound_query_ref.is_none());
        assert!(widget.visual_config.is_none());
    }

    #[test]
    fn update_can_set_binding_and_config_together() {
        let mut state = DashboardState::new();
        let id = state.add_widget(ChartKind::Bar);
        state.update_widget(
            &id,
            UpdateWidget {
                bound_query_ref: Some(Some(3)),
                visual_config: Some(Some(VisualizationConfig::new(ChartKind::Line))),
                ..Default::default()
            },
        );
        let widget = state.widget(&id).unwrap();
        assert_eq!(widget.bound_query_ref, Some(3));
        assert!(widget.visual_config.is_some());
    }

    // -- Layout change events -----------------------------------------------

    #[test]
    fn layout_change_replaces_wholesale_and_breakpoints_stay_independent() {
        let mut state = DashboardState::new();
        state.add_widget(ChartKind::Bar);
        let md_before = state.layouts.md.clone();

        let mut layouts = state.layouts.clone();
        layouts.lg[0].x = 6;
        layouts.lg[0].w = 6;
        state.on_layout_change(layouts);

        assert_eq!(state.layouts.lg[0].x, 6);
        // A drag at lg does not re-derive the other breakpoints.
        assert_eq!(state.layouts.md, md_before);
    }

    // -- Save preconditions -------------------------------------------------

    #[test]
    fn empty_name_blocks_persistence() {
        let state = DashboardState::new();
        assert!(state.validate_for_save().is_err());

        let mut named = DashboardState::new();
        named.name = "Sales".into();
        assert!(named.validate_for_save().is_ok());

        let mut blank = DashboardState::new();
        blank.name = "   ".into();
        assert!(blank.validate_for_save().is_err());
    }

    // -- Serialization ------------------------------------------------------

    #[test]
    fn state_round_trips_through_json() {
        let mut state = DashboardState::new();
        state.name = "Sales".into();
        state.description = "Weekly overview".into();
        let id = state.add_widget(ChartKind::Bar);
        state.bind_query(&id, 42);

        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: DashboardState = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, state);
    }
}
