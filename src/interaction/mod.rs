use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, PieArc};

/// Pointer events a scene node can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    MouseOver,
    MouseOut,
    MouseMove,
    Click,
}

impl EventKind {
    pub const ALL: [Self; 4] = [Self::MouseOver, Self::MouseOut, Self::MouseMove, Self::Click];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
            Self::MouseMove => "mousemove",
            Self::Click => "click",
        }
    }
}

/// Host-side pointer event forwarded to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEvent {
    pub kind: EventKind,
    pub client_x: f64,
    pub client_y: f64,
}

impl ChartEvent {
    #[must_use]
    pub fn new(kind: EventKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            client_x,
            client_y,
        }
    }
}

/// Value bound to a scene node and handed back to event handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    Point(DataPoint),
    Series(Vec<DataPoint>),
    Slice(PieArc),
}

impl Datum {
    #[must_use]
    pub fn as_point(&self) -> Option<&DataPoint> {
        match self {
            Self::Point(point) => Some(point),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> Option<&PieArc> {
        match self {
            Self::Slice(arc) => Some(arc),
            _ => None,
        }
    }
}

pub type EventHandler = Arc<dyn Fn(&Datum, &ChartEvent) + Send + Sync + 'static>;

/// The four pointer callbacks a chart accepts. Unset handlers are no-ops.
#[derive(Clone)]
pub struct EventHandlers {
    pub mouse_over: EventHandler,
    pub mouse_out: EventHandler,
    pub mouse_move: EventHandler,
    pub click: EventHandler,
}

impl Default for EventHandlers {
    fn default() -> Self {
        Self {
            mouse_over: noop_handler(),
            mouse_out: noop_handler(),
            mouse_move: noop_handler(),
            click: noop_handler(),
        }
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers").finish_non_exhaustive()
    }
}

impl EventHandlers {
    #[must_use]
    pub fn with_mouse_over(mut self, handler: EventHandler) -> Self {
        self.mouse_over = handler;
        self
    }

    #[must_use]
    pub fn with_mouse_out(mut self, handler: EventHandler) -> Self {
        self.mouse_out = handler;
        self
    }

    #[must_use]
    pub fn with_mouse_move(mut self, handler: EventHandler) -> Self {
        self.mouse_move = handler;
        self
    }

    #[must_use]
    pub fn with_click(mut self, handler: EventHandler) -> Self {
        self.click = handler;
        self
    }

    #[must_use]
    pub fn handler(&self, kind: EventKind) -> &EventHandler {
        match kind {
            EventKind::MouseOver => &self.mouse_over,
            EventKind::MouseOut => &self.mouse_out,
            EventKind::MouseMove => &self.mouse_move,
            EventKind::Click => &self.click,
        }
    }
}

fn noop_handler() -> EventHandler {
    Arc::new(|_: &Datum, _: &ChartEvent| {})
}
