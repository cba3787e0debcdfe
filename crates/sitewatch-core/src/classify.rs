// ── Presentation descriptors ──
//
// One table per tagged variant. Every renderer (table, detail view,
// watch output) looks styling up here instead of matching on tags.

use serde::Serialize;

use crate::model::{Alert, AlertSeverity, AlertStatus, AlertType};

/// Abstract color role; front ends map it onto their own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Red,
    Amber,
    Blue,
    Green,
    Gray,
}

/// How a tag is shown to an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub label: &'static str,
    pub symbol: &'static str,
    pub tone: Tone,
}

const fn desc(label: &'static str, symbol: &'static str, tone: Tone) -> Descriptor {
    Descriptor {
        label,
        symbol,
        tone,
    }
}

// Indexed by variant discriminant; unknown type tags share the last row.
static TYPE_TABLE: [Descriptor; 5] = [
    desc("Security", "🛡", Tone::Red),
    desc("Temperature", "🌡", Tone::Amber),
    desc("Power", "⚡", Tone::Amber),
    desc("Maintenance", "🔧", Tone::Blue),
    desc("Other", "🔔", Tone::Gray),
];

static SEVERITY_TABLE: [Descriptor; 3] = [
    desc("High", "●", Tone::Red),
    desc("Medium", "●", Tone::Amber),
    desc("Low", "●", Tone::Blue),
];

static STATUS_TABLE: [Descriptor; 2] = [
    desc("Active", "○", Tone::Red),
    desc("Resolved", "✓", Tone::Green),
];

static ACKNOWLEDGED: Descriptor = desc("Acknowledged", "◐", Tone::Gray);

/// Lookup of a presentation descriptor for a tagged value.
pub trait Describe {
    fn descriptor(&self) -> &'static Descriptor;
}

impl Describe for AlertType {
    fn descriptor(&self) -> &'static Descriptor {
        let index = match self {
            AlertType::Security => 0,
            AlertType::Temperature => 1,
            AlertType::Power => 2,
            AlertType::Maintenance => 3,
            AlertType::Other(_) => 4,
        };
        &TYPE_TABLE[index]
    }
}

impl Describe for AlertSeverity {
    fn descriptor(&self) -> &'static Descriptor {
        &SEVERITY_TABLE[*self as usize]
    }
}

impl Describe for AlertStatus {
    fn descriptor(&self) -> &'static Descriptor {
        &STATUS_TABLE[*self as usize]
    }
}

/// Badge for an alert's combined status/acknowledgement state.
pub fn state_badge(alert: &Alert) -> &'static Descriptor {
    if alert.is_active() && alert.acknowledged {
        &ACKNOWLEDGED
    } else {
        alert.status.descriptor()
    }
}
