use std::fmt;

use shipdesk_shared::ShipmentId;

/// The five wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    Details = 1,
    Delivery = 2,
    Photos = 3,
    Pickup = 4,
    Dimensions = 5,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Details;
    pub const LAST: WizardStep = WizardStep::Dimensions;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Details),
            2 => Some(Self::Delivery),
            3 => Some(Self::Photos),
            4 => Some(Self::Pickup),
            5 => Some(Self::Dimensions),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Details => "Package Details",
            Self::Delivery => "Delivery",
            Self::Photos => "Photos",
            Self::Pickup => "Pickup",
            Self::Dimensions => "Dimensions",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

/// What the host should do after a navigation or a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Now on this step after a confirmed submission or a plain move.
    Moved(WizardStep),
    /// Now on this step after skipping the previous one unsubmitted.
    Skipped(WizardStep),
    /// Past the last step: show the shipment detail view.
    Completed(Option<ShipmentId>),
    /// Back from the first step: leave the wizard via navigation history.
    LeaveWizard,
}

impl Transition {
    /// The step now active, if the wizard is still on screen.
    pub fn step(&self) -> Option<WizardStep> {
        match self {
            Self::Moved(step) | Self::Skipped(step) => Some(*step),
            Self::Completed(_) | Self::LeaveWizard => None,
        }
    }
}
