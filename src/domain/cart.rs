use derive_more::Display;
use strum::{AsRefStr, EnumString};

/// Which stepper button was pressed, as named by `data-qty-step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum StepAction {
    #[display(fmt = "plus")]
    #[strum(serialize = "plus", serialize = "+")]
    Increment,
    #[display(fmt = "minus")]
    #[strum(serialize = "minus", serialize = "-")]
    Decrement,
}

/// Quantity the server should receive after one button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSubmission {
    pub quantity: u32,
}

/// Cart line quantity stepper. Every press posts the form; the server
/// removes the line when it receives 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityStepper {
    quantity: u32,
    submitting: bool,
}

impl QuantityStepper {
    pub fn new(quantity: u32) -> Self {
        Self { quantity, submitting: false }
    }

    /// Read the quantity input; anything that is not a non-negative integer is 0.
    pub fn from_input(raw: &str) -> Self {
        Self::new(raw.trim().parse::<i64>().map(|q| q.clamp(0, u32::MAX as i64) as u32).unwrap_or(0))
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Buttons are disabled once a submission is under way.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// `None` when a submission has already been sent for this page.
    pub fn press(&mut self, action: StepAction) -> Option<StepSubmission> {
        if self.submitting {
            return None;
        }
        self.quantity = match action {
            StepAction::Increment => self.quantity.saturating_add(1),
            StepAction::Decrement => self.quantity.saturating_sub(1),
        };
        self.submitting = true;
        Some(StepSubmission { quantity: self.quantity })
    }

    /// The submission never left the page; accept presses again. The
    /// quantity already shown in the input is kept.
    pub fn release(&mut self) {
        self.submitting = false;
    }
}

/// Mini cart shown while the cart icon is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartPanel {
    visible: bool,
}

impl CartPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hover(&mut self, inside: bool) -> &'static str {
        self.visible = inside;
        if inside { "block" } else { "none" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn minus_at_zero_stays_zero_and_still_submits() {
        let mut stepper = QuantityStepper::new(0);
        assert_eq!(stepper.press(StepAction::Decrement), Some(StepSubmission { quantity: 0 }));
        assert!(stepper.is_submitting());
    }

    #[test]
    fn second_press_is_ignored_while_submitting() {
        let mut stepper = QuantityStepper::from_input(" 2 ");
        assert_eq!(stepper.press(StepAction::Increment), Some(StepSubmission { quantity: 3 }));
        assert_eq!(stepper.press(StepAction::Increment), None);
        assert_eq!(stepper.quantity(), 3);
    }

    #[test]
    fn failed_submission_unlocks_the_stepper() {
        let mut stepper = QuantityStepper::new(2);
        assert!(stepper.press(StepAction::Decrement).is_some());
        stepper.release();
        assert!(!stepper.is_submitting());
        assert_eq!(stepper.press(StepAction::Decrement), Some(StepSubmission { quantity: 0 }));
    }

    #[test]
    fn junk_input_reads_as_zero() {
        assert_eq!(QuantityStepper::from_input("-4").quantity(), 0);
        assert_eq!(QuantityStepper::from_input("lots").quantity(), 0);
    }

    #[test]
    fn step_names_parse() {
        assert_eq!(StepAction::from_str("minus").unwrap(), StepAction::Decrement);
        assert_eq!(StepAction::from_str("+").unwrap(), StepAction::Increment);
    }

    #[test]
    fn panel_follows_hover() {
        let mut panel = CartPanel::default();
        assert_eq!(panel.hover(true), "block");
        assert!(panel.is_visible());
        assert_eq!(panel.hover(false), "none");
    }
}
