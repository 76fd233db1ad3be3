//! Modal shell around the intake form.
//!
//! The shell gates visibility and owns the form's lifetime: opening creates a
//! fresh [`IntakeController`], closing drops it. Clicks on the backdrop
//! dismiss the modal; clicks inside the content area never do. After an
//! accepted submission the shell closes itself and queues a success
//! [`Notice`] that stays until it is acknowledged.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::intake::{IntakeController, IntakePolicy, SubmitHandler, SubmitOutcome};

/// Title of the acknowledgment shown after an accepted submission.
pub const SUCCESS_TITLE: &str = "Success!";

/// Text of the acknowledgment shown after an accepted submission.
pub const SUCCESS_TEXT: &str = "Flight insurance has been processed successfully";

/// Where a pointer click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed area around the dialog.
    Backdrop,
    /// Anywhere inside the dialog content.
    Content,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something completed.
    Success,
    /// Something was refused.
    Error,
}

/// A transient message waiting for the user to acknowledge it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub text: String,
}

impl Notice {
    /// A success notice.
    #[must_use]
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            text: text.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.text)
    }
}

/// Visibility and lifecycle container for the intake form.
#[derive(Debug, Clone)]
pub struct ModalShell {
    policy: IntakePolicy,
    today: Option<fn() -> NaiveDate>,
    controller: Option<IntakeController>,
    notice: Option<Notice>,
}

impl ModalShell {
    /// Create a closed shell whose forms follow `policy`.
    #[must_use]
    pub fn new(policy: IntakePolicy) -> Self {
        Self {
            policy,
            today: None,
            controller: None,
            notice: None,
        }
    }

    /// Create a closed shell whose forms use a custom "today".
    #[must_use]
    pub fn with_today(policy: IntakePolicy, today: fn() -> NaiveDate) -> Self {
        Self {
            today: Some(today),
            ..Self::new(policy)
        }
    }

    /// Whether the modal is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.controller.is_some()
    }

    /// Show the modal with an empty form. Opening an open modal keeps its form.
    pub fn open(&mut self) -> bool {
        if self.controller.is_some() {
            return false;
        }
        let policy = self.policy.clone();
        let controller = match self.today {
            Some(today) => IntakeController::with_today(policy, today),
            None => IntakeController::new(policy),
        };
        self.controller = Some(controller);
        debug!("intake modal opened");
        true
    }

    /// Hide the modal and discard the form.
    pub fn close(&mut self) -> bool {
        let was_open = self.controller.take().is_some();
        if was_open {
            debug!("intake modal closed");
        }
        was_open
    }

    /// Handle a click. Only backdrop clicks dismiss.
    pub fn click(&mut self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Backdrop => self.close(),
            PointerTarget::Content => false,
        }
    }

    /// The form controller while the modal is open.
    #[must_use]
    pub fn controller(&self) -> Option<&IntakeController> {
        self.controller.as_ref()
    }

    /// Mutable access to the form controller while the modal is open.
    pub fn controller_mut(&mut self) -> Option<&mut IntakeController> {
        self.controller.as_mut()
    }

    /// Submit the form.
    ///
    /// On acceptance the modal closes and a success notice is queued.
    pub fn submit<H>(&mut self, handler: &mut H) -> SubmitOutcome
    where
        H: SubmitHandler + ?Sized,
    {
        let Some(controller) = self.controller.as_mut() else {
            warn!("submit ignored: intake modal is closed");
            return SubmitOutcome::Ignored;
        };

        let outcome = controller.submit(handler);
        if outcome.is_accepted() {
            self.close();
            self.notice = Some(Notice::success(SUCCESS_TITLE, SUCCESS_TEXT));
        }
        outcome
    }

    /// The acknowledgment waiting to be dismissed, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Dismiss the pending acknowledgment and return it.
    pub fn acknowledge(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::IntakeField;
    use crate::record::FlightInsuranceRecord;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn shell() -> ModalShell {
        ModalShell::with_today(IntakePolicy::default(), fixed_today)
    }

    fn fill(shell: &mut ModalShell) {
        let c = shell.controller_mut().unwrap();
        c.set_field(IntakeField::AirplaneName, "A320");
        c.set_field(IntakeField::AircraftCode, "DAL");
        c.set_field(IntakeField::FlightNumber, "DL456");
        c.set_field(IntakeField::FlightDate, "2026-10-18");
        c.set_field(IntakeField::InsurancePrice, "0.10");
        c.add_wallet("0x1234567890123456789012345678901234567890");
    }

    #[test]
    fn test_starts_closed() {
        let s = shell();
        assert!(!s.is_open());
        assert!(s.controller().is_none());
        assert!(s.notice().is_none());
    }

    #[test]
    fn test_open_creates_fresh_form() {
        let mut s = shell();
        assert!(s.open());
        assert!(s.is_open());
        assert!(s.controller().unwrap().form().is_pristine());
    }

    #[test]
    fn test_open_twice_keeps_form() {
        let mut s = shell();
        s.open();
        s.controller_mut()
            .unwrap()
            .set_field(IntakeField::FlightNumber, "AA123");
        assert!(!s.open());
        assert_eq!(
            s.controller().unwrap().form().value(IntakeField::FlightNumber),
            "AA123"
        );
    }

    #[test]
    fn test_close_discards_form() {
        let mut s = shell();
        s.open();
        fill(&mut s);
        assert!(s.close());
        assert!(!s.close());

        s.open();
        assert!(s.controller().unwrap().form().is_pristine());
    }

    #[test]
    fn test_backdrop_click_dismisses() {
        let mut s = shell();
        s.open();
        assert!(s.click(PointerTarget::Backdrop));
        assert!(!s.is_open());
    }

    #[test]
    fn test_content_click_does_not_dismiss() {
        let mut s = shell();
        s.open();
        assert!(!s.click(PointerTarget::Content));
        assert!(s.is_open());
    }

    #[test]
    fn test_accepted_submit_closes_and_notifies() {
        let mut s = shell();
        s.open();
        fill(&mut s);

        let mut received: Vec<FlightInsuranceRecord> = Vec::new();
        let outcome = s.submit(&mut |r: FlightInsuranceRecord| received.push(r));

        assert!(outcome.is_accepted());
        assert_eq!(received.len(), 1);
        assert!(!s.is_open());
        let notice = s.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.text, SUCCESS_TEXT);

        assert!(s.acknowledge().is_some());
        assert!(s.notice().is_none());
    }

    #[test]
    fn test_rejected_submit_stays_open() {
        let mut s = shell();
        s.open();

        let outcome = s.submit(&mut |_: FlightInsuranceRecord| panic!("must not be called"));

        assert!(!outcome.is_accepted());
        assert!(s.is_open());
        assert!(s.notice().is_none());
        assert!(s.controller().unwrap().form().error().is_some());
    }

    #[test]
    fn test_submit_while_closed_is_ignored() {
        let mut s = shell();
        let outcome = s.submit(&mut |_: FlightInsuranceRecord| panic!("must not be called"));
        assert_eq!(outcome, SubmitOutcome::Ignored);
    }

    #[test]
    fn test_notice_display() {
        let notice = Notice::error("Error!", "Please connect your wallet to proceed");
        assert_eq!(
            notice.to_string(),
            "Error! Please connect your wallet to proceed"
        );
    }
}
