// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Acknowledgeable error notices.
//!
//! The notifier is the only channel through which user-visible failures
//! surface. It keeps a FIFO of notices; the frontmost one is rendered as an
//! overlay on both surfaces, after the display lists and pointer cursors.
//! Acknowledgement dismisses the front notice and is reported to the caller,
//! which performs the terminal error-acknowledged transition.

use alloc::collections::VecDeque;
use alloc::string::String;

use crate::backend::DrawSurface;

/// One acknowledgeable message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorNotice {
    /// Short heading, e.g. `"Error:"`.
    pub title: String,
    /// Message body.
    pub message: String,
}

/// Overlay shim that displays [`ErrorNotice`]s and tracks acknowledgement.
#[derive(Debug, Default)]
pub struct ErrorNotifier {
    queue: VecDeque<ErrorNotice>,
    ticks_shown: u64,
}

impl ErrorNotifier {
    /// Creates an idle notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notice. It becomes visible once earlier notices are
    /// acknowledged.
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.queue.push_back(ErrorNotice {
            title: title.into(),
            message: message.into(),
        });
    }

    /// Returns the notice currently displayed, if any.
    #[must_use]
    pub fn current(&self) -> Option<&ErrorNotice> {
        self.queue.front()
    }

    /// Whether a notice is currently displayed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Number of frames the current notice has been visible.
    #[must_use]
    pub fn ticks_shown(&self) -> u64 {
        self.ticks_shown
    }

    /// Advances the internal timer by one frame. Called from every
    /// input-update pass, whether or not a notice is visible.
    pub fn advance_timer(&mut self) {
        if self.is_active() {
            self.ticks_shown += 1;
        }
    }

    /// Renders the current notice as an overlay, if any.
    pub fn draw_on(&self, surface: &mut dyn DrawSurface) {
        if let Some(notice) = self.queue.front() {
            surface.draw_notice(&notice.title, &notice.message);
        }
    }

    /// Dismisses the current notice. Returns `true` if one was dismissed.
    pub fn acknowledge(&mut self) -> bool {
        self.ticks_shown = 0;
        self.queue.pop_front().is_some()
    }

    /// Drops all queued notices and stops the timer. Teardown path.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.ticks_shown = 0;
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use kurbo::Point;

    use crate::backend::{DrawInfo, ImageHandle};
    use crate::element::ElementId;

    use super::*;

    #[derive(Default)]
    struct NoticeLog {
        notices: Vec<(String, String)>,
    }

    impl DrawSurface for NoticeLog {
        fn draw_element(&mut self, _id: ElementId, _info: &DrawInfo<'_>) {}
        fn draw_pointer(
            &mut self,
            _channel: u8,
            _position: Point,
            _angle: f64,
            _alpha: f32,
            _image: Option<ImageHandle>,
        ) {
        }
        fn draw_notice(&mut self, title: &str, message: &str) {
            self.notices.push((title.to_string(), message.to_string()));
        }
    }

    #[test]
    fn notices_are_shown_in_fifo_order() {
        let mut notifier = ErrorNotifier::new();
        notifier.show("Error:", "first");
        notifier.show("Error:", "second");

        assert_eq!(notifier.current().unwrap().message, "first");
        assert!(notifier.acknowledge());
        assert_eq!(notifier.current().unwrap().message, "second");
        assert!(notifier.acknowledge());
        assert!(!notifier.acknowledge(), "empty queue has nothing to dismiss");
    }

    #[test]
    fn timer_advances_only_while_active() {
        let mut notifier = ErrorNotifier::new();
        notifier.advance_timer();
        assert_eq!(notifier.ticks_shown(), 0);

        notifier.show("Error:", "oops");
        notifier.advance_timer();
        notifier.advance_timer();
        assert_eq!(notifier.ticks_shown(), 2);

        notifier.acknowledge();
        assert_eq!(notifier.ticks_shown(), 0);
    }

    #[test]
    fn draw_emits_front_notice_only() {
        let mut notifier = ErrorNotifier::new();
        let mut log = NoticeLog::default();

        notifier.draw_on(&mut log);
        assert!(log.notices.is_empty());

        notifier.show("Error:", "No installable content found.");
        notifier.draw_on(&mut log);
        assert_eq!(
            log.notices,
            [("Error:".to_string(), "No installable content found.".to_string())]
        );
    }
}
