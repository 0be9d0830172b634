/// Receiver of the "how many valid emails" notification.
///
/// The count itself is always available through
/// [`EmailsInput::valid_emails_count`](crate::EmailsInput::valid_emails_count);
/// a notifier is only needed by hosts that want to show it to the user.
pub trait CountNotifier {
    fn notify_count(&mut self, count: usize);
}

impl<F: FnMut(usize)> CountNotifier for F {
    fn notify_count(&mut self, count: usize) {
        self(count)
    }
}

/// Logs the count at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl CountNotifier for LogNotifier {
    fn notify_count(&mut self, count: usize) {
        log::info!(target: "emails_input", "valid emails: {count}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notify(notifier: &mut dyn CountNotifier, count: usize) {
        notifier.notify_count(count);
    }

    #[test]
    fn closures_and_log_notifier_both_receive_counts() {
        let mut seen = Vec::new();
        let mut record = |count: usize| seen.push(count);

        notify(&mut record, 3);
        notify(&mut LogNotifier, 3);
        notify(&mut record, 0);

        assert_eq!(seen, [3, 0]);
    }
}
