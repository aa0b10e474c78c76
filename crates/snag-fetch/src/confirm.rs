//! Confirmation capability for destructive or remote operations.

/// Answers a yes/no question before an operation proceeds.
///
/// Keeps terminal I/O out of the core operations: the CLI injects an
/// interactive implementation, tests and scripted callers use
/// [`AutoConfirm`].
pub trait Confirmation {
    fn confirm(&self, question: &str) -> bool;
}

/// Confirmation that always answers yes.
pub struct AutoConfirm;

impl Confirmation for AutoConfirm {
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    pub struct ScriptedConfirm {
        pub answer: bool,
        pub asked: RefCell<Vec<String>>,
    }

    impl Confirmation for ScriptedConfirm {
        fn confirm(&self, question: &str) -> bool {
            self.asked.borrow_mut().push(question.to_string());
            self.answer
        }
    }

    #[test]
    fn test_auto_confirm_always_yes() {
        assert!(AutoConfirm.confirm("Remove /tmp/x"));
    }

    #[test]
    fn test_scripted_confirm_records_question() {
        let confirm = ScriptedConfirm {
            answer: false,
            asked: RefCell::new(Vec::new()),
        };
        assert!(!confirm.confirm("Remove /tmp/x"));
        assert_eq!(confirm.asked.borrow().as_slice(), ["Remove /tmp/x"]);
    }
}
