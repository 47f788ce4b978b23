use crate::{Backend, BinOp, ErrorContext, ErrorKind, Fault, MathMode, Misuse, OpKind};

const ADD: OpKind = OpKind::Binary(BinOp::Add);

#[test]
fn starts_unset() {
    let mut ctx = ErrorContext::capture();
    assert_eq!(ctx.mode(), MathMode::Capture);
    assert_eq!(ctx.backend(), Backend::Simulation);
    assert!(!ctx.has_error());
    assert_eq!(ctx.finish(), Ok(None));
}

#[test]
fn first_error_wins() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::Overflow, ADD).unwrap();
    ctx.report(ErrorKind::DivideByZero, ADD).unwrap();
    ctx.report(ErrorKind::Underflow, ADD).unwrap();
    assert_eq!(ctx.error(), Some(ErrorKind::Overflow));
}

#[test]
fn peek_between_failures_keeps_first_error() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::Overflow, ADD).unwrap();
    assert_eq!(ctx.peek(), Some(ErrorKind::Overflow));
    ctx.report(ErrorKind::DivideByZero, ADD).unwrap();
    assert_eq!(ctx.error(), Some(ErrorKind::Overflow));
    ctx.clear();
    assert_eq!(ctx.error(), None);
}

#[test]
fn read_then_clear() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::Underflow, ADD).unwrap();
    assert!(ctx.has_error());
    ctx.clear();
    assert!(!ctx.has_error());

    ctx.report(ErrorKind::DivideByZero, ADD).unwrap();
    assert_eq!(ctx.error(), Some(ErrorKind::DivideByZero));
}

#[test]
fn peek_does_not_count_as_read() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::Overflow, ADD).unwrap();
    assert_eq!(ctx.peek(), Some(ErrorKind::Overflow));
    assert!(ctx.is_unread());
    assert_eq!(ctx.try_clear(), Err(Misuse::ClearedWithoutRead));
    ctx.disregard_any_error();
}

#[test]
#[should_panic(expected = "cleared before its error was read")]
fn clear_without_read_faults() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::Overflow, ADD).unwrap();
    ctx.clear();
}

#[test]
fn clear_without_error_is_fine() {
    let mut ctx = ErrorContext::capture();
    ctx.clear();
    assert_eq!(ctx.finish(), Ok(None));
}

#[test]
#[should_panic(expected = "left scope with an unread overflow error")]
fn unread_error_at_scope_exit_faults() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::Overflow, ADD).unwrap();
}

#[test]
fn finish_reports_unread_error() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::TruncationDataLoss, ADD).unwrap();
    assert_eq!(
        ctx.finish(),
        Err(Misuse::UnreadAtScopeExit(ErrorKind::TruncationDataLoss))
    );
}

#[test]
fn finish_returns_read_error() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::ShiftOutOfRange, ADD).unwrap();
    assert!(ctx.has_error());
    assert_eq!(ctx.finish(), Ok(Some(ErrorKind::ShiftOutOfRange)));
}

#[test]
fn disregard_drops_unread_error() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::Overflow, ADD).unwrap();
    ctx.disregard_any_error();
    assert!(!ctx.has_error());
}

#[test]
fn defer_check_keeps_error_sticky() {
    let mut ctx = ErrorContext::capture();
    ctx.report(ErrorKind::Overflow, ADD).unwrap();
    ctx.defer_check();
    assert!(!ctx.is_unread());
    assert_eq!(ctx.peek(), Some(ErrorKind::Overflow));

    // A later failure loses to the sticky one and needs no new read.
    ctx.report(ErrorKind::Underflow, ADD).unwrap();
    assert!(!ctx.is_unread());
    assert_eq!(ctx.finish(), Ok(Some(ErrorKind::Overflow)));
}

#[test]
fn unsafe_simulation_faults() {
    let mut ctx = ErrorContext::unsafe_mode();
    let fault = ctx.report(ErrorKind::Overflow, ADD).unwrap_err();
    assert_eq!(
        fault,
        Fault::Unsafe {
            kind: ErrorKind::Overflow,
            op: ADD
        }
    );
    assert_eq!(fault.to_string(), "overflow in `+` under unsafe math mode");
    assert_eq!(fault.misuse(), None);
    assert!(!ctx.has_error());
}

#[test]
fn unsafe_generated_does_not_check() {
    let mut ctx = ErrorContext::unsafe_mode().with_backend(Backend::Generated);
    ctx.report(ErrorKind::DivideByZero, ADD).unwrap();
    assert!(!ctx.has_error());
}

#[test]
fn misuse_fault_message() {
    let fault = Fault::from(Misuse::ClearedWithoutRead);
    assert_eq!(
        fault.to_string(),
        "error context misuse: error context cleared before its error was read"
    );
    assert_eq!(fault.misuse(), Some(Misuse::ClearedWithoutRead));
}
